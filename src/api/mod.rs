//! HTTP API module for the Hifz Engine.
//!
//! This module provides stateless compute endpoints around the engine:
//! coverage, completion rates, mastery transitions, visibility checks and
//! week numbering.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CoverageRequest, RateRequest, TransitionRequest, VisibilityRequest, WeekQuery};
pub use response::{ApiError, CoverageResponse, RateResponse, WeekResponse};
pub use state::AppState;
