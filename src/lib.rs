//! Coverage and Mastery Engine for Quran memorization tracking
//!
//! This crate turns raw study records (verse-range log entries, per-surah
//! mastery statuses, daily and weekly completion rows) into coverage
//! percentages, mastery transitions and period completion rates, and decides
//! who may see them.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
