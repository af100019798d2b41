//! HTTP request handlers for the Hifz Engine API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler applies the visibility guard and boundary validation, then runs
//! the pure engine function and wraps its result.

use std::collections::BTreeSet;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    CompletionRows, MasteryTransition, StatusChange, apply_transition, check_visibility,
    compute_coverage_report, compute_rate, iso_week_id, local_week_id, local_week_start,
    mastery_summary, reconcile_mirrors, require_edit, require_view, validate_date,
    validate_log_entries, validate_weekly_records,
};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, DataKind, MasteryStatus, PeriodKind};

use super::request::{
    CoverageRequest, RateRequest, TransitionRequest, VisibilityRequest, WeekQuery,
};
use super::response::{ApiError, ApiErrorResponse, CoverageResponse, RateResponse, WeekResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/coverage", post(coverage_handler))
        .route("/rates", post(rates_handler))
        .route("/mastery/transition", post(transition_handler))
        .route("/visibility", post(visibility_handler))
        .route("/calendar/week", get(week_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn api_error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    api_error_response(err.into())
}

fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    api_error_response(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    })
}

/// Handler for POST /coverage.
///
/// Returns surah, corpus and collection coverage plus the mastery summary.
async fn coverage_handler(
    State(state): State<AppState>,
    payload: Result<Json<CoverageRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing coverage request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match compute_coverage(&request, state.config()) {
        Ok(response) => {
            let completed_surahs = response
                .coverage
                .surahs
                .iter()
                .filter(|s| s.is_complete)
                .count();
            info!(
                correlation_id = %correlation_id,
                owner_id = %request.owner.user_id,
                entries_count = request.entries.len(),
                completed_surahs,
                duration_us = start_time.elapsed().as_micros(),
                "Coverage computed"
            );
            json_response(response)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn compute_coverage(
    request: &CoverageRequest,
    config: &ConfigLoader,
) -> EngineResult<CoverageResponse> {
    require_view(&request.viewer, &request.owner, DataKind::Progress)?;
    validate_log_entries(&request.entries, config.surahs())?;

    let owner_id = &request.owner.user_id;
    // Without records the stored mirror entries are taken as they are
    let entries = if request.mastery_records.is_empty() {
        request.entries.clone()
    } else {
        reconcile_mirrors(&request.mastery_records, config.surahs(), &request.entries)?
    };

    Ok(CoverageResponse {
        coverage: compute_coverage_report(
            owner_id,
            &request.programs,
            config.surahs(),
            config.collections(),
            &entries,
        ),
        mastery: mastery_summary(owner_id, &request.mastery_records),
    })
}

/// Handler for POST /rates.
async fn rates_handler(payload: Result<Json<RateRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing rate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match compute_rates(&request, Utc::now().date_naive()) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                owner_id = %request.owner.user_id,
                period_start = %response.report.period.start,
                effective_end = %response.report.effective_end,
                attendance_visible = response.attendance_visible,
                duration_us = start_time.elapsed().as_micros(),
                "Rates computed"
            );
            json_response(response)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn compute_rates(request: &RateRequest, server_today: NaiveDate) -> EngineResult<RateResponse> {
    require_view(&request.viewer, &request.owner, DataKind::Stats)?;
    let kind: PeriodKind = request.period_kind.parse()?;
    let today = request.today.unwrap_or(server_today);
    validate_date(request.anchor)?;
    validate_date(today)?;
    validate_weekly_records(&request.objective_completions, &request.attendance)?;

    let owner_id = &request.owner.user_id;
    let attendance_visible =
        check_visibility(&request.viewer, &request.owner, DataKind::Attendance).can_view;
    let attendance: &[AttendanceRecord] = if attendance_visible {
        &request.attendance
    } else {
        &[]
    };

    let objectives: Vec<String> = if request.objectives.is_empty() {
        request
            .objective_completions
            .iter()
            .filter(|row| &row.owner_id == owner_id)
            .map(|row| row.objective.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    } else {
        request.objectives.clone()
    };

    let report = compute_rate(
        owner_id,
        kind,
        request.anchor,
        today,
        &request.programs,
        &objectives,
        &CompletionRows {
            daily: &request.daily,
            objectives: &request.objective_completions,
            attendance,
        },
    );

    Ok(RateResponse {
        report,
        attendance_visible,
    })
}

/// Handler for POST /mastery/transition.
///
/// Returns the record to store and the mirror action to persist with it.
async fn transition_handler(
    State(state): State<AppState>,
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing mastery transition");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_transition(&request, state.config(), Utc::now()) {
        Ok(transition) => {
            info!(
                correlation_id = %correlation_id,
                owner_id = %transition.record.owner_id,
                surah = transition.record.surah_number,
                status = %transition.record.status,
                outcome = ?transition.outcome,
                duration_us = start_time.elapsed().as_micros(),
                "Mastery transition applied"
            );
            json_response(transition)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn perform_transition(
    request: &TransitionRequest,
    config: &ConfigLoader,
    now: DateTime<Utc>,
) -> EngineResult<MasteryTransition> {
    require_edit(&request.viewer, &request.owner, DataKind::Progress)?;
    let status: MasteryStatus = request.status.parse()?;
    let surah = config.get_surah(request.surah_number)?;

    let change = StatusChange {
        owner_id: request.owner.user_id.clone(),
        surah_number: request.surah_number,
        status,
        verse_start: request.verse_start,
        verse_end: request.verse_end,
        validated_week: request.validated_week,
        source: request.source,
    };

    apply_transition(
        request.existing.as_ref(),
        &change,
        surah,
        config.downgrade_policy(),
        now,
    )
}

/// Handler for POST /visibility.
async fn visibility_handler(payload: Result<Json<VisibilityRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let visibility = check_visibility(&request.viewer, &request.owner, request.data_kind);
    info!(
        correlation_id = %correlation_id,
        viewer_id = %request.viewer.user_id,
        owner_id = %request.owner.user_id,
        data_kind = %request.data_kind,
        reason = ?visibility.reason,
        "Visibility checked"
    );
    json_response(visibility)
}

/// Handler for GET /calendar/week?date=YYYY-MM-DD.
async fn week_handler(query: Result<Query<WeekQuery>, QueryRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let date = match query {
        Ok(Query(q)) => q.date,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Invalid query string"
            );
            return api_error_response(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(body_text),
            });
        }
    };
    if let Err(err) = validate_date(date) {
        return engine_error_response(correlation_id, err);
    }

    json_response(WeekResponse {
        date,
        local_week_start: local_week_start(date),
        local: local_week_id(date),
        iso: iso_week_id(date),
    })
}
