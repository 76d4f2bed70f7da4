//! HTTP request handlers for the Attendant Care Cost Engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_audited_summary, refresh_total_minutes};
use crate::models::{CalculationResult, FormData};

use super::request::ScheduleQuery;
use super::response::{ApiError, ApiErrorResponse, RatesResponse};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/summary", post(summary_handler))
        .route("/normalize", post(normalize_handler))
        .route("/rates", get(rates_handler))
        .with_state(state)
}

/// Handler for POST /summary.
///
/// Costs the submitted form with the rates in force on the requested date.
async fn summary_handler(
    State(state): State<AppState>,
    query: Result<Query<ScheduleQuery>, QueryRejection>,
    payload: Result<Json<FormData>, JsonRejection>,
) -> ApiResult<CalculationResult> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let date = requested_date(correlation_id, query)?;
    let form = parse_form(correlation_id, payload)?;

    let rates = state.config().rates_for(date).map_err(|err| {
        warn!(correlation_id = %correlation_id, date = %date, "No rate schedule in force");
        ApiErrorResponse::from(err)
    })?;
    let config = rates.cost_config();

    let start_time = Instant::now();
    let mut audited = calculate_audited_summary(&form, None, &config);
    let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);
    audited.audit_trace.duration_us = duration_us;

    info!(
        correlation_id = %correlation_id,
        effective_date = %rates.effective_date,
        total_monthly_cost = %audited.summary.summary.total_monthly_cost,
        warnings = audited.audit_trace.warnings.len(),
        duration_us,
        "Summary calculated"
    );

    Ok(Json(CalculationResult {
        calculation_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        effective_date: rates.effective_date,
        summary: audited.summary,
        audit_trace: audited.audit_trace,
    }))
}

/// Handler for POST /normalize.
///
/// Returns the submitted form with every activity's `totalMinutes`
/// recomputed from `minutes` and `timesPerWeek`.
async fn normalize_handler(payload: Result<Json<FormData>, JsonRejection>) -> ApiResult<FormData> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing normalize request");

    let mut form = parse_form(correlation_id, payload)?;
    let refreshed = refresh_total_minutes(&mut form);

    info!(correlation_id = %correlation_id, refreshed, "Form normalized");
    Ok(Json(form))
}

/// Handler for GET /rates.
///
/// Reports the framework rates in force on the requested date.
async fn rates_handler(
    State(state): State<AppState>,
    query: Result<Query<ScheduleQuery>, QueryRejection>,
) -> ApiResult<RatesResponse> {
    let correlation_id = Uuid::new_v4();
    let date = requested_date(correlation_id, query)?;

    let rates = state.config().rates_for(date).map_err(|err| {
        warn!(correlation_id = %correlation_id, date = %date, "No rate schedule in force");
        ApiErrorResponse::from(err)
    })?;

    info!(
        correlation_id = %correlation_id,
        requested_date = %date,
        effective_date = %rates.effective_date,
        "Rates lookup"
    );

    Ok(Json(RatesResponse {
        schedule: state.config().metadata().code.clone(),
        requested_date: date,
        effective_date: rates.effective_date,
        weekly_to_monthly: rates.weekly_to_monthly,
        hourly: rates.hourly,
    }))
}

fn requested_date(
    correlation_id: Uuid,
    query: Result<Query<ScheduleQuery>, QueryRejection>,
) -> Result<NaiveDate, ApiErrorResponse> {
    match query {
        Ok(Query(query)) => Ok(query
            .effective_date
            .unwrap_or_else(|| Utc::now().date_naive())),
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid query string"
            );
            Err(ApiErrorResponse::bad_request(ApiError::invalid_query(
                rejection.body_text(),
            )))
        }
    }
}

fn parse_form(
    correlation_id: Uuid,
    payload: Result<Json<FormData>, JsonRejection>,
) -> Result<FormData, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(form)) => return Ok(form),
        Err(rejection) => rejection,
    };

    let error = match rejection {
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
        other => {
            warn!(
                correlation_id = %correlation_id,
                error = %other.body_text(),
                "Request body rejected"
            );
            ApiError::malformed_json(other.body_text())
        }
    };
    Err(ApiErrorResponse::bad_request(error))
}
