//! HTTP API module for the Attendant Care Cost Engine.
//!
//! This module provides the REST API endpoints for costing attendant care
//! forms and normalizing their weekly totals.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ScheduleQuery;
pub use response::{ApiError, ApiErrorResponse, RatesResponse};
pub use state::AppState;
