//! Request types for the Attendant Care Cost Engine API.
//!
//! Request bodies are [`FormData`](crate::models::FormData) as stored by the
//! form layer, so the only API-specific request type is the query string.

use chrono::NaiveDate;
use serde::Deserialize;

/// Query parameters selecting the rate schedule for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ScheduleQuery {
    /// Date whose rates apply. Defaults to today.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
}
