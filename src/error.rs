//! Error types for the Attendant Care Cost Engine.
//!
//! The calculation functions never fail: malformed input degrades to zero.
//! These errors cover the layers around the engine, namely loading the
//! rate schedule, reading server settings and serving HTTP requests.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendant Care Cost Engine.
///
/// # Example
///
/// ```
/// use attendant_care_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/schedule.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/schedule.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate schedule was in force on the given date.
    #[error("No rate schedule in force on {date}")]
    ScheduleNotInForce {
        /// The date for which rates were requested.
        date: NaiveDate,
    },

    /// A configured rate or conversion factor was unusable.
    #[error("Invalid rate for {tier}: {message}")]
    InvalidRate {
        /// The care tier, or the schedule itself for the conversion factor.
        tier: String,
        /// A description of what made the rate invalid.
        message: String,
    },

    /// A server setting could not be interpreted.
    #[error("Invalid setting '{name}': {message}")]
    InvalidSetting {
        /// The environment variable or setting name.
        name: String,
        /// A description of the problem.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
