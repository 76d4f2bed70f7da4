//! Attendant Care Cost Engine
//!
//! This crate converts attendant care activity time entries (minutes per
//! occurrence and occurrences per week) into weekly and monthly hours and
//! monthly and annual costs across the three care levels of an attendant
//! care needs assessment.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
