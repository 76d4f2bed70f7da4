//! Configuration for the Attendant Care Cost Engine.
//!
//! This module provides the immutable [`CostConfig`] the calculations read,
//! the loader for the YAML rate schedule, and the server settings.
//!
//! # Example
//!
//! ```no_run
//! use attendant_care_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/attendant_care").unwrap();
//! println!("Loaded schedule: {}", config.metadata().name);
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::{BIND_ADDR_VAR, CONFIG_DIR_VAR, ServerSettings};
pub use types::{
    CostConfig, DEFAULT_LEVEL_1_RATE, DEFAULT_LEVEL_2_RATE, DEFAULT_LEVEL_3_RATE, RateConfig,
    ScheduleConfig, ScheduleMetadata, TierDefinition, TierRates, TiersConfig, WEEKLY_TO_MONTHLY,
};
