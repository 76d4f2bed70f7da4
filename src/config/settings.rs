//! Server settings read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{EngineError, EngineResult};

/// Environment variable naming the rate schedule directory.
pub const CONFIG_DIR_VAR: &str = "CARE_ENGINE_CONFIG_DIR";
/// Environment variable naming the address to listen on.
pub const BIND_ADDR_VAR: &str = "CARE_ENGINE_BIND";

const DEFAULT_CONFIG_DIR: &str = "./config/attendant_care";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Settings for running the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Directory holding the rate schedule.
    pub config_dir: PathBuf,
    /// Socket address to listen on.
    pub bind_addr: SocketAddr,
}

impl ServerSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> EngineResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset
    /// or blank variables.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let config_dir = read(CONFIG_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

        let bind_raw = read(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| EngineError::InvalidSetting {
                name: BIND_ADDR_VAR.to_string(),
                message: format!("'{}': {}", bind_raw, e),
            })?;

        Ok(Self {
            config_dir,
            bind_addr,
        })
    }
}
