// ABOUTME: Runtime configuration for Agentdash read from the environment
// ABOUTME: Log filter, seed data toggle, state file, role assignments and the default acting user

pub mod constants;

use std::env;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use constants::*;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid boolean for {var}: '{value}' (expected true/false, 1/0, yes/no)")]
    InvalidBool { var: &'static str, value: String },
    #[error("User id must not be empty ({0})")]
    EmptyUser(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Load the bundled agents, services and models at startup
    pub seed_data: bool,
    /// Snapshot file kept across runs; unset means changes last one process
    pub state_path: Option<PathBuf>,
    pub owner_ids: Vec<String>,
    pub admin_ids: Vec<String>,
    pub default_user: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            seed_data: true,
            state_path: None,
            owner_ids: Vec::new(),
            admin_ids: Vec::new(),
            default_user: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let log_filter = env::var(AGENTDASH_LOG)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let seed_data = match env::var(AGENTDASH_SEED_DATA) {
            Ok(value) => parse_bool(AGENTDASH_SEED_DATA, &value)?,
            Err(_) => true,
        };

        let state_path = env::var(AGENTDASH_STATE)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let owner_ids = env::var(AGENTDASH_OWNER_IDS)
            .map(|value| parse_id_list(&value))
            .unwrap_or_default();
        let admin_ids = env::var(AGENTDASH_ADMIN_IDS)
            .map(|value| parse_id_list(&value))
            .unwrap_or_default();

        let default_user = match env::var(AGENTDASH_USER) {
            Ok(value) if value.trim().is_empty() => {
                return Err(ConfigError::EmptyUser(AGENTDASH_USER))
            }
            Ok(value) => value.trim().to_string(),
            Err(_) => DEFAULT_USER_ID.to_string(),
        };

        let config = Config {
            log_filter,
            seed_data,
            state_path,
            owner_ids,
            admin_ids,
            default_user,
        };
        debug!(?config, "Loaded configuration from environment");
        Ok(config)
    }
}

pub fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

/// Split a comma separated list, dropping blanks and duplicates
pub fn parse_id_list(value: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }
    ids
}
