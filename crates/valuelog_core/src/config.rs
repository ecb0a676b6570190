//! Runtime configuration from environment variables.
//!
//! # Responsibility
//! - Resolve database location, logging and assist-service settings.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - Resolution never fails; missing settings fall back to defaults or
//!   `None`.

use crate::assist::gemini::{DEFAULT_GEMINI_MODEL, GEMINI_BASE_URL};
use crate::logging::default_log_level;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "VALUELOG_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "VALUELOG_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "VALUELOG_LOG_DIR";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "API_KEY";
pub const ENV_GEMINI_MODEL: &str = "VALUELOG_GEMINI_MODEL";
pub const ENV_GEMINI_BASE_URL: &str = "VALUELOG_GEMINI_BASE_URL";

const DEFAULT_DB_FILE_NAME: &str = "valuelog.sqlite3";

/// Settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl CoreConfig {
    /// Resolves settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: get(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: get(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: get(ENV_LOG_DIR),
            gemini_api_key: get(ENV_GEMINI_API_KEY).or_else(|| get(ENV_API_KEY_FALLBACK)),
            gemini_model: get(ENV_GEMINI_MODEL).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: get(ENV_GEMINI_BASE_URL)
                .unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
        }
    }
}
