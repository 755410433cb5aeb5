//! Configuration
//!
//! Layered configuration loaded with the `config` crate: defaults from the
//! serde attributes below, then the global config file, then `VDRIVE__*`
//! environment variables (`VDRIVE__EXPLORER__DEFAULT_SORT_KEY=size`).

mod facade;
mod merge;
pub mod paths;
mod sources;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::views::{SortConfig, SortDirection, SortKey};
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VdriveConfig {
    pub logging: LoggingConfig,
    pub explorer: ExplorerConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisor: Option<AdvisorConfig>,
}

impl VdriveConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(advisor) = &self.advisor {
            advisor.validate().map_err(ApiError::ConfigError)?;
        }
        Ok(())
    }
}

/// Explorer session defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Load the fixed seed dataset on initialization
    #[serde(default = "default_true")]
    pub seed: bool,

    #[serde(default)]
    pub default_sort_key: SortKey,

    #[serde(default)]
    pub default_sort_direction: SortDirection,
}

impl ExplorerConfig {
    pub fn sort_config(&self) -> SortConfig {
        SortConfig::new(self.default_sort_key, self.default_sort_direction)
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            seed: true,
            default_sort_key: SortKey::default(),
            default_sort_direction: SortDirection::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

/// Remote location advisor endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    pub endpoint: String,

    /// Bearer token; falls back to `VDRIVE_ADVISOR_API_KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl AdvisorConfig {
    pub fn validate(&self) -> Result<(), String> {
        let endpoint = self.endpoint.trim();
        let Some(rest) = endpoint
            .strip_prefix("https://")
            .or_else(|| endpoint.strip_prefix("http://"))
        else {
            return Err(format!(
                "Advisor endpoint must start with http:// or https://: {}",
                self.endpoint
            ));
        };
        let host = rest.split('/').next().unwrap_or_default();
        if host.is_empty() || rest.chars().any(char::is_whitespace) {
            return Err(format!("Invalid advisor endpoint: {}", self.endpoint));
        }
        if self.timeout_secs == 0 {
            return Err("Advisor timeout must be at least 1 second".to_string());
        }
        Ok(())
    }

    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("VDRIVE_ADVISOR_API_KEY").ok())
            .filter(|key| !key.is_empty())
    }
}
