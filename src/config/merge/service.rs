//! MergeService: orchestrates sources and deserializes to VdriveConfig.

use crate::config::sources::{environment, global_file};
use crate::config::VdriveConfig;
use crate::error::ApiError;
use config::{Config, File};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: serde defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<VdriveConfig, ApiError> {
        let builder = Config::builder();
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Explicit file instead of the global one, environment still on top.
    pub fn load_from_file(path: &Path) -> Result<VdriveConfig, ApiError> {
        let builder = Config::builder().add_source(File::from(path.to_path_buf()));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
