//! Global config file source (optional).

use crate::config::paths;
use crate::error::ApiError;
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use tracing::debug;

/// Add the global config file to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ApiError> {
    let path = paths::global_config_path()?;
    debug!(path = %path.display(), exists = path.exists(), "Global config file");
    Ok(builder.add_source(File::from(path).required(false)))
}
