//! Platform directories for configuration and state.

use crate::error::ApiError;
use std::path::PathBuf;

/// Project directories for vdrive (`~/.config/vdrive`, `~/.local/state/vdrive`, ...)
fn project_dirs() -> Result<directories::ProjectDirs, ApiError> {
    directories::ProjectDirs::from("", "vdrive", "vdrive").ok_or_else(|| {
        ApiError::ConfigError("Could not determine platform home directory".to_string())
    })
}

/// Global configuration file
///
/// `$VDRIVE_CONFIG_HOME/config.toml` when set, otherwise the platform config
/// directory (`~/.config/vdrive/config.toml` on Linux).
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    if let Ok(home) = std::env::var("VDRIVE_CONFIG_HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home).join("config.toml"));
        }
    }
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Directory for runtime state such as the default log file.
pub fn state_dir() -> Result<PathBuf, ApiError> {
    let dirs = project_dirs()?;
    // macOS and Windows have no state dir; fall back to local data.
    Ok(dirs
        .state_dir()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| dirs.data_local_dir().to_path_buf()))
}
