use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;
use vdrive::config::ConfigLoader;
use vdrive::error::ApiError;
use vdrive::views::{SortDirection, SortKey};

/// Tests in this module touch process-wide environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn explicit_file_sets_explorer_and_logging() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[logging]
level = "debug"
format = "json"

[explorer]
seed = false
default_sort_key = "modified"
default_sort_direction = "descending"

[advisor]
endpoint = "https://advisor.example.com/suggest"
"#,
    );

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.output, "stderr");
    assert!(!config.explorer.seed);
    assert_eq!(config.explorer.default_sort_key, SortKey::Modified);
    assert_eq!(config.explorer.default_sort_direction, SortDirection::Descending);
    let advisor = config.advisor.unwrap();
    assert_eq!(advisor.timeout_secs, 30);
}

#[test]
fn environment_overrides_file() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[explorer]\ndefault_sort_key = \"name\"\n");

    std::env::set_var("VDRIVE__EXPLORER__DEFAULT_SORT_KEY", "size");
    let result = ConfigLoader::load_from_file(&path);
    std::env::remove_var("VDRIVE__EXPLORER__DEFAULT_SORT_KEY");

    assert_eq!(result.unwrap().explorer.default_sort_key, SortKey::Size);
}

#[test]
fn global_file_found_through_config_home() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    write_config(&dir, "[explorer]\nseed = false\n");

    std::env::set_var("VDRIVE_CONFIG_HOME", dir.path());
    let with_file = ConfigLoader::load();
    std::env::set_var("VDRIVE_CONFIG_HOME", dir.path().join("empty"));
    let without_file = ConfigLoader::load();
    std::env::remove_var("VDRIVE_CONFIG_HOME");

    assert!(!with_file.unwrap().explorer.seed);
    assert!(without_file.unwrap().explorer.seed);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = ConfigLoader::load_from_file(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}

#[test]
fn invalid_advisor_endpoint_rejected_at_load() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[advisor]\nendpoint = \"ftp://nope\"\n");
    assert!(matches!(
        ConfigLoader::load_from_file(&path),
        Err(ApiError::ConfigError(_))
    ));
}
