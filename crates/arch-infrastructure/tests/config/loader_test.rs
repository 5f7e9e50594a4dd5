//! Configuration Loader Tests

use std::io::Write;

use arch_infrastructure::config::{ConfigLoader, ScopesConfig};
use arch_infrastructure::constants::{DEFAULT_LOG_LEVEL, DEFAULT_TEARDOWN_GRACE_MS};
use tempfile::TempDir;

#[test]
fn test_config_loader_default() {
    let config = ConfigLoader::new()
        .with_env_prefix("ARCH_LOADER_DEFAULT")
        .load()
        .unwrap();

    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.scopes.teardown_grace_ms, DEFAULT_TEARDOWN_GRACE_MS);
    assert!(config.scopes.mock_overrides);
    assert_eq!(config.host.start_destination, "catalog");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("absent.toml"))
        .with_env_prefix("ARCH_LOADER_MISSING")
        .load()
        .unwrap();

    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
}

#[test]
fn test_partial_file_overrides_only_given_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("arch.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[scopes]\nteardown_grace_ms = 250\n\n[host]\nstart_destination = \"settings\"").unwrap();

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("ARCH_LOADER_PARTIAL")
        .load()
        .unwrap();

    assert_eq!(config.scopes.teardown_grace_ms, 250);
    assert!(config.scopes.mock_overrides);
    assert_eq!(config.host.start_destination, "settings");
    assert_eq!(config.host.learning_language, "Spanish");
}

#[test]
fn test_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("arch.toml");
    std::fs::write(&path, "[host]\nstart_destination = \"settings\"\n").unwrap();

    // SAFETY: the variable name is unique to this test
    unsafe {
        std::env::set_var("ARCH_LOADER_ENV_HOST__START_DESTINATION", "counter");
    }
    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("ARCH_LOADER_ENV")
        .load()
        .unwrap();
    unsafe {
        std::env::remove_var("ARCH_LOADER_ENV_HOST__START_DESTINATION");
    }

    assert_eq!(config.host.start_destination, "counter");
}

#[test]
fn test_teardown_grace_duration() {
    let scopes = ScopesConfig {
        teardown_grace_ms: 1_500,
        ..ScopesConfig::default()
    };
    assert_eq!(scopes.teardown_grace().as_millis(), 1_500);
}
