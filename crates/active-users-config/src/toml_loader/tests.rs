//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

use active_users_common::ConfigError;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_active_users_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[endpoint]
base_url = "https://erp.example.com"
timeout_secs = 30

[display]
title = "Who's here"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.endpoint.base_url, "https://erp.example.com");
    assert_eq!(config.endpoint.timeout_secs, 30);
    assert_eq!(config.display.title, "Who's here");
    // Defaults preserved
    assert_eq!(config.display.footer_label, "Total");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_is_returned_as_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[endpoint]
timeout_secs = 0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.endpoint.timeout_secs, 0);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("active-users").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.endpoint.base_url, "http://localhost:8000");
    assert_eq!(config.display.title, "Active Users");
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::ActiveUsersConfig;

    let config: ActiveUsersConfig = toml::from_str(&default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("active-users"));
        assert!(path_str.ends_with("config.toml"));
    }
}

#[test]
fn env_var_overrides_default_path() {
    let custom = "/tmp/active-users-override/config.toml";
    std::env::set_var(paths::CONFIG_PATH_ENV, custom);
    let path = default_config_path();
    std::env::remove_var(paths::CONFIG_PATH_ENV);

    assert_eq!(path.unwrap(), Path::new(custom));
}
