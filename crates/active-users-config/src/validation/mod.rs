//! Configuration validation.
//!
//! Each section has its own check; all errors are collected into a single
//! `ConfigError`.

mod helpers;


use active_users_common::ConfigError;

use crate::schema::{ActiveUsersConfig, LOG_LEVELS};

use helpers::{validate_non_empty, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ActiveUsersConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_endpoint(&mut errors, config);
    validate_display(&mut errors, config);
    validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_endpoint(errors: &mut Vec<String>, config: &ActiveUsersConfig) {
    let endpoint = &config.endpoint;
    if !(endpoint.base_url.starts_with("http://") || endpoint.base_url.starts_with("https://")) {
        errors.push(format!(
            "endpoint.base_url = {:?} must start with http:// or https://",
            endpoint.base_url
        ));
    }
    validate_non_empty(errors, "endpoint.method_prefix", &endpoint.method_prefix);
    validate_range(errors, "endpoint.timeout_secs", endpoint.timeout_secs, 1, 300);
    if endpoint.api_key.is_some() != endpoint.api_secret.is_some() {
        errors.push("endpoint.api_key and endpoint.api_secret must be set together".into());
    }
}

fn validate_display(errors: &mut Vec<String>, config: &ActiveUsersConfig) {
    validate_non_empty(errors, "display.title", &config.display.title);
    validate_non_empty(errors, "display.footer_label", &config.display.footer_label);
}

fn validate_logging(errors: &mut Vec<String>, config: &ActiveUsersConfig) {
    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(format!(
            "logging.level = {:?} is not one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }
}
