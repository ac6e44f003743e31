//! Core TOML config loading: read from path or platform default.

use std::path::Path;

use active_users_common::ConfigError;
use tracing::{info, warn};

use crate::schema::ActiveUsersConfig;
use crate::validation;

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. A config that parses but
/// fails validation is returned as-is with a warning.
pub fn load_from_path(path: &Path) -> Result<ActiveUsersConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: ActiveUsersConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/active-users/config.toml`
///
/// If the file does not exist, writes a commented default and returns defaults.
pub fn load_default() -> Result<ActiveUsersConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(ActiveUsersConfig::default())
        }
        Err(e) => Err(e),
    }
}
