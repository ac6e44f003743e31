//! Config path resolution and default file creation.

use std::path::{Path, PathBuf};

use active_users_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// Environment variable that overrides the default config location.
pub const CONFIG_PATH_ENV: &str = "ACTIVE_USERS_CONFIG";

/// Config file path: `$ACTIVE_USERS_CONFIG` if set, else
/// `<platform config dir>/active-users/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join("active-users").join("config.toml"))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

/// Write the commented default config to `path`, creating parent
/// directories as needed.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err =
        |what: &str, e: std::io::Error| ConfigError::ParseError(format!("failed to {what}: {e}"));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| write_err(&format!("create {}", parent.display()), e))?;
    }
    std::fs::write(path, default_config_toml())
        .map_err(|e| write_err(&format!("write {}", path.display()), e))?;

    info!(path = %path.display(), "created default config");
    Ok(())
}
