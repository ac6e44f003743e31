//! Host-side configuration for the active users widget.
//!
//! Describes where the presence backend lives, how the widget labels
//! itself, and how verbose logging is. Server-controlled settings
//! (enabled flag, refresh interval, manual refresh) are not stored here;
//! the widget fetches those at runtime.
//!
//! ```rust,no_run
//! use active_users_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config.endpoint.base_url);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ActiveUsersConfig, DisplayConfig, EndpointConfig, LoggingConfig};
pub use toml_loader::{default_config_path, load_default, load_from_path, CONFIG_PATH_ENV};

use active_users_common::ConfigError;

/// Load config from the platform default path and validate it.
pub fn load_config() -> Result<ActiveUsersConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}
