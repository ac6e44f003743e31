//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod display;
mod endpoint;
mod logging;

pub use display::*;
pub use endpoint::*;
pub use logging::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveUsersConfig {
    pub endpoint: EndpointConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}
