use serde::{Deserialize, Serialize};

/// Levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive scoping the level to this workspace's crates.
    pub fn directive(&self) -> String {
        format!("active_users={}", self.level)
    }
}
