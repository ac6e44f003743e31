use serde::{Deserialize, Serialize};

/// Labels used by the mounted display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub title: String,
    /// Prefix of the footer count, rendered as `"{footer_label}: {count}"`.
    pub footer_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Active Users".into(),
            footer_label: "Total".into(),
        }
    }
}
