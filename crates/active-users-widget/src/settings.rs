//! Server-controlled widget settings.

use std::time::Duration;

use serde_json::{Map, Value};

pub const MS_PER_MINUTE: u64 = 60_000;

/// Normalized snapshot of the server settings. Replaced wholesale on
/// every sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub enabled: bool,
    pub refresh_interval_ms: u64,
    pub allow_manual_refresh: bool,
}

impl Settings {
    /// Build settings from a decoded `get_settings` payload.
    ///
    /// The server sends the interval in minutes; missing or unparsable
    /// values count as zero.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let minutes = cint(field(payload, "refresh_interval", "refreshInterval")).max(0) as u64;
        Self {
            enabled: cint(field(payload, "enabled", "enabled")) != 0,
            refresh_interval_ms: minutes.saturating_mul(MS_PER_MINUTE),
            allow_manual_refresh: cint(field(
                payload,
                "allow_manual_refresh",
                "allowManualRefresh",
            )) != 0,
        }
    }

    /// Poll period, or `None` when the interval is zero.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_ms > 0).then(|| Duration::from_millis(self.refresh_interval_ms))
    }
}

static NULL: Value = Value::Null;

fn field<'a>(payload: &'a Map<String, Value>, name: &str, alias: &str) -> &'a Value {
    payload
        .get(name)
        .or_else(|| payload.get(alias))
        .unwrap_or(&NULL)
}

/// Lenient integer coercion.
///
/// Numbers truncate toward zero, booleans map to 0/1, numeric strings
/// parse, anything else is 0.
pub fn cint(value: &Value) -> i64 {
    match value {
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(truncate))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(truncate))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn truncate(f: f64) -> i64 {
    if f.is_finite() {
        f.trunc() as i64
    } else {
        0
    }
}
