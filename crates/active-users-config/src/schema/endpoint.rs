use std::fmt;

use serde::{Deserialize, Serialize};

/// Where and how to reach the presence backend.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Site root, e.g. `https://erp.example.com`.
    pub base_url: String,
    /// Dotted module path the remote methods live under.
    pub method_prefix: String,
    /// Token auth key; used only together with `api_secret`.
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u32,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            method_prefix: "active_users.utils.api".into(),
            api_key: None,
            api_secret: None,
            timeout_secs: 15,
        }
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .field("method_prefix", &self.method_prefix)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl EndpointConfig {
    /// Full URL of a remote method.
    pub fn method_url(&self, method: &str) -> String {
        format!(
            "{}/api/method/{}.{}",
            self.base_url.trim_end_matches('/'),
            self.method_prefix,
            method
        )
    }

    /// `Authorization` header value when token credentials are configured.
    pub fn auth_header(&self) -> Option<String> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some(format!("token {key}:{secret}")),
            _ => None,
        }
    }
}
