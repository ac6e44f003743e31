//! HTTP transport against a Frappe-style `/api/method/...` endpoint.

use std::time::Duration;

use active_users_common::PresenceError;
use active_users_config::EndpointConfig;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use tracing::debug;

use super::Transport;

pub struct HttpTransport {
    endpoint: EndpointConfig,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: EndpointConfig) -> Result<Self, PresenceError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(u64::from(endpoint.timeout_secs)))
            .build()
            .map_err(|e| PresenceError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { endpoint, http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, method: &str) -> Result<serde_json::Value, PresenceError> {
        let url = self.endpoint.method_url(method);
        debug!(method, "presence request");

        let mut request = self.http.get(&url).header(ACCEPT, "application/json");
        if let Some(auth) = self.endpoint.auth_header() {
            request = request.header(AUTHORIZATION, auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PresenceError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PresenceError::Transport(e.to_string()))?;

        if !status.is_success() {
            let text = text.chars().take(200).collect::<String>();
            return Err(PresenceError::Transport(format!("HTTP {status}: {text}")));
        }

        // A non-JSON success body is handed on as a string so the envelope
        // reports it as malformed.
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }
}
