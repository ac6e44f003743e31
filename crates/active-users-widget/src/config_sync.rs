//! Settings synchronization.

use std::sync::Arc;

use active_users_common::PresenceError;
use tracing::debug;

use crate::envelope::decode_payload;
use crate::settings::Settings;
use crate::transport::{Transport, GET_SETTINGS};

#[derive(Clone)]
pub struct ConfigSync {
    transport: Arc<dyn Transport>,
}

impl ConfigSync {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch and normalize the current server settings.
    pub async fn sync(&self) -> Result<Settings, PresenceError> {
        let body = self.transport.call(GET_SETTINGS).await?;
        let payload = decode_payload(body, "settings")?;
        let settings = Settings::from_payload(&payload);
        debug!(?settings, "settings decoded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    #[tokio::test]
    async fn sync_normalizes_wrapped_settings() {
        let transport = ScriptedTransport::new();
        transport.push_settings(Ok(json!({"message": {
            "enabled": 1,
            "refresh_interval": 1,
            "allow_manual_refresh": 0
        }})));

        let settings = ConfigSync::new(transport.clone()).sync().await.unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.refresh_interval_ms, 60_000);
        assert!(!settings.allow_manual_refresh);
        assert_eq!(transport.settings_calls(), 1);
    }

    #[tokio::test]
    async fn remote_error_is_terminal() {
        let transport = ScriptedTransport::new();
        transport.push_settings(Ok(json!({"message": {"error": 1, "message": "Nope"}})));

        let err = ConfigSync::new(transport).sync().await.unwrap_err();
        assert_eq!(err, PresenceError::Remote("Nope".into()));
    }

    #[tokio::test]
    async fn malformed_body_is_protocol_error() {
        let transport = ScriptedTransport::new();
        transport.push_settings(Ok(json!(42)));

        let err = ConfigSync::new(transport).sync().await.unwrap_err();
        assert_eq!(err, PresenceError::Protocol("settings".into()));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let transport = ScriptedTransport::new();
        transport.push_settings(Err(PresenceError::Transport("refused".into())));

        let err = ConfigSync::new(transport).sync().await.unwrap_err();
        assert!(matches!(err, PresenceError::Transport(_)));
    }
}
