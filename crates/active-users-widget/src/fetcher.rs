//! Active users list fetching.

use std::sync::Arc;

use active_users_common::PresenceError;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::envelope::decode_payload;
use crate::transport::{Transport, GET_USERS};

/// Reference handed to the host's avatar renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub image_url: Option<String>,
    /// Fallback initials for users without an image.
    pub initials: String,
}

impl Avatar {
    pub fn new(full_name: &str, image_url: Option<String>) -> Self {
        Self {
            image_url: image_url.filter(|url| !url.trim().is_empty()),
            initials: initials(full_name),
        }
    }
}

/// One active user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEntry {
    pub display_name: String,
    pub avatar: Avatar,
}

/// Users returned by one fetch, in server order.
pub type PresenceSnapshot = Vec<PresenceEntry>;

#[derive(Deserialize)]
struct WireUser {
    #[serde(alias = "fullName")]
    full_name: String,
    #[serde(default, alias = "userImage")]
    user_image: Option<String>,
}

#[derive(Clone)]
pub struct PresenceFetcher {
    transport: Arc<dyn Transport>,
}

impl PresenceFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the current active users.
    ///
    /// Only transport failures and error responses fail; a missing or
    /// malformed `users` field yields an empty snapshot.
    pub async fn fetch(&self) -> Result<PresenceSnapshot, PresenceError> {
        let body = self.transport.call(GET_USERS).await?;
        let payload = decode_payload(body, "users list")?;
        Ok(parse_users(&payload))
    }
}

pub(crate) fn parse_users(payload: &Map<String, Value>) -> PresenceSnapshot {
    let Some(users) = payload.get("users").and_then(Value::as_array) else {
        debug!("users field missing or not a list");
        return Vec::new();
    };
    users
        .iter()
        .filter_map(|value| match WireUser::deserialize(value) {
            Ok(user) => Some(PresenceEntry {
                avatar: Avatar::new(&user.full_name, user.user_image),
                display_name: user.full_name,
            }),
            Err(e) => {
                debug!(error = %e, "skipping malformed user entry");
                None
            }
        })
        .collect()
}

fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
