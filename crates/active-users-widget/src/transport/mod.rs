//! Remote call transport.
//!
//! The widget only needs "call a named method, get a JSON body back".
//! [`HttpTransport`] does that over HTTP; tests and embedders can supply
//! their own implementation.

mod http;

use active_users_common::PresenceError;
use async_trait::async_trait;

pub use http::HttpTransport;

/// Remote method returning the widget settings.
pub const GET_SETTINGS: &str = "get_settings";
/// Remote method returning the active users list.
pub const GET_USERS: &str = "get_users";

#[async_trait]
pub trait Transport: Send + Sync {
    /// Invoke `method` and return the raw response body.
    ///
    /// Only failures of the request mechanism are errors here; the body is
    /// interpreted by the caller.
    async fn call(&self, method: &str) -> Result<serde_json::Value, PresenceError>;
}
