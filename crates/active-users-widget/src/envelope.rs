//! Response envelope decoding.
//!
//! Remote methods answer with a key/value object. The logical response may
//! be nested under `message` (Frappe's wrapper) or `result`, and either
//! level may carry a truthy `error` flag with the text in `message`.

use active_users_common::PresenceError;
use serde_json::{Map, Value};

/// Fallback text for error responses that carry no message.
const UNKNOWN_REMOTE_ERROR: &str = "The server reported an error.";

/// A decoded response: either the payload object or a server error.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Payload(Map<String, Value>),
    Error(String),
}

impl Envelope {
    /// Decode a raw response body. `what` names the requested resource in
    /// protocol errors (`settings`, `users list`).
    pub fn decode(body: Value, what: &str) -> Result<Self, PresenceError> {
        let Value::Object(outer) = body else {
            return Err(PresenceError::Protocol(what.to_string()));
        };
        if let Some(message) = error_message(&outer) {
            return Ok(Self::Error(message));
        }

        let inner = match wrapped(&outer) {
            Some(Value::Object(inner)) => inner.clone(),
            Some(_) => return Err(PresenceError::Protocol(what.to_string())),
            None => outer,
        };
        if let Some(message) = error_message(&inner) {
            return Ok(Self::Error(message));
        }
        Ok(Self::Payload(inner))
    }

    pub fn into_payload(self) -> Result<Map<String, Value>, PresenceError> {
        match self {
            Self::Payload(payload) => Ok(payload),
            Self::Error(message) => Err(PresenceError::Remote(message)),
        }
    }
}

/// Decode `body` and return its payload, turning server errors into
/// [`PresenceError::Remote`].
pub fn decode_payload(body: Value, what: &str) -> Result<Map<String, Value>, PresenceError> {
    Envelope::decode(body, what)?.into_payload()
}

fn wrapped(object: &Map<String, Value>) -> Option<&Value> {
    ["message", "result"]
        .into_iter()
        .filter_map(|key| object.get(key))
        .find(|value| is_truthy(value))
}

fn error_message(object: &Map<String, Value>) -> Option<String> {
    if !object.get("error").is_some_and(is_truthy) {
        return None;
    }
    let message = object
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(UNKNOWN_REMOTE_ERROR);
    Some(message.to_string())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
