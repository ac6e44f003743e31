use std::path::PathBuf;

/// Terminal failures of a presence request.
///
/// Any of these tears the widget down before the message is surfaced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresenceError {
    /// The request mechanism itself failed (connect, timeout, non-JSON body).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response was not a key/value object. Holds what was requested,
    /// e.g. `settings` or `users list`.
    #[error("invalid {0} response")]
    Protocol(String),

    /// The server flagged the response as an error.
    #[error("remote error: {0}")]
    Remote(String),
}

impl PresenceError {
    /// Text shown to the user when this error destroys the widget.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "An error has occurred while sending a request.".to_string(),
            Self::Protocol(what) => format!("Active Users plugin received invalid {what}."),
            Self::Remote(message) => message.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ActiveUsersError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Presence(#[from] PresenceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
