pub mod errors;
pub mod events;
pub mod id;
pub mod notifications;

pub use errors::{ActiveUsersError, ConfigError, PresenceError};
pub use events::{Event, EventBus};
pub use id::WidgetId;
pub use notifications::{Notification, NotificationLevel};

pub type Result<T> = std::result::Result<T, ActiveUsersError>;
