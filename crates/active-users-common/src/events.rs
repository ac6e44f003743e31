use tokio::sync::broadcast;

use crate::id::WidgetId;
use crate::notifications::Notification;

/// Lifecycle events published by a presence widget.
#[derive(Debug, Clone)]
pub enum Event {
    /// The display was mounted into the host container.
    Mounted(WidgetId),
    /// A fresh snapshot was rendered.
    Rendered { widget: WidgetId, count: usize },
    /// The server reported the feature as disabled.
    Disabled(WidgetId),
    /// The widget was torn down.
    Destroyed(WidgetId),
    /// A terminal failure destroyed the widget; the notice is for the user.
    Fatal {
        widget: WidgetId,
        notice: Notification,
    },
}

#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
