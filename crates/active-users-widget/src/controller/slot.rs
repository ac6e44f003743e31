//! Host-owned holder for the active widget.

use tracing::info;

use super::handle::{create_presence_widget, PresenceWidget, WidgetDeps, WidgetOptions};

/// Keeps at most one widget alive.
///
/// Re-initializing through the slot tears down the previous widget before
/// the next one is created, so timers never stack up.
#[derive(Default)]
pub struct WidgetSlot {
    current: Option<PresenceWidget>,
}

impl WidgetSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy the current widget, if any, then create a new one.
    pub async fn install(&mut self, deps: WidgetDeps, options: WidgetOptions) -> &PresenceWidget {
        self.clear().await;
        let widget = create_presence_widget(deps, options);
        info!(widget = %widget.id(), "presence widget installed");
        self.current.insert(widget)
    }

    pub fn current(&self) -> Option<&PresenceWidget> {
        self.current.as_ref()
    }

    /// Destroy the current widget and wait for its teardown.
    pub async fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            info!(widget = %previous.id(), "destroying previous presence widget");
            previous.destroy();
            previous.closed().await;
        }
    }
}
