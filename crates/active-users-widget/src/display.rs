//! Display surface consumed by the widget.
//!
//! Markup, layout and text clamping belong to the host. The widget only
//! drives the operations below.

use tokio::sync::mpsc;

use crate::controller::ControllerMsg;
use crate::fetcher::PresenceEntry;

/// Host container the widget mounts its display into.
pub trait DisplayContainer: Send + Sync {
    /// Create a display titled `title`. Called once per enabled widget.
    fn mount(&self, title: &str) -> Box<dyn DisplayPort>;
}

/// A mounted display.
pub trait DisplayPort: Send {
    /// Replace the list body with `entries`.
    fn render(&mut self, entries: &[PresenceEntry]);

    /// Empty the list body.
    fn clear(&mut self);

    fn set_loading(&mut self, loading: bool);

    fn set_footer_text(&mut self, text: &str);

    fn show(&mut self);

    fn hide(&mut self);

    fn set_manual_refresh_visible(&mut self, visible: bool);

    /// Bind the manual refresh control to `trigger`, or unbind it with `None`.
    fn on_manual_refresh_click(&mut self, trigger: Option<RefreshTrigger>);

    /// Remove the display from its container.
    fn detach(&mut self);
}

/// Handle a display invokes when the user clicks manual refresh.
#[derive(Debug, Clone)]
pub struct RefreshTrigger {
    tx: mpsc::UnboundedSender<ControllerMsg>,
}

impl RefreshTrigger {
    pub(crate) fn new(tx: mpsc::UnboundedSender<ControllerMsg>) -> Self {
        Self { tx }
    }

    /// Request an immediate refresh. Ignored while a fetch is in flight
    /// or once the widget is gone.
    pub fn fire(&self) {
        let _ = self.tx.send(ControllerMsg::ManualRefresh);
    }
}
