//! Host-facing widget handle.

use std::sync::Arc;

use active_users_common::{Event, EventBus, WidgetId};
use active_users_config::DisplayConfig;
use tokio::sync::{broadcast, mpsc, watch};

use crate::connectivity::NetworkStatus;
use crate::display::DisplayContainer;
use crate::transport::Transport;

use super::actor::PresenceController;
use super::state::{ControllerMsg, Phase};

/// Labels the widget renders with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    pub title: String,
    pub footer_label: String,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for WidgetOptions {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            title: config.title.clone(),
            footer_label: config.footer_label.clone(),
        }
    }
}

/// Collaborators supplied by the host.
#[derive(Clone)]
pub struct WidgetDeps {
    pub transport: Arc<dyn Transport>,
    pub container: Arc<dyn DisplayContainer>,
    pub network: NetworkStatus,
    /// Bus the widget publishes lifecycle events on. Subscribe before
    /// creating the widget to see every event.
    pub events: EventBus,
}

/// Create a widget and start its controller.
///
/// Setup begins immediately, or on the next online transition if the
/// network is down. Must be called from within a tokio runtime.
pub fn create_presence_widget(deps: WidgetDeps, options: WidgetOptions) -> PresenceWidget {
    let id = WidgetId::new();
    let (tx, rx) = mpsc::unbounded_channel();
    let (phase_tx, phase_rx) = watch::channel(Phase::Uninitialized);
    let network = deps.network.subscribe();
    let is_online = network.initial();
    let events = deps.events.clone();

    let controller =
        PresenceController::new(id.clone(), options, deps, phase_tx, tx.clone(), is_online);
    tokio::spawn(controller.run(rx, network));

    PresenceWidget {
        id,
        tx,
        phase: phase_rx,
        events,
    }
}

/// Handle to a running widget.
///
/// Dropping the handle destroys the widget.
pub struct PresenceWidget {
    id: WidgetId,
    tx: mpsc::UnboundedSender<ControllerMsg>,
    phase: watch::Receiver<Phase>,
    events: EventBus,
}

impl PresenceWidget {
    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub fn watch_phase(&self) -> watch::Receiver<Phase> {
        self.phase.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Same as clicking the manual refresh control. Ignored when the
    /// server does not allow manual refresh.
    pub fn manual_refresh(&self) {
        let _ = self.tx.send(ControllerMsg::ManualRefresh);
    }

    /// Re-fetch the server settings and apply them.
    pub fn update_settings(&self) {
        let _ = self.tx.send(ControllerMsg::UpdateSettings);
    }

    /// Tear the widget down. Safe to call any number of times.
    pub fn destroy(&self) {
        let _ = self.tx.send(ControllerMsg::Destroy);
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase() == Phase::Destroyed
    }

    /// Wait until the widget has been destroyed.
    pub async fn closed(&self) {
        let mut phase = self.phase.clone();
        let _ = phase.wait_for(|p| *p == Phase::Destroyed).await;
    }
}

impl Drop for PresenceWidget {
    fn drop(&mut self) {
        self.destroy();
    }
}
