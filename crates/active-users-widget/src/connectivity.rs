//! Connectivity tracking.
//!
//! [`NetworkStatus`] is the process-wide signal the host feeds from its
//! environment. Every change is delivered to each subscriber in order, so a
//! quick online/offline flap is seen as two transitions. Each controller
//! keeps a [`ConnectivityMonitor`] that turns those changes into
//! transitions and fires at most one deferred action per direction.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing::warn;

/// Changes a subscriber may fall behind by before it resyncs.
const TRANSITION_BUFFER: usize = 16;

// ---------------------------------------------------------------------------
// Network status
// ---------------------------------------------------------------------------

/// Host-fed online/offline signal.
///
/// Cloning shares the same underlying signal; every widget subscribes to it.
#[derive(Debug, Clone)]
pub struct NetworkStatus {
    inner: Arc<Mutex<StatusInner>>,
}

#[derive(Debug)]
struct StatusInner {
    online: bool,
    changes: broadcast::Sender<bool>,
}

impl NetworkStatus {
    pub fn new(online: bool) -> Self {
        let (changes, _) = broadcast::channel(TRANSITION_BUFFER);
        Self {
            inner: Arc::new(Mutex::new(StatusInner { online, changes })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StatusInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Report the current connectivity. Repeating the current value is
    /// not a transition and wakes nobody.
    pub fn set_online(&self, online: bool) {
        let mut inner = self.lock();
        if inner.online == online {
            return;
        }
        inner.online = online;
        let _ = inner.changes.send(online);
    }

    pub fn is_online(&self) -> bool {
        self.lock().online
    }

    /// Current status plus every change reported after this call.
    pub fn subscribe(&self) -> NetworkSubscription {
        let inner = self.lock();
        NetworkSubscription {
            initial: inner.online,
            changes: inner.changes.subscribe(),
            status: self.clone(),
        }
    }
}

impl Default for NetworkStatus {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Ordered stream of connectivity changes.
#[derive(Debug)]
pub struct NetworkSubscription {
    initial: bool,
    changes: broadcast::Receiver<bool>,
    status: NetworkStatus,
}

impl NetworkSubscription {
    /// Status at the moment of subscribing.
    pub fn initial(&self) -> bool {
        self.initial
    }

    /// Wait for the next change. A subscriber that fell too far behind
    /// skips to the current status. Cancel safe.
    pub async fn next(&mut self) -> bool {
        match self.changes.recv().await {
            Ok(online) => online,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "connectivity changes dropped, resyncing");
                self.changes = self.changes.resubscribe();
                self.status.is_online()
            }
            // The subscription holds the status, so the sender outlives it.
            Err(broadcast::error::RecvError::Closed) => std::future::pending().await,
        }
    }
}

// ---------------------------------------------------------------------------
// Monitor
// ---------------------------------------------------------------------------

/// Outcome of feeding a connectivity value into a [`ConnectivityMonitor`].
#[derive(Debug, PartialEq, Eq)]
pub enum Transition<A> {
    /// Same status as before.
    Unchanged,
    /// Went online; carries the deferred online action, if one was pending.
    Online(Option<A>),
    /// Went offline; carries the deferred offline action, if one was pending.
    Offline(Option<A>),
}

/// Current connectivity plus single-slot deferred actions.
///
/// Registering an action while one is pending replaces it. A registered
/// action only fires on a later transition, even when the status already
/// matches at registration time.
#[derive(Debug)]
pub struct ConnectivityMonitor<A> {
    is_online: bool,
    on_online: Option<A>,
    on_offline: Option<A>,
}

impl<A> ConnectivityMonitor<A> {
    pub fn new(is_online: bool) -> Self {
        Self {
            is_online,
            on_online: None,
            on_offline: None,
        }
    }

    pub fn is_online(&self) -> bool {
        self.is_online
    }

    /// Defer `action` to the next offline-to-online transition.
    pub fn run_when_online(&mut self, action: A) {
        self.on_online = Some(action);
    }

    /// Defer `action` to the next online-to-offline transition.
    pub fn run_when_offline(&mut self, action: A) {
        self.on_offline = Some(action);
    }

    pub fn pending_online(&self) -> Option<&A> {
        self.on_online.as_ref()
    }

    pub fn pending_offline(&self) -> Option<&A> {
        self.on_offline.as_ref()
    }

    /// Record the latest status, handing back the action to run if this
    /// is a transition. The returned action is cleared from its slot.
    pub fn transition(&mut self, online: bool) -> Transition<A> {
        if online == self.is_online {
            return Transition::Unchanged;
        }
        self.is_online = online;
        if online {
            Transition::Online(self.on_online.take())
        } else {
            Transition::Offline(self.on_offline.take())
        }
    }

    /// Drop both deferred actions.
    pub fn clear(&mut self) {
        self.on_online = None;
        self.on_offline = None;
    }
}
