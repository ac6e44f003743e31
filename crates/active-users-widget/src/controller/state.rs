//! Controller phases and the messages that drive them.

use active_users_common::PresenceError;

use crate::fetcher::PresenceSnapshot;
use crate::settings::Settings;

/// Lifecycle phase of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    /// Constructed offline; setup runs on the next online transition.
    AwaitingConnectivity,
    SyncingSettings,
    /// The server has the feature switched off. Left only by reconfiguration.
    Disabled,
    /// Display mounted, first fetch not yet dispatched.
    DisplayReady,
    Polling,
    /// A user-requested fetch is in flight.
    ManualRefreshing,
    Destroyed,
}

/// Work deferred to a connectivity transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeferredAction {
    Setup,
    UpdateSettings,
}

/// Why a settings sync was started; decides what a disabled answer means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SyncPurpose {
    Setup,
    Update,
}

#[derive(Debug)]
pub(crate) enum ControllerMsg {
    ManualRefresh,
    UpdateSettings,
    Destroy,
    Tick,
    SettingsSynced {
        purpose: SyncPurpose,
        /// Sequence number of the sync; superseded syncs are ignored.
        generation: u64,
        result: Result<Settings, PresenceError>,
    },
    UsersFetched {
        result: Result<PresenceSnapshot, PresenceError>,
    },
}
