//! Active users presence widget.
//!
//! Keeps a small always-available list of the users currently active on a
//! shared site. The widget fetches server-controlled settings, mounts a
//! display into a host-provided container, and refreshes the list on a
//! timer (plus on demand when the server allows manual refresh). It
//! follows the host's connectivity signal: setup waits for the network,
//! and polling pauses while offline.
//!
//! The host supplies three collaborators: a [`Transport`] for the remote
//! calls, a [`DisplayContainer`] to mount the display into, and a
//! [`NetworkStatus`] it keeps up to date.

pub mod config_sync;
pub mod connectivity;
pub mod controller;
pub mod display;
pub mod envelope;
pub mod fetcher;
pub mod scheduler;
pub mod settings;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use config_sync::ConfigSync;
pub use connectivity::{ConnectivityMonitor, NetworkStatus, NetworkSubscription, Transition};
pub use controller::{
    create_presence_widget, Phase, PresenceWidget, WidgetDeps, WidgetOptions, WidgetSlot,
};
pub use display::{DisplayContainer, DisplayPort, RefreshTrigger};
pub use envelope::Envelope;
pub use fetcher::{Avatar, PresenceEntry, PresenceFetcher, PresenceSnapshot};
pub use scheduler::PollScheduler;
pub use settings::Settings;
pub use transport::{HttpTransport, Transport};
