//! Presence controller and its public handle.
//!
//! Each widget is one background task owning all of its state. Host
//! commands, timer ticks, request completions and connectivity changes
//! are delivered to it one at a time, so nothing else ever mutates the
//! controller and no locking is needed.

mod actor;
mod handle;
mod slot;
mod state;


pub use handle::{create_presence_widget, PresenceWidget, WidgetDeps, WidgetOptions};
pub use slot::WidgetSlot;
pub use state::Phase;

pub(crate) use state::ControllerMsg;
