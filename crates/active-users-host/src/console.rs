//! Display that writes the widget to the log.

use active_users_widget::{DisplayContainer, DisplayPort, PresenceEntry, RefreshTrigger};
use tracing::{debug, info};

pub struct ConsoleContainer;

impl DisplayContainer for ConsoleContainer {
    fn mount(&self, title: &str) -> Box<dyn DisplayPort> {
        info!(title, "display mounted");
        Box::new(ConsoleDisplay {
            title: title.to_string(),
        })
    }
}

struct ConsoleDisplay {
    title: String,
}

impl DisplayPort for ConsoleDisplay {
    fn render(&mut self, entries: &[PresenceEntry]) {
        for entry in entries {
            info!(
                list = %self.title,
                name = %entry.display_name,
                initials = %entry.avatar.initials,
                image = entry.avatar.image_url.as_deref().unwrap_or("-"),
                "active user"
            );
        }
    }

    fn clear(&mut self) {
        debug!(list = %self.title, "list cleared");
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            debug!(list = %self.title, "loading");
        }
    }

    fn set_footer_text(&mut self, text: &str) {
        if !text.is_empty() {
            info!(list = %self.title, "{text}");
        }
    }

    fn show(&mut self) {}

    fn hide(&mut self) {}

    fn set_manual_refresh_visible(&mut self, visible: bool) {
        debug!(list = %self.title, visible, "manual refresh control");
    }

    fn on_manual_refresh_click(&mut self, trigger: Option<RefreshTrigger>) {
        if trigger.is_some() {
            info!(list = %self.title, "manual refresh enabled, type `r` + enter to refresh");
        }
    }

    fn detach(&mut self) {
        info!(list = %self.title, "display removed");
    }
}
