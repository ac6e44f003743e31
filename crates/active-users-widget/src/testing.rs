//! In-memory collaborators for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use active_users_common::{Event, EventBus, PresenceError};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::broadcast;

use crate::connectivity::NetworkStatus;
use crate::controller::WidgetDeps;
use crate::display::{DisplayContainer, DisplayPort, RefreshTrigger};
use crate::fetcher::PresenceEntry;
use crate::transport::{Transport, GET_SETTINGS, GET_USERS};

type Scripted = Mutex<VecDeque<Result<Value, PresenceError>>>;

/// Transport answering from per-method scripts. The last scripted answer
/// repeats once the script runs out.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    settings: Scripted,
    users: Scripted,
    settings_calls: AtomicUsize,
    users_calls: AtomicUsize,
    settings_delay: Mutex<Duration>,
    users_delay: Mutex<Duration>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push_settings(&self, answer: Result<Value, PresenceError>) {
        self.settings.lock().unwrap().push_back(answer);
    }

    pub(crate) fn push_users(&self, answer: Result<Value, PresenceError>) {
        self.users.lock().unwrap().push_back(answer);
    }

    /// Make every settings call take `delay` before answering. The answer
    /// is taken from the script when the call starts.
    pub(crate) fn set_settings_delay(&self, delay: Duration) {
        *self.settings_delay.lock().unwrap() = delay;
    }

    /// Make every users call take `delay` before answering.
    pub(crate) fn set_users_delay(&self, delay: Duration) {
        *self.users_delay.lock().unwrap() = delay;
    }

    pub(crate) fn settings_calls(&self) -> usize {
        self.settings_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn users_calls(&self) -> usize {
        self.users_calls.load(Ordering::SeqCst)
    }

    fn next(script: &Scripted) -> Result<Value, PresenceError> {
        let mut script = script.lock().unwrap();
        let answer = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };
        answer.unwrap_or_else(|| Err(PresenceError::Transport("nothing scripted".into())))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn call(&self, method: &str) -> Result<Value, PresenceError> {
        match method {
            GET_SETTINGS => {
                self.settings_calls.fetch_add(1, Ordering::SeqCst);
                let answer = Self::next(&self.settings);
                let delay = *self.settings_delay.lock().unwrap();
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                answer
            }
            GET_USERS => {
                self.users_calls.fetch_add(1, Ordering::SeqCst);
                let delay = *self.users_delay.lock().unwrap();
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Self::next(&self.users)
            }
            other => Err(PresenceError::Transport(format!("unknown method {other}"))),
        }
    }
}

/// Everything the recording display has been told.
#[derive(Default)]
pub(crate) struct DisplayLog {
    pub mounts: usize,
    pub title: String,
    pub entries: Vec<String>,
    pub renders: usize,
    pub clears: usize,
    pub footer: String,
    pub loading: bool,
    pub visible: bool,
    pub manual_visible: bool,
    pub trigger: Option<RefreshTrigger>,
    pub detached: usize,
}

#[derive(Default)]
pub(crate) struct RecordingContainer {
    log: Arc<Mutex<DisplayLog>>,
}

impl RecordingContainer {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn log(&self) -> MutexGuard<'_, DisplayLog> {
        self.log.lock().unwrap()
    }

    /// Click the manual refresh control, if it is bound.
    pub(crate) fn click_refresh(&self) {
        let trigger = self.log().trigger.clone();
        if let Some(trigger) = trigger {
            trigger.fire();
        }
    }
}

impl DisplayContainer for RecordingContainer {
    fn mount(&self, title: &str) -> Box<dyn DisplayPort> {
        let mut log = self.log();
        log.mounts += 1;
        log.title = title.to_string();
        Box::new(RecordingDisplay {
            log: Arc::clone(&self.log),
        })
    }
}

struct RecordingDisplay {
    log: Arc<Mutex<DisplayLog>>,
}

impl RecordingDisplay {
    fn log(&self) -> MutexGuard<'_, DisplayLog> {
        self.log.lock().unwrap()
    }
}

impl DisplayPort for RecordingDisplay {
    fn render(&mut self, entries: &[PresenceEntry]) {
        let mut log = self.log();
        log.renders += 1;
        log.entries = entries.iter().map(|e| e.display_name.clone()).collect();
    }

    fn clear(&mut self) {
        let mut log = self.log();
        log.clears += 1;
        log.entries.clear();
    }

    fn set_loading(&mut self, loading: bool) {
        self.log().loading = loading;
    }

    fn set_footer_text(&mut self, text: &str) {
        self.log().footer = text.to_string();
    }

    fn show(&mut self) {
        self.log().visible = true;
    }

    fn hide(&mut self) {
        self.log().visible = false;
    }

    fn set_manual_refresh_visible(&mut self, visible: bool) {
        self.log().manual_visible = visible;
    }

    fn on_manual_refresh_click(&mut self, trigger: Option<RefreshTrigger>) {
        self.log().trigger = trigger;
    }

    fn detach(&mut self) {
        self.log().detached += 1;
    }
}

/// Frappe-wrapped `get_settings` answer.
pub(crate) fn settings_body(enabled: i64, interval_minutes: i64, manual: i64) -> Value {
    json!({"message": {
        "enabled": enabled,
        "refresh_interval": interval_minutes,
        "allow_manual_refresh": manual
    }})
}

/// Frappe-wrapped `get_users` answer.
pub(crate) fn users_body(names: &[&str]) -> Value {
    let users: Vec<Value> = names
        .iter()
        .map(|name| json!({"full_name": name, "user_image": null}))
        .collect();
    json!({"message": {"users": users}})
}

pub(crate) fn deps(
    transport: &Arc<ScriptedTransport>,
    container: &Arc<RecordingContainer>,
    network: &NetworkStatus,
) -> WidgetDeps {
    WidgetDeps {
        transport: Arc::clone(transport) as Arc<dyn Transport>,
        container: Arc::clone(container) as Arc<dyn DisplayContainer>,
        network: network.clone(),
        events: EventBus::new(64),
    }
}

/// Receive events until one matches `pred`. Panics after an hour of
/// (virtual) time without a match.
pub(crate) async fn wait_for_event<F>(rx: &mut broadcast::Receiver<Event>, pred: F) -> Event
where
    F: Fn(&Event) -> bool,
{
    let wait = async {
        loop {
            match rx.recv().await {
                Ok(event) if pred(&event) => return event,
                Ok(_) => continue,
                Err(e) => panic!("event bus closed: {e}"),
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(3600), wait)
        .await
        .expect("timed out waiting for widget event")
}
