//! The controller task.

use std::sync::Arc;

use active_users_common::{Event, EventBus, Notification, PresenceError, WidgetId};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config_sync::ConfigSync;
use crate::connectivity::{ConnectivityMonitor, NetworkSubscription, Transition};
use crate::display::{DisplayContainer, DisplayPort, RefreshTrigger};
use crate::fetcher::{PresenceFetcher, PresenceSnapshot};
use crate::scheduler::PollScheduler;
use crate::settings::Settings;

use super::handle::{WidgetDeps, WidgetOptions};
use super::state::{ControllerMsg, DeferredAction, Phase, SyncPurpose};

pub(crate) struct PresenceController {
    id: WidgetId,
    options: WidgetOptions,
    config_sync: ConfigSync,
    fetcher: PresenceFetcher,
    container: Arc<dyn DisplayContainer>,
    events: EventBus,
    phase: watch::Sender<Phase>,
    /// Loopback for timer ticks, request completions and the refresh trigger.
    tx: mpsc::UnboundedSender<ControllerMsg>,

    connectivity: ConnectivityMonitor<DeferredAction>,
    scheduler: PollScheduler,
    /// True from users-fetch dispatch until its completion.
    is_syncing: bool,
    manual_in_flight: bool,
    users_request: Option<JoinHandle<()>>,
    settings_request: Option<JoinHandle<()>>,
    settings_generation: u64,
    settings: Option<Settings>,
    display: Option<Box<dyn DisplayPort>>,
    rendered: usize,
    destroyed: bool,
}

impl PresenceController {
    pub(crate) fn new(
        id: WidgetId,
        options: WidgetOptions,
        deps: WidgetDeps,
        phase: watch::Sender<Phase>,
        tx: mpsc::UnboundedSender<ControllerMsg>,
        is_online: bool,
    ) -> Self {
        Self {
            id,
            options,
            config_sync: ConfigSync::new(Arc::clone(&deps.transport)),
            fetcher: PresenceFetcher::new(deps.transport),
            container: deps.container,
            events: deps.events,
            phase,
            tx,
            connectivity: ConnectivityMonitor::new(is_online),
            scheduler: PollScheduler::new(),
            is_syncing: false,
            manual_in_flight: false,
            users_request: None,
            settings_request: None,
            settings_generation: 0,
            settings: None,
            display: None,
            rendered: 0,
            destroyed: false,
        }
    }

    /// Run until destroyed.
    pub(crate) async fn run(
        mut self,
        mut rx: mpsc::UnboundedReceiver<ControllerMsg>,
        mut network: NetworkSubscription,
    ) {
        info!(widget = %self.id, online = self.connectivity.is_online(), "presence widget starting");
        self.setup();

        while !self.destroyed {
            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(msg) => self.handle(msg),
                    None => self.destroy(),
                },
                online = network.next() => self.on_connectivity(online),
            }
        }
    }

    fn handle(&mut self, msg: ControllerMsg) {
        match msg {
            ControllerMsg::ManualRefresh => self.manual_refresh(),
            ControllerMsg::UpdateSettings => self.update_settings(),
            ControllerMsg::Destroy => self.destroy(),
            ControllerMsg::Tick => self.on_tick(),
            ControllerMsg::SettingsSynced {
                purpose,
                generation,
                result,
            } => {
                if generation != self.settings_generation {
                    debug!(widget = %self.id, generation, "stale settings sync ignored");
                    return;
                }
                self.settings_request = None;
                match result {
                    Ok(settings) => self.apply_settings(purpose, settings),
                    Err(e) => self.fail(e),
                }
            }
            ControllerMsg::UsersFetched { result } => {
                self.users_request = None;
                self.is_syncing = false;
                match result {
                    Ok(snapshot) => self.show_snapshot(snapshot),
                    Err(e) => self.fail(e),
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Setup and reconfiguration
    // -----------------------------------------------------------------------

    fn setup(&mut self) {
        if !self.connectivity.is_online() {
            info!(widget = %self.id, "offline, setup deferred until online");
            self.connectivity.run_when_online(DeferredAction::Setup);
            self.set_phase(Phase::AwaitingConnectivity);
            return;
        }
        self.start_settings_sync(SyncPurpose::Setup);
    }

    fn update_settings(&mut self) {
        if !self.connectivity.is_online() {
            info!(widget = %self.id, "offline, settings update deferred until online");
            self.connectivity.run_when_online(DeferredAction::UpdateSettings);
            return;
        }
        self.start_settings_sync(SyncPurpose::Update);
    }

    fn start_settings_sync(&mut self, purpose: SyncPurpose) {
        if let Some(request) = self.settings_request.take() {
            debug!(widget = %self.id, "superseding in-flight settings sync");
            request.abort();
        }
        self.settings_generation += 1;
        let generation = self.settings_generation;
        if self.display.is_none() {
            self.set_phase(Phase::SyncingSettings);
        }

        let config_sync = self.config_sync.clone();
        let tx = self.tx.clone();
        self.settings_request = Some(tokio::spawn(async move {
            let result = config_sync.sync().await;
            let _ = tx.send(ControllerMsg::SettingsSynced {
                purpose,
                generation,
                result,
            });
        }));
    }

    fn apply_settings(&mut self, purpose: SyncPurpose, settings: Settings) {
        info!(
            widget = %self.id,
            enabled = settings.enabled,
            interval_ms = settings.refresh_interval_ms,
            manual_refresh = settings.allow_manual_refresh,
            "settings synced"
        );
        self.settings = Some(settings);

        if !settings.enabled {
            match purpose {
                SyncPurpose::Setup => {
                    self.set_phase(Phase::Disabled);
                    self.events.publish(Event::Disabled(self.id.clone()));
                }
                SyncPurpose::Update => {
                    info!(widget = %self.id, "disabled by reconfiguration");
                    self.destroy();
                }
            }
            return;
        }

        if self.display.is_some() {
            self.apply_manual_refresh();
        } else {
            self.mount_display();
        }
        self.reload(false);
    }

    fn mount_display(&mut self) {
        let mut display = self.container.mount(&self.options.title);
        display.set_loading(false);
        display.show();
        self.display = Some(display);
        self.apply_manual_refresh();
        self.set_phase(Phase::DisplayReady);
        info!(widget = %self.id, "display mounted");
        self.events.publish(Event::Mounted(self.id.clone()));
    }

    fn manual_refresh_allowed(&self) -> bool {
        self.settings.is_some_and(|s| s.allow_manual_refresh)
    }

    fn apply_manual_refresh(&mut self) {
        let allowed = self.manual_refresh_allowed();
        let trigger = allowed.then(|| RefreshTrigger::new(self.tx.clone()));
        if let Some(display) = self.display.as_mut() {
            display.on_manual_refresh_click(trigger);
            display.set_manual_refresh_visible(allowed);
        }
    }

    // -----------------------------------------------------------------------
    // Polling
    // -----------------------------------------------------------------------

    /// Fetch now and restart the timer from this moment.
    fn reload(&mut self, manual: bool) {
        if !self.connectivity.is_online() {
            debug!(widget = %self.id, "offline, reload skipped");
            return;
        }
        self.scheduler.stop();
        self.sync_data(manual);
        self.arm_timer();
        self.settle_phase();
    }

    fn arm_timer(&mut self) {
        let Some(interval) = self.settings.and_then(|s| s.refresh_interval()) else {
            debug!(widget = %self.id, "refresh interval is zero, polling timer not armed");
            return;
        };
        let tx = self.tx.clone();
        self.scheduler.start(interval, move || {
            let _ = tx.send(ControllerMsg::Tick);
        });
    }

    /// Dispatch a users fetch unless one is already in flight.
    fn sync_data(&mut self, manual: bool) -> bool {
        if self.is_syncing {
            debug!(widget = %self.id, manual, "fetch in flight, poll skipped");
            return false;
        }
        let Some(display) = self.display.as_mut() else {
            return false;
        };
        if self.rendered > 0 {
            display.set_footer_text("");
            display.clear();
            self.rendered = 0;
        }
        display.set_loading(true);
        self.is_syncing = true;
        self.manual_in_flight = manual;

        let fetcher = self.fetcher.clone();
        let tx = self.tx.clone();
        self.users_request = Some(tokio::spawn(async move {
            let result = fetcher.fetch().await;
            let _ = tx.send(ControllerMsg::UsersFetched { result });
        }));
        debug!(widget = %self.id, manual, "fetching active users");
        true
    }

    fn on_tick(&mut self) {
        if !self.connectivity.is_online() {
            debug!(widget = %self.id, "offline, tick ignored");
            return;
        }
        if self.sync_data(false) {
            self.settle_phase();
        }
    }

    fn manual_refresh(&mut self) {
        if self.display.is_none() || !self.manual_refresh_allowed() {
            debug!(widget = %self.id, "manual refresh not available");
            return;
        }
        if self.is_syncing {
            debug!(widget = %self.id, "fetch in flight, manual refresh ignored");
            return;
        }
        self.reload(true);
    }

    fn show_snapshot(&mut self, snapshot: PresenceSnapshot) {
        self.manual_in_flight = false;
        let count = snapshot.len();
        let footer = format!("{}: {count}", self.options.footer_label);
        if let Some(display) = self.display.as_mut() {
            display.set_loading(false);
            display.render(&snapshot);
            display.set_footer_text(&footer);
        }
        self.rendered = count;
        debug!(widget = %self.id, count, "active users rendered");
        self.settle_phase();
        self.events.publish(Event::Rendered {
            widget: self.id.clone(),
            count,
        });
    }

    // -----------------------------------------------------------------------
    // Connectivity
    // -----------------------------------------------------------------------

    fn on_connectivity(&mut self, online: bool) {
        match self.connectivity.transition(online) {
            Transition::Unchanged => {}
            Transition::Online(action) => {
                info!(widget = %self.id, "connectivity restored");
                match action {
                    Some(action) => self.run_deferred(action),
                    None if self.display.is_some() => self.reload(false),
                    None => {}
                }
            }
            Transition::Offline(action) => {
                let was_polling = self.scheduler.is_armed();
                self.scheduler.stop();
                info!(widget = %self.id, was_polling, "connectivity lost, polling paused");
                if let Some(action) = action {
                    self.run_deferred(action);
                }
            }
        }
    }

    fn run_deferred(&mut self, action: DeferredAction) {
        debug!(widget = %self.id, ?action, "running deferred action");
        match action {
            DeferredAction::Setup => self.setup(),
            DeferredAction::UpdateSettings => self.update_settings(),
        }
    }

    // -----------------------------------------------------------------------
    // Teardown
    // -----------------------------------------------------------------------

    fn destroy(&mut self) {
        if self.teardown() {
            self.events.publish(Event::Destroyed(self.id.clone()));
        }
    }

    /// Tear down, then surface `error` to the user. The notice is published
    /// ahead of `Destroyed` so listeners that stop at teardown still see it.
    fn fail(&mut self, error: PresenceError) {
        warn!(widget = %self.id, error = %error, "presence request failed");
        if !self.teardown() {
            return;
        }
        let notice = Notification::from_failure(self.options.title.clone(), &error);
        self.events.publish(Event::Fatal {
            widget: self.id.clone(),
            notice,
        });
        self.events.publish(Event::Destroyed(self.id.clone()));
    }

    /// Release the timer, requests and display. Returns false if already
    /// torn down.
    fn teardown(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.scheduler.stop();
        for request in [self.settings_request.take(), self.users_request.take()]
            .into_iter()
            .flatten()
        {
            request.abort();
        }
        if let Some(mut display) = self.display.take() {
            display.set_loading(false);
            display.on_manual_refresh_click(None);
            display.set_manual_refresh_visible(false);
            display.hide();
            display.detach();
        }
        self.connectivity.clear();
        self.is_syncing = false;
        self.manual_in_flight = false;
        self.settings = None;
        self.rendered = 0;
        self.destroyed = true;

        self.set_phase(Phase::Destroyed);
        info!(widget = %self.id, "presence widget destroyed");
        true
    }

    fn set_phase(&self, phase: Phase) {
        self.phase.send_replace(phase);
    }

    fn settle_phase(&self) {
        if self.display.is_none() {
            return;
        }
        let phase = if self.is_syncing && self.manual_in_flight {
            Phase::ManualRefreshing
        } else {
            Phase::Polling
        };
        self.set_phase(phase);
    }
}
