//! active-users: console host for the active users widget.
//!
//! Loads the config, starts one widget against the configured server and
//! logs the list each time it refreshes. Commands on stdin: `r` refreshes
//! now, `s` re-fetches the server settings, `q` quits.

mod cli;
mod console;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use active_users_common::{ActiveUsersError, Event, EventBus, Notification};
use active_users_config::{validation, ActiveUsersConfig};
use active_users_widget::{HttpTransport, NetworkStatus, WidgetDeps, WidgetOptions, WidgetSlot};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{interval_at, Instant, Interval};
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::console::ConsoleContainer;

fn load(args: &Args) -> active_users_common::Result<ActiveUsersConfig> {
    let config = match &args.config {
        Some(path) => {
            let config = active_users_config::load_from_path(path)?;
            validation::validate(&config)?;
            config
        }
        None => active_users_config::load_config()?,
    };
    Ok(config)
}

fn init_logging(config: &ActiveUsersConfig, level: Option<&str>) {
    let directive = match level {
        Some(level) => format!("active_users={level}"),
        None => config.logging.directive(),
    };
    let filter = match directive.parse::<Directive>() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Wait for the next settings refresh, or forever when disabled.
async fn next_settings_refresh(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn run(args: Args, config: ActiveUsersConfig) -> active_users_common::Result<()> {
    info!(
        server = %config.endpoint.base_url,
        methods = %config.endpoint.method_prefix,
        "starting active users host"
    );

    let transport = HttpTransport::new(config.endpoint.clone())?;
    let events = EventBus::default();
    let mut rx = events.subscribe();
    let deps = WidgetDeps {
        transport: Arc::new(transport),
        container: Arc::new(ConsoleContainer),
        network: NetworkStatus::new(true),
        events,
    };

    let mut slot = WidgetSlot::new();
    slot.install(deps, WidgetOptions::from(&config.display)).await;

    let mut settings_refresh = args.settings_every.filter(|secs| *secs > 0).map(|secs| {
        let period = Duration::from_secs(secs);
        interval_at(Instant::now() + period, period)
    });

    let mut commands = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let outcome = loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("interrupted, shutting down");
                break Ok(());
            }
            event = rx.recv() => match event {
                Ok(Event::Fatal { notice, .. }) => {
                    error!(title = %notice.title, "{}", notice.body);
                    break Err(ActiveUsersError::Other(notice.body));
                }
                Ok(Event::Disabled(widget)) => {
                    let notice = Notification::warning(
                        &config.display.title,
                        "Active Users is disabled on the server.",
                    );
                    warn!(%widget, title = %notice.title, "{}", notice.body);
                }
                Ok(Event::Destroyed(widget)) => {
                    info!(%widget, "widget destroyed");
                    break Ok(());
                }
                Ok(event) => debug!(?event, "widget event"),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event receiver lagged");
                }
                Err(RecvError::Closed) => break Ok(()),
            },
            _ = next_settings_refresh(&mut settings_refresh) => {
                if let Some(widget) = slot.current() {
                    widget.update_settings();
                }
            }
            line = commands.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match line.trim() {
                    "r" => {
                        if let Some(widget) = slot.current() {
                            widget.manual_refresh();
                        }
                    }
                    "s" => {
                        if let Some(widget) = slot.current() {
                            widget.update_settings();
                        }
                    }
                    "q" => break Ok(()),
                    "" => {}
                    other => warn!(command = other, "unknown command (r, s, q)"),
                },
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!(error = %e, "stdin read failed, commands disabled");
                    stdin_open = false;
                }
            },
        }
    };

    slot.clear().await;
    outcome
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let config = match load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("active-users: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config, args.log_level.as_deref());

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "active users host stopped");
            ExitCode::FAILURE
        }
    }
}
