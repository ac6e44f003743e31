use std::path::PathBuf;

use clap::Parser;

/// Console host for the active users widget.
#[derive(Parser, Debug)]
#[command(name = "active-users", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Re-fetch the server settings every N seconds.
    #[arg(long, value_name = "SECS")]
    pub settings_every: Option<u64>,
}

pub fn parse() -> Args {
    Args::parse()
}
