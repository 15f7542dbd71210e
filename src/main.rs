mod command;
mod config;
mod replay;

use anyhow::{Context, Result};
use clap::Parser;
use config::{CliConfig, Config};
use ledger_engine::Ledger;
use std::fs::File;
use std::io;
use tracing::{info, warn};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = CliConfig::parse();

    run(&config)
}

fn run<C: Config>(config: &C) -> Result<()> {
    let script = File::open(config.input_path())
        .with_context(|| format!("Failed to open {}", config.input_path().display()))?;

    let mut ledger = Ledger::new();
    let stats = replay::replay(script, &mut ledger);
    info!(
        applied = stats.applied,
        rejected = stats.rejected,
        "Replay finished"
    );

    let pending = ledger.pending_payments();
    if pending > 0 {
        warn!(pending, "Script ended with unprocessed scheduled payments");
    }

    let top = ledger.top_spenders(config.top_spenders());
    info!("Top spenders: {}", top.join(", "));

    replay::write_accounts(&ledger, io::stdout().lock())
}
