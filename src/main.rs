//! Cashbook main entry point

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use cashbook_api::start_server;
use cashbook_config::Config;
use cashbook_core::Ledger;
use clap::Parser;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "cashbook")]
#[command(version = "0.1.0")]
#[command(about = "A multi-user daily cash ledger with carry-forward and range reconciliation", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Write a default configuration to the config path and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.init_config {
        if args.config.exists() {
            anyhow::bail!("{} already exists", args.config.display());
        }
        std::fs::write(&args.config, Config::generate_default())
            .with_context(|| format!("writing {}", args.config.display()))?;
        println!("Wrote default configuration to {}", args.config.display());
        return Ok(());
    }

    let config = if args.config.exists() {
        Config::load(args.config.clone())
            .map_err(|e| anyhow::anyhow!("{}", e.report()))?
    } else {
        Config::default()
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if !args.config.exists() {
        log::warn!(
            "config file {} not found, using defaults",
            args.config.display()
        );
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", e.report()))?;

    let store = cashbook_store::from_config(&config);
    let mut ledger = Ledger::new(config.clone(), store);
    ledger.load().await.context("loading ledger")?;
    let ledger = Arc::new(RwLock::new(ledger));

    spawn_refresh(ledger.clone(), config.sync.poll_interval_secs);

    start_server(config, ledger).await
}

/// Periodically re-fetch the store so changes saved by other instances
/// show up without a restart
fn spawn_refresh(ledger: Arc<RwLock<Ledger>>, interval_secs: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        interval.tick().await;
        loop {
            interval.tick().await;
            let mut guard = ledger.write().await;
            if let Err(e) = guard.refresh().await {
                log::warn!("refresh failed: {}", e);
            }
        }
    });
}
