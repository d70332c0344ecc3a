//! seqwatch-worker — polls the sequence data API and posts new-release
//! summaries to a messaging webhook.
//!
//! Runs top-to-bottom once per invocation; intended to be driven by a
//! scheduler. Exits non-zero when any organism's processing failed,
//! after all organisms were attempted.

mod message;
mod run;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use seqwatch_client::SampleClient;
use seqwatch_core::config::load_dotenv;
use seqwatch_core::Config;
use seqwatch_notify::WebhookNotifier;
use seqwatch_store::FileNotifiedStore;

use crate::run::{Watcher, WatcherOptions};

// ── CLI ─────────────────────────────────────────────────────────────

/// Poll sequence releases and notify a messaging webhook.
#[derive(Parser, Debug)]
#[command(name = "seqwatch-worker", version, about)]
struct Cli {
    /// Comma-separated organism keys (overrides SEQWATCH_ORGANISMS).
    #[arg(long)]
    organisms: Option<String>,

    /// Directory holding the per-organism notified files.
    #[arg(long, env = "SEQWATCH_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Pause after each webhook send, in seconds.
    #[arg(long, env = "SEQWATCH_DELAY_SECS")]
    delay_secs: Option<u64>,

    /// Maximum record dumps per message body.
    #[arg(long, env = "SEQWATCH_MESSAGE_CAP")]
    message_cap: Option<usize>,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    load_dotenv();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(organisms) = &cli.organisms {
        config.organisms = organisms
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(dir) = cli.state_dir {
        config.state_dir = dir;
    }
    if let Some(delay) = cli.delay_secs {
        config.delay_secs = delay;
    }
    if let Some(cap) = cli.message_cap {
        config.message_cap = cap;
    }
    config.log_summary();

    let webhook_url = config
        .webhook_url
        .clone()
        .context("SEQWATCH_WEBHOOK_URL is not set")?;

    let client = SampleClient::new(config.api_base_url.clone(), config.fields_param());
    let notifier = WebhookNotifier::new(webhook_url);
    let store = FileNotifiedStore::new(config.state_dir.clone());

    let watcher = Watcher::new(
        client,
        notifier,
        store,
        WatcherOptions {
            search_base_url: config.search_base_url.clone(),
            message_cap: config.message_cap,
            delay: config.delay(),
        },
    );

    info!(organisms = config.organisms.len(), "seqwatch-worker starting");
    let failed = watcher.run(&config.organisms).await;
    if failed > 0 {
        bail!("{failed} organism(s) failed; see logs");
    }
    info!("seqwatch-worker finished cleanly");

    Ok(())
}
