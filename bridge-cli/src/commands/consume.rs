//! Consume command: run the tail-consumer poll loop until Ctrl-C.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bridge_core::{ConsumerConfig, FileOffsetStore, JsonlQueue, TailConsumer};
use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::config::ConfigLoader;

/// Arguments for the `consume` command
#[derive(Debug, Args)]
pub struct ConsumeArgs {
    /// Path to the intent queue file (overrides config)
    #[arg(long)]
    pub queue: Option<PathBuf>,

    /// Path to the offset sidecar file (overrides config)
    #[arg(long)]
    pub offset_file: Option<PathBuf>,

    /// Poll interval, e.g. "2s" or "500ms" (overrides config)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,
}

/// Run the consume command
pub async fn run(args: ConsumeArgs) -> Result<()> {
    let config = resolve_config(args)?;

    let queue = JsonlQueue::new(config.queue_path.clone());
    let offsets = FileOffsetStore::new(config.offset_path.clone());
    let consumer = TailConsumer::new(queue, offsets, config);

    // Startup path setup is the one fatal failure surface: without a
    // writable data directory there is nothing to recover to.
    consumer
        .ensure_paths()
        .await
        .context("Failed to prepare queue and offset files")?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            return;
        }
        signal.cancel();
    });

    consumer.run(shutdown).await;
    Ok(())
}

/// Merge config-file values with CLI overrides.
fn resolve_config(args: ConsumeArgs) -> Result<ConsumerConfig> {
    let mut config = ConfigLoader::load()?;
    if let Some(queue) = args.queue {
        config = config.with_queue_path(queue);
    }
    if let Some(offset_file) = args.offset_file {
        config = config.with_offset_path(offset_file);
    }
    if let Some(interval) = args.interval {
        config = config.with_poll_interval(interval);
    }
    Ok(config)
}
