//! Status command: report the committed offset and queue lag.

use std::path::PathBuf;

use anyhow::Result;
use bridge_core::{FileOffsetStore, IntentQueue, JsonlQueue, OffsetStore};
use clap::Args;

use crate::config::ConfigLoader;

/// Arguments for the `status` command
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Path to the intent queue file (overrides config)
    #[arg(long)]
    pub queue: Option<PathBuf>,

    /// Path to the offset sidecar file (overrides config)
    #[arg(long)]
    pub offset_file: Option<PathBuf>,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    if let Some(queue) = args.queue {
        config = config.with_queue_path(queue);
    }
    if let Some(offset_file) = args.offset_file {
        config = config.with_offset_path(offset_file);
    }

    let queue = JsonlQueue::new(config.queue_path.clone());
    let offsets = FileOffsetStore::new(config.offset_path.clone());

    let committed = offsets.load().await;
    // A queue that does not exist yet simply has no lines.
    let total = queue
        .read_lines()
        .await
        .map(|lines| lines.len() as u64)
        .unwrap_or(0);

    println!("queue:  {}", config.queue_path.display());
    println!("offset: {committed}");
    println!("lines:  {total}");
    println!("lag:    {}", total.saturating_sub(committed));

    Ok(())
}
