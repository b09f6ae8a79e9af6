//! The poll loop: tail the intent queue and route each new event.
//!
//! Delivery is at-least-once. The offset is read at tick start,
//! threaded through line processing, and committed once after the
//! batch; a crash between processing and commit replays those lines on
//! the next tick. Lines that fail to parse are consumed and skipped,
//! never retried.

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use crate::config::ConsumerConfig;
use crate::error::Result;
use crate::event::IntentEvent;
use crate::offset::OffsetStore;
use crate::queue::IntentQueue;
use crate::routing::route;

/// Summary of one poll tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Offset committed at the end of the tick.
    pub offset: u64,
    /// Lines consumed this tick (routed + blank + malformed).
    pub consumed: u64,
    /// Events that were decoded and dispatched to routing.
    pub routed: u64,
    /// Whitespace-only lines skipped without routing output.
    pub blank: u64,
    /// Lines that failed JSON parsing and were dropped.
    pub malformed: u64,
}

/// Tails the intent queue and prints a routing decision per event.
pub struct TailConsumer<Q, S> {
    queue: Q,
    offsets: S,
    config: ConsumerConfig,
}

impl<Q, S> TailConsumer<Q, S>
where
    Q: IntentQueue,
    S: OffsetStore,
{
    /// Create a new consumer over a queue and an offset store.
    pub fn new(queue: Q, offsets: S, config: ConsumerConfig) -> Self {
        Self {
            queue,
            offsets,
            config,
        }
    }

    /// Get the configuration this consumer runs with.
    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }

    /// Create the queue and offset files (and their directories) if
    /// absent.
    ///
    /// Failure here is fatal to startup: without a writable data
    /// directory the consumer has nothing to recover to.
    pub async fn ensure_paths(&self) -> Result<()> {
        self.queue.ensure().await?;
        self.offsets.ensure().await
    }

    /// Process everything appended since the committed offset.
    ///
    /// Blank lines are consumed without routing output. Malformed
    /// lines are consumed, reported, and never retried. The offset is
    /// committed once per tick, after the batch; when nothing was
    /// consumed, nothing is written.
    pub async fn tick(&self) -> Result<TickReport> {
        let committed = self.offsets.load().await;
        let lines = self.queue.read_lines().await?;

        let mut report = TickReport {
            offset: committed,
            ..TickReport::default()
        };

        if committed >= lines.len() as u64 {
            return Ok(report);
        }

        let mut offset = committed;
        for line in &lines[committed as usize..] {
            offset += 1;
            report.consumed += 1;

            let line = line.trim();
            if line.is_empty() {
                report.blank += 1;
                continue;
            }

            match IntentEvent::parse(line) {
                Ok(event) => {
                    for out in route(&event).lines() {
                        println!("{out}");
                    }
                    report.routed += 1;
                }
                Err(e) => {
                    // Consumed and skipped; there is no dead-letter queue.
                    error!(line = offset, error = %e, "dropping line that is not valid JSON");
                    report.malformed += 1;
                }
            }
        }

        report.offset = offset;
        self.offsets.save(offset).await?;

        Ok(report)
    }

    /// Run the poll loop until `shutdown` is cancelled.
    ///
    /// Tick-level errors are logged and the loop moves on to the next
    /// tick; transient I/O trouble never stops the consumer.
    pub async fn run(&self, shutdown: CancellationToken) {
        info!(
            queue = %self.config.queue_path.display(),
            interval = ?self.config.poll_interval,
            "intent consumer starting"
        );

        loop {
            match self.tick().await {
                Ok(report) if report.consumed > 0 => {
                    debug!(
                        offset = report.offset,
                        routed = report.routed,
                        blank = report.blank,
                        malformed = report.malformed,
                        "tick consumed new lines"
                    );
                }
                Ok(_) => trace!("tick found no new lines"),
                Err(e) => error!(error = %e, "tick failed, retrying next poll"),
            }

            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("intent consumer received shutdown signal");
                    return;
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }
}
