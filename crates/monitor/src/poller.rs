//! Fixed-interval status poll loop.
//!
//! Each tick calls [`Monitor::poll_status`] once. A failed poll is logged
//! inside the monitor and the loop moves on; the next tick is an
//! independent attempt. The loop only ends when `cancel` fires.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::monitor::Monitor;

/// Run the poll loop until `cancel` is triggered.
///
/// The first poll happens immediately. Returns the number of polls issued.
pub async fn run(monitor: Arc<Monitor>, interval: Duration, cancel: CancellationToken) -> u64 {
    tracing::info!(?interval, "Status poll loop started");

    let mut ticker = tokio::time::interval(interval);
    // A slow backend must not cause a burst of catch-up polls.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut polls = 0u64;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(polls, "Status poll loop stopping");
                break;
            }
            _ = ticker.tick() => {
                polls += 1;
                // Errors are already logged by the monitor.
                let _ = monitor.poll_status().await;
            }
        }
    }

    polls
}
