//! Background tasks.
//!
//! Each submodule provides a long-running async function intended to be
//! spawned via `tokio::spawn`. All tasks take a bus receiver subscribed by
//! the caller and a [`CancellationToken`] for graceful shutdown.

use std::time::Duration;

use studio_events::StudioEvent;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use crate::error::AppResult;

pub mod chat_responder;
pub mod dashboard_refresh;
pub mod inbox_refresh;

/// Recompute a view whenever a relevant event arrives, and at least every
/// `period`, pushing each result into `output`.
///
/// Exits on cancellation, when the bus closes, or when every watcher of
/// `output` is gone.
pub(crate) async fn refresh_on_events<T, F>(
    task: &'static str,
    period: Duration,
    mut receiver: broadcast::Receiver<StudioEvent>,
    cancel: CancellationToken,
    relevant: fn(&str) -> bool,
    compute: F,
    output: watch::Sender<Option<T>>,
) where
    F: Fn() -> AppResult<T>,
{
    tracing::info!(task, period_secs = period.as_secs(), "Refresh task started");
    let mut interval = tokio::time::interval(period);

    loop {
        let reason = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(task, "Refresh task stopping");
                break;
            }
            _ = interval.tick() => "tick",
            received = receiver.recv() => match received {
                Ok(event) if relevant(&event.event_type) => "event",
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(task, skipped, "Refresh task lagged");
                    "lagged"
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(task, "Event bus closed, refresh task stopping");
                    break;
                }
            },
        };

        match compute() {
            Ok(value) => {
                if output.send(Some(value)).is_err() {
                    tracing::debug!(task, "No watchers left, refresh task stopping");
                    break;
                }
                tracing::debug!(task, reason, "View refreshed");
            }
            Err(e) => tracing::error!(task, error = %e, "View refresh failed"),
        }
    }
}
