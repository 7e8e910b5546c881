//! Keeps the dashboard snapshot current.

use studio_events::{event_types, StudioEvent};
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use crate::services::dashboard::{self, DashboardSnapshot};
use crate::state::AppState;

/// Recompute on booking, chat, testimonial and notification events, with
/// the `STATS_REFRESH_SECS` tick as a fallback.
pub async fn run(
    state: AppState,
    receiver: broadcast::Receiver<StudioEvent>,
    cancel: CancellationToken,
    output: watch::Sender<Option<DashboardSnapshot>>,
) {
    let period = state.config.stats_refresh();
    super::refresh_on_events(
        "dashboard_refresh",
        period,
        receiver,
        cancel,
        event_types::affects_dashboard,
        || dashboard::snapshot(&state),
        output,
    )
    .await;
}
