//! Keeps the admin conversation list current.

use studio_core::chat::Conversation;
use studio_events::{event_types, StudioEvent};
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;

use crate::services::chat;
use crate::state::AppState;

fn affects_inbox(event_type: &str) -> bool {
    event_type.starts_with("chat.")
}

/// Regroup conversations on chat events, with the `CHAT_REFRESH_SECS`
/// tick as a fallback.
pub async fn run(
    state: AppState,
    receiver: broadcast::Receiver<StudioEvent>,
    cancel: CancellationToken,
    output: watch::Sender<Option<Vec<Conversation>>>,
) {
    let period = state.config.chat_refresh();
    super::refresh_on_events(
        "inbox_refresh",
        period,
        receiver,
        cancel,
        affects_inbox,
        || chat::conversations(&state),
        output,
    )
    .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_chat_events_refresh_the_inbox() {
        assert!(affects_inbox(event_types::CHAT_MESSAGE_SENT));
        assert!(affects_inbox(event_types::CHAT_READ));
        assert!(!affects_inbox(event_types::BOOKING_CREATED));
    }
}
