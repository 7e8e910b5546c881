//! Automatic replies to visitor messages.
//!
//! When a visitor writes, the responder waits the configured delay and
//! then sends the admin reply (admin online) or the offline auto-reply.

use studio_core::chat::Sender;
use studio_events::{event_types, StudioEvent};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::services::chat;
use crate::state::AppState;

pub async fn run(
    state: AppState,
    mut receiver: broadcast::Receiver<StudioEvent>,
    cancel: CancellationToken,
) {
    tracing::info!("Chat responder started");
    let tracker = TaskTracker::new();

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Chat responder stopping");
                break;
            }
            received = receiver.recv() => match received {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Chat responder lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, chat responder shutting down");
                    break;
                }
            },
        };

        let Some(user_id) = visitor_message_author(&event) else {
            continue;
        };
        let reply = match chat::pending_reply(&state) {
            Ok(Some(reply)) => reply,
            Ok(None) => continue,
            Err(e) => {
                tracing::error!(error = %e, "Chat responder could not read presence");
                continue;
            }
        };

        let delay = chat::reply_delay(&state, reply);
        let state = state.clone();
        let cancel = cancel.clone();
        tracker.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            if let Err(e) = chat::reply_to_user(&state, &user_id).await {
                tracing::error!(error = %e, user_id = %user_id, "Automatic reply failed");
            }
        });
    }

    tracker.close();
    tracker.wait().await;
}

/// The visitor id of a `chat.message_sent` event written by a visitor.
fn visitor_message_author(event: &StudioEvent) -> Option<String> {
    if event.event_type != event_types::CHAT_MESSAGE_SENT {
        return None;
    }
    let sender: Sender = serde_json::from_value(event.payload.get("sender")?.clone()).ok()?;
    if sender != Sender::User {
        return None;
    }
    event.payload.get("userId")?.as_str().map(str::to_string)
}
