//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Services publish a [`StudioEvent`] after every successful write so
//! views can redraw without polling the store. Share it as `Arc<EventBus>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event names
// ---------------------------------------------------------------------------

pub mod event_types {
    pub const BOOKING_CREATED: &str = "booking.created";
    pub const BOOKING_STATUS_CHANGED: &str = "booking.status_changed";
    pub const BOOKING_DELETED: &str = "booking.deleted";
    pub const CHAT_MESSAGE_SENT: &str = "chat.message_sent";
    pub const CHAT_REPLY_SENT: &str = "chat.reply_sent";
    pub const CHAT_READ: &str = "chat.read";
    pub const TESTIMONIAL_APPROVED: &str = "testimonial.approved";
    pub const TESTIMONIAL_REJECTED: &str = "testimonial.rejected";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const ADMIN_PRESENCE_CHANGED: &str = "admin.presence_changed";
    pub const NOTIFICATIONS_READ: &str = "notifications.read";

    /// Events that change a dashboard number.
    pub const DASHBOARD: &[&str] = &[
        BOOKING_CREATED,
        BOOKING_STATUS_CHANGED,
        BOOKING_DELETED,
        CHAT_MESSAGE_SENT,
        CHAT_REPLY_SENT,
        CHAT_READ,
        TESTIMONIAL_APPROVED,
        TESTIMONIAL_REJECTED,
        NOTIFICATIONS_READ,
    ];

    pub fn affects_dashboard(event_type: &str) -> bool {
        DASHBOARD.contains(&event_type)
    }
}

// ---------------------------------------------------------------------------
// StudioEvent
// ---------------------------------------------------------------------------

/// Something changed in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioEvent {
    /// Dot-separated event name, see [`event_types`].
    pub event_type: String,

    /// Kind of record touched, e.g. `"booking"`.
    pub source_entity_type: Option<String>,

    /// Id of the record touched. Chat ids are strings, so every id is
    /// carried as text.
    pub source_entity_id: Option<String>,

    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl StudioEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: impl ToString) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id.to_string());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Override the creation time, e.g. with an injected clock.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 1024;

/// Fan-out bus: every subscriber sees every event published after it
/// subscribed. A slow receiver that falls behind the buffer observes
/// `RecvError::Lagged`.
pub struct EventBus {
    sender: broadcast::Sender<StudioEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. With none, the event is dropped.
    pub fn publish(&self, event: StudioEvent) {
        let event_type = event.event_type.clone();
        match self.sender.send(event) {
            Ok(receivers) => tracing::trace!(%event_type, receivers, "Event published"),
            Err(_) => tracing::trace!(%event_type, "Event dropped, no subscribers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StudioEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
