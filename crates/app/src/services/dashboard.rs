//! Dashboard numbers and badges.

use serde::Serialize;
use studio_core::booking::Booking;
use studio_core::stats::{badge_label, recent_bookings, DashboardStats, RECENT_BOOKINGS_LIMIT};
use studio_events::{event_types, StudioEvent};
use studio_store::repositories::{
    BookingRepo, ChatRepo, NotificationRepo, PresenceRepo, TestimonialRepo,
};

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Badges {
    pub messages: Option<String>,
    pub bookings: Option<String>,
    pub notifications: Option<String>,
    pub testimonials: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub badges: Badges,
    pub recent_bookings: Vec<Booking>,
    pub admin_online: bool,
}

pub fn snapshot(state: &AppState) -> AppResult<DashboardSnapshot> {
    let store = state.store();
    let bookings = BookingRepo::list(store)?;
    let messages = ChatRepo::list(store)?;
    let read = ChatRepo::read_state(store)?;
    let notifications = NotificationRepo::list(store)?;
    let testimonials = TestimonialRepo::list(store)?;

    let stats = DashboardStats::compute(&bookings, &messages, &read, &notifications, &testimonials);
    let badges = Badges {
        messages: badge_label(stats.unread_messages),
        bookings: badge_label(stats.pending_bookings),
        notifications: badge_label(stats.unread_notifications),
        testimonials: badge_label(stats.pending_testimonials),
    };

    Ok(DashboardSnapshot {
        stats,
        badges,
        recent_bookings: recent_bookings(&bookings, RECENT_BOOKINGS_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
        admin_online: PresenceRepo::admin_online(store)?,
    })
}

/// Clear the notification badge. Returns how many were unread.
pub async fn mark_notifications_read(state: &AppState) -> AppResult<usize> {
    let guard = state.write_guard().await;
    let changed = NotificationRepo::mark_all_read(state.store())?;
    drop(guard);
    if changed > 0 {
        state.publish(
            StudioEvent::new(event_types::NOTIFICATIONS_READ)
                .with_payload(serde_json::json!({ "count": changed })),
        );
    }
    Ok(changed)
}
