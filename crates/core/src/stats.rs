//! Dashboard projections over the loaded collections.

use std::collections::HashSet;

use serde::Serialize;

use crate::booking::{format_price, Booking, BookingStatus};
use crate::chat::{admin_inbox, ChatMessage, ReadState, Viewer};
use crate::notification::{self, AdminNotification};
use crate::testimonial::Testimonial;

/// Rows in the "recent bookings" table.
pub const RECENT_BOOKINGS_LIMIT: usize = 5;

/// Badges stop counting past this.
pub const BADGE_CAP: usize = 9;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_bookings: usize,
    pub pending_bookings: usize,
    pub total_revenue: u64,
    pub active_chats: usize,
    pub unread_messages: usize,
    pub unread_notifications: usize,
    pub total_testimonials: usize,
    pub pending_testimonials: usize,
}

impl DashboardStats {
    pub fn compute(
        bookings: &[Booking],
        messages: &[ChatMessage],
        read: &ReadState,
        notifications: &[AdminNotification],
        testimonials: &[Testimonial],
    ) -> Self {
        let inbox = admin_inbox(messages);
        let active_chats = inbox
            .iter()
            .map(|m| m.user_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_bookings: bookings.len(),
            pending_bookings: bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Pending)
                .count(),
            // Unparseable prices contribute nothing.
            total_revenue: bookings.iter().filter_map(Booking::price_value).sum(),
            active_chats,
            unread_messages: read.unread(inbox, Viewer::Admin),
            unread_notifications: notification::unread_count(notifications),
            total_testimonials: testimonials.len(),
            pending_testimonials: testimonials.iter().filter(|t| !t.verified).count(),
        }
    }

    pub fn revenue_label(&self) -> String {
        format_price(self.total_revenue)
    }
}

/// The last `limit` bookings, newest first.
pub fn recent_bookings(bookings: &[Booking], limit: usize) -> Vec<&Booking> {
    bookings.iter().rev().take(limit).collect()
}

/// Badge text: hidden at zero, capped at `9+`.
pub fn badge_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        n if n > BADGE_CAP => Some(format!("{BADGE_CAP}+")),
        n => Some(n.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Sender;
    use chrono::{TimeZone, Utc};

    fn booking(id: i64, price: &str, status: BookingStatus) -> Booking {
        Booking {
            id,
            client_name: format!("client {id}"),
            client_email: "c@example.com".to_string(),
            client_phone: "0812".to_string(),
            package: "Professional - $899".to_string(),
            price: price.to_string(),
            event_type: "Wedding".to_string(),
            event_date: "2026-11-21".to_string(),
            event_time: String::new(),
            event_location: String::new(),
            event_notes: String::new(),
            status,
            timestamp: Utc.with_ymd_and_hms(2026, 10, 14, 6, 0, 0).unwrap(),
        }
    }

    fn message(id: &str, user: &str, sender: Sender) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            user_id: user.to_string(),
            user_name: None,
            sender,
            message: "hi".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 10, 14, 6, 0, 0).unwrap(),
        }
    }

    #[test]
    fn compute_aggregates_everything() {
        let bookings = vec![
            booking(1, "$899", BookingStatus::Pending),
            booking(2, "$1,499", BookingStatus::Done),
            booking(3, "TBD", BookingStatus::Pending),
        ];
        let messages = vec![
            message("a", "u1", Sender::User),
            message("b", "u1", Sender::Admin),
            message("c", "u2", Sender::User),
        ];
        let notifications = vec![AdminNotification::new_booking("x", Utc::now())];

        let stats = DashboardStats::compute(
            &bookings,
            &messages,
            &ReadState::default(),
            &notifications,
            &[],
        );
        assert_eq!(stats.total_bookings, 3);
        assert_eq!(stats.pending_bookings, 2);
        assert_eq!(stats.total_revenue, 2_398);
        assert_eq!(stats.revenue_label(), "$2,398");
        assert_eq!(stats.active_chats, 2);
        assert_eq!(stats.unread_messages, 2);
        assert_eq!(stats.unread_notifications, 1);
    }

    #[test]
    fn recent_is_newest_first() {
        let bookings: Vec<Booking> = (1..=8)
            .map(|i| booking(i, "$499", BookingStatus::Pending))
            .collect();
        let ids: Vec<i64> = recent_bookings(&bookings, RECENT_BOOKINGS_LIMIT)
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![8, 7, 6, 5, 4]);
    }

    #[test]
    fn badges_cap_at_nine() {
        assert_eq!(badge_label(0), None);
        assert_eq!(badge_label(3).as_deref(), Some("3"));
        assert_eq!(badge_label(9).as_deref(), Some("9"));
        assert_eq!(badge_label(10).as_deref(), Some("9+"));
    }
}
