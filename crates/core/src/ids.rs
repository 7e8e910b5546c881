//! Timestamp-derived identifiers.
//!
//! Records are keyed by the epoch milliseconds at creation. Two records
//! created inside the same millisecond would collide, so the generators
//! here bump past every id already in use.

use crate::types::RecordId;

/// Prefix for ids of messages typed by a site visitor.
pub const PREFIX_USER_MESSAGE: &str = "msg_";

/// Prefix for ids of messages sent from the admin console.
pub const PREFIX_ADMIN_MESSAGE: &str = "admin_";

/// Prefix for ids of the offline auto-reply.
pub const PREFIX_AUTO_MESSAGE: &str = "auto_";

/// Prefix for ids of the greeting posted into an empty conversation.
pub const PREFIX_WELCOME_MESSAGE: &str = "welcome_";

/// Prefix for guest visitor ids.
pub const PREFIX_GUEST_USER: &str = "user_";

/// Pick a numeric id for a new record.
///
/// Returns `now_millis` unless it is not greater than some existing id, in
/// which case the result is one past the largest existing id.
pub fn next_timestamp_id<I>(now_millis: i64, existing: I) -> RecordId
where
    I: IntoIterator<Item = RecordId>,
{
    match existing.into_iter().max() {
        Some(max) if max >= now_millis => max + 1,
        _ => now_millis,
    }
}

/// Pick a prefixed string id such as `msg_1760421912000`.
///
/// Only existing ids carrying the same prefix and a numeric suffix take
/// part in collision avoidance.
pub fn next_prefixed_id<'a, I>(prefix: &str, now_millis: i64, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken = existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<i64>().ok());
    format!("{prefix}{}", next_timestamp_id(now_millis, taken))
}
