//! Live chat messages, per-viewer read state, and conversation grouping.
//!
//! There is one authoritative message log. What each side has read is a
//! separate relation of `(message_id, viewer) -> read`, so the visitor and
//! the admin never hold diverging copies of the same message.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Limits and canned texts
// ---------------------------------------------------------------------------

/// Messages a visitor sees in their own conversation.
pub const CHAT_HISTORY_LIMIT: usize = 50;

/// Messages the admin inbox shows across all conversations.
pub const ADMIN_INBOX_LIMIT: usize = 100;

pub const WELCOME_TEXT: &str = "Hello! Welcome to Lumière Studio. How can I help you today?";

pub const ADMIN_REPLY_TEXT: &str = "Thanks for your message! We will assist you shortly.";

pub const DEFAULT_AUTO_REPLY_TEXT: &str =
    "We are currently offline. We will respond within 24 hours.";

pub const GUEST_NAME: &str = "Guest";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Admin,
}

/// Who is looking at a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewer {
    User,
    Admin,
}

/// A chat message. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    /// The visitor whose conversation this message belongs to.
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub sender: Sender,
    pub message: String,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    /// The side that wrote a message has implicitly read it.
    pub fn authored_by(&self, viewer: Viewer) -> bool {
        matches!(
            (self.sender, viewer),
            (Sender::User, Viewer::User) | (Sender::Admin, Viewer::Admin)
        )
    }
}

/// One row of the read relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadMark {
    pub message_id: String,
    pub viewer: Viewer,
}

/// The visitor identity kept per browser profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatUser {
    pub id: String,
    pub name: String,
    pub is_guest: bool,
}

impl ChatUser {
    pub fn guest(id: String) -> Self {
        Self {
            id,
            name: GUEST_NAME.to_string(),
            is_guest: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

/// Trim the log to what either view can still show.
///
/// A message survives if it is among the last [`ADMIN_INBOX_LIMIT`]
/// messages overall, or among the last [`CHAT_HISTORY_LIMIT`] of its own
/// conversation. Relative order is preserved.
pub fn retain_window(messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let total = messages.len();
    let inbox_start = total.saturating_sub(ADMIN_INBOX_LIMIT);

    let mut per_user: HashMap<&str, usize> = HashMap::new();
    for m in &messages {
        *per_user.entry(m.user_id.as_str()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    let keep: Vec<bool> = messages
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let nth = seen.entry(m.user_id.as_str()).or_default();
            *nth += 1;
            let in_history = per_user[m.user_id.as_str()] - *nth < CHAT_HISTORY_LIMIT;
            i >= inbox_start || in_history
        })
        .collect();

    messages
        .into_iter()
        .zip(keep)
        .filter_map(|(m, keep)| keep.then_some(m))
        .collect()
}

/// The visitor-side view: trailing window of one conversation.
pub fn user_history<'a>(messages: &'a [ChatMessage], user_id: &str) -> Vec<&'a ChatMessage> {
    let mine: Vec<&ChatMessage> = messages.iter().filter(|m| m.user_id == user_id).collect();
    let start = mine.len().saturating_sub(CHAT_HISTORY_LIMIT);
    mine[start..].to_vec()
}

/// The admin-side view: trailing window across all conversations.
pub fn admin_inbox(messages: &[ChatMessage]) -> &[ChatMessage] {
    &messages[messages.len().saturating_sub(ADMIN_INBOX_LIMIT)..]
}

// ---------------------------------------------------------------------------
// Read state
// ---------------------------------------------------------------------------

/// Lookup over the read relation.
#[derive(Debug, Default, Clone)]
pub struct ReadState {
    marks: HashSet<(String, Viewer)>,
}

impl ReadState {
    pub fn from_marks<I: IntoIterator<Item = ReadMark>>(marks: I) -> Self {
        Self {
            marks: marks
                .into_iter()
                .map(|m| (m.message_id, m.viewer))
                .collect(),
        }
    }

    pub fn is_read(&self, message: &ChatMessage, viewer: Viewer) -> bool {
        message.authored_by(viewer) || self.marks.contains(&(message.id.clone(), viewer))
    }

    /// Messages written by the other side that `viewer` has not read.
    pub fn unread<'a, I>(&self, messages: I, viewer: Viewer) -> usize
    where
        I: IntoIterator<Item = &'a ChatMessage>,
    {
        messages
            .into_iter()
            .filter(|m| !self.is_read(m, viewer))
            .count()
    }
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

/// One visitor's thread as listed in the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    pub user_id: String,
    pub name: String,
    pub is_guest: bool,
    pub messages: Vec<ChatMessage>,
    pub unread_count: usize,
    pub last_message_time: Timestamp,
}

/// Group the inbox window by visitor, newest conversation first.
pub fn conversations(
    messages: &[ChatMessage],
    read: &ReadState,
    known_users: &[ChatUser],
) -> Vec<Conversation> {
    let mut order: Vec<String> = Vec::new();
    let mut by_user: HashMap<String, Conversation> = HashMap::new();

    for m in admin_inbox(messages) {
        let conv = by_user.entry(m.user_id.clone()).or_insert_with(|| {
            order.push(m.user_id.clone());
            let known = known_users.iter().find(|u| u.id == m.user_id);
            Conversation {
                user_id: m.user_id.clone(),
                name: known
                    .map(|u| u.name.clone())
                    .or_else(|| m.user_name.clone())
                    .unwrap_or_else(|| "Guest User".to_string()),
                is_guest: known.map_or(true, |u| u.is_guest),
                messages: Vec::new(),
                unread_count: 0,
                last_message_time: m.timestamp,
            }
        });
        if !read.is_read(m, Viewer::Admin) {
            conv.unread_count += 1;
        }
        if m.timestamp > conv.last_message_time {
            conv.last_message_time = m.timestamp;
        }
        conv.messages.push(m.clone());
    }

    let mut list: Vec<Conversation> = order
        .into_iter()
        .filter_map(|id| by_user.remove(&id))
        .map(|mut c| {
            c.messages.sort_by_key(|m| m.timestamp);
            c
        })
        .collect();
    list.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
    list
}

/// Up to two uppercase initials for the avatar bubble.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Relative "last active" label for the conversation list.
pub fn last_active_label(last: Timestamp, now: Timestamp) -> String {
    let hours = (now - last).num_hours().max(0);
    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{hours} hours ago")
    } else {
        format!("{} days ago", hours / 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_760_000_000 + secs, 0).unwrap()
    }

    fn msg(id: usize, user: &str, sender: Sender) -> ChatMessage {
        ChatMessage {
            id: format!("m{id}"),
            user_id: user.to_string(),
            user_name: None,
            sender,
            message: format!("hello {id}"),
            timestamp: at(id as i64),
        }
    }

    // -- retain_window --

    #[test]
    fn single_conversation_keeps_last_hundred() {
        let log: Vec<ChatMessage> = (0..250).map(|i| msg(i, "u1", Sender::User)).collect();
        let kept = retain_window(log);
        assert_eq!(kept.len(), ADMIN_INBOX_LIMIT);
        assert_eq!(kept.first().unwrap().id, "m150");
        assert_eq!(kept.last().unwrap().id, "m249");
    }

    #[test]
    fn quiet_conversation_keeps_its_history_window() {
        let mut log: Vec<ChatMessage> = (0..60).map(|i| msg(i, "quiet", Sender::User)).collect();
        log.extend((60..300).map(|i| msg(i, "busy", Sender::User)));

        let kept = retain_window(log);
        let quiet: Vec<_> = kept.iter().filter(|m| m.user_id == "quiet").collect();
        assert_eq!(quiet.len(), CHAT_HISTORY_LIMIT);
        assert_eq!(quiet.first().unwrap().id, "m10");
        assert_eq!(admin_inbox(&kept).len(), ADMIN_INBOX_LIMIT);
        assert_eq!(admin_inbox(&kept).last().unwrap().id, "m299");
    }

    #[test]
    fn retain_preserves_order() {
        let log: Vec<ChatMessage> = (0..180)
            .map(|i| msg(i, if i % 3 == 0 { "a" } else { "b" }, Sender::User))
            .collect();
        let kept = retain_window(log);
        assert!(kept.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn views_are_bounded() {
        let log: Vec<ChatMessage> = (0..120).map(|i| msg(i, "u1", Sender::User)).collect();
        let history = user_history(&log, "u1");
        assert_eq!(history.len(), CHAT_HISTORY_LIMIT);
        assert_eq!(history.last().unwrap().id, "m119");
        assert_eq!(admin_inbox(&log).len(), ADMIN_INBOX_LIMIT);
        assert!(user_history(&log, "nobody").is_empty());
    }

    // -- ReadState --

    #[test]
    fn authors_have_read_their_own_messages() {
        let read = ReadState::default();
        let from_user = msg(1, "u1", Sender::User);
        assert!(read.is_read(&from_user, Viewer::User));
        assert!(!read.is_read(&from_user, Viewer::Admin));
    }

    #[test]
    fn read_marks_are_per_viewer() {
        let reply = msg(2, "u1", Sender::Admin);
        let read = ReadState::from_marks([ReadMark {
            message_id: "m2".to_string(),
            viewer: Viewer::User,
        }]);
        assert!(read.is_read(&reply, Viewer::User));
        assert!(read.is_read(&reply, Viewer::Admin));

        let question = msg(3, "u1", Sender::User);
        assert_eq!(read.unread([&reply, &question], Viewer::Admin), 1);
        assert_eq!(read.unread([&reply, &question], Viewer::User), 0);
    }

    // -- conversations --

    #[test]
    fn conversations_group_and_sort_newest_first() {
        let log = vec![
            msg(1, "old", Sender::User),
            msg(2, "new", Sender::User),
            msg(3, "old", Sender::Admin),
            msg(4, "new", Sender::User),
        ];
        let users = vec![ChatUser {
            id: "new".to_string(),
            name: "Rina Putri".to_string(),
            is_guest: false,
        }];
        let list = conversations(&log, &ReadState::default(), &users);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].user_id, "new");
        assert_eq!(list[0].name, "Rina Putri");
        assert!(!list[0].is_guest);
        assert_eq!(list[0].unread_count, 2);
        assert_eq!(list[1].name, "Guest User");
        assert_eq!(list[1].unread_count, 1);
        assert_eq!(list[1].messages.len(), 2);
    }

    #[test]
    fn initials_take_two_words() {
        assert_eq!(initials("rina putri sari"), "RP");
        assert_eq!(initials("Guest"), "G");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn last_active_buckets() {
        assert_eq!(last_active_label(at(0), at(59 * 60)), "Just now");
        assert_eq!(last_active_label(at(0), at(5 * 3600)), "5 hours ago");
        assert_eq!(last_active_label(at(0), at(50 * 3600)), "2 days ago");
    }
}
