//! Live chat: the visitor widget and the admin inbox.
//!
//! Both sides read the same message log. What each side has seen is kept
//! in the read relation, never on the message itself.

use std::time::Duration;

use studio_core::chat::{
    admin_inbox, conversations as group_conversations, user_history, ChatMessage, ChatUser,
    Conversation, Sender, Viewer, ADMIN_REPLY_TEXT, WELCOME_TEXT,
};
use studio_core::error::CoreError;
use studio_core::ids::{
    next_prefixed_id, PREFIX_ADMIN_MESSAGE, PREFIX_AUTO_MESSAGE, PREFIX_GUEST_USER,
    PREFIX_USER_MESSAGE, PREFIX_WELCOME_MESSAGE,
};
use studio_events::{event_types, StudioEvent};
use studio_store::repositories::{ChatRepo, PresenceRepo, SettingsRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// An automatic answer to a visitor message, decided from presence and
/// settings at the time it is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingReply {
    /// The admin is online; the canned admin reply follows.
    Admin,
    /// The admin is offline and auto-reply is enabled.
    Auto,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Append a new message with a collision-free prefixed id.
fn append(
    state: &AppState,
    prefix: &str,
    user_id: &str,
    user_name: Option<String>,
    sender: Sender,
    text: String,
) -> AppResult<ChatMessage> {
    let store = state.store();
    let log = ChatRepo::list(store)?;
    let id = next_prefixed_id(
        prefix,
        state.clock.now_millis(),
        log.iter().map(|m| m.id.as_str()),
    );
    let message = ChatMessage {
        id,
        user_id: user_id.to_string(),
        user_name,
        sender,
        message: text,
        timestamp: state.now(),
    };
    ChatRepo::append(store, message.clone())?;
    Ok(message)
}

fn publish_message(state: &AppState, event_type: &str, message: &ChatMessage) {
    state.publish(
        StudioEvent::new(event_type)
            .with_source("chat_message", &message.id)
            .with_payload(serde_json::json!({
                "userId": message.user_id,
                "sender": message.sender,
            })),
    );
}

// ---------------------------------------------------------------------------
// Visitor side
// ---------------------------------------------------------------------------

/// The visitor identity, created as a guest on first use.
pub async fn current_user(state: &AppState) -> AppResult<ChatUser> {
    let _guard = state.write_guard().await;
    if let Some(user) = PresenceRepo::chat_user(state.store())? {
        return Ok(user);
    }
    let id = next_prefixed_id(PREFIX_GUEST_USER, state.clock.now_millis(), std::iter::empty());
    let user = ChatUser::guest(id);
    PresenceRepo::save_chat_user(state.store(), &user)?;
    tracing::debug!(user_id = %user.id, "Created guest chat user");
    Ok(user)
}

/// Open the widget: greet a new visitor, mark replies read, return the
/// visible history.
pub async fn open_conversation(state: &AppState, user: &ChatUser) -> AppResult<Vec<ChatMessage>> {
    let guard = state.write_guard().await;
    let log = ChatRepo::list(state.store())?;
    if user_history(&log, &user.id).is_empty() {
        let welcome = append(
            state,
            PREFIX_WELCOME_MESSAGE,
            &user.id,
            None,
            Sender::Admin,
            WELCOME_TEXT.to_string(),
        )?;
        tracing::debug!(user_id = %user.id, message_id = %welcome.id, "Welcome message added");
    }
    drop(guard);

    mark_user_read(state, &user.id).await?;
    history(state, &user.id)
}

/// Post a visitor message. Blank text is ignored and yields `None`.
pub async fn send_user_message(
    state: &AppState,
    user: &ChatUser,
    text: &str,
) -> AppResult<Option<ChatMessage>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let guard = state.write_guard().await;
    let message = append(
        state,
        PREFIX_USER_MESSAGE,
        &user.id,
        Some(user.name.clone()),
        Sender::User,
        text.to_string(),
    )?;
    drop(guard);

    publish_message(state, event_types::CHAT_MESSAGE_SENT, &message);
    tracing::info!(user_id = %user.id, message_id = %message.id, "Visitor message sent");
    Ok(Some(message))
}

/// Which automatic reply a visitor message would get right now.
pub fn pending_reply(state: &AppState) -> AppResult<Option<PendingReply>> {
    let store = state.store();
    if PresenceRepo::admin_online(store)? {
        return Ok(Some(PendingReply::Admin));
    }
    let settings = SettingsRepo::load(store)?;
    Ok(settings.auto_reply_enabled.then_some(PendingReply::Auto))
}

/// How long the responder waits before sending `reply`.
pub fn reply_delay(state: &AppState, reply: PendingReply) -> Duration {
    match reply {
        PendingReply::Admin => state.config.admin_reply_delay(),
        PendingReply::Auto => state.config.auto_reply_delay(),
    }
}

/// Send the automatic reply, if any, to `user_id`.
///
/// Online admin: the canned admin reply. Offline with auto-reply on: the
/// configured offline message. Otherwise nothing.
pub async fn reply_to_user(state: &AppState, user_id: &str) -> AppResult<Option<ChatMessage>> {
    let guard = state.write_guard().await;
    let Some(kind) = pending_reply(state)? else {
        return Ok(None);
    };
    let (prefix, text) = match kind {
        PendingReply::Admin => (PREFIX_ADMIN_MESSAGE, ADMIN_REPLY_TEXT.to_string()),
        PendingReply::Auto => (
            PREFIX_AUTO_MESSAGE,
            SettingsRepo::load(state.store())?.auto_reply_text().to_string(),
        ),
    };
    let message = append(state, prefix, user_id, None, Sender::Admin, text)?;
    drop(guard);

    publish_message(state, event_types::CHAT_REPLY_SENT, &message);
    tracing::debug!(user_id, message_id = %message.id, ?kind, "Automatic reply sent");
    Ok(Some(message))
}

/// The visitor's last messages, oldest first.
pub fn history(state: &AppState, user_id: &str) -> AppResult<Vec<ChatMessage>> {
    let log = ChatRepo::list(state.store())?;
    Ok(user_history(&log, user_id).into_iter().cloned().collect())
}

pub fn user_unread_count(state: &AppState, user_id: &str) -> AppResult<usize> {
    let store = state.store();
    let log = ChatRepo::list(store)?;
    let read = ChatRepo::read_state(store)?;
    Ok(read.unread(user_history(&log, user_id), Viewer::User))
}

/// Mark everything in the visitor's window as read by the visitor.
pub async fn mark_user_read(state: &AppState, user_id: &str) -> AppResult<usize> {
    let guard = state.write_guard().await;
    let store = state.store();
    let log = ChatRepo::list(store)?;
    let read = ChatRepo::read_state(store)?;
    let unread: Vec<&str> = user_history(&log, user_id)
        .into_iter()
        .filter(|m| !read.is_read(m, Viewer::User))
        .map(|m| m.id.as_str())
        .collect();
    let marked = ChatRepo::mark_read(store, Viewer::User, unread)?;
    drop(guard);

    if marked > 0 {
        state.publish(
            StudioEvent::new(event_types::CHAT_READ)
                .with_payload(serde_json::json!({ "viewer": Viewer::User, "userId": user_id, "count": marked })),
        );
    }
    Ok(marked)
}

// ---------------------------------------------------------------------------
// Admin side
// ---------------------------------------------------------------------------

/// Inbox grouped by visitor, most recent conversation first.
pub fn conversations(state: &AppState) -> AppResult<Vec<Conversation>> {
    let store = state.store();
    let log = ChatRepo::list(store)?;
    let read = ChatRepo::read_state(store)?;
    let known: Vec<ChatUser> = PresenceRepo::chat_user(store)?.into_iter().collect();
    Ok(group_conversations(&log, &read, &known))
}

/// Open one conversation in the console, marking it read by the admin.
pub async fn open_for_admin(state: &AppState, user_id: &str) -> AppResult<Conversation> {
    let guard = state.write_guard().await;
    let mut conversation = conversations(state)?
        .into_iter()
        .find(|c| c.user_id == user_id)
        .ok_or_else(|| CoreError::not_found("Conversation", user_id))?;

    let marked = ChatRepo::mark_read(
        state.store(),
        Viewer::Admin,
        conversation.messages.iter().map(|m| m.id.as_str()),
    )?;
    drop(guard);

    conversation.unread_count = 0;
    if marked > 0 {
        state.publish(
            StudioEvent::new(event_types::CHAT_READ)
                .with_payload(serde_json::json!({ "viewer": Viewer::Admin, "userId": user_id, "count": marked })),
        );
    }
    Ok(conversation)
}

/// Reply from the console. Blank text is ignored and yields `None`.
pub async fn send_admin_message(
    state: &AppState,
    user_id: &str,
    text: &str,
) -> AppResult<Option<ChatMessage>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let guard = state.write_guard().await;
    let message = append(
        state,
        PREFIX_ADMIN_MESSAGE,
        user_id,
        None,
        Sender::Admin,
        text.to_string(),
    )?;
    drop(guard);

    publish_message(state, event_types::CHAT_REPLY_SENT, &message);
    tracing::info!(user_id, message_id = %message.id, "Admin reply sent");
    Ok(Some(message))
}

/// Visitor messages in the inbox window the admin has not read.
pub fn admin_unread_count(state: &AppState) -> AppResult<usize> {
    let store = state.store();
    let log = ChatRepo::list(store)?;
    let read = ChatRepo::read_state(store)?;
    Ok(read.unread(admin_inbox(&log), Viewer::Admin))
}

pub fn admin_online(state: &AppState) -> AppResult<bool> {
    Ok(PresenceRepo::admin_online(state.store())?)
}

pub async fn set_admin_online(state: &AppState, online: bool) -> AppResult<()> {
    let guard = state.write_guard().await;
    PresenceRepo::set_admin_online(state.store(), online)?;
    drop(guard);

    state.publish(
        StudioEvent::new(event_types::ADMIN_PRESENCE_CHANGED)
            .with_payload(serde_json::json!({ "online": online })),
    );
    tracing::info!(online, "Admin presence changed");
    Ok(())
}

/// Flip presence, returning the new value.
pub async fn toggle_admin_online(state: &AppState) -> AppResult<bool> {
    let online = !admin_online(state)?;
    set_admin_online(state, online).await?;
    Ok(online)
}
