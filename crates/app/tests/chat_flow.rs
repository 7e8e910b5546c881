//! Chat widget and admin inbox over the shared message log.

mod common;

use assert_matches::assert_matches;
use common::build_test_state;
use studio_app::error::AppError;
use studio_app::services::chat::{self, PendingReply};
use studio_app::services::settings;
use studio_core::chat::{
    Sender, ADMIN_INBOX_LIMIT, ADMIN_REPLY_TEXT, CHAT_HISTORY_LIMIT, DEFAULT_AUTO_REPLY_TEXT,
    WELCOME_TEXT,
};
use studio_core::error::CoreError;
use studio_core::settings::AdminSettings;
use studio_store::repositories::ChatRepo;

// ---------------------------------------------------------------------------
// Visitor side
// ---------------------------------------------------------------------------

#[tokio::test]
async fn guest_identity_is_created_once() {
    let ctx = build_test_state();
    let first = chat::current_user(&ctx.state).await.unwrap();
    assert!(first.is_guest);
    assert_eq!(first.name, "Guest");
    assert!(first.id.starts_with("user_"));

    ctx.clock.advance_millis(10);
    let again = chat::current_user(&ctx.state).await.unwrap();
    assert_eq!(again, first);
}

#[tokio::test]
async fn opening_empty_chat_adds_welcome_once() {
    let ctx = build_test_state();
    let user = chat::current_user(&ctx.state).await.unwrap();

    let history = chat::open_conversation(&ctx.state, &user).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].message, WELCOME_TEXT);
    assert_eq!(history[0].sender, Sender::Admin);
    assert!(history[0].id.starts_with("welcome_"));

    let again = chat::open_conversation(&ctx.state, &user).await.unwrap();
    assert_eq!(again.len(), 1);
    assert_eq!(chat::user_unread_count(&ctx.state, &user.id).unwrap(), 0);
}

#[tokio::test]
async fn blank_messages_are_ignored() {
    let ctx = build_test_state();
    let user = chat::current_user(&ctx.state).await.unwrap();
    assert!(chat::send_user_message(&ctx.state, &user, "   \n")
        .await
        .unwrap()
        .is_none());
    assert!(ChatRepo::list(ctx.store.as_ref()).unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Automatic replies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn online_admin_sends_canned_reply() {
    let ctx = build_test_state();
    let user = chat::current_user(&ctx.state).await.unwrap();
    chat::set_admin_online(&ctx.state, true).await.unwrap();
    chat::send_user_message(&ctx.state, &user, "Is November free?")
        .await
        .unwrap();

    assert_eq!(chat::pending_reply(&ctx.state).unwrap(), Some(PendingReply::Admin));
    let reply = chat::reply_to_user(&ctx.state, &user.id).await.unwrap().unwrap();
    assert_eq!(reply.message, ADMIN_REPLY_TEXT);
    assert!(reply.id.starts_with("admin_"));
    assert_eq!(chat::user_unread_count(&ctx.state, &user.id).unwrap(), 1);
}

#[tokio::test]
async fn offline_admin_uses_configured_auto_reply() {
    let ctx = build_test_state();
    let user = chat::current_user(&ctx.state).await.unwrap();

    let reply = chat::reply_to_user(&ctx.state, &user.id).await.unwrap().unwrap();
    assert_eq!(reply.message, DEFAULT_AUTO_REPLY_TEXT);
    assert!(reply.id.starts_with("auto_"));

    settings::save(
        &ctx.state,
        AdminSettings {
            auto_reply_message: "Back on Monday!".into(),
            ..AdminSettings::default()
        },
    )
    .await
    .unwrap();
    let reply = chat::reply_to_user(&ctx.state, &user.id).await.unwrap().unwrap();
    assert_eq!(reply.message, "Back on Monday!");
}

#[tokio::test]
async fn offline_without_auto_reply_stays_silent() {
    let ctx = build_test_state();
    let user = chat::current_user(&ctx.state).await.unwrap();
    settings::save(
        &ctx.state,
        AdminSettings {
            auto_reply_enabled: false,
            ..AdminSettings::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(chat::pending_reply(&ctx.state).unwrap(), None);
    assert!(chat::reply_to_user(&ctx.state, &user.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Read state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn read_state_is_tracked_per_side() {
    let ctx = build_test_state();
    let user = chat::current_user(&ctx.state).await.unwrap();
    chat::send_user_message(&ctx.state, &user, "Hello").await.unwrap();
    ctx.clock.advance_millis(1);
    chat::send_user_message(&ctx.state, &user, "Anyone there?").await.unwrap();

    assert_eq!(chat::admin_unread_count(&ctx.state).unwrap(), 2);
    assert_eq!(chat::user_unread_count(&ctx.state, &user.id).unwrap(), 0);

    let conversation = chat::open_for_admin(&ctx.state, &user.id).await.unwrap();
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.unread_count, 0);
    assert_eq!(chat::admin_unread_count(&ctx.state).unwrap(), 0);

    chat::send_admin_message(&ctx.state, &user.id, "Hi! How can we help?")
        .await
        .unwrap();
    assert_eq!(chat::user_unread_count(&ctx.state, &user.id).unwrap(), 1);
    assert_eq!(chat::admin_unread_count(&ctx.state).unwrap(), 0);

    assert_eq!(chat::mark_user_read(&ctx.state, &user.id).await.unwrap(), 1);
    assert_eq!(chat::user_unread_count(&ctx.state, &user.id).unwrap(), 0);
}

#[tokio::test]
async fn unknown_conversation_is_not_found() {
    let ctx = build_test_state();
    assert_matches!(
        chat::open_for_admin(&ctx.state, "user_404").await,
        Err(AppError::Core(CoreError::NotFound { .. }))
    );
}

#[tokio::test]
async fn conversations_list_names_the_visitor() {
    let ctx = build_test_state();
    let user = chat::current_user(&ctx.state).await.unwrap();
    chat::send_user_message(&ctx.state, &user, "Hello").await.unwrap();

    let list = chat::conversations(&ctx.state).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].user_id, user.id);
    assert_eq!(list[0].name, "Guest");
    assert!(list[0].is_guest);
    assert_eq!(list[0].unread_count, 1);
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn views_stay_bounded_after_many_messages() {
    let ctx = build_test_state();
    let user = chat::current_user(&ctx.state).await.unwrap();
    for n in 0..(ADMIN_INBOX_LIMIT + 30) {
        chat::send_user_message(&ctx.state, &user, &format!("message {n}"))
            .await
            .unwrap();
        ctx.clock.advance_millis(1);
    }

    let history = chat::history(&ctx.state, &user.id).unwrap();
    assert_eq!(history.len(), CHAT_HISTORY_LIMIT);
    assert_eq!(history.last().unwrap().message, format!("message {}", ADMIN_INBOX_LIMIT + 29));

    let log = ChatRepo::list(ctx.store.as_ref()).unwrap();
    assert_eq!(log.len(), ADMIN_INBOX_LIMIT);
    assert_eq!(chat::admin_unread_count(&ctx.state).unwrap(), ADMIN_INBOX_LIMIT);

    let ids: std::collections::HashSet<&str> = log.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids.len(), log.len());
}

#[tokio::test]
async fn toggling_presence_flips_the_flag() {
    let ctx = build_test_state();
    assert!(!chat::admin_online(&ctx.state).unwrap());
    assert!(chat::toggle_admin_online(&ctx.state).await.unwrap());
    assert!(chat::admin_online(&ctx.state).unwrap());
    assert!(!chat::toggle_admin_online(&ctx.state).await.unwrap());
}
