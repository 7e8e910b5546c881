//! End-to-end booking submission from the public wizard.

mod common;

use assert_matches::assert_matches;
use common::{build_test_state, build_test_state_with, wizard_at_confirm, RecordingChannel};
use studio_app::error::AppError;
use studio_app::services::booking::{submit_booking, MSG_BOOKING_CONFIRMED};
use studio_app::services::{admin_bookings, dashboard};
use studio_core::booking::{BookingFilter, BookingStatus};
use studio_core::catalog::PackageKey;
use studio_core::error::CoreError;
use studio_core::notification::NotificationKind;
use studio_core::wizard::{BookingStep, BookingWizard, MSG_CONFIRM_PAYMENT};
use studio_events::event_types;
use studio_store::repositories::{BookingRepo, NotificationRepo};

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submission_stores_pending_booking_and_notifies() {
    let ctx = build_test_state();
    let mut events = ctx.bus.subscribe();
    let mut wizard = wizard_at_confirm(PackageKey::Professional);

    let before = BookingRepo::list(ctx.store.as_ref()).unwrap().len();
    let receipt = submit_booking(&ctx.state, &mut wizard).await.unwrap();

    let bookings = BookingRepo::list(ctx.store.as_ref()).unwrap();
    assert_eq!(bookings.len(), before + 1);
    let stored = bookings.last().unwrap();
    assert_eq!(stored.package, "Professional - $899");
    assert_eq!(stored.price, "$899");
    assert_eq!(stored.status, BookingStatus::Pending);
    assert_eq!(stored.client_name, "Ayu Lestari");
    assert_eq!(stored, &receipt.booking);
    assert_eq!(receipt.notice, MSG_BOOKING_CONFIRMED);

    let notifications = NotificationRepo::list(ctx.store.as_ref()).unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::NewBooking);
    assert_eq!(notifications[0].client_name, "Ayu Lestari");
    assert!(!notifications[0].read);

    let event = events.recv().await.unwrap();
    assert_eq!(event.event_type, event_types::BOOKING_CREATED);
    assert_eq!(event.source_entity_id, Some(stored.id.to_string()));

    // Wizard back to step 1 with defaults.
    assert_eq!(wizard.current(), BookingStep::Package);
    assert_eq!(wizard, BookingWizard::new());
}

#[tokio::test]
async fn outbound_message_carries_reference_and_local_time() {
    let ctx = build_test_state();
    let mut wizard = wizard_at_confirm(PackageKey::Cinematic);
    let receipt = submit_booking(&ctx.state, &mut wizard).await.unwrap();

    assert_eq!(ctx.channel.count(), 1);
    let (link, message) = ctx.channel.last().unwrap();
    assert_eq!(link, receipt.deep_link);
    assert!(link.starts_with("https://wa.me/62895704403389?text="));
    assert_eq!(message.package, "Cinematic - $1,499");
    assert_eq!(message.booked_at, "14/10/2026, 13.45.12");

    let id = receipt.booking.id.to_string();
    assert_eq!(receipt.reference, format!("YV-{}", &id[id.len() - 6..]));
    assert_eq!(message.booking_reference, receipt.reference);
}

#[tokio::test]
async fn dispatch_failure_still_records_booking() {
    let ctx = build_test_state_with(RecordingChannel::failing());
    let mut wizard = wizard_at_confirm(PackageKey::Basic);
    let receipt = submit_booking(&ctx.state, &mut wizard).await.unwrap();
    assert_eq!(receipt.booking.price, "$499");
    assert_eq!(BookingRepo::list(ctx.store.as_ref()).unwrap().len(), 1);
}

#[tokio::test]
async fn submission_outside_confirm_step_writes_nothing() {
    let ctx = build_test_state();
    let mut wizard = wizard_at_confirm(PackageKey::Professional);
    wizard.go_to_step(BookingStep::Payment).unwrap();

    let result = submit_booking(&ctx.state, &mut wizard).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));
    assert!(BookingRepo::list(ctx.store.as_ref()).unwrap().is_empty());
    assert_eq!(ctx.channel.count(), 0);
    assert_eq!(wizard.current(), BookingStep::Payment);
}

#[tokio::test]
async fn confirm_step_requires_payment_confirmation() {
    let mut wizard = wizard_at_confirm(PackageKey::Professional);
    wizard.go_to_step(BookingStep::Payment).unwrap();
    wizard.set_payment_confirmed(false);

    let err = wizard.go_to_step(BookingStep::Confirm).unwrap_err();
    assert_matches!(err, CoreError::Validation(ref msg) if msg == MSG_CONFIRM_PAYMENT);
    assert_eq!(wizard.current(), BookingStep::Payment);
}

// ---------------------------------------------------------------------------
// Id uniqueness
// ---------------------------------------------------------------------------

#[tokio::test]
async fn same_millisecond_submissions_get_distinct_ids() {
    let ctx = build_test_state();
    let mut first = wizard_at_confirm(PackageKey::Basic);
    let mut second = wizard_at_confirm(PackageKey::Professional);

    let a = submit_booking(&ctx.state, &mut first).await.unwrap();
    let b = submit_booking(&ctx.state, &mut second).await.unwrap();
    assert_ne!(a.booking.id, b.booking.id);
    assert_eq!(b.booking.id, a.booking.id + 1);

    ctx.clock.advance_millis(5_000);
    let mut third = wizard_at_confirm(PackageKey::Cinematic);
    let c = submit_booking(&ctx.state, &mut third).await.unwrap();
    assert_eq!(c.booking.id, a.booking.id + 5_000);
}

// ---------------------------------------------------------------------------
// Dashboard after submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_reflects_submissions() {
    let ctx = build_test_state();
    for package in [PackageKey::Basic, PackageKey::Professional] {
        let mut wizard = wizard_at_confirm(package);
        submit_booking(&ctx.state, &mut wizard).await.unwrap();
        ctx.clock.advance_millis(1_000);
    }

    let snapshot = dashboard::snapshot(&ctx.state).unwrap();
    assert_eq!(snapshot.stats.total_bookings, 2);
    assert_eq!(snapshot.stats.pending_bookings, 2);
    assert_eq!(snapshot.stats.revenue_label(), "$1,398");
    assert_eq!(snapshot.badges.notifications.as_deref(), Some("2"));
    assert_eq!(snapshot.recent_bookings[0].package, "Professional - $899");

    assert_eq!(dashboard::mark_notifications_read(&ctx.state).await.unwrap(), 2);
    let snapshot = dashboard::snapshot(&ctx.state).unwrap();
    assert_eq!(snapshot.badges.notifications, None);

    let pending = admin_bookings::list(&ctx.state, BookingFilter::Status(BookingStatus::Pending)).unwrap();
    assert_eq!(pending.len(), 2);
}
