//! Booking submission from the public wizard.

use serde::Serialize;
use studio_core::booking::Booking;
use studio_core::ids::next_timestamp_id;
use studio_core::notification::AdminNotification;
use studio_core::outbound::{booking_reference, BookingMessage};
use studio_core::wizard::BookingWizard;
use studio_events::{event_types, StudioEvent};
use studio_store::repositories::{BookingRepo, NotificationRepo};

use crate::error::AppResult;
use crate::state::AppState;

pub const MSG_BOOKING_CONFIRMED: &str = "Booking confirmed! Thank you for choosing YV STUDIO. \
     We will contact you shortly to confirm details.";

/// What the visitor gets back after a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    pub booking: Booking,
    pub reference: String,
    pub deep_link: String,
    /// Thank-you text shown once the booking is recorded.
    pub notice: &'static str,
}

/// Submit the wizard's booking.
///
/// Requires the wizard to be on the confirmation step with steps 1-3
/// valid; otherwise nothing is dispatched or written. On success the
/// wizard is reset to step 1 with default selections.
pub async fn submit_booking(state: &AppState, wizard: &mut BookingWizard) -> AppResult<BookingReceipt> {
    wizard.validate_for_submission()?;
    let form = wizard.form().clone();

    let guard = state.write_guard().await;
    let store = state.store();

    let existing = BookingRepo::list(store)?;
    let id = next_timestamp_id(state.clock.now_millis(), existing.iter().map(|b| b.id));
    let reference = booking_reference(id);

    let message = BookingMessage::from_form(&form, reference.clone(), &state.local_now());
    let deep_link = message.deep_link(&state.config.whatsapp_number);
    if let Err(e) = state.channel.dispatch(&deep_link, &message) {
        // The booking is still recorded; the studio sees it in the console.
        tracing::warn!(error = %e, %reference, "Booking message dispatch failed");
    }

    let booking = form.to_booking(id, state.now());
    let total = BookingRepo::append(store, booking.clone())?;
    NotificationRepo::append(
        store,
        AdminNotification::new_booking(booking.client_name.clone(), booking.timestamp),
    )?;
    drop(guard);

    state.publish(
        StudioEvent::new(event_types::BOOKING_CREATED)
            .with_source("booking", id)
            .with_payload(serde_json::json!({
                "clientName": booking.client_name,
                "package": booking.package,
            })),
    );
    tracing::info!(booking_id = id, %reference, total, "Booking submitted");

    wizard.reset();
    Ok(BookingReceipt {
        booking,
        reference,
        deep_link,
        notice: MSG_BOOKING_CONFIRMED,
    })
}
