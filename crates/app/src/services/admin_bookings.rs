//! Booking management in the admin console.

use studio_core::booking::{Booking, BookingFilter, BookingStatus, NewBooking};
use studio_core::error::CoreError;
use studio_core::ids::next_timestamp_id;
use studio_core::stats;
use studio_core::types::RecordId;
use studio_events::{event_types, StudioEvent};
use studio_store::repositories::BookingRepo;

use crate::confirm::{ActionOutcome, Confirmer, PROMPT_DELETE_BOOKING};
use crate::error::AppResult;
use crate::state::AppState;

/// Bookings matching `filter`, newest first.
pub fn list(state: &AppState, filter: BookingFilter) -> AppResult<Vec<Booking>> {
    let mut bookings: Vec<Booking> = BookingRepo::list(state.store())?
        .into_iter()
        .filter(|b| filter.matches(b))
        .collect();
    bookings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(bookings)
}

/// The last `limit` bookings added, newest first.
pub fn recent(state: &AppState, limit: usize) -> AppResult<Vec<Booking>> {
    let all = BookingRepo::list(state.store())?;
    Ok(stats::recent_bookings(&all, limit).into_iter().cloned().collect())
}

/// Details text for the view dialog.
pub fn view(state: &AppState, id: RecordId) -> AppResult<String> {
    BookingRepo::find_by_id(state.store(), id)?
        .map(|b| b.details_text())
        .ok_or_else(|| CoreError::not_found("Booking", id).into())
}

/// Record a booking typed in by the admin.
pub async fn add_booking(state: &AppState, input: NewBooking) -> AppResult<Booking> {
    let guard = state.write_guard().await;
    let store = state.store();
    let existing = BookingRepo::list(store)?;
    let id = next_timestamp_id(state.clock.now_millis(), existing.iter().map(|b| b.id));
    let booking = input.into_booking(id, state.now())?;
    BookingRepo::append(store, booking.clone())?;
    drop(guard);

    state.publish(
        StudioEvent::new(event_types::BOOKING_CREATED)
            .with_source("booking", id)
            .with_payload(serde_json::json!({ "clientName": booking.client_name, "addedBy": "admin" })),
    );
    tracing::info!(booking_id = id, "Admin added booking");
    Ok(booking)
}

/// Change a booking's status from free text.
///
/// Anything other than `pending`, `confirmed` or `done` is rejected and
/// nothing is written.
pub async fn edit_status(state: &AppState, id: RecordId, new_status: &str) -> AppResult<Booking> {
    let status = BookingStatus::from_str_db(new_status)?;

    let guard = state.write_guard().await;
    let updated = BookingRepo::update_status(state.store(), id, status)?
        .ok_or_else(|| CoreError::not_found("Booking", id))?;
    drop(guard);

    state.publish(
        StudioEvent::new(event_types::BOOKING_STATUS_CHANGED)
            .with_source("booking", id)
            .with_payload(serde_json::json!({ "status": status.as_str() })),
    );
    tracing::info!(booking_id = id, status = status.as_str(), "Booking status updated");
    Ok(updated)
}

pub async fn delete(
    state: &AppState,
    id: RecordId,
    confirmer: &dyn Confirmer,
) -> AppResult<ActionOutcome> {
    if !confirmer.confirm(PROMPT_DELETE_BOOKING) {
        return Ok(ActionOutcome::Cancelled);
    }

    let guard = state.write_guard().await;
    let existed = BookingRepo::delete(state.store(), id)?;
    drop(guard);
    if !existed {
        return Err(CoreError::not_found("Booking", id).into());
    }

    state.publish(StudioEvent::new(event_types::BOOKING_DELETED).with_source("booking", id));
    tracing::info!(booking_id = id, "Booking deleted");
    Ok(ActionOutcome::Applied)
}
