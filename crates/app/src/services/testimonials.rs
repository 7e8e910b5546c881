//! Testimonial review: nothing is public until the admin approves it.

use studio_core::error::CoreError;
use studio_core::testimonial::{self, Testimonial};
use studio_core::types::RecordId;
use studio_events::{event_types, StudioEvent};
use studio_store::repositories::TestimonialRepo;

use crate::confirm::{ActionOutcome, Confirmer, PROMPT_REJECT_TESTIMONIAL};
use crate::error::AppResult;
use crate::state::AppState;

/// Awaiting review.
pub fn pending(state: &AppState) -> AppResult<Vec<Testimonial>> {
    let all = TestimonialRepo::list(state.store())?;
    Ok(testimonial::pending(&all).into_iter().cloned().collect())
}

/// Approved and publicly visible.
pub fn published(state: &AppState) -> AppResult<Vec<Testimonial>> {
    let all = TestimonialRepo::list(state.store())?;
    Ok(testimonial::published(&all).into_iter().cloned().collect())
}

pub fn view(state: &AppState, id: RecordId) -> AppResult<String> {
    TestimonialRepo::find_by_id(state.store(), id)?
        .map(|t| t.details_text())
        .ok_or_else(|| CoreError::not_found("Testimonial", id).into())
}

pub async fn approve(state: &AppState, id: RecordId) -> AppResult<Testimonial> {
    let guard = state.write_guard().await;
    let approved = TestimonialRepo::approve(state.store(), id)?
        .ok_or_else(|| CoreError::not_found("Testimonial", id))?;
    drop(guard);

    state.publish(StudioEvent::new(event_types::TESTIMONIAL_APPROVED).with_source("testimonial", id));
    tracing::info!(testimonial_id = id, "Testimonial approved");
    Ok(approved)
}

/// Reject and delete a testimonial after confirmation.
pub async fn reject(
    state: &AppState,
    id: RecordId,
    confirmer: &dyn Confirmer,
) -> AppResult<ActionOutcome> {
    if !confirmer.confirm(PROMPT_REJECT_TESTIMONIAL) {
        return Ok(ActionOutcome::Cancelled);
    }

    let guard = state.write_guard().await;
    let existed = TestimonialRepo::delete(state.store(), id)?;
    drop(guard);
    if !existed {
        return Err(CoreError::not_found("Testimonial", id).into());
    }

    state.publish(StudioEvent::new(event_types::TESTIMONIAL_REJECTED).with_source("testimonial", id));
    tracing::info!(testimonial_id = id, "Testimonial rejected");
    Ok(ActionOutcome::Applied)
}
