use studio_core::error::CoreError;
use studio_core::settings::AdminSettings;
use studio_events::{event_types, StudioEvent};
use studio_store::repositories::SettingsRepo;
use validator::Validate;

use crate::confirm::{ActionOutcome, Confirmer, PROMPT_RESET_SETTINGS};
use crate::error::AppResult;
use crate::state::AppState;

pub fn load(state: &AppState) -> AppResult<AdminSettings> {
    Ok(SettingsRepo::load(state.store())?)
}

/// Validate and store the full settings record, stamping `saved_at`.
pub async fn save(state: &AppState, settings: AdminSettings) -> AppResult<AdminSettings> {
    let mut settings = settings.normalized();
    settings.validate().map_err(CoreError::from)?;
    settings.saved_at = Some(state.now());

    let guard = state.write_guard().await;
    SettingsRepo::save(state.store(), &settings)?;
    drop(guard);

    state.publish(
        StudioEvent::new(event_types::SETTINGS_SAVED)
            .with_payload(serde_json::json!({ "autoReplyEnabled": settings.auto_reply_enabled })),
    );
    tracing::info!(auto_reply = settings.auto_reply_enabled, "Settings saved");
    Ok(settings)
}

/// Drop stored settings so defaults apply again.
pub async fn reset(state: &AppState, confirmer: &dyn Confirmer) -> AppResult<ActionOutcome> {
    if !confirmer.confirm(PROMPT_RESET_SETTINGS) {
        return Ok(ActionOutcome::Cancelled);
    }
    let guard = state.write_guard().await;
    SettingsRepo::reset(state.store())?;
    drop(guard);

    state.publish(StudioEvent::new(event_types::SETTINGS_SAVED).with_payload(serde_json::json!({ "reset": true })));
    tracing::info!("Settings reset to defaults");
    Ok(ActionOutcome::Applied)
}
