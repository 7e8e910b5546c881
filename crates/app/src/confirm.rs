//! Confirmation gate in front of destructive admin actions.

/// Asks the operator to confirm an action.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NeverConfirm;

impl Confirmer for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// What happened to a gated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// Declined at the prompt; nothing was written.
    Cancelled,
}

pub const PROMPT_DELETE_BOOKING: &str = "Are you sure you want to delete this booking?";
pub const PROMPT_REJECT_TESTIMONIAL: &str = "Are you sure you want to reject this testimonial?";
pub const PROMPT_RESET_SETTINGS: &str = "Are you sure you want to reset all settings to default?";
