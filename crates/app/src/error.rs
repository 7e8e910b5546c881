use studio_core::error::CoreError;
use studio_store::StoreError;

use crate::config::ConfigError;

/// Shown when the failure is not something the user can fix.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Application-level error type for services.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Text suitable for the blocking alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) | CoreError::Unauthorized(msg) => msg.clone(),
                CoreError::NotFound { entity, .. } => format!("{entity} not found"),
            },
            AppError::Store(err) => {
                tracing::error!(error = %err, "Storage failure");
                GENERIC_FAILURE.to_string()
            }
            AppError::Config(err) => err.to_string(),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                GENERIC_FAILURE.to_string()
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Core(CoreError::Validation(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_text_is_passed_through() {
        let err = AppError::from(CoreError::Validation(
            "Please fill in all required fields.".into(),
        ));
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "Please fill in all required fields.");
    }

    #[test]
    fn storage_failures_are_generic() {
        let err = AppError::from(StoreError::Poisoned);
        assert!(!err.is_validation());
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = AppError::from(CoreError::not_found("Booking", 42));
        assert_eq!(err.user_message(), "Booking not found");
    }
}
