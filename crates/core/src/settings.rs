//! Admin settings record.
//!
//! Stored as one flat object that is replaced whole on every save. Before
//! the first save the record is absent and [`AdminSettings::default`]
//! stands in for it.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::chat::DEFAULT_AUTO_REPLY_TEXT;
use crate::types::Timestamp;

/// Longest auto-reply the chat widget will post.
pub const MAX_AUTO_REPLY_LEN: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminSettings {
    #[validate(length(max = 120, message = "Admin name is too long"))]
    pub admin_name: Option<String>,
    #[validate(email(message = "Please enter a valid admin email address"))]
    pub admin_email: Option<String>,
    pub business_hours: Option<String>,
    pub auto_reply_enabled: bool,
    #[validate(length(max = MAX_AUTO_REPLY_LEN, message = "Auto-reply message is too long"))]
    pub auto_reply_message: String,
    pub email_notifications: bool,
    pub chat_notifications: bool,
    pub saved_at: Option<Timestamp>,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            admin_name: None,
            admin_email: None,
            business_hours: None,
            auto_reply_enabled: true,
            auto_reply_message: DEFAULT_AUTO_REPLY_TEXT.to_string(),
            email_notifications: true,
            chat_notifications: true,
            saved_at: None,
        }
    }
}

impl AdminSettings {
    /// The text posted when the admin is offline.
    pub fn auto_reply_text(&self) -> &str {
        if self.auto_reply_message.trim().is_empty() {
            DEFAULT_AUTO_REPLY_TEXT
        } else {
            self.auto_reply_message.trim()
        }
    }

    /// Turn blank optional fields into `None` so that an empty form field
    /// does not trip the email check.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.admin_name,
            &mut self.admin_email,
            &mut self.business_hours,
        ] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }
}
