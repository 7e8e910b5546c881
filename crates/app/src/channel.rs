//! Hand-off of the booking message to the studio's messaging app.

use studio_core::outbound::BookingMessage;

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Message channel unavailable: {0}")]
    Unavailable(String),
}

/// Where a rendered booking confirmation goes.
pub trait MessageChannel: Send + Sync {
    fn dispatch(&self, deep_link: &str, message: &BookingMessage) -> Result<(), ChannelError>;
}

/// Produces the `wa.me` link and logs it. Opening the link is left to
/// whatever front end is driving the workspace.
#[derive(Debug, Default)]
pub struct WhatsAppLink;

impl MessageChannel for WhatsAppLink {
    fn dispatch(&self, deep_link: &str, message: &BookingMessage) -> Result<(), ChannelError> {
        tracing::info!(
            reference = %message.booking_reference,
            link_len = deep_link.len(),
            "Booking message ready for WhatsApp"
        );
        tracing::debug!(link = deep_link, "WhatsApp deep link");
        Ok(())
    }
}
