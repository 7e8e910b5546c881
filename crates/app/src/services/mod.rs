//! Operations driven by the booking wizard, the chat widget and the admin
//! console. Each takes the shared [`AppState`](crate::state::AppState),
//! performs one whole-collection read-modify-write under the write guard,
//! then publishes what changed.

pub mod admin_bookings;
pub mod auth;
pub mod booking;
pub mod chat;
pub mod dashboard;
pub mod settings;
pub mod testimonials;
