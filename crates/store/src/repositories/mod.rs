//! Repository layer.
//!
//! Each repository is a zero-sized struct with associated functions that
//! take a `&dyn Store`. Every mutation loads the whole collection, changes
//! it in memory and writes it back.

pub mod booking_repo;
pub mod chat_repo;
pub mod notification_repo;
pub mod presence_repo;
pub mod settings_repo;
pub mod testimonial_repo;

pub use booking_repo::BookingRepo;
pub use chat_repo::ChatRepo;
pub use notification_repo::NotificationRepo;
pub use presence_repo::PresenceRepo;
pub use settings_repo::SettingsRepo;
pub use testimonial_repo::TestimonialRepo;
