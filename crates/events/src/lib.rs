//! Studio change notifications.
//!
//! - [`EventBus`] is an in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`StudioEvent`] describes one successful write.
//! - [`event_types`] names every event the services publish.

pub mod bus;

pub use bus::{event_types, EventBus, StudioEvent};
