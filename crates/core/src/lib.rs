//! Studio domain core.
//!
//! Records, the booking wizard state machine, chat read-state logic, search
//! and dashboard projections. No I/O lives here; persistence is in
//! `studio-store` and orchestration in `studio-app`.

pub mod booking;
pub mod catalog;
pub mod chat;
pub mod clock;
pub mod error;
pub mod ids;
pub mod notification;
pub mod outbound;
pub mod search;
pub mod settings;
pub mod stats;
pub mod testimonial;
pub mod types;
pub mod wizard;

pub use error::CoreError;
pub use types::{RecordId, Timestamp};
