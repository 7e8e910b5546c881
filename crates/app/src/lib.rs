//! Studio application library.
//!
//! Configuration, shared state, error handling, the service layer and
//! background tasks, exposed so the binary and the integration tests use
//! the same building blocks.

pub mod background;
pub mod channel;
pub mod config;
pub mod confirm;
pub mod error;
pub mod services;
pub mod state;
