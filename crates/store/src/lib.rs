//! Persistence for the studio workspace.
//!
//! Every collection lives under one string key as a JSON document. Reads
//! and writes always move the whole collection; there are no partial
//! updates.

pub mod backend;
pub mod collection;
pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
pub mod repositories;

pub use backend::Store;
pub use error::StoreError;
pub use file::FileStore;
pub use keys::CollectionKey;
pub use memory::MemoryStore;
