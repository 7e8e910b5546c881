//! Repository for the single `adminSettings` record.

use studio_core::settings::AdminSettings;

use crate::backend::Store;
use crate::collection::{clear, read_value, write_value};
use crate::error::StoreError;
use crate::keys::CollectionKey;

const KEY: CollectionKey = CollectionKey::AdminSettings;

pub struct SettingsRepo;

impl SettingsRepo {
    /// Stored settings, or the defaults when none were saved.
    pub fn load(store: &dyn Store) -> Result<AdminSettings, StoreError> {
        Ok(read_value(store, KEY)?.unwrap_or_default())
    }

    /// Replace the stored record.
    pub fn save(store: &dyn Store, settings: &AdminSettings) -> Result<(), StoreError> {
        write_value(store, KEY, settings)
    }

    pub fn reset(store: &dyn Store) -> Result<(), StoreError> {
        clear(store, KEY)
    }
}
