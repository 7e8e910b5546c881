//! Repository for the `adminNotifications` collection.

use studio_core::notification::AdminNotification;

use crate::backend::Store;
use crate::collection::{read_all, Rows};
use crate::error::StoreError;
use crate::keys::CollectionKey;

const KEY: CollectionKey = CollectionKey::AdminNotifications;

pub struct NotificationRepo;

impl NotificationRepo {
    pub fn list(store: &dyn Store) -> Result<Vec<AdminNotification>, StoreError> {
        read_all(store, KEY)
    }

    pub fn append(store: &dyn Store, notification: AdminNotification) -> Result<usize, StoreError> {
        let mut rows: Rows<AdminNotification> = Rows::load(store, KEY)?;
        rows.push(notification);
        rows.save(store)?;
        Ok(rows.records().count())
    }

    /// Mark every notification read. Returns how many changed.
    pub fn mark_all_read(store: &dyn Store) -> Result<usize, StoreError> {
        let mut rows: Rows<AdminNotification> = Rows::load(store, KEY)?;
        let mut changed = 0;
        for n in rows.records_mut().filter(|n| !n.read) {
            n.read = true;
            changed += 1;
        }
        if changed > 0 {
            rows.save(store)?;
        }
        Ok(changed)
    }
}
