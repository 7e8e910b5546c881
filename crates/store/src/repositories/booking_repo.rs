//! Repository for the `bookings` collection.

use studio_core::booking::{Booking, BookingStatus};
use studio_core::types::RecordId;

use crate::backend::Store;
use crate::collection::{read_all, Rows};
use crate::error::StoreError;
use crate::keys::CollectionKey;

const KEY: CollectionKey = CollectionKey::Bookings;

/// Provides CRUD operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// All bookings in insertion order.
    pub fn list(store: &dyn Store) -> Result<Vec<Booking>, StoreError> {
        read_all(store, KEY)
    }

    pub fn find_by_id(store: &dyn Store, id: RecordId) -> Result<Option<Booking>, StoreError> {
        Ok(Self::list(store)?.into_iter().find(|b| b.id == id))
    }

    /// Append a booking, returning the new collection size.
    pub fn append(store: &dyn Store, booking: Booking) -> Result<usize, StoreError> {
        let mut rows: Rows<Booking> = Rows::load(store, KEY)?;
        rows.push(booking);
        rows.save(store)?;
        Ok(rows.records().count())
    }

    /// Set the status of one booking. `None` when the id is unknown, in
    /// which case nothing is written.
    pub fn update_status(
        store: &dyn Store,
        id: RecordId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError> {
        let mut rows: Rows<Booking> = Rows::load(store, KEY)?;
        let Some(booking) = rows.records_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        booking.status = status;
        let updated = booking.clone();
        rows.save(store)?;
        Ok(Some(updated))
    }

    /// Remove one booking. Returns `true` if it existed.
    pub fn delete(store: &dyn Store, id: RecordId) -> Result<bool, StoreError> {
        let mut rows: Rows<Booking> = Rows::load(store, KEY)?;
        let before = rows.len();
        rows.retain(|b| b.id != id);
        if rows.len() == before {
            return Ok(false);
        }
        rows.save(store)?;
        Ok(true)
    }
}
