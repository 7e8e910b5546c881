//! Repository for the `testimonials` collection.

use studio_core::testimonial::Testimonial;
use studio_core::types::RecordId;

use crate::backend::Store;
use crate::collection::{read_all, write_all, Rows};
use crate::error::StoreError;
use crate::keys::CollectionKey;

const KEY: CollectionKey = CollectionKey::Testimonials;

pub struct TestimonialRepo;

impl TestimonialRepo {
    pub fn list(store: &dyn Store) -> Result<Vec<Testimonial>, StoreError> {
        read_all(store, KEY)
    }

    pub fn find_by_id(store: &dyn Store, id: RecordId) -> Result<Option<Testimonial>, StoreError> {
        Ok(Self::list(store)?.into_iter().find(|t| t.id == id))
    }

    /// Mark a testimonial verified. `None` when the id is unknown.
    pub fn approve(store: &dyn Store, id: RecordId) -> Result<Option<Testimonial>, StoreError> {
        let mut rows: Rows<Testimonial> = Rows::load(store, KEY)?;
        let Some(t) = rows.records_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        t.verified = true;
        let approved = t.clone();
        rows.save(store)?;
        Ok(Some(approved))
    }

    /// Remove a testimonial. Returns `true` if it existed.
    pub fn delete(store: &dyn Store, id: RecordId) -> Result<bool, StoreError> {
        let mut rows: Rows<Testimonial> = Rows::load(store, KEY)?;
        let before = rows.len();
        rows.retain(|t| t.id != id);
        if rows.len() == before {
            return Ok(false);
        }
        rows.save(store)?;
        Ok(true)
    }

    /// Replace the whole collection, stored rows that no longer decode included.
    pub fn replace_all(store: &dyn Store, testimonials: &[Testimonial]) -> Result<(), StoreError> {
        write_all(store, KEY, testimonials)
    }
}
