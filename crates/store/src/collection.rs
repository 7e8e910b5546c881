//! Typed access to whole collections.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::Store;
use crate::error::StoreError;
use crate::keys::CollectionKey;

fn raw(store: &dyn Store, key: CollectionKey) -> Result<Option<String>, StoreError> {
    Ok(store
        .get(key.as_str())?
        .filter(|value| !value.trim().is_empty()))
}

fn parse_error(key: CollectionKey) -> impl FnOnce(serde_json::Error) -> StoreError {
    move |source| StoreError::Parse {
        key: key.to_string(),
        source,
    }
}

fn encode<T: Serialize + ?Sized>(key: CollectionKey, value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })
}

/// Load every record under `key`.
///
/// An absent key is an empty collection. A value that is not a JSON array
/// is an error; individual records that fail to deserialize are skipped
/// with a warning so one bad row does not hide the rest. Writers must go
/// through [`Rows`] so skipped rows are written back untouched.
pub fn read_all<T: DeserializeOwned>(
    store: &dyn Store,
    key: CollectionKey,
) -> Result<Vec<T>, StoreError> {
    Ok(Rows::load(store, key)?.into_records())
}

enum Slot<T> {
    Record(T),
    /// A stored entry that does not decode as `T`. Kept verbatim.
    Undecodable(serde_json::Value),
}

/// A loaded collection for read-modify-write.
///
/// Rows that fail to decode are invisible to the accessors but keep their
/// position and are written back unchanged by [`Rows::save`].
pub struct Rows<T> {
    key: CollectionKey,
    rows: Vec<Slot<T>>,
}

impl<T: DeserializeOwned> Rows<T> {
    pub fn load(store: &dyn Store, key: CollectionKey) -> Result<Self, StoreError> {
        let Some(raw) = raw(store, key)? else {
            return Ok(Self { key, rows: Vec::new() });
        };
        let values: Vec<serde_json::Value> = serde_json::from_str(&raw).map_err(parse_error(key))?;

        let rows = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match T::deserialize(&value) {
                Ok(record) => Slot::Record(record),
                Err(e) => {
                    tracing::warn!(key = %key, index, error = %e, "Skipping malformed stored record");
                    Slot::Undecodable(value)
                }
            })
            .collect();
        Ok(Self { key, rows })
    }
}

impl<T> Rows<T> {
    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().filter_map(|row| match row {
            Slot::Record(record) => Some(record),
            Slot::Undecodable(_) => None,
        })
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.rows.iter_mut().filter_map(|row| match row {
            Slot::Record(record) => Some(record),
            Slot::Undecodable(_) => None,
        })
    }

    pub fn into_records(self) -> Vec<T> {
        self.rows
            .into_iter()
            .filter_map(|row| match row {
                Slot::Record(record) => Some(record),
                Slot::Undecodable(_) => None,
            })
            .collect()
    }

    pub fn push(&mut self, record: T) {
        self.rows.push(Slot::Record(record));
    }

    /// Keep the decoded records matching `keep`. Undecodable rows always stay.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.rows.retain(|row| match row {
            Slot::Record(record) => keep(record),
            Slot::Undecodable(_) => true,
        });
    }

    /// Stored rows, undecodable ones included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, Slot::Undecodable(_)))
            .count()
    }
}

impl<T: Serialize> Rows<T> {
    /// Write every row back in its original order.
    pub fn save(&self, store: &dyn Store) -> Result<(), StoreError> {
        let values = self
            .rows
            .iter()
            .map(|row| match row {
                Slot::Record(record) => serde_json::to_value(record),
                Slot::Undecodable(value) => Ok(value.clone()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| StoreError::Encode {
                key: self.key.to_string(),
                source,
            })?;
        write_all(store, self.key, &values)
    }
}

/// Replace the whole collection under `key`.
pub fn write_all<T: Serialize>(
    store: &dyn Store,
    key: CollectionKey,
    records: &[T],
) -> Result<(), StoreError> {
    store.put(key.as_str(), encode(key, records)?)
}

/// Load a single record, `None` when absent.
pub fn read_value<T: DeserializeOwned>(
    store: &dyn Store,
    key: CollectionKey,
) -> Result<Option<T>, StoreError> {
    raw(store, key)?
        .map(|raw| serde_json::from_str(&raw).map_err(parse_error(key)))
        .transpose()
}

pub fn write_value<T: Serialize>(
    store: &dyn Store,
    key: CollectionKey,
    value: &T,
) -> Result<(), StoreError> {
    store.put(key.as_str(), encode(key, value)?)
}

/// Flags are stored as the strings `"true"` / `"false"`; anything else,
/// including absence, reads as `false`.
pub fn read_flag(store: &dyn Store, key: CollectionKey) -> Result<bool, StoreError> {
    Ok(raw(store, key)?.is_some_and(|v| v.trim() == "true"))
}

pub fn write_flag(store: &dyn Store, key: CollectionKey, value: bool) -> Result<(), StoreError> {
    store.put(key.as_str(), value.to_string())
}

pub fn clear(store: &dyn Store, key: CollectionKey) -> Result<(), StoreError> {
    store.remove(key.as_str())
}
