use crate::error::StoreError;

/// A string key-value store.
///
/// Implementations make each single call atomic. Read-modify-write
/// sequences are serialized by the caller.
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn put(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
