//! Repository for the chat message log and its read relation.

use std::collections::HashSet;

use studio_core::chat::{retain_window, ChatMessage, ReadMark, ReadState, Viewer};

use crate::backend::Store;
use crate::collection::{read_all, Rows};
use crate::error::StoreError;
use crate::keys::CollectionKey;

/// Access to `chatMessages` and `chatReadState`.
pub struct ChatRepo;

impl ChatRepo {
    pub fn list(store: &dyn Store) -> Result<Vec<ChatMessage>, StoreError> {
        read_all(store, CollectionKey::ChatMessages)
    }

    /// Append a message and trim the log to the retention window. Read
    /// marks of messages that fell out of the window are dropped with them.
    /// Stored entries that do not decode are left in place.
    pub fn append(store: &dyn Store, message: ChatMessage) -> Result<Vec<ChatMessage>, StoreError> {
        let mut rows: Rows<ChatMessage> = Rows::load(store, CollectionKey::ChatMessages)?;
        rows.push(message);
        let before = rows.len();

        let kept = retain_window(rows.records().cloned().collect());
        let live: HashSet<String> = kept.iter().map(|m| m.id.clone()).collect();
        rows.retain(|m| live.contains(&m.id));
        rows.save(store)?;

        if rows.len() < before {
            let mut marks: Rows<ReadMark> = Rows::load(store, CollectionKey::ChatReadState)?;
            let total = marks.len();
            marks.retain(|m| live.contains(&m.message_id));
            if marks.len() != total {
                marks.save(store)?;
            }
            tracing::debug!(dropped = before - rows.len(), "Chat log trimmed");
        }
        Ok(kept)
    }

    pub fn read_marks(store: &dyn Store) -> Result<Vec<ReadMark>, StoreError> {
        read_all(store, CollectionKey::ChatReadState)
    }

    pub fn read_state(store: &dyn Store) -> Result<ReadState, StoreError> {
        Ok(ReadState::from_marks(Self::read_marks(store)?))
    }

    pub fn is_read(
        store: &dyn Store,
        message: &ChatMessage,
        viewer: Viewer,
    ) -> Result<bool, StoreError> {
        Ok(Self::read_state(store)?.is_read(message, viewer))
    }

    /// Record that `viewer` has read the given messages. Ids already marked
    /// are ignored. Returns how many marks were added.
    pub fn mark_read<'a, I>(store: &dyn Store, viewer: Viewer, ids: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut marks: Rows<ReadMark> = Rows::load(store, CollectionKey::ChatReadState)?;
        let mut present: HashSet<(String, Viewer)> = marks
            .records()
            .map(|m| (m.message_id.clone(), m.viewer))
            .collect();

        let before = marks.len();
        for id in ids {
            if present.insert((id.to_string(), viewer)) {
                marks.push(ReadMark {
                    message_id: id.to_string(),
                    viewer,
                });
            }
        }
        let added = marks.len() - before;
        if added > 0 {
            marks.save(store)?;
        }
        Ok(added)
    }
}
