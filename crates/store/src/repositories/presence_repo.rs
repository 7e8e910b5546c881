//! Admin presence flag and the visitor's chat identity.

use studio_core::chat::ChatUser;

use crate::backend::Store;
use crate::collection::{read_flag, read_value, write_flag, write_value};
use crate::error::StoreError;
use crate::keys::CollectionKey;

pub struct PresenceRepo;

impl PresenceRepo {
    pub fn admin_online(store: &dyn Store) -> Result<bool, StoreError> {
        read_flag(store, CollectionKey::AdminOnlineStatus)
    }

    pub fn set_admin_online(store: &dyn Store, online: bool) -> Result<(), StoreError> {
        write_flag(store, CollectionKey::AdminOnlineStatus, online)
    }

    pub fn chat_user(store: &dyn Store) -> Result<Option<ChatUser>, StoreError> {
        read_value(store, CollectionKey::ChatUser)
    }

    pub fn save_chat_user(store: &dyn Store, user: &ChatUser) -> Result<(), StoreError> {
        write_value(store, CollectionKey::ChatUser, user)
    }
}
