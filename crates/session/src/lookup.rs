//! Reading the persisted role.

use pme360_auth::Role;

use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the role's textual encoding.
pub const ROLE_STORAGE_KEY: &str = "ecom360_role";

/// Role used whenever nothing valid is persisted.
pub const DEFAULT_ROLE: Role = Role::Owner;

/// Outcome of reading the persisted role.
///
/// Keeps the reasons apart for logging and tests; callers that just need a
/// role collapse it with [`StoredRole::into_role`].
#[derive(Debug)]
pub enum StoredRole {
    Found(Role),
    /// Nothing stored under the key.
    Absent,
    /// Something is stored, but it is not a role.
    Corrupt(String),
    /// The store itself failed.
    Unavailable(StorageError),
}

impl StoredRole {
    pub fn read(store: &dyn KeyValueStore) -> Self {
        match store.get(ROLE_STORAGE_KEY) {
            Ok(None) => StoredRole::Absent,
            Ok(Some(raw)) => match raw.parse::<Role>() {
                Ok(role) => StoredRole::Found(role),
                Err(_) => StoredRole::Corrupt(raw),
            },
            Err(err) => StoredRole::Unavailable(err),
        }
    }

    pub fn into_role(self, default: Role) -> Role {
        match self {
            StoredRole::Found(role) => role,
            StoredRole::Absent | StoredRole::Corrupt(_) | StoredRole::Unavailable(_) => default,
        }
    }
}
