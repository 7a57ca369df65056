//! The role session: one authoritative "who is acting now" per client.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use pme360_auth::{Permission, PermissionSet, Role};
use pme360_core::SessionId;
use pme360_events::{EventBus, InMemoryEventBus, Subscription};

use crate::config::SessionConfig;
use crate::lookup::{DEFAULT_ROLE, ROLE_STORAGE_KEY, StoredRole};
use crate::storage::{KeyValueStore, UnavailableStore};

/// What caused the in-memory role to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCause {
    /// `set_role` was called on this session.
    Set,
    /// The role was re-read from storage.
    Resync,
}

/// Notification delivered to [`RoleSession::watch`] listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleChange {
    pub session_id: SessionId,
    pub previous: Role,
    pub current: Role,
    pub cause: ChangeCause,
    pub changed_at: DateTime<Utc>,
}

/// Current role of one client session, backed by persistent storage.
///
/// - Always holds a valid [`Role`] (falls back to [`DEFAULT_ROLE`]).
/// - Never returns an error: storage failures are logged and absorbed.
/// - Shared through `Arc`; create exactly one per client and pass it to
///   whatever needs it.
pub struct RoleSession {
    id: SessionId,
    store: Arc<dyn KeyValueStore>,
    current: RwLock<Role>,
    changes: InMemoryEventBus<RoleChange>,
}

impl RoleSession {
    /// Create a session and resolve its initial role from `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_id(SessionId::new(), store)
    }

    pub fn with_id(id: SessionId, store: Arc<dyn KeyValueStore>) -> Self {
        let session = Self {
            id,
            store,
            current: RwLock::new(DEFAULT_ROLE),
            changes: InMemoryEventBus::new(),
        };
        let initial = session.resolve_current_role();
        *session.current.write().unwrap_or_else(PoisonError::into_inner) = initial;
        tracing::debug!(session_id = %id, role = %initial, "role session created");
        session
    }

    /// Open the configured store and create a session on it.
    ///
    /// If the store cannot be opened the session runs on an unavailable
    /// store: every read falls back to the default role and writes stay
    /// in memory.
    pub fn from_config(config: &SessionConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = match config.open_store() {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!(error = %err, "failed to open session store; running without persistence");
                Arc::new(UnavailableStore::new(err.to_string()))
            }
        };
        Self::new(store)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Read the persisted role, falling back to [`DEFAULT_ROLE`].
    ///
    /// Does not touch the in-memory role; see [`RoleSession::resync`].
    pub fn resolve_current_role(&self) -> Role {
        let stored = StoredRole::read(self.store.as_ref());
        match &stored {
            StoredRole::Found(role) => {
                tracing::debug!(session_id = %self.id, role = %role, "resolved persisted role");
            }
            StoredRole::Absent => {
                tracing::debug!(session_id = %self.id, key = ROLE_STORAGE_KEY, "no persisted role; using default");
            }
            StoredRole::Corrupt(raw) => {
                tracing::debug!(session_id = %self.id, key = ROLE_STORAGE_KEY, value = %raw, "persisted role not recognized; using default");
            }
            StoredRole::Unavailable(err) => {
                tracing::warn!(session_id = %self.id, error = %err, "role storage unavailable; using default");
            }
        }
        stored.into_role(DEFAULT_ROLE)
    }

    /// Re-read the persisted role and make it current.
    pub fn resync(&self) -> Role {
        let role = self.resolve_current_role();
        if let Some(change) = self.replace(role, ChangeCause::Resync) {
            self.announce(change);
        }
        role
    }

    /// Make `role` current and persist it.
    ///
    /// The in-memory value is updated first and stays authoritative even if
    /// persisting fails.
    pub fn set_role(&self, role: Role) {
        let change = self.replace(role, ChangeCause::Set);

        if let Err(err) = self.store.set(ROLE_STORAGE_KEY, role.as_str()) {
            tracing::warn!(session_id = %self.id, role = %role, error = %err, "failed to persist role; keeping it in memory");
        }

        if let Some(change) = change {
            self.announce(change);
        }
    }

    pub fn role(&self) -> Role {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_super_admin(&self) -> bool {
        self.role().is_super_admin()
    }

    pub fn permissions(&self) -> PermissionSet {
        self.role().permissions()
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.role().can(permission)
    }

    /// Listen for changes of the in-memory role.
    ///
    /// Listeners run synchronously, after the new role is visible through
    /// [`RoleSession::role`]. Nothing is delivered when a resync or
    /// `set_role` leaves the role unchanged.
    pub fn watch<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&RoleChange) + Send + Sync + 'static,
    {
        self.changes.subscribe(Arc::new(listener))
    }

    fn replace(&self, role: Role, cause: ChangeCause) -> Option<RoleChange> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *current, role);
        drop(current);

        (previous != role).then(|| RoleChange {
            session_id: self.id,
            previous,
            current: role,
            cause,
            changed_at: Utc::now(),
        })
    }

    fn announce(&self, change: RoleChange) {
        tracing::info!(
            session_id = %self.id,
            previous = %change.previous,
            current = %change.current,
            cause = ?change.cause,
            "role changed"
        );
        if let Err(err) = self.changes.publish(change) {
            tracing::warn!(session_id = %self.id, error = ?err, "failed to notify role watchers");
        }
    }
}

impl core::fmt::Debug for RoleSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RoleSession")
            .field("id", &self.id)
            .field("role", &self.role())
            .field("watchers", &self.changes.listener_count())
            .finish()
    }
}
