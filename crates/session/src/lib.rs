//! `pme360-session` — resolves, persists and broadcasts the current role.
//!
//! **Responsibility:** one authoritative answer to "who is acting now and
//! what may they do", consistent across every component of a client and
//! across restarts.
//!
//! - [`RoleSession`] owns the in-memory role and writes it through to a
//!   [`KeyValueStore`]
//! - [`RoleHandle`] is a mounted consumer that re-reads storage on mount and
//!   whenever an [`AuthEvent::AuthSet`](pme360_events::AuthEvent) arrives
//! - storage failures never reach callers; the role falls back to
//!   [`DEFAULT_ROLE`]

pub mod config;
pub mod consumer;
pub mod lookup;
pub mod session;
pub mod storage;

pub use config::{ConfigError, SessionConfig, StoreBackend};
pub use consumer::RoleHandle;
pub use lookup::{DEFAULT_ROLE, ROLE_STORAGE_KEY, StoredRole};
pub use session::{ChangeCause, RoleChange, RoleSession};
pub use storage::{FileStore, InMemoryStore, KeyValueStore, StorageError, UnavailableStore};
