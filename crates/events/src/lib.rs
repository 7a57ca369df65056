//! `pme360-events` — same-process publish/subscribe plumbing.
//!
//! The bus is the seam between "something changed authentication" and the
//! components that must refresh their view of the session.

pub mod auth;
pub mod bus;
pub mod in_memory_bus;

pub use auth::{AUTH_SET_TOPIC, AuthEvent, notify_auth_set};
pub use bus::{EventBus, Listener, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
