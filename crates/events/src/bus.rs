//! Event publishing/subscription abstraction (mechanics only).
//!
//! This module provides the **event bus pattern** used inside one client
//! process: a publisher announces that something happened, and every
//! component currently listening is told about it.
//!
//! ## Delivery model
//!
//! - **Synchronous**: `publish()` invokes every listener before it returns.
//! - **Ordered**: messages reach listeners in publish order; listeners are
//!   called in subscription order.
//! - **Snapshot fan-out**: a message goes to the listeners registered when
//!   `publish()` was called. Listeners added or removed while a message is
//!   being delivered take effect for the next message.
//! - **No persistence**: the bus is a trigger, not a source of truth.
//!   Consumers re-read whatever state they care about when notified.
//!
//! ## Lifecycle
//!
//! `subscribe()` returns a [`Subscription`] guard. Dropping the guard removes
//! the listener, so a component that goes away cannot leak a listener.

use std::fmt;
use std::sync::Arc;

/// A callback registered on a bus.
///
/// Listeners must not block: they run inline on the publisher's call stack.
pub type Listener<M> = Arc<dyn Fn(&M) + Send + Sync>;

/// Handle to a registered listener.
///
/// The listener stays registered for as long as this guard is alive.
/// Dropping it (or calling [`Subscription::unsubscribe`]) removes the
/// listener from the bus.
///
/// ## Usage Pattern
///
/// ```ignore
/// let bus = InMemoryEventBus::<AuthEvent>::new();
/// let subscription = bus.subscribe(Arc::new(|event: &AuthEvent| refresh(event)));
///
/// bus.publish(AuthEvent::AuthSet)?; // `refresh` has run when this returns
///
/// drop(subscription); // listener removed
/// ```
#[must_use = "dropping a Subscription immediately removes the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Build a subscription that runs `release` exactly once when dropped.
    pub fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release (e.g. the bus is gone).
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// ## Architecture Role
///
/// ```text
/// login flow ── writes session storage ── publish(AuthSet) ──┬─ RoleHandle (tab A view)
///                                                             ├─ RoleHandle (tab A menu)
///                                                             └─ ...
/// ```
///
/// ## Error Handling
///
/// `publish()` can fail if the implementation's internal state is broken
/// (e.g. lock poisoning). Failures are surfaced to the publisher; listeners
/// themselves never return errors.
///
/// ## Thread Safety
///
/// The trait requires `Send + Sync`, so a bus can sit behind an `Arc` and be
/// handed to every component that publishes or listens.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self, listener: Listener<M>) -> Subscription;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self, listener: Listener<M>) -> Subscription {
        (**self).subscribe(listener)
    }
}
