//! Authentication lifecycle events.

use serde::{Deserialize, Serialize};

use crate::bus::EventBus;

/// Wire name of the "auth state was written" notification.
pub const AUTH_SET_TOPIC: &str = "ecom360:auth-set";

/// Notifications about session authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthEvent {
    /// Authentication state in persistent storage was (re)written by someone
    /// (typically a completed login). Carries no payload: listeners re-read
    /// storage themselves.
    #[serde(rename = "ecom360:auth-set")]
    AuthSet,
}

impl AuthEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            AuthEvent::AuthSet => AUTH_SET_TOPIC,
        }
    }
}

impl core::fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.topic())
    }
}

/// Announce that authentication state has been written.
///
/// Call this after persisting a new role (or any other auth state) outside
/// of the session object, so mounted consumers re-synchronize.
pub fn notify_auth_set<B>(bus: &B) -> Result<(), B::Error>
where
    B: EventBus<AuthEvent> + ?Sized,
{
    tracing::debug!(topic = AUTH_SET_TOPIC, "announcing auth state change");
    bus.publish(AuthEvent::AuthSet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryEventBus;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn topic_matches_wire_name() {
        assert_eq!(AuthEvent::AuthSet.topic(), "ecom360:auth-set");
        assert_eq!(AuthEvent::AuthSet.to_string(), AUTH_SET_TOPIC);
        assert_eq!(
            serde_json::to_string(&AuthEvent::AuthSet).unwrap(),
            "\"ecom360:auth-set\""
        );
    }

    #[test]
    fn notify_reaches_listeners() {
        let bus: InMemoryEventBus<AuthEvent> = InMemoryEventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let _sub = bus.subscribe(Arc::new(move |event: &AuthEvent| {
            assert_eq!(*event, AuthEvent::AuthSet);
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        notify_auth_set(&bus).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
