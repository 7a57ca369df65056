//! In-memory event bus (one per process / tab).

use std::sync::{Arc, Mutex, Weak};

use crate::bus::{EventBus, Listener, Subscription};

#[derive(Debug, thiserror::Error)]
pub enum InMemoryBusError {
    /// Publish failed due to internal lock poisoning.
    #[error("event bus lock poisoned")]
    Poisoned,
}

struct Registry<M> {
    next_id: u64,
    listeners: Vec<(u64, Listener<M>)>,
}

impl<M> Default for Registry<M> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

/// In-memory pub/sub bus.
///
/// - No IO / no async
/// - Synchronous, in-order fan-out
/// - Listeners run outside the registry lock, so a listener may publish or
///   subscribe without deadlocking
pub struct InMemoryEventBus<M> {
    registry: Arc<Mutex<Registry<M>>>,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.registry
            .lock()
            .map(|registry| registry.listeners.len())
            .unwrap_or(0)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }
}

impl<M> core::fmt::Debug for InMemoryEventBus<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryEventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

fn remove_listener<M>(registry: &Weak<Mutex<Registry<M>>>, id: u64) {
    let Some(registry) = registry.upgrade() else {
        return;
    };
    // A poisoned registry can't deliver anything anymore; nothing to remove.
    if let Ok(mut registry) = registry.lock() {
        registry.listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let snapshot: Vec<Listener<M>> = {
            let registry = self.registry.lock().map_err(|_| InMemoryBusError::Poisoned)?;
            registry.listeners.iter().map(|(_, listener)| listener.clone()).collect()
        };

        tracing::trace!(listeners = snapshot.len(), "publishing event");

        for listener in snapshot {
            listener(&message);
        }

        Ok(())
    }

    fn subscribe(&self, listener: Listener<M>) -> Subscription {
        // If the lock is poisoned we still hand back a guard;
        // it just won't receive messages until the process restarts.
        let Ok(mut registry) = self.registry.lock() else {
            tracing::warn!("event bus poisoned; subscription is detached");
            return Subscription::detached();
        };

        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, listener));

        let weak = Arc::downgrade(&self.registry);
        Subscription::new(move || remove_listener(&weak, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder(log: &Arc<Mutex<Vec<String>>>, name: &'static str) -> Listener<u32> {
        let log = log.clone();
        Arc::new(move |n: &u32| log.lock().unwrap().push(format!("{name}:{n}")))
    }

    #[test]
    fn delivers_in_publish_then_subscription_order() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let _a = bus.subscribe(recorder(&log, "a"));
        let _b = bus.subscribe(recorder(&log, "b"));

        bus.publish(1).unwrap();
        bus.publish(2).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["a:1", "b:1", "a:2", "b:2"]);
    }

    #[test]
    fn dropping_subscription_removes_listener() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let subscription = bus.subscribe(Arc::new(move |_: &u32| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(bus.listener_count(), 1);

        bus.publish(1).unwrap();
        drop(subscription);
        bus.publish(2).unwrap();

        assert_eq!(bus.listener_count(), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn publish_with_no_listeners_is_ok() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        assert!(bus.publish(7).is_ok());
    }

    #[test]
    fn listener_may_publish_reentrantly() {
        let bus: Arc<InMemoryEventBus<u32>> = Arc::new(InMemoryEventBus::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let inner_bus = bus.clone();
        let _forwarder = bus.subscribe(Arc::new(move |n: &u32| {
            if *n == 1 {
                inner_bus.publish(2).unwrap();
            }
        }));
        let _recorder = bus.subscribe(recorder(&log, "r"));

        bus.publish(1).unwrap();

        // The nested publish completes before the outer fan-out reaches `r`.
        assert_eq!(*log.lock().unwrap(), vec!["r:2", "r:1"]);
    }

    #[test]
    fn subscription_outliving_bus_is_harmless() {
        let bus: InMemoryEventBus<u32> = InMemoryEventBus::new();
        let subscription = bus.subscribe(Arc::new(|_: &u32| {}));
        drop(bus);
        drop(subscription);
    }
}
