//! Mounted consumers of the role session.

use std::sync::Arc;

use pme360_auth::{Permission, PermissionSet, Role};
use pme360_events::{AuthEvent, EventBus, Subscription};

use crate::session::RoleSession;

/// A mounted view onto the session role (one per UI component that needs
/// to know "who is acting now").
///
/// Mounting re-reads the persisted role once and starts listening for
/// [`AuthEvent::AuthSet`]; each such event re-reads it again. Nothing else
/// triggers a re-read. Dropping the handle (or calling
/// [`RoleHandle::unmount`]) stops listening.
#[derive(Debug)]
pub struct RoleHandle {
    session: Arc<RoleSession>,
    subscription: Subscription,
}

impl RoleHandle {
    pub fn mount<B>(session: Arc<RoleSession>, bus: &B) -> Self
    where
        B: EventBus<AuthEvent> + ?Sized,
    {
        session.resync();

        // Weak: the bus must not keep a torn-down session alive.
        let weak = Arc::downgrade(&session);
        let subscription = bus.subscribe(Arc::new(move |event: &AuthEvent| {
            let Some(session) = weak.upgrade() else {
                return;
            };
            match event {
                AuthEvent::AuthSet => {
                    session.resync();
                }
            }
        }));

        tracing::debug!(session_id = %session.id(), role = %session.role(), "role consumer mounted");

        Self {
            session,
            subscription,
        }
    }

    pub fn session(&self) -> &Arc<RoleSession> {
        &self.session
    }

    pub fn role(&self) -> Role {
        self.session.role()
    }

    pub fn is_super_admin(&self) -> bool {
        self.session.is_super_admin()
    }

    pub fn permissions(&self) -> PermissionSet {
        self.session.permissions()
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.session.can(permission)
    }

    pub fn set_role(&self, role: Role) {
        self.session.set_role(role);
    }

    /// Stop listening for auth events.
    pub fn unmount(self) {
        let Self {
            session,
            subscription,
        } = self;
        subscription.unsubscribe();
        tracing::debug!(session_id = %session.id(), "role consumer unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pme360_events::{InMemoryEventBus, notify_auth_set};

    use crate::lookup::ROLE_STORAGE_KEY;
    use crate::storage::{InMemoryStore, KeyValueStore};

    #[test]
    fn mount_resyncs_with_storage() {
        let store = InMemoryStore::arc();
        let session = Arc::new(RoleSession::new(store.clone()));
        store.set(ROLE_STORAGE_KEY, "MANAGER").unwrap();
        assert_eq!(session.role(), Role::Owner);

        let bus = InMemoryEventBus::<AuthEvent>::new();
        let handle = RoleHandle::mount(session, &bus);

        assert_eq!(handle.role(), Role::Manager);
    }

    #[test]
    fn auth_set_refreshes_role() {
        let store = InMemoryStore::arc();
        let bus = InMemoryEventBus::<AuthEvent>::new();
        let handle = RoleHandle::mount(Arc::new(RoleSession::new(store.clone())), &bus);

        store.set(ROLE_STORAGE_KEY, "SUPER_ADMIN").unwrap();
        assert_eq!(handle.role(), Role::Owner);

        notify_auth_set(&bus).unwrap();
        assert_eq!(handle.role(), Role::SuperAdmin);
        assert!(handle.is_super_admin());
        assert!(handle.can(Permission::ManageStores));
    }

    #[test]
    fn unmount_releases_listener() {
        let bus = InMemoryEventBus::<AuthEvent>::new();
        let session = Arc::new(RoleSession::new(InMemoryStore::arc()));

        let a = RoleHandle::mount(session.clone(), &bus);
        let b = RoleHandle::mount(session, &bus);
        assert_eq!(bus.listener_count(), 2);

        a.unmount();
        assert_eq!(bus.listener_count(), 1);
        drop(b);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn handle_set_role_is_shared_through_session() {
        let bus = InMemoryEventBus::<AuthEvent>::new();
        let session = Arc::new(RoleSession::new(InMemoryStore::arc()));
        let menu = RoleHandle::mount(session.clone(), &bus);
        let dashboard = RoleHandle::mount(session, &bus);

        menu.set_role(Role::Accountant);

        assert_eq!(dashboard.role(), Role::Accountant);
        assert_eq!(
            dashboard.permissions().into_iter().collect::<Vec<_>>(),
            vec![
                Permission::ViewDashboard,
                Permission::ViewReports,
                Permission::ManageAccounting
            ]
        );
    }
}
