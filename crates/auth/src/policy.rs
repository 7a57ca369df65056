//! Static role → permission mapping.
//!
//! The mapping is compiled in and total: every [`Role`] has an entry, and
//! nothing can change it at runtime.

use std::collections::BTreeSet;

use crate::{Permission, Role};

/// Ordered set of permissions (deterministic iteration for display/audit).
pub type PermissionSet = BTreeSet<Permission>;

use Permission::*;

const OWNER: &[Permission] = &[
    ViewDashboard,
    MakeSale,
    RefundSale,
    ApplyDiscount,
    OpenCashDrawer,
    ManageProducts,
    ManageInventory,
    ViewReports,
    ManageAccounting,
    ConfigureStore,
    ManageUsers,
];

const ADMIN: &[Permission] = &[
    ViewDashboard,
    MakeSale,
    RefundSale,
    ApplyDiscount,
    OpenCashDrawer,
    ManageProducts,
    ManageInventory,
    ViewReports,
    ManageUsers,
];

const MANAGER: &[Permission] = &[
    ViewDashboard,
    MakeSale,
    RefundSale,
    ApplyDiscount,
    OpenCashDrawer,
    ManageProducts,
    ManageInventory,
    ViewReports,
];

const SUPER_ADMIN: &[Permission] = &Permission::ALL;

const CASHIER: &[Permission] = &[MakeSale, OpenCashDrawer];

const ACCOUNTANT: &[Permission] = &[ViewDashboard, ViewReports, ManageAccounting];

const STOCK_KEEPER: &[Permission] = &[ViewDashboard, ManageProducts, ManageInventory];

/// Raw grant table for a role.
pub fn granted(role: Role) -> &'static [Permission] {
    match role {
        Role::SuperAdmin => SUPER_ADMIN,
        Role::Owner => OWNER,
        Role::Admin => ADMIN,
        Role::Manager => MANAGER,
        Role::Cashier => CASHIER,
        Role::Accountant => ACCOUNTANT,
        Role::StockKeeper => STOCK_KEEPER,
    }
}

/// Permissions granted to `role`.
///
/// - Pure (no IO, no state)
/// - Total over [`Role`]
pub fn permissions_for(role: Role) -> PermissionSet {
    granted(role).iter().copied().collect()
}

/// Whether `role` grants `permission`.
pub fn can(role: Role, permission: Permission) -> bool {
    granted(role).contains(&permission)
}

/// Roles that grant `permission`, in [`Role::ALL`] order.
pub fn roles_granting(permission: Permission) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| can(*role, permission))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_role() -> impl Strategy<Value = Role> {
        prop::sample::select(Role::ALL.to_vec())
    }

    fn any_permission() -> impl Strategy<Value = Permission> {
        prop::sample::select(Permission::ALL.to_vec())
    }

    #[test]
    fn super_admin_has_everything() {
        assert_eq!(permissions_for(Role::SuperAdmin).len(), Permission::ALL.len());
    }

    #[test]
    fn owner_cannot_manage_other_stores() {
        assert!(can(Role::Owner, Permission::ConfigureStore));
        assert!(!can(Role::Owner, Permission::ManageStores));
    }

    #[test]
    fn cashier_is_limited_to_the_till() {
        let perms = permissions_for(Role::Cashier);
        assert_eq!(
            perms.into_iter().collect::<Vec<_>>(),
            vec![Permission::MakeSale, Permission::OpenCashDrawer]
        );
        assert!(!can(Role::Cashier, Permission::RefundSale));
    }

    #[test]
    fn grant_tables_have_no_duplicates() {
        for role in Role::ALL {
            assert_eq!(granted(role).len(), permissions_for(role).len(), "{role}");
        }
    }

    #[test]
    fn every_permission_is_granted_to_someone() {
        for permission in Permission::ALL {
            assert!(!roles_granting(permission).is_empty(), "{permission}");
        }
        assert_eq!(roles_granting(Permission::ManageStores), vec![Role::SuperAdmin]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the lookup is pure; repeated calls agree.
        #[test]
        fn permissions_for_is_pure(role in any_role()) {
            prop_assert_eq!(permissions_for(role), permissions_for(role));
        }

        /// Property: `can` is exactly set membership.
        #[test]
        fn can_matches_membership(role in any_role(), permission in any_permission()) {
            prop_assert_eq!(can(role, permission), permissions_for(role).contains(&permission));
            prop_assert_eq!(role.can(permission), can(role, permission));
        }

        /// Property: every permission of any role is also a super admin permission.
        #[test]
        fn super_admin_dominates(role in any_role()) {
            let super_admin = permissions_for(Role::SuperAdmin);
            prop_assert!(permissions_for(role).is_subset(&super_admin));
        }
    }
}
