use core::str::FromStr;

use serde::{Deserialize, Serialize};

use pme360_core::DomainError;

/// Capability token checked by the UI before offering an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
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
    /// Create/suspend stores on the platform.
    ManageStores,
}

impl Permission {
    /// Every permission, in declaration order.
    pub const ALL: [Permission; 12] = [
        Permission::ViewDashboard,
        Permission::MakeSale,
        Permission::RefundSale,
        Permission::ApplyDiscount,
        Permission::OpenCashDrawer,
        Permission::ManageProducts,
        Permission::ManageInventory,
        Permission::ViewReports,
        Permission::ManageAccounting,
        Permission::ConfigureStore,
        Permission::ManageUsers,
        Permission::ManageStores,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "VIEW_DASHBOARD",
            Permission::MakeSale => "MAKE_SALE",
            Permission::RefundSale => "REFUND_SALE",
            Permission::ApplyDiscount => "APPLY_DISCOUNT",
            Permission::OpenCashDrawer => "OPEN_CASH_DRAWER",
            Permission::ManageProducts => "MANAGE_PRODUCTS",
            Permission::ManageInventory => "MANAGE_INVENTORY",
            Permission::ViewReports => "VIEW_REPORTS",
            Permission::ManageAccounting => "MANAGE_ACCOUNTING",
            Permission::ConfigureStore => "CONFIGURE_STORE",
            Permission::ManageUsers => "MANAGE_USERS",
            Permission::ManageStores => "MANAGE_STORES",
        }
    }

    /// Functional area the permission belongs to (used to group it on
    /// admin screens).
    pub fn category(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "dashboard",
            Permission::MakeSale
            | Permission::RefundSale
            | Permission::ApplyDiscount
            | Permission::OpenCashDrawer => "sales",
            Permission::ManageProducts => "catalog",
            Permission::ManageInventory => "inventory",
            Permission::ViewReports => "reports",
            Permission::ManageAccounting => "accounting",
            Permission::ConfigureStore | Permission::ManageUsers => "administration",
            Permission::ManageStores => "platform",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "View the store dashboard",
            Permission::MakeSale => "Ring up sales at the point of sale",
            Permission::RefundSale => "Refund or void completed sales",
            Permission::ApplyDiscount => "Apply discounts to a sale",
            Permission::OpenCashDrawer => "Open the cash drawer outside a sale",
            Permission::ManageProducts => "Create/update/delete products and prices",
            Permission::ManageInventory => "Adjust stock levels and receive goods",
            Permission::ViewReports => "View sales and stock reports",
            Permission::ManageAccounting => "Manage ledgers, invoices and payments",
            Permission::ConfigureStore => "Change store settings (currency, taxes, receipts)",
            Permission::ManageUsers => "Invite staff and assign roles",
            Permission::ManageStores => "Create and suspend stores on the platform",
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DomainError::validation("permission must not be empty"));
        }
        Permission::ALL
            .into_iter()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| DomainError::unknown("permission", s))
    }
}
