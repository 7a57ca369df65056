use core::str::FromStr;

use serde::{Deserialize, Serialize};

use pme360_core::DomainError;

use crate::{Permission, PermissionSet, policy};

/// Authorization role of the person operating the client.
///
/// The set is closed: anything that does not parse into one of these
/// variants is not a role. The textual encoding (`OWNER`, `SUPER_ADMIN`, ...)
/// is what gets persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Business owner; full control of their own store.
    Owner,
    /// Platform operator across all stores.
    SuperAdmin,
    Admin,
    Manager,
    Cashier,
    Accountant,
    StockKeeper,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 7] = [
        Role::Owner,
        Role::SuperAdmin,
        Role::Admin,
        Role::Manager,
        Role::Cashier,
        Role::Accountant,
        Role::StockKeeper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Cashier => "CASHIER",
            Role::Accountant => "ACCOUNTANT",
            Role::StockKeeper => "STOCK_KEEPER",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::Owner => "Business owner with full control of the store",
            Role::SuperAdmin => "Platform administrator with access to every store",
            Role::Admin => "Store administrator; manages staff and day-to-day operations",
            Role::Manager => "Shift/store manager with sales, catalog and stock access",
            Role::Cashier => "Point-of-sale operator",
            Role::Accountant => "Financial specialist with reporting and accounting access",
            Role::StockKeeper => "Warehouse staff managing products and inventory",
        }
    }

    pub fn is_super_admin(&self) -> bool {
        *self == Role::SuperAdmin
    }

    /// Permissions granted to this role.
    pub fn permissions(&self) -> PermissionSet {
        policy::permissions_for(*self)
    }

    pub fn can(&self, permission: Permission) -> bool {
        policy::can(*self, permission)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    /// Exact, case-sensitive match on the textual encoding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DomainError::validation("role must not be empty"));
        }
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::unknown("role", s))
    }
}
