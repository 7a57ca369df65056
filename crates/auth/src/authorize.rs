use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::{Permission, Role, policy};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{role}' lacks permission '{permission}'")]
    Forbidden { role: Role, permission: Permission },
}

/// Authorize a role for a single permission.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(role: Role, required: Permission) -> Result<(), AuthzError> {
    if policy::can(role, required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            role,
            permission: required,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
///
/// Answers "why is this button hidden for me?" on support/audit screens.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub role: Role,
    pub required_permission: Permission,
    pub granted: bool,
    /// Human-readable reason for the decision.
    pub reason: String,
    /// Everything the role can do, sorted.
    pub effective_permissions: Vec<Permission>,
    /// If denied, this explains what was missing.
    pub denial_reason: Option<DenialReason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub message: String,
    /// Roles that would grant the permission.
    pub granting_roles: Vec<Role>,
    pub suggestions: Vec<String>,
}

/// Explain why `role` is (or is not) allowed `required`.
pub fn explain_authorization(role: Role, required: Permission) -> AuthorizationExplanation {
    let effective_permissions: Vec<Permission> = policy::permissions_for(role).into_iter().collect();

    if policy::can(role, required) {
        return AuthorizationExplanation {
            role,
            required_permission: required,
            granted: true,
            reason: format!("Role '{role}' grants '{required}'"),
            effective_permissions,
            denial_reason: None,
        };
    }

    let granting_roles = policy::roles_granting(required);
    let mut suggestions = Vec::new();
    if !granting_roles.is_empty() {
        let names: Vec<&str> = granting_roles.iter().map(Role::as_str).collect();
        suggestions.push(format!(
            "Sign in with one of the roles granting '{required}': {}",
            names.join(", ")
        ));
    }
    suggestions.push(format!("Ask the store owner to assign a role granting '{required}'"));

    AuthorizationExplanation {
        role,
        required_permission: required,
        granted: false,
        reason: format!("Role '{role}' does not grant '{required}'"),
        effective_permissions,
        denial_reason: Some(DenialReason {
            message: format!("Missing required permission: '{required}'"),
            granting_roles,
            suggestions,
        }),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Role definition with its granted permissions (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub name: Role,
    pub description: &'static str,
    pub permissions: Vec<Permission>,
}

/// Permission definition (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDefinition {
    pub name: Permission,
    pub description: &'static str,
    pub category: &'static str,
}

/// Registry of all available roles and permissions.
///
/// This provides a complete view of the RBAC system for auditing.
#[derive(Debug, Clone, Serialize)]
pub struct RbacRegistry {
    pub roles: BTreeMap<Role, RoleDefinition>,
    pub permissions: BTreeMap<Permission, PermissionDefinition>,
}

impl RbacRegistry {
    /// Build the registry from the compiled-in policy.
    pub fn builtin() -> Self {
        let roles = Role::ALL
            .into_iter()
            .map(|role| {
                let definition = RoleDefinition {
                    name: role,
                    description: role.description(),
                    permissions: policy::permissions_for(role).into_iter().collect(),
                };
                (role, definition)
            })
            .collect();

        let permissions = Permission::ALL
            .into_iter()
            .map(|permission| {
                let definition = PermissionDefinition {
                    name: permission,
                    description: permission.description(),
                    category: permission.category(),
                };
                (permission, definition)
            })
            .collect();

        Self { roles, permissions }
    }

    /// Permissions grouped by category.
    pub fn by_category(&self) -> BTreeMap<&'static str, Vec<Permission>> {
        let mut grouped: BTreeMap<&'static str, Vec<Permission>> = BTreeMap::new();
        for definition in self.permissions.values() {
            grouped.entry(definition.category).or_default().push(definition.name);
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_allows_granted_permission() {
        assert!(authorize(Role::Manager, Permission::RefundSale).is_ok());
    }

    #[test]
    fn authorize_rejects_missing_permission() {
        let err = authorize(Role::Cashier, Permission::ConfigureStore).unwrap_err();
        assert_eq!(
            err,
            AuthzError::Forbidden {
                role: Role::Cashier,
                permission: Permission::ConfigureStore
            }
        );
        assert_eq!(
            err.to_string(),
            "forbidden: role 'CASHIER' lacks permission 'CONFIGURE_STORE'"
        );
    }

    #[test]
    fn explanation_for_denial_lists_granting_roles() {
        let explanation = explain_authorization(Role::Cashier, Permission::ViewReports);
        assert!(!explanation.granted);
        assert_eq!(
            explanation.effective_permissions,
            vec![Permission::MakeSale, Permission::OpenCashDrawer]
        );

        let denial = explanation.denial_reason.unwrap();
        assert!(denial.granting_roles.contains(&Role::Manager));
        assert!(!denial.granting_roles.contains(&Role::Cashier));
        assert_eq!(denial.suggestions.len(), 2);
    }

    #[test]
    fn explanation_for_grant_has_no_denial() {
        let explanation = explain_authorization(Role::SuperAdmin, Permission::ManageStores);
        assert!(explanation.granted);
        assert!(explanation.denial_reason.is_none());
        assert_eq!(explanation.effective_permissions.len(), Permission::ALL.len());
    }

    #[test]
    fn registry_covers_every_role_and_permission() {
        let registry = RbacRegistry::builtin();
        assert_eq!(registry.roles.len(), Role::ALL.len());
        assert_eq!(registry.permissions.len(), Permission::ALL.len());
        assert_eq!(
            registry.roles[&Role::Accountant].permissions,
            vec![
                Permission::ViewDashboard,
                Permission::ViewReports,
                Permission::ManageAccounting
            ]
        );
        assert_eq!(
            registry.by_category()["sales"],
            vec![
                Permission::MakeSale,
                Permission::RefundSale,
                Permission::ApplyDiscount,
                Permission::OpenCashDrawer
            ]
        );
    }

    #[test]
    fn registry_serializes_with_textual_keys() {
        let json = serde_json::to_value(RbacRegistry::builtin()).unwrap();
        assert_eq!(json["roles"]["OWNER"]["name"], "OWNER");
        assert_eq!(json["permissions"]["MANAGE_USERS"]["category"], "administration");
    }
}
