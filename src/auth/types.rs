//! Identity types for the Triagely admin API

use serde::{Deserialize, Serialize};

/// Account roles. The API carries these as upper-case snake strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    SuperAdmin,
    ClientAdmin,
    ClientUser,
}

impl UserRole {
    /// Tenant management is a platform-operator surface
    pub fn can_view_tenants(self) -> bool {
        match self {
            UserRole::SuperAdmin => true,
            UserRole::ClientAdmin | UserRole::ClientUser => false,
        }
    }

    /// Integrations are configured by admins; plain client users are denied
    pub fn can_manage_integrations(self) -> bool {
        match self {
            UserRole::SuperAdmin | UserRole::ClientAdmin => true,
            UserRole::ClientUser => false,
        }
    }

    /// User administration is open to both admin tiers; a client admin is
    /// scoped server-side to their own tenant
    pub fn can_manage_users(self) -> bool {
        match self {
            UserRole::SuperAdmin | UserRole::ClientAdmin => true,
            UserRole::ClientUser => false,
        }
    }
}

/// User data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    pub id: i64,

    /// The user's email address
    pub email: String,

    /// The user's role
    pub role: UserRole,

    /// The tenant this user belongs to; super admins have none
    pub tenant_id: Option<i64>,

    /// Whether the account is active
    pub is_active: bool,

    /// The creation time
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        let role: UserRole = serde_json::from_str("\"CLIENT_ADMIN\"").unwrap();
        assert_eq!(role, UserRole::ClientAdmin);
        assert_eq!(serde_json::to_string(&UserRole::SuperAdmin).unwrap(), "\"SUPER_ADMIN\"");
    }

    #[test]
    fn test_role_gating_is_exhaustive() {
        assert!(UserRole::SuperAdmin.can_view_tenants());
        assert!(!UserRole::ClientAdmin.can_view_tenants());
        assert!(!UserRole::ClientUser.can_view_tenants());

        assert!(UserRole::SuperAdmin.can_manage_integrations());
        assert!(UserRole::ClientAdmin.can_manage_integrations());
        assert!(!UserRole::ClientUser.can_manage_integrations());

        assert!(UserRole::SuperAdmin.can_manage_users());
        assert!(UserRole::ClientAdmin.can_manage_users());
        assert!(!UserRole::ClientUser.can_manage_users());
    }
}
