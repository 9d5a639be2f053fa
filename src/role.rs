//! Role tags and the authenticated principal.
//!
//! Every account carries exactly one role. The role (with its role-specific
//! record id) travels with the access token, and handlers pattern-match the
//! required variant before any business logic runs.

use serde::{Deserialize, Serialize};

use crate::TravelError;

/// Role tag attached to an authenticated session.
///
/// The payload is the id of the role-specific directory record, not a shared
/// account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "id")]
pub enum Role {
    Admin(i64),
    Manager(i64),
    Employee(i64),
}

impl Role {
    pub fn kind(&self) -> RoleKind {
        match self {
            Role::Admin(_) => RoleKind::Admin,
            Role::Manager(_) => RoleKind::Manager,
            Role::Employee(_) => RoleKind::Employee,
        }
    }

    /// Id of the role-specific directory record.
    pub fn record_id(&self) -> i64 {
        match self {
            Role::Admin(id) | Role::Manager(id) | Role::Employee(id) => *id,
        }
    }
}

/// Role discriminant without the record id. Login endpoints are
/// namespace-scoped, so the required kind is known before the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Admin,
    Manager,
    Employee,
}

impl RoleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::Admin => "admin",
            RoleKind::Manager => "manager",
            RoleKind::Employee => "employee",
        }
    }
}

/// An authenticated actor: resolved from a bearer token, carries exactly
/// one [`Role`].
#[derive(Debug, Clone)]
pub struct Principal {
    pub role: Role,
    pub username: String,
    pub email: Option<String>,
}

impl Principal {
    /// Returns the admin record id, or `Forbidden` for any other role.
    pub fn require_admin(&self) -> Result<i64, TravelError> {
        match self.role {
            Role::Admin(id) => Ok(id),
            _ => Err(TravelError::Forbidden),
        }
    }

    /// Returns the manager record id, or `Forbidden` for any other role.
    pub fn require_manager(&self) -> Result<i64, TravelError> {
        match self.role {
            Role::Manager(id) => Ok(id),
            _ => Err(TravelError::Forbidden),
        }
    }

    /// Returns the employee record id, or `Forbidden` for any other role.
    pub fn require_employee(&self) -> Result<i64, TravelError> {
        match self.role {
            Role::Employee(id) => Ok(id),
            _ => Err(TravelError::Forbidden),
        }
    }

    /// Accepts managers and admins (the two reviewer roles).
    pub fn require_reviewer(&self) -> Result<(), TravelError> {
        match self.role {
            Role::Admin(_) | Role::Manager(_) => Ok(()),
            Role::Employee(_) => Err(TravelError::Forbidden),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal {
            role,
            username: "someone".to_owned(),
            email: None,
        }
    }

    #[test]
    fn test_require_admin() {
        assert_eq!(principal(Role::Admin(7)).require_admin(), Ok(7));
        assert_eq!(
            principal(Role::Employee(7)).require_admin(),
            Err(TravelError::Forbidden)
        );
    }

    #[test]
    fn test_require_reviewer_rejects_employee() {
        assert!(principal(Role::Manager(1)).require_reviewer().is_ok());
        assert!(principal(Role::Admin(1)).require_reviewer().is_ok());
        assert_eq!(
            principal(Role::Employee(1)).require_reviewer(),
            Err(TravelError::Forbidden)
        );
    }

    #[test]
    fn test_role_serde_tagged() {
        let json = serde_json::to_string(&Role::Manager(3)).unwrap();
        assert_eq!(json, r#"{"role":"Manager","id":3}"#);
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::Manager(3));
    }
}
