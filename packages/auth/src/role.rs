// ABOUTME: Role hierarchy and the permission checks derived from it
// ABOUTME: base < admin < owner; anything else is rejected

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Privilege level. Variant order is the privilege order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Base,
    Admin,
    Owner,
}

/// UI affordances gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ViewDashboard,
    EditAgents,
    ManageServices,
    ManageModels,
    ImportManifests,
    ManageUsers,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Base => "base",
            Role::Admin => "admin",
            Role::Owner => "owner",
        }
    }

    /// True for admin and owner
    pub fn is_admin(&self) -> bool {
        *self >= Role::Admin
    }

    pub fn is_owner(&self) -> bool {
        *self == Role::Owner
    }

    pub fn can(&self, permission: Permission) -> bool {
        match permission {
            Permission::ViewDashboard => true,
            Permission::EditAgents
            | Permission::ManageServices
            | Permission::ManageModels
            | Permission::ImportManifests => self.is_admin(),
            Permission::ManageUsers => self.is_owner(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" => Ok(Role::Base),
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            _ => Err(AuthError::UnknownRole(s.to_string())),
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Permission::ViewDashboard => "view the dashboard",
            Permission::EditAgents => "edit agents",
            Permission::ManageServices => "manage services",
            Permission::ManageModels => "manage LLM models",
            Permission::ImportManifests => "import manifests",
            Permission::ManageUsers => "manage users",
        };
        f.write_str(text)
    }
}
