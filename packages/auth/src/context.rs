// ABOUTME: Logged-in user session and role assignment
// ABOUTME: Resolves a user's role from configured id lists and gates actions by permission

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AuthError, AuthResult};
use crate::role::{Permission, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Which user ids hold elevated roles. Everyone else is `base`.
#[derive(Debug, Clone, Default)]
pub struct RoleAssignments {
    owners: HashSet<String>,
    admins: HashSet<String>,
}

impl RoleAssignments {
    pub fn new<O, A>(owners: O, admins: A) -> Self
    where
        O: IntoIterator<Item = String>,
        A: IntoIterator<Item = String>,
    {
        Self {
            owners: owners.into_iter().collect(),
            admins: admins.into_iter().collect(),
        }
    }

    /// Owner wins when an id appears in both lists
    pub fn role_for(&self, user_id: &str) -> Role {
        if self.owners.contains(user_id) {
            Role::Owner
        } else if self.admins.contains(user_id) {
            Role::Admin
        } else {
            Role::Base
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Default)]
pub struct AuthContext {
    assignments: RoleAssignments,
    current: Option<User>,
}

impl AuthContext {
    pub fn new(assignments: RoleAssignments) -> Self {
        Self {
            assignments,
            current: None,
        }
    }

    pub fn login(&mut self, input: LoginInput) -> &User {
        let role = self.assignments.role_for(&input.id);
        info!("User {} logged in with role {}", input.id, role);
        self.current.insert(User {
            id: input.id,
            name: input.name,
            email: input.email,
            role,
        })
    }

    /// Log in with an explicit role, bypassing the assignments
    pub fn login_as(&mut self, input: LoginInput, role: Role) -> &User {
        info!("User {} logged in with overridden role {}", input.id, role);
        self.current.insert(User {
            id: input.id,
            name: input.name,
            email: input.email,
            role,
        })
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            debug!("User {} logged out", user.id);
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|user| user.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(|role| role.is_admin())
    }

    pub fn is_owner(&self) -> bool {
        self.role().is_some_and(|role| role.is_owner())
    }

    pub fn require(&self, permission: Permission) -> AuthResult<&User> {
        let user = self.current.as_ref().ok_or(AuthError::NotLoggedIn)?;
        if user.role.can(permission) {
            Ok(user)
        } else {
            Err(AuthError::Forbidden {
                role: user.role,
                permission,
            })
        }
    }
}
