// ABOUTME: Error types for roles and the session gate
// ABOUTME: Unknown roles are configuration errors; forbidden actions carry the role and permission

use thiserror::Error;

use crate::role::{Permission, Role};

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Unknown role '{0}'. Must be one of: base, admin, owner")]
    UnknownRole(String),

    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("Role '{role}' is not allowed to {permission}")]
    Forbidden { role: Role, permission: Permission },
}
