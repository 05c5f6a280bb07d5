// ABOUTME: Role gate for the Agentdash dashboard
// ABOUTME: base/admin/owner roles, permission checks, and the logged-in session

pub mod context;
pub mod error;
pub mod role;

// Re-export main types
pub use context::{AuthContext, LoginInput, RoleAssignments, User};
pub use error::{AuthError, AuthResult};
pub use role::{Permission, Role};
