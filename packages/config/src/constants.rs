// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Agentdash

// Logging
pub const AGENTDASH_LOG: &str = "AGENTDASH_LOG";
pub const RUST_LOG: &str = "RUST_LOG";

// Storage
pub const AGENTDASH_SEED_DATA: &str = "AGENTDASH_SEED_DATA";
/// JSON file the stores are loaded from and saved to between runs
pub const AGENTDASH_STATE: &str = "AGENTDASH_STATE";

// Role assignments (comma separated user ids)
pub const AGENTDASH_OWNER_IDS: &str = "AGENTDASH_OWNER_IDS";
pub const AGENTDASH_ADMIN_IDS: &str = "AGENTDASH_ADMIN_IDS";

// Acting user when --user is not given
pub const AGENTDASH_USER: &str = "AGENTDASH_USER";

pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_USER_ID: &str = "default-user";
