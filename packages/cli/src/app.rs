// ABOUTME: Application context passed to every command handler
// ABOUTME: Owns the database, the optional state file, and the auth session for the acting user

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info};

use agentdash_auth::{AuthContext, LoginInput, Permission, Role, RoleAssignments, User};
use agentdash_config::Config;
use agentdash_storage::{Database, SeedData};

/// Who is acting, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Falls back to the configured default user
    pub user: Option<String>,
    /// Overrides the role assignments when set
    pub role: Option<String>,
    /// Overrides the configured state file
    pub state: Option<PathBuf>,
}

pub struct AppContext {
    pub config: Config,
    pub db: Database,
    pub auth: AuthContext,
}

impl AppContext {
    pub async fn bootstrap(config: Config, options: SessionOptions) -> Result<Self> {
        // Unknown roles are fatal before anything else is loaded
        let role_override = options.role.as_deref().map(Role::from_str).transpose()?;

        let mut config = config;
        if let Some(state) = options.state {
            config.state_path = Some(state);
        }
        let db = load_database(&config).await?;

        let assignments =
            RoleAssignments::new(config.owner_ids.clone(), config.admin_ids.clone());
        let mut auth = AuthContext::new(assignments);

        let user_id = options
            .user
            .unwrap_or_else(|| config.default_user.clone());
        let login = LoginInput {
            id: user_id.clone(),
            name: user_id.clone(),
            email: format!("{}@localhost", user_id),
        };
        match role_override {
            Some(role) => auth.login_as(login, role),
            None => auth.login(login),
        };

        Ok(Self { config, db, auth })
    }

    pub fn state_path(&self) -> Option<&Path> {
        self.config.state_path.as_deref()
    }

    /// Write every store to the state file.
    ///
    /// Returns false when no state file is configured, in which case changes
    /// end with this process.
    pub async fn persist(&self) -> Result<bool> {
        let Some(path) = self.state_path() else {
            return Ok(false);
        };

        let snapshot = self.db.snapshot().await?;
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write state file {}", path.display()))?;
        debug!("Saved state to {}", path.display());
        Ok(true)
    }

    /// The acting user if their role grants `permission`
    pub fn require(&self, permission: Permission) -> Result<&User> {
        Ok(self.auth.require(permission)?)
    }
}

/// Stores from the state file when it exists, otherwise from seed data per config
async fn load_database(config: &Config) -> Result<Database> {
    if let Some(path) = &config.state_path {
        if fs::try_exists(path).await.unwrap_or(false) {
            let content = fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read state file {}", path.display()))?;
            let snapshot: SeedData = serde_json::from_str(&content)
                .with_context(|| format!("Invalid state file {}", path.display()))?;
            let db = Database::from_snapshot(snapshot).await?;
            info!("Loaded state from {}", path.display());
            return Ok(db);
        }
        debug!("State file {} not found; starting fresh", path.display());
    }

    if config.seed_data {
        Ok(Database::seeded().await?)
    } else {
        debug!("Seed data disabled; starting with empty stores");
        Ok(Database::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdash_auth::AuthError;
    use agentdash_storage::EntityStore;

    fn config() -> Config {
        Config {
            owner_ids: vec!["olivia".to_string()],
            admin_ids: vec!["adam".to_string()],
            ..Config::default()
        }
    }

    fn options(user: &str, role: Option<&str>) -> SessionOptions {
        SessionOptions {
            user: Some(user.to_string()),
            role: role.map(str::to_string),
            state: None,
        }
    }

    #[tokio::test]
    async fn test_default_user_is_base() {
        let app = AppContext::bootstrap(config(), SessionOptions::default())
            .await
            .unwrap();

        let user = app.auth.current_user().unwrap();
        assert_eq!(user.id, "default-user");
        assert_eq!(user.role, Role::Base);
        assert!(app.require(Permission::ViewDashboard).is_ok());
        assert!(app.require(Permission::EditAgents).is_err());
    }

    #[tokio::test]
    async fn test_assigned_roles_apply() {
        let admin = AppContext::bootstrap(config(), options("adam", None))
            .await
            .unwrap();
        assert!(admin.require(Permission::ImportManifests).is_ok());
        assert!(admin.require(Permission::ManageUsers).is_err());

        let owner = AppContext::bootstrap(config(), options("olivia", None))
            .await
            .unwrap();
        assert!(owner.require(Permission::ManageUsers).is_ok());
    }

    #[tokio::test]
    async fn test_role_override() {
        let app = AppContext::bootstrap(config(), options("guest", Some("Admin")))
            .await
            .unwrap();
        assert_eq!(app.auth.role(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn test_unknown_role_is_fatal() {
        let err = AppContext::bootstrap(config(), options("guest", Some("superuser")))
            .await
            .err()
            .unwrap();
        assert_eq!(
            err.downcast_ref::<AuthError>(),
            Some(&AuthError::UnknownRole("superuser".to_string()))
        );
    }

    #[tokio::test]
    async fn test_seed_data_toggle() {
        let seeded = AppContext::bootstrap(config(), SessionOptions::default())
            .await
            .unwrap();
        assert_eq!(seeded.db.agents.count().await.unwrap(), 2);

        let empty_config = Config {
            seed_data: false,
            ..config()
        };
        let empty = AppContext::bootstrap(empty_config, SessionOptions::default())
            .await
            .unwrap();
        assert_eq!(empty.db.agents.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_persist_without_state_file() {
        let app = AppContext::bootstrap(config(), SessionOptions::default())
            .await
            .unwrap();
        assert!(app.state_path().is_none());
        assert!(!app.persist().await.unwrap());
    }

    #[tokio::test]
    async fn test_state_option_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let from_config = dir.path().join("config.json");
        let from_flag = dir.path().join("flag.json");
        let config = Config {
            state_path: Some(from_config.clone()),
            ..config()
        };
        let options = SessionOptions {
            state: Some(from_flag.clone()),
            ..SessionOptions::default()
        };

        let app = AppContext::bootstrap(config, options).await.unwrap();
        assert_eq!(app.state_path(), Some(from_flag.as_path()));
        assert!(app.persist().await.unwrap());
        assert!(from_flag.exists());
        assert!(!from_config.exists());
    }

    #[tokio::test]
    async fn test_missing_state_file_starts_from_seed() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            state_path: Some(dir.path().join("absent.json")),
            ..config()
        };
        let app = AppContext::bootstrap(config, SessionOptions::default())
            .await
            .unwrap();
        assert_eq!(app.db.agents.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_saved_state_wins_over_seed_toggle() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.json");
        let config = Config {
            state_path: Some(state),
            ..config()
        };

        let first = AppContext::bootstrap(config.clone(), SessionOptions::default())
            .await
            .unwrap();
        assert!(first.db.agents.delete("agent-support").await.unwrap());
        first.persist().await.unwrap();

        let unseeded = Config {
            seed_data: false,
            ..config
        };
        let second = AppContext::bootstrap(unseeded, SessionOptions::default())
            .await
            .unwrap();
        assert_eq!(second.db.agents.count().await.unwrap(), 1);
        assert!(second.db.agents.get_by_id("agent-support").await.unwrap().is_none());
        assert_eq!(second.db.services.count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_corrupt_state_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.json");
        std::fs::write(&state, "not json").unwrap();
        let config = Config {
            state_path: Some(state),
            ..config()
        };

        let err = AppContext::bootstrap(config, SessionOptions::default())
            .await
            .err()
            .unwrap();
        assert!(err.to_string().starts_with("Invalid state file"));
    }
}
