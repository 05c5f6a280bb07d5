// ABOUTME: End-to-end tests of the CLI session setup
// ABOUTME: Environment configuration, role gating, manifest round-trips, and state kept between runs

use std::env;

use agentdash_auth::{AuthError, Permission, Role};
use agentdash_cli::{AppContext, SessionOptions};
use agentdash_config::constants::*;
use agentdash_config::Config;
use agentdash_core::{Service, ServiceCategory, ServiceCreateInput};
use agentdash_manifest::{import_into_database, read_manifest_file, write_manifest_file};
use agentdash_storage::EntityStore;
use serial_test::serial;

fn clear_env() {
    for var in [
        AGENTDASH_SEED_DATA,
        AGENTDASH_STATE,
        AGENTDASH_OWNER_IDS,
        AGENTDASH_ADMIN_IDS,
        AGENTDASH_USER,
    ] {
        env::remove_var(var);
    }
}

#[tokio::test]
#[serial]
async fn test_environment_assigns_roles() {
    clear_env();
    env::set_var(AGENTDASH_ADMIN_IDS, "adam");
    env::set_var(AGENTDASH_USER, "adam");

    let app = AppContext::bootstrap(Config::from_env().unwrap(), SessionOptions::default())
        .await
        .unwrap();

    assert_eq!(app.auth.role(), Some(Role::Admin));
    assert!(app.auth.is_admin());
    assert!(!app.auth.is_owner());

    clear_env();
}

#[tokio::test]
#[serial]
async fn test_base_user_cannot_import() {
    clear_env();

    let app = AppContext::bootstrap(Config::from_env().unwrap(), SessionOptions::default())
        .await
        .unwrap();

    let err = app.require(Permission::ImportManifests).unwrap_err();
    assert_eq!(
        err.downcast_ref::<AuthError>(),
        Some(&AuthError::Forbidden {
            role: Role::Base,
            permission: Permission::ImportManifests,
        })
    );
}

#[tokio::test]
#[serial]
async fn test_admin_export_import_round_trip() {
    clear_env();
    let options = SessionOptions {
        user: Some("adam".to_string()),
        role: Some("admin".to_string()),
        state: None,
    };
    let app = AppContext::bootstrap(Config::from_env().unwrap(), options)
        .await
        .unwrap();
    app.require(Permission::ImportManifests).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let agent = app.db.agents.require("agent-support").await.unwrap();
    let path = write_manifest_file(dir.path(), &agent).await.unwrap();

    let content = read_manifest_file(&path).await.unwrap();
    let imported = import_into_database(&app.db, &content).await.unwrap();

    assert_eq!(app.db.agents.count().await.unwrap(), 3);
    assert_eq!(imported.title, agent.title);
    assert_eq!(imported.roi(), agent.roi());
    assert!(!imported.is_active);
}

#[tokio::test]
#[serial]
async fn test_changes_survive_into_next_session() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    env::set_var(AGENTDASH_STATE, &state);
    let admin = || SessionOptions {
        user: Some("adam".to_string()),
        role: Some("admin".to_string()),
        state: None,
    };

    let first = AppContext::bootstrap(Config::from_env().unwrap(), admin())
        .await
        .unwrap();
    first
        .db
        .services
        .add(Service::from_create_input(ServiceCreateInput {
            id: Some("svc-scratch".to_string()),
            name: "Scratch".to_string(),
            category: ServiceCategory::Db,
            cost_structure: String::new(),
            cost_per_unit: String::new(),
            has_freetier: true,
            logo: None,
        }))
        .await
        .unwrap();
    let agent = first.db.agents.require("agent-support").await.unwrap();
    let path = write_manifest_file(dir.path(), &agent).await.unwrap();
    let content = read_manifest_file(&path).await.unwrap();
    let imported = import_into_database(&first.db, &content).await.unwrap();
    assert!(first.persist().await.unwrap());
    drop(first);

    let second = AppContext::bootstrap(Config::from_env().unwrap(), admin())
        .await
        .unwrap();
    assert!(second.db.services.get_by_id("svc-scratch").await.unwrap().is_some());
    assert_eq!(second.db.agents.count().await.unwrap(), 3);
    let activated = second.db.agents.set_active(&imported.id, true).await.unwrap();
    assert!(activated.is_active);
    assert!(second.persist().await.unwrap());

    let third = AppContext::bootstrap(Config::from_env().unwrap(), SessionOptions::default())
        .await
        .unwrap();
    assert!(third.db.agents.require(&imported.id).await.unwrap().is_active);

    clear_env();
}
