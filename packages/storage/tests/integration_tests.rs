// ABOUTME: Integration tests for the Agentdash data layer
// ABOUTME: CRUD round-trips, seed loading, stale service copies, and dashboard summaries

use agentdash_core::{
    Agent, AgentCreateInput, AgentUpdateInput, Scores, Service,
    ServiceCategory, ServiceUpdateInput,
};
use agentdash_storage::{Database, EntityStore, ServiceStore, StorageError};
use pretty_assertions::assert_eq;

fn service(id: &str, name: &str, category: ServiceCategory) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        category,
        cost_structure: String::new(),
        cost_per_unit: String::new(),
        has_freetier: true,
        logo: None,
    }
}

#[tokio::test]
async fn test_add_service_then_get() {
    let db = Database::seeded().await.unwrap();
    let before = db.services.get_all().await.unwrap().len();

    db.services
        .add(service("x", "Foo", ServiceCategory::Db))
        .await
        .unwrap();

    assert_eq!(db.services.get_all().await.unwrap().len(), before + 1);
    assert_eq!(db.services.get_by_id("x").await.unwrap().unwrap().name, "Foo");
}

#[tokio::test]
async fn test_update_round_trip_keeps_unspecified_fields() {
    let db = Database::new();
    let agent = Agent::from_create_input(AgentCreateInput {
        title: "Invoice Reader".to_string(),
        description: Some("Extracts totals from PDFs".to_string()),
        llms: vec!["GPT-4o".to_string()],
        ..Default::default()
    });
    let added = db.agents.add(agent).await.unwrap();

    let patch = AgentUpdateInput {
        title: Some("Invoice Reader v2".to_string()),
        scores: Some(Scores {
            quality: 4.0,
            speed: 3.0,
            saving: 5.0,
            privacy: 2.0,
        }),
        ..Default::default()
    };
    db.agents.update(&added.id, patch).await.unwrap();

    let stored = db.agents.get_by_id(&added.id).await.unwrap().unwrap();
    let mut expected = added.clone();
    expected.title = "Invoice Reader v2".to_string();
    expected.scores = Scores {
        quality: 4.0,
        speed: 3.0,
        saving: 5.0,
        privacy: 2.0,
    };
    assert_eq!(stored, expected);
}

#[tokio::test]
async fn test_update_missing_agent_is_not_found() {
    let db = Database::seeded().await.unwrap();
    let before = db.agents.get_all().await.unwrap();

    let err = db
        .agents
        .update("agent-ghost", AgentUpdateInput::default())
        .await
        .unwrap_err();

    match err {
        StorageError::NotFound { kind, id } => {
            assert_eq!(kind, "Agent");
            assert_eq!(id, "agent-ghost");
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
    assert_eq!(db.agents.get_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_service() {
    let db = Database::seeded().await.unwrap();

    assert!(db.services.delete("svc-zapier").await.unwrap());
    assert!(db.services.get_by_id("svc-zapier").await.unwrap().is_none());
    assert!(db
        .services
        .get_all()
        .await
        .unwrap()
        .iter()
        .all(|s| s.id != "svc-zapier"));

    // Second delete is a no-op
    assert!(!db.services.delete("svc-zapier").await.unwrap());
}

#[tokio::test]
async fn test_seeded_database_contents() {
    let db = Database::seeded().await.unwrap();

    assert_eq!(db.agents.count().await.unwrap(), 2);
    assert_eq!(db.llm_models.count().await.unwrap(), 4);

    let dbs = db.services.list_by_category(ServiceCategory::Db).await;
    assert_eq!(dbs.len(), 2);
}

#[tokio::test]
async fn test_agent_service_copies_are_stale_until_refreshed() {
    let db = Database::seeded().await.unwrap();

    db.services
        .update(
            "svc-zapier",
            ServiceUpdateInput {
                cost_per_unit: Some("$29.99 / 750 tasks".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let agent = db.agents.require("agent-support").await.unwrap();
    let copy = agent.services.iter().find(|s| s.id == "svc-zapier").unwrap();
    assert_eq!(copy.cost_per_unit, "$19.99 / 750 tasks");

    let refreshed = db.refresh_agent_services("agent-support").await.unwrap();
    let copy = refreshed
        .services
        .iter()
        .find(|s| s.id == "svc-zapier")
        .unwrap();
    assert_eq!(copy.cost_per_unit, "$29.99 / 750 tasks");
}

#[tokio::test]
async fn test_refresh_keeps_copies_of_deleted_services() {
    let db = Database::seeded().await.unwrap();
    db.services.delete("svc-postgres").await.unwrap();

    let refreshed = db.refresh_agent_services("agent-support").await.unwrap();
    assert!(refreshed.services.iter().any(|s| s.id == "svc-postgres"));

    assert!(db
        .refresh_agent_services("agent-ghost")
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_summary() {
    let db = Database::seeded().await.unwrap();
    let summary = db.summary().await.unwrap();

    assert_eq!(summary.total_agents, 2);
    assert_eq!(summary.active_agents, 1);
    assert!((summary.total_cost - 280.5).abs() < 1e-9);
    // 333% and 1200%
    assert!((summary.average_roi - 766.5).abs() < 1e-9);
    assert_eq!(summary.services_by_category[&ServiceCategory::Db], 2);
    assert_eq!(summary.services_by_category.values().sum::<usize>(), 7);
}

#[tokio::test]
async fn test_summary_of_empty_database() {
    let summary = Database::new().summary().await.unwrap();
    assert_eq!(summary.total_agents, 0);
    assert_eq!(summary.average_roi, 0.0);
    assert!(summary.services_by_category.is_empty());
}

#[tokio::test]
async fn test_stores_are_isolated_per_instance() {
    let first = ServiceStore::new();
    let second = ServiceStore::new();

    first
        .add(service("only-here", "Solo", ServiceCategory::Reasoning))
        .await
        .unwrap();

    assert_eq!(first.count().await.unwrap(), 1);
    assert_eq!(second.count().await.unwrap(), 0);
}
