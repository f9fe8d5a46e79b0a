//! The engine over file-backed stores.

use nodescope::{AnalyticsEngine, CsvDirectoryStore, JsonFileStore, Money, NodeId};
use tempfile::TempDir;

use crate::common::NETWORK_JSON;

#[tokio::test]
async fn test_json_dataset_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("network.json");
    std::fs::write(&path, NETWORK_JSON).unwrap();

    let report = AnalyticsEngine::new(JsonFileStore::new(&path))
        .node_report(&NodeId::new("N1"))
        .await
        .unwrap();

    assert_eq!(report.node_name.as_deref(), Some("Casa Norte"));
    assert_eq!(report.analytics.collaboration.count(), 1);
    assert_eq!(report.build_stats.dangling_refs.len(), 1);

    // the goal comes from the node record
    let productivity = &report.analytics.productivity;
    assert_eq!(productivity.goal, Money::from_major(10_000));
    assert_eq!(productivity.total, Money::from_major(5_000));
    assert_eq!(productivity.percentage, 50);
    assert_eq!(productivity.flagged.len(), 1);
    assert_eq!(productivity.flagged[0].raw, "unknown");
}

#[tokio::test]
async fn test_missing_json_dataset_is_transport_error() {
    let dir = TempDir::new().unwrap();
    let engine = AnalyticsEngine::new(JsonFileStore::new(dir.path().join("absent.json")));

    let err = engine
        .compute_node_analytics(&NodeId::new("N1"))
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_csv_dataset_end_to_end() {
    let dir = TempDir::new().unwrap();
    let write = |name: &str, body: &str| std::fs::write(dir.path().join(name), body).unwrap();

    write("nodes.csv", "id,name,revenue_goal\nN1,Casa Norte,\nN2,Casa Sul,\n");
    write(
        "participants.csv",
        "id,node_id,name\nu1,N1,Ana\nu2,N2,Bruno\n",
    );
    write(
        "projects.csv",
        "id,title,description,node_id\nP1,Community Radio,Weekly show,N1\n",
    );
    write(
        "participations.csv",
        "project_id,participant_id\nP1,u1\nP1,u2\n",
    );
    write(
        "revenue.csv",
        "node_id,category,amount\nN1,intern,30000.25\nN1,production,24999.75\n",
    );

    let report = AnalyticsEngine::new(CsvDirectoryStore::new(dir.path()))
        .node_report(&NodeId::new("N1"))
        .await
        .unwrap();

    assert_eq!(report.analytics.collaboration.count(), 1);
    assert_eq!(report.analytics.productivity.total, Money::from_major(55_000));
    assert_eq!(report.analytics.productivity.percentage, 100);
    assert!(report.counts.is_none());
}

#[tokio::test]
async fn test_json_dataset_with_numeric_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("network.json");
    std::fs::write(
        &path,
        r#"{
  "nodes": [
    {"id": 1, "name": "Casa Norte", "revenue_goal": 10000},
    {"id": 2, "name": "Casa Sul"}
  ],
  "participants": [
    {"id": 10, "node_id": 1, "name": "Ana"},
    {"id": 20, "node_id": 2, "name": "Bruno"}
  ],
  "projects": [{"id": 100, "node_id": 1, "title": "Community Radio"}],
  "participations": [
    {"project_id": 100, "participant_id": 10},
    {"project_id": 100, "participant_id": 20}
  ],
  "revenue": [{"node_id": 1, "category": "intern", "amount": 2500}],
  "counts": [{"node_id": 1, "governance_members": 3}]
}"#,
    )
    .unwrap();

    let report = AnalyticsEngine::new(JsonFileStore::new(&path))
        .node_report(&NodeId::new("1"))
        .await
        .unwrap();

    assert_eq!(report.node_name.as_deref(), Some("Casa Norte"));
    let projects = report.analytics.collaboration.projects();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].project_id.as_str(), "100");
    assert_eq!(projects[0].node_names, vec!["Casa Norte", "Casa Sul"]);
    assert_eq!(report.analytics.productivity.percentage, 25);
    assert_eq!(report.counts.unwrap().governance_members, 3);
}

#[tokio::test]
async fn test_bad_counts_row_for_other_node_keeps_analytics() {
    let dir = TempDir::new().unwrap();
    let write = |name: &str, body: &str| std::fs::write(dir.path().join(name), body).unwrap();

    write("nodes.csv", "id,name,revenue_goal\nN1,Casa Norte,10000\nN2,Casa Sul,\n");
    write("participants.csv", "id,node_id,name\nu1,N1,Ana\nu2,N2,Bruno\n");
    write("projects.csv", "id,title,description,node_id\nP1,Community Radio,,N1\n");
    write("participations.csv", "project_id,participant_id\nP1,u1\nP1,u2\n");
    write("revenue.csv", "node_id,category,amount\nN1,intern,5000\n");
    write(
        "counts.csv",
        "node_id,governance_members,publications,wiki_articles\nN2,lots,1,1\nN1,7,2,3\n",
    );

    let engine = AnalyticsEngine::new(CsvDirectoryStore::new(dir.path()));
    let report = engine.node_report(&NodeId::new("N1")).await.unwrap();

    assert_eq!(report.analytics.collaboration.count(), 1);
    assert_eq!(report.analytics.productivity.percentage, 50);
    assert_eq!(report.counts.unwrap().governance_members, 7);

    let partner = engine.node_report(&NodeId::new("N2")).await.unwrap();
    assert!(partner.counts.is_none());
}
