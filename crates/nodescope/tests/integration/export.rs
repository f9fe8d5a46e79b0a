//! Export output.

use chrono::{TimeZone, Utc};
use nodescope::{
    AnalyticsEngine, ExportRecord, MemoryStore, NodeId, write_json, write_json_lines,
};

use crate::common::network;

async fn analytics_json(engine: &AnalyticsEngine<MemoryStore>, node: &str) -> String {
    let analytics = engine
        .compute_node_analytics(&NodeId::new(node))
        .await
        .unwrap();
    serde_json::to_string(&analytics).unwrap()
}

#[tokio::test]
async fn test_identical_snapshots_give_identical_json() {
    let first = AnalyticsEngine::new(MemoryStore::new(network()));
    let second = AnalyticsEngine::new(MemoryStore::new(network()));

    for node in ["N1", "N2", "N3"] {
        let a = analytics_json(&first, node).await;
        let b = analytics_json(&second, node).await;
        assert_eq!(a, b, "node {node}");
        assert_eq!(a, analytics_json(&first, node).await);
    }
}

#[tokio::test]
async fn test_analytics_json_field_names() {
    let engine = AnalyticsEngine::new(MemoryStore::new(network()));
    let json: serde_json::Value =
        serde_json::from_str(&analytics_json(&engine, "N1").await).unwrap();

    let project = &json["collaboration"]["projects"][0];
    for field in [
        "projectId",
        "title",
        "description",
        "nodeNames",
        "nodeCount",
        "participantNames",
    ] {
        assert!(project.get(field).is_some(), "missing {field}");
    }

    let productivity = &json["productivity"];
    for field in ["categoryTotals", "total", "goal", "percentage"] {
        assert!(productivity.get(field).is_some(), "missing {field}");
    }
    assert_eq!(json["collaboration"]["count"], 1);
}

#[tokio::test]
async fn test_export_records_for_several_nodes() {
    let engine = AnalyticsEngine::new(MemoryStore::new(network()));
    let ids = vec![NodeId::new("N1"), NodeId::new("N2")];
    let stamp = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();

    let records: Vec<ExportRecord> = engine
        .node_reports(&ids)
        .await
        .unwrap()
        .iter()
        .map(|report| ExportRecord::from_report(report, stamp))
        .collect();

    let mut out = Vec::new();
    write_json_lines(&mut out, &records).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["nodeId"], "N1");
    assert_eq!(lines[0]["collaborationCount"], 1);
    assert_eq!(lines[0]["crossNodeProjects"][0], "Community Radio");
    assert_eq!(lines[0]["partnerNodes"][0], "Casa Sul");
    assert_eq!(lines[0]["governanceMembers"], 7);
    assert_eq!(lines[0]["generatedAt"], "2026-10-19T09:30:00Z");
    assert_eq!(lines[1]["nodeId"], "N2");
    assert!(lines[1]["wikiArticles"].is_null());
}

#[tokio::test]
async fn test_export_single_record_to_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("n1.json");
    let engine = AnalyticsEngine::new(MemoryStore::new(network()));
    let stamp = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();

    let report = engine.node_report(&NodeId::new("N1")).await.unwrap();
    let record = ExportRecord::from_report(&report, stamp);

    let file = std::fs::File::create(&path).unwrap();
    write_json(std::io::BufWriter::new(file), &record, true).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: ExportRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(back, record);
    assert_eq!(back.productivity_percentage, 10);
}
