//! Handlers for `analyze` and `export`.

use chrono::{DateTime, Utc};
use nodescope::{
    AnalyticsEngine, ExportRecord, NodeId, RelationshipStore, Result, write_json,
    write_json_lines,
};
use std::io::Write;

/// Prints the analytics of one node as pretty JSON.
pub async fn cmd_analyze<S, W>(engine: &AnalyticsEngine<S>, node_id: &str, mut out: W) -> Result<()>
where
    S: RelationshipStore,
    W: Write,
{
    let node_id = NodeId::new(node_id);
    let analytics = engine.compute_node_analytics(&node_id).await?;
    tracing::info!(
        node = %node_id,
        cross_node_projects = analytics.collaboration.count(),
        percentage = analytics.productivity.percentage,
        "Computed node analytics"
    );

    serde_json::to_writer_pretty(&mut out, &analytics)?;
    writeln!(out)?;
    Ok(())
}

/// Writes export records for `node_ids`.
///
/// A single node is written as one JSON document, several as JSON Lines.
pub async fn cmd_export<S, W>(
    engine: &AnalyticsEngine<S>,
    node_ids: &[String],
    generated_at: DateTime<Utc>,
    pretty: bool,
    out: W,
) -> Result<()>
where
    S: RelationshipStore,
    W: Write,
{
    let ids: Vec<NodeId> = node_ids.iter().map(NodeId::new).collect();
    let reports = engine.node_reports(&ids).await?;
    let records: Vec<ExportRecord> = reports
        .iter()
        .map(|report| ExportRecord::from_report(report, generated_at))
        .collect();

    tracing::info!(nodes = records.len(), "Exporting node reports");
    match records.as_slice() {
        [single] => write_json(out, single, pretty),
        many => write_json_lines(out, many),
    }
}
