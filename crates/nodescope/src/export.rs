//! Flat JSON export of node reports.
//!
//! One [`ExportRecord`] per node. A single record is written as one JSON
//! document; many records are written as JSON Lines, one object per line.

use crate::report::NodeReport;
use chrono::{DateTime, Utc};
use nodescope_core::{Money, NodeId, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

/// A node report flattened for export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    /// The focal node.
    pub node_id: NodeId,
    /// The focal node's name, if known.
    pub node_name: Option<String>,
    /// When the export was produced.
    pub generated_at: DateTime<Utc>,
    /// Number of cross-node projects.
    pub collaboration_count: usize,
    /// Titles of the cross-node projects.
    pub cross_node_projects: Vec<String>,
    /// Names of the partner nodes, most shared projects first.
    pub partner_nodes: Vec<String>,
    /// Total revenue.
    pub revenue_total: Money,
    /// Revenue goal.
    pub revenue_goal: Money,
    /// Revenue as a percentage of the goal, 0 to 100.
    pub productivity_percentage: u8,
    /// Revenue per category.
    pub category_totals: BTreeMap<String, Money>,
    /// Revenue records ignored because their amount was malformed.
    pub flagged_revenue_records: usize,
    /// Governance members, if tracked.
    pub governance_members: Option<u64>,
    /// Publications, if tracked.
    pub publications: Option<u64>,
    /// Wiki articles, if tracked.
    pub wiki_articles: Option<u64>,
}

impl ExportRecord {
    /// Flattens `report`, stamped with `generated_at`.
    pub fn from_report(report: &NodeReport, generated_at: DateTime<Utc>) -> Self {
        let collaboration = &report.analytics.collaboration;
        let productivity = &report.analytics.productivity;

        Self {
            node_id: report.node_id.clone(),
            node_name: report.node_name.clone(),
            generated_at,
            collaboration_count: collaboration.count(),
            cross_node_projects: collaboration
                .projects()
                .iter()
                .map(|p| p.title.clone())
                .collect(),
            partner_nodes: report
                .partners
                .iter()
                .map(|p| p.node_name.clone())
                .collect(),
            revenue_total: productivity.total,
            revenue_goal: productivity.goal,
            productivity_percentage: productivity.percentage,
            category_totals: productivity.category_totals.clone(),
            flagged_revenue_records: productivity.flagged.len(),
            governance_members: report.counts.map(|c| c.governance_members),
            publications: report.counts.map(|c| c.publications),
            wiki_articles: report.counts.map(|c| c.wiki_articles),
        }
    }
}

/// Writes one record as a JSON document followed by a newline.
pub fn write_json<W: Write>(mut writer: W, record: &ExportRecord, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, record)?;
    } else {
        serde_json::to_writer(&mut writer, record)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes records as JSON Lines.
pub fn write_json_lines<W: Write>(mut writer: W, records: &[ExportRecord]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    log::debug!("Wrote {} export records", records.len());
    Ok(())
}
