//! Result assembly.
//!
//! Composes the collaboration and productivity results with the node's
//! identity and supplementary counts. Nothing here computes anything.

use nodescope_core::{NodeCounts, NodeId};
use nodescope_graph::{BuildStats, CollaborationResult, PartnerTally};
use nodescope_score::ProductivityResult;
use nodescope_store::NodeRelations;
use serde::Serialize;

/// The two analytics results for one node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeAnalytics {
    /// Cross-node projects.
    pub collaboration: CollaborationResult,
    /// Revenue against goal.
    pub productivity: ProductivityResult,
}

/// Everything the node view shows about one node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeReport {
    /// The focal node.
    pub node_id: NodeId,
    /// The focal node's name, if the store has its record.
    pub node_name: Option<String>,
    /// Collaboration and productivity.
    #[serde(flatten)]
    pub analytics: NodeAnalytics,
    /// Nodes sharing cross-node projects with the focal node.
    pub partners: Vec<PartnerTally>,
    /// Governance, publication, and wiki counts, if tracked.
    pub counts: Option<NodeCounts>,
    /// Data-quality statistics from the graph build.
    #[serde(skip)]
    pub build_stats: BuildStats,
}

impl NodeReport {
    /// Assembles a report from a loaded snapshot and the computed parts.
    pub fn assemble(
        relations: &NodeRelations,
        analytics: NodeAnalytics,
        partners: Vec<PartnerTally>,
        build_stats: BuildStats,
    ) -> Self {
        Self {
            node_id: relations.node_id.clone(),
            node_name: relations.node_name().map(str::to_string),
            analytics,
            partners,
            counts: relations.counts,
            build_stats,
        }
    }

    /// The collaboration and productivity results.
    pub fn analytics(&self) -> &NodeAnalytics {
        &self.analytics
    }

    /// Consumes the report, keeping only the analytics.
    pub fn into_analytics(self) -> NodeAnalytics {
        self.analytics
    }
}
