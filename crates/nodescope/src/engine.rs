//! The analytics engine.
//!
//! One call per focal node: load the snapshot, then build the collaboration
//! graph and score revenue side by side, then assemble. Nothing is kept
//! between calls.

use crate::report::{NodeAnalytics, NodeReport};
use futures::future::try_join_all;
use nodescope_core::{NodeId, Result};
use nodescope_graph::{CollaborationGraphBuilder, collaboration, partner_tallies};
use nodescope_score::{GoalBook, ProductivityScorer};
use nodescope_store::{NodeRelations, RelationshipLoader, RelationshipStore};

/// Computes node analytics over a [`RelationshipStore`].
#[derive(Clone, Debug)]
pub struct AnalyticsEngine<S> {
    loader: RelationshipLoader<S>,
    scorer: ProductivityScorer,
}

impl<S: RelationshipStore> AnalyticsEngine<S> {
    /// Creates an engine reading from `store`, with default goals.
    pub fn new(store: S) -> Self {
        Self {
            loader: RelationshipLoader::new(store),
            scorer: ProductivityScorer::default(),
        }
    }

    /// Uses `goals` to resolve revenue goals.
    pub fn with_goals(mut self, goals: GoalBook) -> Self {
        self.scorer = ProductivityScorer::new(goals);
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        self.loader.store()
    }

    /// The goal book in use.
    pub fn goals(&self) -> &GoalBook {
        self.scorer.goals()
    }

    /// Computes collaboration and productivity for `node_id`.
    ///
    /// A store failure is returned as an error, never as an empty result.
    pub async fn compute_node_analytics(&self, node_id: &NodeId) -> Result<NodeAnalytics> {
        Ok(self.node_report(node_id).await?.into_analytics())
    }

    /// Computes the full report for `node_id`.
    pub async fn node_report(&self, node_id: &NodeId) -> Result<NodeReport> {
        let relations = self.loader.load(node_id).await?;
        Ok(self.assemble(&relations).await)
    }

    /// Computes reports for several nodes concurrently.
    ///
    /// Reports come back in the order of `node_ids`; the first failure fails
    /// the batch.
    pub async fn node_reports(&self, node_ids: &[NodeId]) -> Result<Vec<NodeReport>> {
        try_join_all(node_ids.iter().map(|id| self.node_report(id))).await
    }

    /// Builds a report from an already loaded snapshot.
    pub async fn assemble(&self, relations: &NodeRelations) -> NodeReport {
        let graph_stage = async {
            let (graph, stats) = CollaborationGraphBuilder::new()
                .with_nodes(&relations.nodes)
                .with_participants(&relations.participants)
                .with_projects(&relations.projects)
                .with_participations(&relations.participations)
                .build();
            let partners = partner_tallies(&graph, &relations.node_id);
            (collaboration(&graph), partners, stats)
        };

        let score_stage = async {
            self.scorer.score_node(
                &relations.node_id,
                relations.node.as_ref(),
                &relations.revenue,
            )
        };

        let ((collaboration, partners, stats), productivity) =
            tokio::join!(graph_stage, score_stage);

        if !stats.is_clean() {
            log::warn!(
                "Node '{}': {} dangling participations, {} unresolved nodes, {} duplicates ignored",
                relations.node_id,
                stats.dangling_refs.len(),
                stats.unresolved_nodes.len(),
                stats.duplicates_ignored
            );
        }

        NodeReport::assemble(
            relations,
            NodeAnalytics {
                collaboration,
                productivity,
            },
            partners,
            stats,
        )
    }
}
