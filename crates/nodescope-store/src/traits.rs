//! The data-store seam.

use async_trait::async_trait;
use nodescope_core::{
    Node, NodeCounts, NodeId, Participant, ParticipantId, Project, ProjectId,
    ProjectParticipation, Result, RevenueRecord,
};
use std::sync::Arc;

/// Batch queries against the external relational data store.
///
/// Every query takes a whole id set so the loader never falls back to one
/// round trip per row. Implementations return rows in a stable order (the
/// store's natural order) so analysis results are reproducible.
///
/// A store that cannot answer returns [`Error::Transport`]; an empty result
/// is always `Ok(vec![])`, never an error.
///
/// [`Error::Transport`]: nodescope_core::Error::Transport
#[async_trait]
pub trait RelationshipStore: Send + Sync {
    /// Projects owned by `node_id`.
    async fn projects_for_node(&self, node_id: &NodeId) -> Result<Vec<Project>>;

    /// Participation rows whose project is in `project_ids`.
    async fn participations_for_projects(
        &self,
        project_ids: &[ProjectId],
    ) -> Result<Vec<ProjectParticipation>>;

    /// Participants with the given ids. Unknown ids are simply absent.
    async fn participants_by_ids(&self, ids: &[ParticipantId]) -> Result<Vec<Participant>>;

    /// Nodes with the given ids. Unknown ids are simply absent.
    async fn nodes_by_ids(&self, ids: &[NodeId]) -> Result<Vec<Node>>;

    /// Revenue records attributed to `node_id`.
    async fn revenue_for_node(&self, node_id: &NodeId) -> Result<Vec<RevenueRecord>>;

    /// Supplementary counts kept for `node_id`, if the store tracks them.
    async fn node_counts(&self, _node_id: &NodeId) -> Result<Option<NodeCounts>> {
        Ok(None)
    }
}

#[async_trait]
impl<T: RelationshipStore + ?Sized> RelationshipStore for Arc<T> {
    async fn projects_for_node(&self, node_id: &NodeId) -> Result<Vec<Project>> {
        (**self).projects_for_node(node_id).await
    }

    async fn participations_for_projects(
        &self,
        project_ids: &[ProjectId],
    ) -> Result<Vec<ProjectParticipation>> {
        (**self).participations_for_projects(project_ids).await
    }

    async fn participants_by_ids(&self, ids: &[ParticipantId]) -> Result<Vec<Participant>> {
        (**self).participants_by_ids(ids).await
    }

    async fn nodes_by_ids(&self, ids: &[NodeId]) -> Result<Vec<Node>> {
        (**self).nodes_by_ids(ids).await
    }

    async fn revenue_for_node(&self, node_id: &NodeId) -> Result<Vec<RevenueRecord>> {
        (**self).revenue_for_node(node_id).await
    }

    async fn node_counts(&self, node_id: &NodeId) -> Result<Option<NodeCounts>> {
        (**self).node_counts(node_id).await
    }
}
