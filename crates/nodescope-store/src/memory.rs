//! In-memory store.

use crate::dataset::Dataset;
use crate::traits::RelationshipStore;
use async_trait::async_trait;
use nodescope_core::{
    Node, NodeCounts, NodeId, Participant, ParticipantId, Project, ProjectId,
    ProjectParticipation, Result, RevenueRecord,
};

/// A store backed by a [`Dataset`] held in memory.
///
/// Useful for tests and for callers that already fetched their rows some
/// other way.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    dataset: Dataset,
}

impl MemoryStore {
    /// Creates a store over `dataset`.
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// The underlying dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl From<Dataset> for MemoryStore {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset)
    }
}

#[async_trait]
impl RelationshipStore for MemoryStore {
    async fn projects_for_node(&self, node_id: &NodeId) -> Result<Vec<Project>> {
        Ok(self.dataset.projects_for_node(node_id))
    }

    async fn participations_for_projects(
        &self,
        project_ids: &[ProjectId],
    ) -> Result<Vec<ProjectParticipation>> {
        Ok(self.dataset.participations_for_projects(project_ids))
    }

    async fn participants_by_ids(&self, ids: &[ParticipantId]) -> Result<Vec<Participant>> {
        Ok(self.dataset.participants_by_ids(ids))
    }

    async fn nodes_by_ids(&self, ids: &[NodeId]) -> Result<Vec<Node>> {
        Ok(self.dataset.nodes_by_ids(ids))
    }

    async fn revenue_for_node(&self, node_id: &NodeId) -> Result<Vec<RevenueRecord>> {
        Ok(self.dataset.revenue_for_node(node_id))
    }

    async fn node_counts(&self, node_id: &NodeId) -> Result<Option<NodeCounts>> {
        Ok(self.dataset.counts_for_node(node_id))
    }
}
