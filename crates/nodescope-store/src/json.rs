//! JSON dataset-file store.

use crate::dataset::{Dataset, RawDataset};
use crate::traits::RelationshipStore;
use async_trait::async_trait;
use nodescope_core::{
    Error, Node, NodeCounts, NodeId, Participant, ParticipantId, Project, ProjectId,
    ProjectParticipation, Result, RevenueRecord,
};
use std::path::{Path, PathBuf};

/// A store reading one JSON dataset document.
///
/// The document is an object with `nodes`, `participants`, `projects`,
/// `participations`, `revenue` and (optionally) `counts` arrays. The file is
/// read again for every query, so a computation always sees the current
/// contents and nothing is cached between requests.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the dataset document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and validates the whole document.
    pub async fn read_dataset(&self) -> Result<Dataset> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::transport_with_source(
                format!("cannot read dataset {}", self.path.display()),
                e,
            )
        })?;

        let raw: RawDataset = serde_json::from_str(&text).map_err(|e| {
            Error::parse(format!(
                "invalid dataset document {}: {e}",
                self.path.display()
            ))
        })?;

        Ok(Dataset::from(raw))
    }
}

#[async_trait]
impl RelationshipStore for JsonFileStore {
    async fn projects_for_node(&self, node_id: &NodeId) -> Result<Vec<Project>> {
        Ok(self.read_dataset().await?.projects_for_node(node_id))
    }

    async fn participations_for_projects(
        &self,
        project_ids: &[ProjectId],
    ) -> Result<Vec<ProjectParticipation>> {
        Ok(self
            .read_dataset()
            .await?
            .participations_for_projects(project_ids))
    }

    async fn participants_by_ids(&self, ids: &[ParticipantId]) -> Result<Vec<Participant>> {
        Ok(self.read_dataset().await?.participants_by_ids(ids))
    }

    async fn nodes_by_ids(&self, ids: &[NodeId]) -> Result<Vec<Node>> {
        Ok(self.read_dataset().await?.nodes_by_ids(ids))
    }

    async fn revenue_for_node(&self, node_id: &NodeId) -> Result<Vec<RevenueRecord>> {
        Ok(self.read_dataset().await?.revenue_for_node(node_id))
    }

    async fn node_counts(&self, node_id: &NodeId) -> Result<Option<NodeCounts>> {
        Ok(self.read_dataset().await?.counts_for_node(node_id))
    }
}
