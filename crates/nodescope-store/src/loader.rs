//! The relationship loader.
//!
//! Drives the batch queries of a [`RelationshipStore`] for one focal node:
//!
//! 1. projects owned by the node
//! 2. participation rows for those projects
//! 3. participants named by those rows (one batch)
//! 4. nodes those participants belong to, plus the focal node (one batch)
//!
//! Revenue and supplementary counts do not depend on the chain above and are
//! fetched concurrently with it. A node without projects stops the chain
//! after step 1; that is a valid, empty result.

use crate::traits::RelationshipStore;
use nodescope_core::{
    Error, Node, NodeCounts, NodeId, Participant, Project, ProjectParticipation, Result,
    RevenueRecord,
};
use std::collections::HashSet;
use std::hash::Hash;

/// Everything the analytics need for one node, as read from the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeRelations {
    /// The focal node id.
    pub node_id: NodeId,
    /// The focal node's own record, if the store has it.
    pub node: Option<Node>,
    /// Projects owned by the focal node.
    pub projects: Vec<Project>,
    /// Participation rows for those projects.
    pub participations: Vec<ProjectParticipation>,
    /// Participants referenced by the participation rows.
    pub participants: Vec<Participant>,
    /// Nodes referenced by those participants.
    pub nodes: Vec<Node>,
    /// Revenue attributed to the focal node.
    pub revenue: Vec<RevenueRecord>,
    /// Supplementary counts, if tracked.
    pub counts: Option<NodeCounts>,
}

impl NodeRelations {
    /// An empty snapshot for `node_id`.
    pub fn empty(node_id: impl Into<NodeId>) -> Self {
        Self {
            node_id: node_id.into(),
            ..Self::default()
        }
    }

    /// Display name of the focal node, if known.
    pub fn node_name(&self) -> Option<&str> {
        self.node.as_ref().map(|n| n.name.as_str())
    }
}

/// The project → participation → participant → node chain.
struct ProjectGraphRows {
    node: Option<Node>,
    projects: Vec<Project>,
    participations: Vec<ProjectParticipation>,
    participants: Vec<Participant>,
    nodes: Vec<Node>,
}

/// Collects distinct values in first-seen order.
fn distinct<T, I>(values: I) -> Vec<T>
where
    T: Clone + Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

/// Loads [`NodeRelations`] snapshots from a store.
#[derive(Clone, Debug)]
pub struct RelationshipLoader<S> {
    store: S,
}

impl<S: RelationshipStore> RelationshipLoader<S> {
    /// Creates a loader over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the snapshot for `node_id`.
    ///
    /// Any store failure fails the whole load; there is no partial snapshot.
    pub async fn load(&self, node_id: &NodeId) -> Result<NodeRelations> {
        if node_id.is_blank() {
            return Err(Error::validation_field("node_id", "must not be blank"));
        }

        let (rows, revenue, counts) = tokio::try_join!(
            self.load_project_graph(node_id),
            self.store.revenue_for_node(node_id),
            self.store.node_counts(node_id),
        )?;

        log::debug!(
            "Loaded relations for node '{node_id}': {} projects, {} participations, {} participants, {} nodes, {} revenue records",
            rows.projects.len(),
            rows.participations.len(),
            rows.participants.len(),
            rows.nodes.len(),
            revenue.len(),
        );

        Ok(NodeRelations {
            node_id: node_id.clone(),
            node: rows.node,
            projects: rows.projects,
            participations: rows.participations,
            participants: rows.participants,
            nodes: rows.nodes,
            revenue,
            counts,
        })
    }

    async fn load_project_graph(&self, node_id: &NodeId) -> Result<ProjectGraphRows> {
        let projects = self.store.projects_for_node(node_id).await?;

        let mut participations = Vec::new();
        let mut participants = Vec::new();

        if !projects.is_empty() {
            let project_ids = distinct(projects.iter().map(|p| p.id.clone()));
            participations = self.store.participations_for_projects(&project_ids).await?;

            let participant_ids = distinct(participations.iter().map(|pp| pp.participant_id.clone()));
            if !participant_ids.is_empty() {
                participants = self.store.participants_by_ids(&participant_ids).await?;
            }
        }

        let referenced: Vec<NodeId> = distinct(participants.iter().map(|p| p.node_id.clone()));
        let mut lookup = referenced.clone();
        if !lookup.contains(node_id) {
            lookup.push(node_id.clone());
        }

        let fetched = self.store.nodes_by_ids(&lookup).await?;
        let node = fetched.iter().find(|n| &n.id == node_id).cloned();
        if node.is_none() {
            log::warn!("Focal node '{node_id}' has no node record");
        }

        let referenced: HashSet<&NodeId> = referenced.iter().collect();
        let nodes = fetched
            .into_iter()
            .filter(|n| referenced.contains(&n.id))
            .collect();

        Ok(ProjectGraphRows {
            node,
            projects,
            participations,
            participants,
            nodes,
        })
    }
}
