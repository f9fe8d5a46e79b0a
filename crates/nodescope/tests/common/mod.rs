//! Common fixtures and stores for the Nodescope integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use nodescope::{
    Dataset, Error, MemoryStore, Money, Node, NodeCounts, NodeId, Participant, ParticipantId,
    Project, ProjectId, ProjectParticipation, RelationshipStore, Result, RevenueCategory,
    RevenueRecord,
};
use std::sync::Mutex;

// ============================================================================
// Fixtures
// ============================================================================

/// Three nodes; `N1` owns a cross-node project, a single-node project, a
/// project with a ghost participant, and a project nobody joined.
pub fn network() -> Dataset {
    Dataset::new()
        .with_node(Node::new("N1", "Casa Norte"))
        .with_node(Node::new("N2", "Casa Sul"))
        .with_node(Node::new("N3", "Casa Leste"))
        .with_participant(Participant::new("u1", "N1", "Ana"))
        .with_participant(Participant::new("u2", "N2", "Bruno"))
        .with_participant(Participant::new("u3", "N1", "Carla"))
        .with_participant(Participant::new("u4", "N3", "Davi"))
        .with_project(Project::new("P1", "N1", "Community Radio").with_description("Weekly show"))
        .with_project(Project::new("P2", "N1", "Print Shop"))
        .with_project(Project::new("P3", "N1", "Oral Histories"))
        .with_project(Project::new("P4", "N1", "Seed Library"))
        .with_project(Project::new("P9", "N2", "Elsewhere"))
        .with_participation(ProjectParticipation::new("P1", "u1"))
        .with_participation(ProjectParticipation::new("P1", "u2"))
        .with_participation(ProjectParticipation::new("P2", "u1"))
        .with_participation(ProjectParticipation::new("P2", "u3"))
        .with_participation(ProjectParticipation::new("P3", "u3"))
        .with_participation(ProjectParticipation::new("P3", "ghost"))
        .with_participation(ProjectParticipation::new("P9", "u4"))
        .with_revenue(intern("N1", 3_000))
        .with_revenue(production("N1", 2_000))
        .with_revenue(intern("N2", 900))
        .with_counts(
            "N1",
            NodeCounts {
                governance_members: 7,
                publications: 3,
                wiki_articles: 12,
            },
        )
}

/// An intern earnings record in whole units.
pub fn intern(node: &str, major: i64) -> RevenueRecord {
    RevenueRecord::new(node, RevenueCategory::IndividualEarnings, Money::from_major(major))
}

/// A collective production record in whole units.
pub fn production(node: &str, major: i64) -> RevenueRecord {
    RevenueRecord::new(node, RevenueCategory::CollectiveProduction, Money::from_major(major))
}

/// The same network as a JSON dataset document.
pub const NETWORK_JSON: &str = r#"{
  "nodes": [
    {"id": "N1", "name": "Casa Norte", "revenue_goal": 10000},
    {"id": "N2", "name": "Casa Sul"},
    {"id": "N3", "name": "Casa Leste"}
  ],
  "participants": [
    {"id": "u1", "node_id": "N1", "name": "Ana"},
    {"id": "u2", "node_id": "N2", "name": "Bruno"},
    {"id": "u3", "node_id": "N1", "name": "Carla"},
    {"id": "u4", "node_id": "N3", "name": "Davi"}
  ],
  "projects": [
    {"id": "P1", "node_id": "N1", "title": "Community Radio", "description": "Weekly show"},
    {"id": "P2", "node_id": "N1", "title": "Print Shop"},
    {"id": "P3", "node_id": "N1", "title": "Oral Histories"}
  ],
  "participations": [
    {"project_id": "P1", "participant_id": "u1"},
    {"project_id": "P1", "participant_id": "u2"},
    {"project_id": "P2", "participant_id": "u1"},
    {"project_id": "P3", "participant_id": "ghost"}
  ],
  "revenue": [
    {"node_id": "N1", "category": "intern", "amount": 3000},
    {"node_id": "N1", "category": "production", "amount": "2000"},
    {"node_id": "N1", "category": "production", "amount": "unknown"}
  ]
}"#;

// ============================================================================
// Stores
// ============================================================================

/// The store queries, for failure injection and call accounting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Query {
    Projects,
    Participations,
    Participants,
    Nodes,
    Revenue,
    Counts,
}

/// Delegates to a memory store but fails one query with a transport error.
pub struct FailingStore {
    inner: MemoryStore,
    fail_on: Query,
}

impl FailingStore {
    pub fn new(dataset: Dataset, fail_on: Query) -> Self {
        Self {
            inner: MemoryStore::new(dataset),
            fail_on,
        }
    }

    fn check(&self, query: Query) -> Result<()> {
        if query == self.fail_on {
            Err(Error::transport(format!("connection reset during {query:?}")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RelationshipStore for FailingStore {
    async fn projects_for_node(&self, node_id: &NodeId) -> Result<Vec<Project>> {
        self.check(Query::Projects)?;
        self.inner.projects_for_node(node_id).await
    }

    async fn participations_for_projects(
        &self,
        project_ids: &[ProjectId],
    ) -> Result<Vec<ProjectParticipation>> {
        self.check(Query::Participations)?;
        self.inner.participations_for_projects(project_ids).await
    }

    async fn participants_by_ids(&self, ids: &[ParticipantId]) -> Result<Vec<Participant>> {
        self.check(Query::Participants)?;
        self.inner.participants_by_ids(ids).await
    }

    async fn nodes_by_ids(&self, ids: &[NodeId]) -> Result<Vec<Node>> {
        self.check(Query::Nodes)?;
        self.inner.nodes_by_ids(ids).await
    }

    async fn revenue_for_node(&self, node_id: &NodeId) -> Result<Vec<RevenueRecord>> {
        self.check(Query::Revenue)?;
        self.inner.revenue_for_node(node_id).await
    }

    async fn node_counts(&self, node_id: &NodeId) -> Result<Option<NodeCounts>> {
        self.check(Query::Counts)?;
        self.inner.node_counts(node_id).await
    }
}

/// Delegates to a memory store and records every query with its batch size.
pub struct CountingStore {
    inner: MemoryStore,
    calls: Mutex<Vec<(Query, usize)>>,
}

impl CountingStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            inner: MemoryStore::new(dataset),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, query: Query, size: usize) {
        self.calls.lock().unwrap().push((query, size));
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<(Query, usize)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls of one kind.
    pub fn count(&self, query: Query) -> usize {
        self.calls().iter().filter(|(q, _)| *q == query).count()
    }

    /// Batch size of the first call of one kind.
    pub fn batch_size(&self, query: Query) -> Option<usize> {
        self.calls()
            .iter()
            .find(|(q, _)| *q == query)
            .map(|(_, size)| *size)
    }
}

#[async_trait]
impl RelationshipStore for CountingStore {
    async fn projects_for_node(&self, node_id: &NodeId) -> Result<Vec<Project>> {
        self.record(Query::Projects, 1);
        self.inner.projects_for_node(node_id).await
    }

    async fn participations_for_projects(
        &self,
        project_ids: &[ProjectId],
    ) -> Result<Vec<ProjectParticipation>> {
        self.record(Query::Participations, project_ids.len());
        self.inner.participations_for_projects(project_ids).await
    }

    async fn participants_by_ids(&self, ids: &[ParticipantId]) -> Result<Vec<Participant>> {
        self.record(Query::Participants, ids.len());
        self.inner.participants_by_ids(ids).await
    }

    async fn nodes_by_ids(&self, ids: &[NodeId]) -> Result<Vec<Node>> {
        self.record(Query::Nodes, ids.len());
        self.inner.nodes_by_ids(ids).await
    }

    async fn revenue_for_node(&self, node_id: &NodeId) -> Result<Vec<RevenueRecord>> {
        self.record(Query::Revenue, 1);
        self.inner.revenue_for_node(node_id).await
    }

    async fn node_counts(&self, node_id: &NodeId) -> Result<Option<NodeCounts>> {
        self.record(Query::Counts, 1);
        self.inner.node_counts(node_id).await
    }
}
