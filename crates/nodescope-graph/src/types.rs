//! Core graph types.
//!
//! The collaboration graph is a directed, three-layer graph:
//! projects point at their participants, participants point at the node
//! they belong to. Participation edges remember the join row they came
//! from so traversals can replay the input order exactly.

use nodescope_core::{Node, NodeId, Participant, ParticipantId, Project, ProjectId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Label used for a node id that has no node record.
pub const UNKNOWN_NODE: &str = "Unknown Node";

// ============================================================================
// Vertex and Link
// ============================================================================

/// A vertex of the collaboration graph.
#[derive(Clone, Debug, PartialEq)]
pub enum Vertex {
    /// A project owned by the focal node.
    Project(Project),
    /// A person taking part in projects.
    Participant(Participant),
    /// An organizational node with a known record.
    Node(Node),
    /// A node id referenced by a participant but missing from the node list.
    UnresolvedNode(NodeId),
}

impl Vertex {
    /// Display label of the vertex.
    ///
    /// Unresolved nodes are labelled [`UNKNOWN_NODE`].
    pub fn label(&self) -> &str {
        match self {
            Self::Project(p) => &p.title,
            Self::Participant(p) => &p.name,
            Self::Node(n) => &n.name,
            Self::UnresolvedNode(_) => UNKNOWN_NODE,
        }
    }

    /// The node id, for node vertices (resolved or not).
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::Node(n) => Some(&n.id),
            Self::UnresolvedNode(id) => Some(id),
            _ => None,
        }
    }
}

/// An edge of the collaboration graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link {
    /// Project → participant, from the join row at index `row`.
    Participation {
        /// Position of the join row in the input.
        row: usize,
    },
    /// Participant → the node they belong to.
    Affiliation,
}

// ============================================================================
// CollaborationGraph
// ============================================================================

/// The project → participant → node graph.
///
/// Wraps a petgraph `DiGraph` with lookup tables by record id.
#[derive(Clone, Debug, Default)]
pub struct CollaborationGraph {
    /// The underlying directed graph.
    pub graph: DiGraph<Vertex, Link>,
    pub(crate) projects: HashMap<ProjectId, NodeIndex>,
    pub(crate) participants: HashMap<ParticipantId, NodeIndex>,
    pub(crate) nodes: HashMap<NodeId, NodeIndex>,
    pub(crate) project_order: Vec<NodeIndex>,
}

impl CollaborationGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of projects.
    pub fn project_count(&self) -> usize {
        self.project_order.len()
    }

    /// Number of participants.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Number of node vertices, resolved or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of participation edges.
    pub fn participation_count(&self) -> usize {
        self.graph
            .edge_weights()
            .filter(|link| matches!(link, Link::Participation { .. }))
            .count()
    }

    /// Gets a project vertex index by id.
    pub fn project_index(&self, id: &ProjectId) -> Option<NodeIndex> {
        self.projects.get(id).copied()
    }

    /// Gets a participant vertex index by id.
    pub fn participant_index(&self, id: &ParticipantId) -> Option<NodeIndex> {
        self.participants.get(id).copied()
    }

    /// Gets a node vertex index by id.
    pub fn node_index(&self, id: &NodeId) -> Option<NodeIndex> {
        self.nodes.get(id).copied()
    }

    /// Projects in input order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> + '_ {
        self.project_order
            .iter()
            .filter_map(|&idx| match &self.graph[idx] {
                Vertex::Project(p) => Some(p),
                _ => None,
            })
    }

    /// Participant vertices of a project, ordered by join row.
    ///
    /// A participant listed twice for the same project appears twice.
    pub fn project_participants(&self, project: NodeIndex) -> Vec<NodeIndex> {
        let mut links: Vec<(usize, NodeIndex)> = self
            .graph
            .edges_directed(project, Direction::Outgoing)
            .filter_map(|edge| match edge.weight() {
                Link::Participation { row } => Some((*row, edge.target())),
                Link::Affiliation => None,
            })
            .collect();
        links.sort_by_key(|(row, _)| *row);
        links.into_iter().map(|(_, idx)| idx).collect()
    }

    /// The node vertex a participant belongs to.
    pub fn affiliation(&self, participant: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(participant, Direction::Outgoing)
            .find(|edge| matches!(edge.weight(), Link::Affiliation))
            .map(|edge| edge.target())
    }
}

// ============================================================================
// Tests
// ============================================================================
