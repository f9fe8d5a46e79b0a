//! Builder for the collaboration graph.
//!
//! The build runs in phases so every vertex exists before edges refer to it:
//!
//! 1. Node vertices
//! 2. Participant vertices and their affiliation edges
//! 3. Project vertices
//! 4. Participation edges, one per join row
//!
//! Rows that point at missing records are not fatal. A participation naming
//! an unknown participant or project is skipped and listed in
//! [`BuildStats::dangling_refs`]. A participant whose node has no record is
//! attached to an unresolved-node vertex and listed in
//! [`BuildStats::unresolved_nodes`].

use crate::types::{CollaborationGraph, Link, Vertex};
use nodescope_core::{Node, NodeId, Participant, Project, ProjectParticipation};
use std::collections::HashSet;

/// Statistics from a graph build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Participation rows turned into edges.
    pub participations_linked: usize,
    /// Participation rows skipped because a referenced record is missing.
    pub dangling_refs: Vec<String>,
    /// Node ids referenced by participants but absent from the node list.
    pub unresolved_nodes: Vec<NodeId>,
    /// Records ignored because an earlier record had the same id.
    pub duplicates_ignored: usize,
}

impl BuildStats {
    /// Returns `true` if the build found no data-quality issues.
    pub fn is_clean(&self) -> bool {
        self.dangling_refs.is_empty()
            && self.unresolved_nodes.is_empty()
            && self.duplicates_ignored == 0
    }
}

/// Builder for a [`CollaborationGraph`] over borrowed record slices.
#[derive(Clone, Debug, Default)]
pub struct CollaborationGraphBuilder<'a> {
    nodes: &'a [Node],
    participants: &'a [Participant],
    projects: &'a [Project],
    participations: &'a [ProjectParticipation],
}

impl<'a> CollaborationGraphBuilder<'a> {
    /// Creates a builder with no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node records used for name resolution.
    pub fn with_nodes(mut self, nodes: &'a [Node]) -> Self {
        self.nodes = nodes;
        self
    }

    /// Sets the participant records.
    pub fn with_participants(mut self, participants: &'a [Participant]) -> Self {
        self.participants = participants;
        self
    }

    /// Sets the projects to analyze.
    pub fn with_projects(mut self, projects: &'a [Project]) -> Self {
        self.projects = projects;
        self
    }

    /// Sets the participation join rows.
    pub fn with_participations(mut self, participations: &'a [ProjectParticipation]) -> Self {
        self.participations = participations;
        self
    }

    /// Builds the graph.
    pub fn build(self) -> (CollaborationGraph, BuildStats) {
        let mut graph = CollaborationGraph::new();
        let mut stats = BuildStats::default();

        // ================================================================
        // Phase 1: Node vertices
        // ================================================================
        for node in self.nodes {
            if graph.nodes.contains_key(&node.id) {
                stats.duplicates_ignored += 1;
                continue;
            }
            let idx = graph.graph.add_node(Vertex::Node(node.clone()));
            graph.nodes.insert(node.id.clone(), idx);
        }

        // ================================================================
        // Phase 2: Participants and affiliations
        // ================================================================
        let mut unresolved: HashSet<NodeId> = HashSet::new();

        for participant in self.participants {
            if graph.participants.contains_key(&participant.id) {
                stats.duplicates_ignored += 1;
                continue;
            }
            let idx = graph
                .graph
                .add_node(Vertex::Participant(participant.clone()));
            graph.participants.insert(participant.id.clone(), idx);

            let node_idx = match graph.nodes.get(&participant.node_id) {
                Some(&node_idx) => node_idx,
                None => {
                    let node_idx = graph
                        .graph
                        .add_node(Vertex::UnresolvedNode(participant.node_id.clone()));
                    graph.nodes.insert(participant.node_id.clone(), node_idx);
                    if unresolved.insert(participant.node_id.clone()) {
                        log::warn!(
                            "Participant '{}' belongs to node '{}' which has no record",
                            participant.id,
                            participant.node_id
                        );
                        stats.unresolved_nodes.push(participant.node_id.clone());
                    }
                    node_idx
                }
            };
            graph.graph.add_edge(idx, node_idx, Link::Affiliation);
        }

        // ================================================================
        // Phase 3: Project vertices
        // ================================================================
        for project in self.projects {
            if graph.projects.contains_key(&project.id) {
                stats.duplicates_ignored += 1;
                continue;
            }
            let idx = graph.graph.add_node(Vertex::Project(project.clone()));
            graph.projects.insert(project.id.clone(), idx);
            graph.project_order.push(idx);
        }

        // ================================================================
        // Phase 4: Participation edges
        // ================================================================
        for (row, participation) in self.participations.iter().enumerate() {
            let Some(&project_idx) = graph.projects.get(&participation.project_id) else {
                stats.dangling_refs.push(format!(
                    "row {row}: unknown project '{}'",
                    participation.project_id
                ));
                continue;
            };
            let Some(&participant_idx) = graph.participants.get(&participation.participant_id)
            else {
                stats.dangling_refs.push(format!(
                    "row {row}: unknown participant '{}' in project '{}'",
                    participation.participant_id, participation.project_id
                ));
                continue;
            };

            graph
                .graph
                .add_edge(project_idx, participant_idx, Link::Participation { row });
            stats.participations_linked += 1;
        }

        if !stats.dangling_refs.is_empty() {
            log::debug!(
                "Skipped {} participation rows with dangling references",
                stats.dangling_refs.len()
            );
        }

        (graph, stats)
    }
}

// ============================================================================
// Tests
// ============================================================================
