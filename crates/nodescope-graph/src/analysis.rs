//! Cross-node collaboration analysis.
//!
//! Walks the graph project by project. For every project the distinct nodes
//! of its participants are gathered in first-encounter order, together with
//! one participant name per participation row. A project is cross-node when
//! more than one node took part.

use crate::types::{CollaborationGraph, Vertex};
use nodescope_core::{NodeId, Project, ProjectId};
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::HashMap;

// ============================================================================
// Result types
// ============================================================================

/// A project whose participants come from more than one node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossNodeProject {
    /// Project id.
    pub project_id: ProjectId,
    /// Project title.
    pub title: String,
    /// Project description.
    pub description: String,
    /// Names of the participating nodes, first encounter first.
    pub node_names: Vec<String>,
    /// Number of distinct participating nodes (always at least 2).
    pub node_count: usize,
    /// One participant name per participation row.
    pub participant_names: Vec<String>,
}

/// Cross-node projects of one focal node.
///
/// `count` always equals the number of listed projects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CollaborationResult {
    count: usize,
    projects: Vec<CrossNodeProject>,
}

impl CollaborationResult {
    /// Creates a result from the cross-node projects.
    pub fn new(projects: Vec<CrossNodeProject>) -> Self {
        Self {
            count: projects.len(),
            projects,
        }
    }

    /// Number of cross-node projects.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The cross-node projects, in project-list order.
    pub fn projects(&self) -> &[CrossNodeProject] {
        &self.projects
    }

    /// Consumes the result, returning the projects.
    pub fn into_projects(self) -> Vec<CrossNodeProject> {
        self.projects
    }
}

/// A node sharing cross-node projects with the focal node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerTally {
    /// Partner node id.
    pub node_id: NodeId,
    /// Partner node name, or "Unknown Node".
    pub node_name: String,
    /// Number of cross-node projects shared with the focal node.
    pub shared_projects: usize,
}

// ============================================================================
// Project profiles
// ============================================================================

/// What one project's participation rows add up to.
#[derive(Clone, Debug)]
struct ProjectProfile<'g> {
    project: &'g Project,
    nodes: Vec<NodeIndex>,
    participant_names: Vec<String>,
}

impl ProjectProfile<'_> {
    fn is_cross_node(&self) -> bool {
        self.nodes.len() > 1
    }
}

fn profile<'g>(graph: &'g CollaborationGraph, project: &'g Project) -> Option<ProjectProfile<'g>> {
    let idx = graph.project_index(&project.id)?;
    let participants = graph.project_participants(idx);
    if participants.is_empty() {
        return None;
    }

    let mut nodes: Vec<NodeIndex> = Vec::new();
    let mut participant_names = Vec::with_capacity(participants.len());
    for participant in participants {
        participant_names.push(graph.graph[participant].label().to_string());
        if let Some(node) = graph.affiliation(participant)
            && !nodes.contains(&node)
        {
            nodes.push(node);
        }
    }

    Some(ProjectProfile {
        project,
        nodes,
        participant_names,
    })
}

fn cross_node_profiles(graph: &CollaborationGraph) -> impl Iterator<Item = ProjectProfile<'_>> {
    graph
        .projects()
        .filter_map(|project| profile(graph, project))
        .filter(ProjectProfile::is_cross_node)
}

// ============================================================================
// Algorithms
// ============================================================================

/// Finds the cross-node projects of the graph.
///
/// Projects without participation rows, and projects whose participants all
/// belong to one node, are left out.
///
/// # Example
///
/// ```
/// use nodescope_core::{Node, Participant, Project, ProjectParticipation};
/// use nodescope_graph::{CollaborationGraphBuilder, collaboration};
///
/// let nodes = vec![Node::new("n1", "North"), Node::new("n2", "South")];
/// let participants = vec![
///     Participant::new("u1", "n1", "Ada"),
///     Participant::new("u2", "n2", "Grace"),
/// ];
/// let projects = vec![Project::new("p1", "n1", "Mural")];
/// let rows = vec![
///     ProjectParticipation::new("p1", "u1"),
///     ProjectParticipation::new("p1", "u2"),
/// ];
///
/// let (graph, _stats) = CollaborationGraphBuilder::new()
///     .with_nodes(&nodes)
///     .with_participants(&participants)
///     .with_projects(&projects)
///     .with_participations(&rows)
///     .build();
///
/// let result = collaboration(&graph);
/// assert_eq!(result.count(), 1);
/// assert_eq!(result.projects()[0].node_names, vec!["North", "South"]);
/// ```
pub fn collaboration(graph: &CollaborationGraph) -> CollaborationResult {
    let projects: Vec<CrossNodeProject> = cross_node_profiles(graph)
        .map(|profile| CrossNodeProject {
            project_id: profile.project.id.clone(),
            title: profile.project.title.clone(),
            description: profile.project.description.clone(),
            node_names: profile
                .nodes
                .iter()
                .map(|&idx| graph.graph[idx].label().to_string())
                .collect(),
            node_count: profile.nodes.len(),
            participant_names: profile.participant_names,
        })
        .collect();

    log::debug!(
        "{} of {} projects are cross-node",
        projects.len(),
        graph.project_count()
    );

    CollaborationResult::new(projects)
}

/// Counts, per partner node, the cross-node projects shared with `focal`.
///
/// Every node other than `focal` that appears in a cross-node project is a
/// partner. Sorted by shared project count (descending), then name, then id.
pub fn partner_tallies(graph: &CollaborationGraph, focal: &NodeId) -> Vec<PartnerTally> {
    let focal_idx = graph.node_index(focal);
    let mut shared: HashMap<NodeIndex, usize> = HashMap::new();

    for profile in cross_node_profiles(graph) {
        for &node in &profile.nodes {
            if Some(node) != focal_idx {
                *shared.entry(node).or_insert(0) += 1;
            }
        }
    }

    let mut tallies: Vec<PartnerTally> = shared
        .into_iter()
        .filter_map(|(idx, shared_projects)| {
            let vertex = &graph.graph[idx];
            let node_id = match vertex {
                Vertex::Node(n) => n.id.clone(),
                Vertex::UnresolvedNode(id) => id.clone(),
                _ => return None,
            };
            Some(PartnerTally {
                node_id,
                node_name: vertex.label().to_string(),
                shared_projects,
            })
        })
        .collect();

    tallies.sort_by(|a, b| {
        b.shared_projects
            .cmp(&a.shared_projects)
            .then_with(|| a.node_name.cmp(&b.node_name))
            .then_with(|| a.node_id.cmp(&b.node_id))
    });
    tallies
}

// ============================================================================
// Tests
// ============================================================================
