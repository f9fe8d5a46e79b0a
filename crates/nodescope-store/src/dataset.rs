//! In-memory datasets and the raw rows they are parsed from.
//!
//! A [`Dataset`] holds validated records and answers the batch queries of
//! [`RelationshipStore`](crate::RelationshipStore) by filtering in store
//! order. [`RawDataset`] is the loosely typed document form; converting it
//! is where row validation happens.

use nodescope_core::{
    Money, Node, NodeCounts, NodeId, Participant, ParticipantId, Project, ProjectId,
    ProjectParticipation, RevenueAmount, RevenueCategory, RevenueRecord,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};

// ============================================================================
// Dataset
// ============================================================================

/// Validated records of every kind the loader reads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    /// Organizational nodes.
    pub nodes: Vec<Node>,
    /// Participants.
    pub participants: Vec<Participant>,
    /// Projects.
    pub projects: Vec<Project>,
    /// Project participation join rows.
    pub participations: Vec<ProjectParticipation>,
    /// Revenue records.
    pub revenue: Vec<RevenueRecord>,
    /// Supplementary counts by node.
    pub counts: HashMap<NodeId, NodeCounts>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Adds a participant.
    pub fn with_participant(mut self, participant: Participant) -> Self {
        self.participants.push(participant);
        self
    }

    /// Adds a project.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Adds a participation row.
    pub fn with_participation(mut self, participation: ProjectParticipation) -> Self {
        self.participations.push(participation);
        self
    }

    /// Adds a revenue record.
    pub fn with_revenue(mut self, record: RevenueRecord) -> Self {
        self.revenue.push(record);
        self
    }

    /// Sets the supplementary counts for a node.
    pub fn with_counts(mut self, node_id: impl Into<NodeId>, counts: NodeCounts) -> Self {
        self.counts.insert(node_id.into(), counts);
        self
    }

    /// Projects owned by `node_id`.
    pub fn projects_for_node(&self, node_id: &NodeId) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|p| &p.node_id == node_id)
            .cloned()
            .collect()
    }

    /// Participation rows for any of `project_ids`.
    pub fn participations_for_projects(
        &self,
        project_ids: &[ProjectId],
    ) -> Vec<ProjectParticipation> {
        let wanted: HashSet<&ProjectId> = project_ids.iter().collect();
        self.participations
            .iter()
            .filter(|pp| wanted.contains(&pp.project_id))
            .cloned()
            .collect()
    }

    /// Participants with any of `ids`.
    pub fn participants_by_ids(&self, ids: &[ParticipantId]) -> Vec<Participant> {
        let wanted: HashSet<&ParticipantId> = ids.iter().collect();
        self.participants
            .iter()
            .filter(|p| wanted.contains(&p.id))
            .cloned()
            .collect()
    }

    /// Nodes with any of `ids`.
    pub fn nodes_by_ids(&self, ids: &[NodeId]) -> Vec<Node> {
        let wanted: HashSet<&NodeId> = ids.iter().collect();
        self.nodes
            .iter()
            .filter(|n| wanted.contains(&n.id))
            .cloned()
            .collect()
    }

    /// Revenue attributed to `node_id`.
    pub fn revenue_for_node(&self, node_id: &NodeId) -> Vec<RevenueRecord> {
        self.revenue
            .iter()
            .filter(|r| &r.node_id == node_id)
            .cloned()
            .collect()
    }

    /// Supplementary counts for `node_id`.
    pub fn counts_for_node(&self, node_id: &NodeId) -> Option<NodeCounts> {
        self.counts.get(node_id).copied()
    }
}

// ============================================================================
// Raw rows
// ============================================================================

/// A node row as stored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawNode {
    /// Node id.
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Revenue goal, as a number or numeric string.
    #[serde(default, alias = "revenueGoal", alias = "goal")]
    pub revenue_goal: serde_json::Value,
}

/// A participant row as stored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawParticipant {
    /// Participant id.
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: String,
    /// Owning node id.
    #[serde(default, alias = "nodeId", deserialize_with = "opaque_id")]
    pub node_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// A project row as stored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawProject {
    /// Project id.
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: String,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Owning node id.
    #[serde(default, alias = "nodeId", deserialize_with = "opaque_id")]
    pub node_id: String,
}

/// A participation join row as stored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawParticipation {
    /// Project id.
    #[serde(default, alias = "projectId", deserialize_with = "opaque_id")]
    pub project_id: String,
    /// Participant id.
    #[serde(default, alias = "participantId", deserialize_with = "opaque_id")]
    pub participant_id: String,
}

/// A revenue row as stored. The amount may be a number, a string, or absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawRevenue {
    /// Node id.
    #[serde(default, alias = "nodeId", deserialize_with = "opaque_id")]
    pub node_id: String,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Amount in major units.
    #[serde(default)]
    pub amount: serde_json::Value,
}

/// A supplementary-counts row as stored. Counts may be numbers, numeric
/// strings, or absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawCounts {
    /// Node id.
    #[serde(default, alias = "nodeId", deserialize_with = "opaque_id")]
    pub node_id: String,
    /// Governance body members.
    #[serde(default, alias = "governanceMembers")]
    pub governance_members: serde_json::Value,
    /// Publications.
    #[serde(default)]
    pub publications: serde_json::Value,
    /// Wiki articles.
    #[serde(default, alias = "wikiArticles")]
    pub wiki_articles: serde_json::Value,
}

/// The dataset document: one array per record kind.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawDataset {
    /// Node rows.
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    /// Participant rows.
    #[serde(default)]
    pub participants: Vec<RawParticipant>,
    /// Project rows.
    #[serde(default)]
    pub projects: Vec<RawProject>,
    /// Participation rows.
    #[serde(default, alias = "project_participants", alias = "projectParticipants")]
    pub participations: Vec<RawParticipation>,
    /// Revenue rows.
    #[serde(default)]
    pub revenue: Vec<RawRevenue>,
    /// Count rows.
    #[serde(default)]
    pub counts: Vec<RawCounts>,
}

// ============================================================================
// Validation
// ============================================================================

/// Reads an id stored as either a string or a number.
///
/// Anything else is read as blank, so the row is dropped during validation
/// instead of failing the whole document.
fn opaque_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(text)) => text,
        Some(serde_json::Value::Number(number)) => number.to_string(),
        Some(other) => {
            log::warn!("Ignoring id {other}: expected a string or a number");
            String::new()
        }
    })
}

fn present(kind: &str, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        log::warn!("Dropping {kind} row with blank {field}");
        return false;
    }
    true
}

/// Parses an optional goal value; anything unusable is treated as absent.
pub(crate) fn parse_goal(node_id: &str, value: &serde_json::Value) -> Option<Money> {
    let parsed = match value {
        serde_json::Value::Null => return None,
        serde_json::Value::String(text) if text.trim().is_empty() => return None,
        serde_json::Value::String(text) => Money::parse_decimal(text).ok(),
        serde_json::Value::Number(number) => number
            .as_f64()
            .and_then(|major| Money::from_major_f64(major).ok()),
        _ => None,
    };
    if parsed.is_none() {
        log::warn!("Ignoring unusable revenue goal {value} on node '{node_id}'");
    }
    parsed
}

/// Parses a count; absent or blank means zero.
fn parse_count(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Null => Some(0),
        serde_json::Value::String(text) if text.trim().is_empty() => Some(0),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        serde_json::Value::Number(number) => number.as_u64(),
        _ => None,
    }
}

impl RawNode {
    pub(crate) fn into_record(self) -> Option<Node> {
        if !present("node", "id", &self.id) {
            return None;
        }
        let goal = parse_goal(&self.id, &self.revenue_goal);
        Some(Node {
            id: NodeId::new(self.id),
            name: self.name,
            revenue_goal: goal,
        })
    }
}

impl RawParticipant {
    pub(crate) fn into_record(self) -> Option<Participant> {
        if !present("participant", "id", &self.id) || !present("participant", "node_id", &self.node_id)
        {
            return None;
        }
        Some(Participant::new(self.id, self.node_id, self.name))
    }
}

impl RawProject {
    pub(crate) fn into_record(self) -> Option<Project> {
        if !present("project", "id", &self.id) || !present("project", "node_id", &self.node_id) {
            return None;
        }
        Some(Project::new(self.id, self.node_id, self.title).with_description(self.description))
    }
}

impl RawParticipation {
    pub(crate) fn into_record(self) -> Option<ProjectParticipation> {
        if !present("participation", "project_id", &self.project_id)
            || !present("participation", "participant_id", &self.participant_id)
        {
            return None;
        }
        Some(ProjectParticipation::new(self.project_id, self.participant_id))
    }
}

impl RawRevenue {
    pub(crate) fn into_record(self) -> Option<RevenueRecord> {
        if !present("revenue", "node_id", &self.node_id) {
            return None;
        }
        let amount = RevenueAmount::from_json(&self.amount);
        Some(RevenueRecord::with_amount(
            self.node_id,
            RevenueCategory::parse(&self.category),
            amount,
        ))
    }
}

impl RawCounts {
    pub(crate) fn into_entry(self) -> Option<(NodeId, NodeCounts)> {
        if !present("counts", "node_id", &self.node_id) {
            return None;
        }
        let fields = [
            ("governance_members", &self.governance_members),
            ("publications", &self.publications),
            ("wiki_articles", &self.wiki_articles),
        ];
        let mut parsed = [0u64; 3];
        for (slot, (field, value)) in parsed.iter_mut().zip(fields) {
            let Some(count) = parse_count(value) else {
                log::warn!(
                    "Dropping counts row for node '{}': {field} {value} is not a count",
                    self.node_id
                );
                return None;
            };
            *slot = count;
        }
        let [governance_members, publications, wiki_articles] = parsed;
        Some((
            NodeId::new(self.node_id),
            NodeCounts {
                governance_members,
                publications,
                wiki_articles,
            },
        ))
    }
}

impl From<RawDataset> for Dataset {
    fn from(raw: RawDataset) -> Self {
        Dataset {
            nodes: raw
                .nodes
                .into_iter()
                .filter_map(RawNode::into_record)
                .collect(),
            participants: raw
                .participants
                .into_iter()
                .filter_map(RawParticipant::into_record)
                .collect(),
            projects: raw
                .projects
                .into_iter()
                .filter_map(RawProject::into_record)
                .collect(),
            participations: raw
                .participations
                .into_iter()
                .filter_map(RawParticipation::into_record)
                .collect(),
            revenue: raw
                .revenue
                .into_iter()
                .filter_map(RawRevenue::into_record)
                .collect(),
            counts: raw
                .counts
                .into_iter()
                .filter_map(RawCounts::into_entry)
                .collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
