//! Typed records read from the external data store.
//!
//! Stores parse and validate their raw rows into these types once, at the
//! loader boundary. Analysis code never sees loosely typed rows.

use crate::ids::{NodeId, ParticipantId, ProjectId};
use crate::money::{AmountError, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Organizational records
// ============================================================================

/// An organizational node of the network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Revenue goal recorded on the node itself, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_goal: Option<Money>,
}

impl Node {
    /// Creates a node without a recorded revenue goal.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            revenue_goal: None,
        }
    }

    /// Sets the node's own revenue goal.
    pub fn with_revenue_goal(mut self, goal: Money) -> Self {
        self.revenue_goal = Some(goal);
        self
    }
}

/// A person affiliated with exactly one node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier.
    pub id: ParticipantId,
    /// Owning node (current affiliation).
    pub node_id: NodeId,
    /// Display name.
    pub name: String,
}

impl Participant {
    /// Creates a participant.
    pub fn new(
        id: impl Into<ParticipantId>,
        node_id: impl Into<NodeId>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            node_id: node_id.into(),
            name: name.into(),
        }
    }
}

/// A unit of work owned by one node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier.
    pub id: ProjectId,
    /// Project title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Owning node.
    pub node_id: NodeId,
}

impl Project {
    /// Creates a project with an empty description.
    pub fn new(
        id: impl Into<ProjectId>,
        node_id: impl Into<NodeId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            node_id: node_id.into(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Join row linking a project to one of its participants.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectParticipation {
    /// The project.
    pub project_id: ProjectId,
    /// The participant.
    pub participant_id: ParticipantId,
}

impl ProjectParticipation {
    /// Creates a participation row.
    pub fn new(project_id: impl Into<ProjectId>, participant_id: impl Into<ParticipantId>) -> Self {
        Self {
            project_id: project_id.into(),
            participant_id: participant_id.into(),
        }
    }
}

// ============================================================================
// Revenue
// ============================================================================

/// Source category of a revenue record.
///
/// The two sources the network tracks are first-class variants; anything
/// else is kept verbatim in `Custom`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RevenueCategory {
    /// Earnings of individual participants (interns, fellows).
    IndividualEarnings,
    /// Income from the node's collective production.
    CollectiveProduction,
    /// Any other category.
    Custom(String),
}

impl RevenueCategory {
    /// Parses a category label.
    ///
    /// Only the canonical labels of the two tracked sources and their long
    /// forms (`individual-earnings`, `collective production`, ...) are
    /// recognized, case-insensitively. Any other label is kept verbatim,
    /// trimmed, so totals stay keyed by the category as stored.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        let normalized = trimmed.to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "intern" | "individual_earnings" => Self::IndividualEarnings,
            "production" | "collective_production" => Self::CollectiveProduction,
            _ => Self::Custom(trimmed.to_string()),
        }
    }

    /// Returns the canonical label.
    pub fn name(&self) -> &str {
        match self {
            Self::IndividualEarnings => "intern",
            Self::CollectiveProduction => "production",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for RevenueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for RevenueCategory {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<RevenueCategory> for String {
    fn from(category: RevenueCategory) -> Self {
        category.name().to_string()
    }
}

/// A validated revenue amount, or the raw value that failed validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum RevenueAmount {
    /// A non-negative amount.
    Valid {
        /// The amount.
        amount: Money,
    },
    /// A value that is missing, negative, or not a number.
    Malformed {
        /// The raw value as stored.
        raw: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl RevenueAmount {
    /// Wraps a known-good amount; negative amounts become `Malformed`.
    pub fn new(amount: Money) -> Self {
        if amount.is_negative() {
            Self::Malformed {
                raw: amount.to_string(),
                reason: "amount is negative".to_string(),
            }
        } else {
            Self::Valid { amount }
        }
    }

    /// Validates a textual amount.
    pub fn parse_text(raw: &str) -> Self {
        match Money::parse_decimal(raw) {
            Ok(amount) if amount.is_negative() => Self::Malformed {
                raw: raw.to_string(),
                reason: "amount is negative".to_string(),
            },
            Ok(amount) => Self::Valid { amount },
            Err(err) => Self::malformed(raw, &err),
        }
    }

    /// Validates a JSON value: a number, a numeric string, or null.
    ///
    /// Numbers follow the same rules as text, so a float with more than two
    /// decimal places is malformed rather than rounded.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(number) => Self::from_json_number(number),
            serde_json::Value::String(text) => Self::parse_text(text),
            serde_json::Value::Null => Self::malformed("null", &AmountError::Missing),
            other => Self::malformed(
                &other.to_string(),
                &AmountError::NotNumeric(other.to_string()),
            ),
        }
    }

    fn from_json_number(number: &serde_json::Number) -> Self {
        let raw = number.to_string();
        if let Some(major) = number.as_i64() {
            return match major.checked_mul(crate::money::MINOR_PER_MAJOR) {
                Some(minor) => Self::new(Money::from_minor(minor)),
                None => Self::malformed(&raw, &AmountError::OutOfRange),
            };
        }
        match Money::parse_decimal(&raw) {
            Ok(amount) => Self::new(amount),
            Err(err @ AmountError::Precision(_)) => Self::malformed(&raw, &err),
            // exponent notation, e.g. 1e21
            Err(_) => match number.as_f64().map(Money::from_major_f64) {
                Some(Ok(amount)) => Self::new(amount),
                Some(Err(err)) => Self::malformed(&raw, &err),
                None => Self::malformed(&raw, &AmountError::OutOfRange),
            },
        }
    }

    /// Returns the amount if valid.
    pub fn valid(&self) -> Option<Money> {
        match self {
            Self::Valid { amount } => Some(*amount),
            Self::Malformed { .. } => None,
        }
    }

    /// Returns `true` if the amount failed validation.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    fn malformed(raw: &str, err: &AmountError) -> Self {
        Self::Malformed {
            raw: raw.to_string(),
            reason: err.to_string(),
        }
    }
}

/// A monetary contribution attributable to a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueRecord {
    /// Node the revenue is attributed to.
    pub node_id: NodeId,
    /// Source category.
    pub category: RevenueCategory,
    /// Validated amount.
    pub amount: RevenueAmount,
}

impl RevenueRecord {
    /// Creates a record with a validated amount.
    pub fn new(node_id: impl Into<NodeId>, category: RevenueCategory, amount: Money) -> Self {
        Self {
            node_id: node_id.into(),
            category,
            amount: RevenueAmount::new(amount),
        }
    }

    /// Creates a record from an already classified amount.
    pub fn with_amount(
        node_id: impl Into<NodeId>,
        category: RevenueCategory,
        amount: RevenueAmount,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            category,
            amount,
        }
    }
}

// ============================================================================
// Supplementary counts
// ============================================================================

/// Counts maintained by other parts of the platform, carried into reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCounts {
    /// Members of the node's governance body.
    #[serde(default, alias = "governance_members")]
    pub governance_members: u64,
    /// Published works.
    #[serde(default)]
    pub publications: u64,
    /// Wiki articles.
    #[serde(default, alias = "wiki_articles")]
    pub wiki_articles: u64,
}
