//! Revenue goal resolution.

use nodescope_core::{Money, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Goal used when nothing more specific is configured, in whole currency units.
pub const DEFAULT_GOAL: Money = Money::from_major(50_000);

fn default_goal() -> Money {
    DEFAULT_GOAL
}

/// Per-node revenue goals.
///
/// Resolution order for a node:
///
/// 1. the node record's own `revenue_goal`
/// 2. the entry in `nodes`
/// 3. `default`
///
/// Deserializes from the `[goals]` configuration table:
///
/// ```toml
/// [goals]
/// default = 50000
///
/// [goals.nodes]
/// n1 = 10000
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalBook {
    /// Goal for nodes without a specific one.
    #[serde(default = "default_goal")]
    pub default: Money,
    /// Configured goals by node id.
    #[serde(default)]
    pub nodes: BTreeMap<NodeId, Money>,
}

impl Default for GoalBook {
    fn default() -> Self {
        Self {
            default: DEFAULT_GOAL,
            nodes: BTreeMap::new(),
        }
    }
}

impl GoalBook {
    /// Creates a book with the default goal and no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default goal.
    pub fn with_default(mut self, goal: Money) -> Self {
        self.default = goal;
        self
    }

    /// Sets a configured goal for one node.
    pub fn with_node_goal(mut self, node_id: impl Into<NodeId>, goal: Money) -> Self {
        self.nodes.insert(node_id.into(), goal);
        self
    }

    /// Resolves the goal for `node_id`.
    ///
    /// `node` is the node's record if the store has one.
    pub fn goal_for(&self, node_id: &NodeId, node: Option<&Node>) -> Money {
        node.and_then(|n| n.revenue_goal)
            .or_else(|| self.nodes.get(node_id).copied())
            .unwrap_or(self.default)
    }
}
