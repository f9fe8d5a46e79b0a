//! Productivity scoring.

use crate::goals::GoalBook;
use nodescope_core::{Money, Node, NodeId, RevenueAmount, RevenueRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// A revenue record whose amount could not be used.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedRevenue {
    /// Position of the record in the input.
    pub index: usize,
    /// The record's category label.
    pub category: String,
    /// The raw amount as stored.
    pub raw: String,
    /// Why the amount was rejected.
    pub reason: String,
}

/// Revenue totals of one node against its goal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityResult {
    /// Sum per category label.
    pub category_totals: BTreeMap<String, Money>,
    /// Sum of all category totals.
    pub total: Money,
    /// The goal the total is measured against.
    pub goal: Money,
    /// `min(100, floor(total / goal * 100))`, or `0` when `goal <= 0`.
    pub percentage: u8,
    /// Records that contributed nothing because their amount was malformed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flagged: Vec<FlaggedRevenue>,
}

impl ProductivityResult {
    /// A result with no revenue against `goal`.
    pub fn empty(goal: Money) -> Self {
        Self {
            category_totals: BTreeMap::new(),
            total: Money::ZERO,
            goal,
            percentage: 0,
            flagged: Vec::new(),
        }
    }

    /// Returns `true` if the total reached a positive goal.
    pub fn goal_reached(&self) -> bool {
        self.goal.is_positive() && self.total >= self.goal
    }
}

/// Scores `records` against `goal`.
///
/// Every category seen appears in `category_totals`, even when all of its
/// records were malformed.
///
/// ```
/// use nodescope_core::{Money, RevenueCategory, RevenueRecord};
/// use nodescope_score::score;
///
/// let records = vec![
///     RevenueRecord::new("n1", RevenueCategory::IndividualEarnings, Money::from_major(3_000)),
///     RevenueRecord::new("n1", RevenueCategory::CollectiveProduction, Money::from_major(2_000)),
/// ];
/// let result = score(&records, Money::from_major(10_000));
/// assert_eq!(result.total, Money::from_major(5_000));
/// assert_eq!(result.percentage, 50);
/// ```
pub fn score(records: &[RevenueRecord], goal: Money) -> ProductivityResult {
    let mut result = ProductivityResult::empty(goal);

    for (index, record) in records.iter().enumerate() {
        let label = record.category.name();
        let entry = result
            .category_totals
            .entry(label.to_string())
            .or_insert(Money::ZERO);

        match &record.amount {
            RevenueAmount::Valid { amount } => {
                *entry = entry.saturating_add(*amount);
            }
            RevenueAmount::Malformed { raw, reason } => {
                log::warn!(
                    "Ignoring malformed '{label}' revenue for node '{}': {raw:?} ({reason})",
                    record.node_id
                );
                result.flagged.push(FlaggedRevenue {
                    index,
                    category: label.to_string(),
                    raw: raw.clone(),
                    reason: reason.clone(),
                });
            }
        }
    }

    result.total = result.category_totals.values().sum();
    result.percentage = result.total.percentage_of(goal);
    result
}

/// Scores nodes against goals from a [`GoalBook`].
#[derive(Clone, Debug, Default)]
pub struct ProductivityScorer {
    goals: GoalBook,
}

impl ProductivityScorer {
    /// Creates a scorer using `goals`.
    pub fn new(goals: GoalBook) -> Self {
        Self { goals }
    }

    /// The goal book.
    pub fn goals(&self) -> &GoalBook {
        &self.goals
    }

    /// Scores one node's revenue.
    pub fn score_node(
        &self,
        node_id: &NodeId,
        node: Option<&Node>,
        records: &[RevenueRecord],
    ) -> ProductivityResult {
        let goal = self.goals.goal_for(node_id, node);
        let result = score(records, goal);
        log::debug!(
            "Node '{node_id}': revenue {} of goal {} ({}%)",
            result.total,
            result.goal,
            result.percentage
        );
        result
    }
}

// ============================================================================
// Tests
// ============================================================================
