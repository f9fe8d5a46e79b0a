//! Nodescope: collaboration and productivity analytics for network nodes.
//!
//! This umbrella crate wires the loader, the collaboration graph, and the
//! productivity scorer into one engine, and re-exports the types callers
//! need.
//!
//! # Modules
//!
//! - [`engine`]: `AnalyticsEngine`, one computation per focal node
//! - [`report`]: `NodeAnalytics` and `NodeReport` assembly
//! - [`export`]: `ExportRecord` and the JSON writers

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod engine;
pub mod export;
pub mod report;

pub use engine::AnalyticsEngine;
pub use export::{ExportRecord, write_json, write_json_lines};
pub use report::{NodeAnalytics, NodeReport};

pub use nodescope_core::{
    Error, Money, Node, NodeCounts, NodeId, Participant, ParticipantId, Project, ProjectId,
    ProjectParticipation, Result, RevenueAmount, RevenueCategory, RevenueRecord,
};
pub use nodescope_graph::{
    BuildStats, CollaborationResult, CrossNodeProject, PartnerTally, UNKNOWN_NODE,
};
pub use nodescope_score::{DEFAULT_GOAL, FlaggedRevenue, GoalBook, ProductivityResult};
pub use nodescope_store::{
    CsvDirectoryStore, Dataset, JsonFileStore, MemoryStore, NodeRelations, RelationshipStore,
};
