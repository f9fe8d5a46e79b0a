//! Nodescope Core: shared records, identifiers, money, and errors.
//!
//! This crate provides the foundational types used across all Nodescope
//! crates. It has no internal Nodescope dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`ids`]: Opaque identifier newtypes
//! - [`money`]: Exact minor-unit currency amounts
//! - [`records`]: Records read from the external data store

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod error;
pub mod ids;
pub mod money;
pub mod records;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use ids::{NodeId, ParticipantId, ProjectId};
pub use money::{AmountError, Money};
pub use records::{
    Node, NodeCounts, Participant, Project, ProjectParticipation, RevenueAmount, RevenueCategory,
    RevenueRecord,
};
