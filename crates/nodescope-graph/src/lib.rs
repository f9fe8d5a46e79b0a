//! Collaboration graph for Nodescope.
//!
//! # Modules
//!
//! - [`types`]: Graph vertices, links, and the `CollaborationGraph` wrapper
//! - [`builder`]: `CollaborationGraphBuilder` and `BuildStats`
//! - [`analysis`]: Cross-node projects and partner tallies

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod builder;
pub mod types;

pub use analysis::{
    CollaborationResult, CrossNodeProject, PartnerTally, collaboration, partner_tallies,
};
pub use builder::{BuildStats, CollaborationGraphBuilder};
pub use types::{CollaborationGraph, Link, UNKNOWN_NODE, Vertex};
