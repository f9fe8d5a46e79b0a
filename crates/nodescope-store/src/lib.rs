//! Nodescope Store: relationship loading and data-store adapters.
//!
//! # Modules
//!
//! - [`traits`]: The [`RelationshipStore`] batch-query seam
//! - [`loader`]: [`RelationshipLoader`] and the [`NodeRelations`] snapshot
//! - [`dataset`]: Validated in-memory datasets and raw row types
//! - [`memory`], [`json`], [`csv_dir`]: Bundled store implementations

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod csv_dir;
pub mod dataset;
pub mod json;
pub mod loader;
pub mod memory;
pub mod traits;

pub use csv_dir::CsvDirectoryStore;
pub use dataset::{Dataset, RawDataset};
pub use json::JsonFileStore;
pub use loader::{NodeRelations, RelationshipLoader};
pub use memory::MemoryStore;
pub use traits::RelationshipStore;
