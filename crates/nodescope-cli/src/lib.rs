//! # nodescope-cli
//!
//! The `nodescope` command: node analytics, export, and config management.

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;

pub use cli::{Cli, Command, ConfigAction};
pub use config::{NodescopeConfig, StoreKind};
