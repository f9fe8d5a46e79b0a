//! Productivity scoring for Nodescope.
//!
//! # Modules
//!
//! - [`scorer`]: Category totals and the bounded goal percentage
//! - [`goals`]: Per-node goal resolution

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod goals;
pub mod scorer;

pub use goals::{DEFAULT_GOAL, GoalBook};
pub use scorer::{FlaggedRevenue, ProductivityResult, ProductivityScorer, score};
