//! Integration test suite for Nodescope.
//!
//! Runs the engine end to end against memory, failing, counting, and
//! file-backed stores.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
mod integration;
