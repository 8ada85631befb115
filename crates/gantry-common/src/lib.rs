//! # gantry-common
//!
//! Shared types, error definitions, warning collection, and constants
//! used across the Gantry workspace.
//!
//! This crate is the leaf of the dependency graph — it depends on no other
//! internal crate and provides the foundational primitives that the
//! capability-probing and preflight-validation crates build upon.

pub mod constants;
pub mod error;
pub mod types;
pub mod warnings;
