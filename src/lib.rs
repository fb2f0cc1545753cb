//! Backward subsumption and self-subsuming resolution for CDCL SAT
//! solvers, over a clause arena with per-literal occurrence lists.
#[macro_use]
extern crate bitflags;
/// Root level assignments
pub mod assign;
/// Clause arena and occurrence lists
pub mod cdb;
/// Configuration
pub mod config;
/// The subsumption and strengthening engine
pub mod processor;
/// Plumbing layer.
pub mod types;
