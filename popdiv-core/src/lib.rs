//! # Core models for popdiv
//!
//! Shared types for computing per-site nucleotide diversity and divergence across
//! populations of aligned pseudoreference genomes: the error taxonomy, the resolved
//! sample-to-population map, the per-scaffold sequence model and per-site results.
//!
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::{FailureKind, PopDivError, Result};
