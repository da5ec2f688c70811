//! Per-site nucleotide diversity and divergence between populations.
//!
//! For a set of aligned pseudoreference FASTAs, one per diploid individual, and an
//! assignment of individuals to populations, this crate computes at every site:
//!
//! - pi for each population (within-population diversity)
//! - D_xy for each population pair (absolute divergence, Nei 1987)
//! - D_a for each population pair (net divergence)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use popdiv_core::models::PopulationMap;
//! use popdiv_dxy::calculate_dxy;
//!
//! let fastas = vec!["pop1_ind1.fa".to_string(), "pop2_ind1.fa".to_string()];
//! let populations = PopulationMap::from_file(Path::new("populations.tsv"), &fastas).unwrap();
//!
//! calculate_dxy(&fastas, &populations, std::io::stdout().lock()).unwrap();
//! ```
pub mod counts;
pub mod engine;
pub mod estimators;
pub mod pipeline;

// re-exports
pub use counts::*;
pub use engine::*;
pub use estimators::*;
pub use pipeline::*;
