//! # Input/Output for popdiv
//!
//! Streams a set of aligned pseudoreference FASTA files in lock-step, one line from
//! every file at a time, and assembles them into one synchronized scaffold at a time.
//! Also writes the per-site statistics table.
//!
pub mod assembler;
pub mod format;
pub mod multiplexer;
pub mod stream;
pub mod writer;

// re-expose core functions
pub use assembler::*;
pub use format::*;
pub use multiplexer::*;
pub use stream::*;
pub use writer::*;
