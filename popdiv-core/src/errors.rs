use std::io;

use thiserror::Error;

/// Broad class of a fatal condition. Every class aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The population file is unreadable or does not resolve to a valid map.
    Config,
    /// A sequence file could not be opened.
    Open,
    /// The sequence files are not synchronized.
    Sync,
    /// A sequence file failed mid-stream.
    Read,
    /// The statistics table could not be written.
    Output,
}

#[derive(Error, Debug)]
pub enum PopDivError {
    #[error("Error opening population TSV file {path}: {source}")]
    PopulationFileOpen { path: String, source: io::Error },

    #[error("Error reading population TSV file {path} at line {line}: {source}")]
    PopulationFileRead {
        path: String,
        line: usize,
        source: io::Error,
    },

    #[error("Invalid population TSV line {line}: {reason}")]
    PopulationLine { line: usize, reason: String },

    #[error("Sequence file {path} (sample {index}) has no population assignment")]
    UnassignedSample { index: usize, path: String },

    #[error("At least 2 populations are required, found {0}")]
    TooFewPopulations(usize),

    #[error("Population map covers {expected} samples but {found} sequence files were supplied")]
    SampleCountMismatch { expected: usize, found: usize },

    #[error("Error opening input FASTA {path}: {source}")]
    Open { path: String, source: io::Error },

    #[error("Error reading input FASTA {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("FASTAs are not synchronized, headers differ: {first} vs {other}")]
    HeaderMismatch { first: String, other: String },

    #[error("FASTAs are not synchronized, or not wrapped at the same length (line {line})")]
    MixedLineSet { line: usize },

    #[error("FASTAs are not synchronized, {path} ended at line {line} before the other inputs")]
    UnevenEof { path: String, line: usize },

    #[error("Sequence data found before the first header line (line {line})")]
    SequenceBeforeHeader { line: usize },

    #[error(
        "Sequences for scaffold {scaffold} differ in length: {first_len} in {first_path} but {other_len} in {other_path}"
    )]
    SequenceLengthMismatch {
        scaffold: String,
        first_path: String,
        first_len: usize,
        other_path: String,
        other_len: usize,
    },

    #[error("Failed to write statistics table: {0}")]
    Output(#[from] io::Error),
}

impl PopDivError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PopDivError::PopulationFileOpen { .. }
            | PopDivError::PopulationFileRead { .. }
            | PopDivError::PopulationLine { .. }
            | PopDivError::UnassignedSample { .. }
            | PopDivError::TooFewPopulations(_)
            | PopDivError::SampleCountMismatch { .. } => FailureKind::Config,
            PopDivError::Open { .. } => FailureKind::Open,
            PopDivError::Read { .. } => FailureKind::Read,
            PopDivError::HeaderMismatch { .. }
            | PopDivError::MixedLineSet { .. }
            | PopDivError::UnevenEof { .. }
            | PopDivError::SequenceBeforeHeader { .. }
            | PopDivError::SequenceLengthMismatch { .. } => FailureKind::Sync,
            PopDivError::Output(_) => FailureKind::Output,
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            PopDivError::Open { .. } => 2,
            PopDivError::HeaderMismatch { .. } => 3,
            PopDivError::Read { .. } => 5,
            PopDivError::Output(_) => 6,
            _ => match self.kind() {
                FailureKind::Config => 9,
                _ => 4,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, PopDivError>;
