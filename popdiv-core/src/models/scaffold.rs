use std::fmt::{self, Display};

///
/// One individual's nucleotide sequence for the current scaffold.
///
pub type SampleSequence = Vec<u8>;

///
/// Scaffold struct, one aligned region replicated across every input FASTA.
///
/// `sequences[i]` belongs to sample `i`; all of them have the same length and
/// column `j` of each sequence is the same aligned site.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    pub name: String,
    pub sequences: Vec<SampleSequence>,
}

impl Scaffold {
    ///
    /// Number of aligned sites (columns) in the scaffold
    ///
    pub fn len(&self) -> usize {
        self.sequences.first().map_or(0, |s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn n_samples(&self) -> usize {
        self.sequences.len()
    }

    ///
    /// Iterate over the calls of every sample at one column
    ///
    pub fn column(&self, site: usize) -> impl Iterator<Item = u8> + '_ {
        self.sequences.iter().map(move |s| s[site])
    }

    ///
    /// Index of the first sequence whose length differs from sample 0, if any
    ///
    pub fn first_length_mismatch(&self) -> Option<usize> {
        let expected = self.len();
        self.sequences.iter().position(|s| s.len() != expected)
    }
}

impl Display for Scaffold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} sites, {} samples)", self.name, self.len(), self.n_samples())
    }
}
