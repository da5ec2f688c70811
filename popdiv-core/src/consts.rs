/// First byte of a FASTA header line
pub const HEADER_MARKER: u8 = b'>';

/// A, C, G, T
pub const NUM_BASES: usize = 4;

/// Alleles contributed by one diploid call
pub const ALLELES_PER_CALL: u32 = 2;
