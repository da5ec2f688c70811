use popdiv_core::consts::{ALLELES_PER_CALL, NUM_BASES};
use popdiv_core::models::{PopulationLookup, Scaffold};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

///
/// A diploid genotype call decoded from one pseudoreference character.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Homozygous(Base),
    Heterozygous(Base, Base),
    /// `N`, `-`, and any character that is not a recognized code
    Missing,
}

impl Call {
    ///
    /// Decode an IUPAC code, case-insensitively.
    ///
    /// Only the four bases and the six two-base ambiguity codes are calls; three-base
    /// codes and anything else unrecognized are treated exactly like `N`.
    ///
    pub fn from_iupac(code: u8) -> Self {
        match code.to_ascii_uppercase() {
            b'A' => Call::Homozygous(Base::A),
            b'C' => Call::Homozygous(Base::C),
            b'G' => Call::Homozygous(Base::G),
            b'T' => Call::Homozygous(Base::T),
            b'K' => Call::Heterozygous(Base::G, Base::T),
            b'M' => Call::Heterozygous(Base::A, Base::C),
            b'R' => Call::Heterozygous(Base::A, Base::G),
            b'S' => Call::Heterozygous(Base::C, Base::G),
            b'W' => Call::Heterozygous(Base::A, Base::T),
            b'Y' => Call::Heterozygous(Base::C, Base::T),
            _ => Call::Missing,
        }
    }
}

///
/// Allele counts of one population at one site.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlleleCounts {
    /// A, C, G, T
    pub bases: [u32; NUM_BASES],
    /// Alleles lost to `N`, gaps and unrecognized characters
    pub missing: u32,
    /// Total non-missing alleles
    pub called: u32,
}

impl AlleleCounts {
    pub fn add_call(&mut self, call: Call) {
        match call {
            Call::Homozygous(base) => {
                self.bases[base as usize] += ALLELES_PER_CALL;
                self.called += ALLELES_PER_CALL;
            }
            Call::Heterozygous(first, second) => {
                self.bases[first as usize] += 1;
                self.bases[second as usize] += 1;
                self.called += ALLELES_PER_CALL;
            }
            Call::Missing => {
                self.missing += ALLELES_PER_CALL;
            }
        }
    }

    ///
    /// Estimated frequency of each base. All zero when no allele was called.
    ///
    pub fn frequencies(&self) -> [f64; NUM_BASES] {
        let mut freqs = [0.0; NUM_BASES];
        if self.called == 0 {
            return freqs;
        }

        for (freq, count) in freqs.iter_mut().zip(self.bases.iter()) {
            *freq = *count as f64 / self.called as f64;
        }
        freqs
    }

    ///
    /// At least one complete diploid call, enough for the estimators to be defined
    ///
    pub fn is_sufficient(&self) -> bool {
        self.called >= ALLELES_PER_CALL
    }
}

///
/// Tally every sample's call at `site` into its population's counts.
///
/// `counts` must hold one zeroed entry per population.
///
pub(crate) fn tally_site<M: PopulationLookup>(
    scaffold: &Scaffold,
    site: usize,
    populations: &M,
    counts: &mut [AlleleCounts],
) {
    for (sample, code) in scaffold.column(site).enumerate() {
        let population = populations.population_of_sample(sample);
        counts[population].add_call(Call::from_iupac(code));
    }
}
