use std::io::Write;

use log::debug;

use popdiv_core::{PopDivError, Result};
use popdiv_core::models::{
    PairDivergence, PopulationCount, PopulationLookup, Scaffold, SiteEstimate, population_pairs,
};
use popdiv_io::StatsWriter;

use crate::counts::{AlleleCounts, tally_site};
use crate::estimators::{da_hat, dxy_hat, pi_hat};

///
/// Number of rows written for one scaffold
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaffoldSummary {
    pub sites: usize,
    pub omitted_sites: usize,
}

///
/// Computes pi, D_xy and D_a for one site at a time.
///
/// The allele tally is zeroed before every site; nothing carries over between
/// sites or scaffolds.
///
pub(crate) struct SiteEstimator {
    counts: Vec<AlleleCounts>,
}

impl SiteEstimator {
    pub fn new(n_populations: usize) -> Self {
        SiteEstimator {
            counts: vec![AlleleCounts::default(); n_populations],
        }
    }

    ///
    /// Estimate the statistics at one column of the scaffold.
    ///
    /// The site is usable only if every population has at least two non-missing
    /// alleles there; otherwise the result is [`SiteEstimate::Omitted`].
    ///
    pub fn estimate<M: PopulationLookup>(
        &mut self,
        scaffold: &Scaffold,
        site: usize,
        populations: &M,
    ) -> SiteEstimate {
        self.counts.fill(AlleleCounts::default());

        debug!("Counting alleles for site {}.", site + 1);
        tally_site(scaffold, site, populations, &mut self.counts);

        debug!("Estimating allele frequencies for site {}.", site + 1);
        let usable = self.counts.iter().all(|c| c.is_sufficient());
        if !usable {
            return SiteEstimate::Omitted;
        }
        let freqs: Vec<_> = self.counts.iter().map(|c| c.frequencies()).collect();

        debug!("Estimating pi for each population at site {}.", site + 1);
        let pi: Vec<f64> = freqs
            .iter()
            .zip(self.counts.iter())
            .map(|(f, c)| pi_hat(f, c.called))
            .collect();

        debug!("Estimating D_xy and D_a for site {}.", site + 1);
        let divergence = population_pairs(self.counts.len())
            .map(|(p, q)| {
                let dxy = dxy_hat(&freqs[p], &freqs[q]);
                PairDivergence {
                    dxy,
                    da: da_hat(dxy, pi[p], pi[q]),
                }
            })
            .collect();

        SiteEstimate::Usable { pi, divergence }
    }
}

///
/// Estimate every site of a scaffold and write one row per site.
///
/// The scaffold must carry exactly one sequence per sample of `populations`;
/// otherwise nothing is written and `SampleCountMismatch` is returned.
///
/// # Arguments
/// - scaffold: the assembled scaffold, one sequence per sample
/// - populations: sample to population assignment
/// - writer: destination of the rows
///
pub fn process_scaffold<M, W>(
    scaffold: &Scaffold,
    populations: &M,
    writer: &mut StatsWriter<W>,
) -> Result<ScaffoldSummary>
where
    M: PopulationLookup + PopulationCount,
    W: Write,
{
    if scaffold.n_samples() != populations.n_samples() {
        return Err(PopDivError::SampleCountMismatch {
            expected: populations.n_samples(),
            found: scaffold.n_samples(),
        });
    }

    let mut estimator = SiteEstimator::new(populations.n_populations());
    let mut summary = ScaffoldSummary::default();

    for site in 0..scaffold.len() {
        let estimate = estimator.estimate(scaffold, site, populations);
        if !estimate.is_usable() {
            summary.omitted_sites += 1;
        }

        writer.write_site(&scaffold.name, site + 1, &estimate)?;
        summary.sites += 1;
    }

    Ok(summary)
}
