use std::io::Write;

use log::info;

use popdiv_core::models::{PopulationCount, PopulationMap};
use popdiv_core::{PopDivError, Result};
use popdiv_io::{ScaffoldStream, StatsWriter};

use crate::engine::process_scaffold;

///
/// Totals for a whole run
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scaffolds: usize,
    pub sites: usize,
    pub omitted_sites: usize,
}

///
/// Compute per-site pi, D_xy and D_a over a set of aligned pseudoreference FASTAs.
///
/// Every file is opened before anything is written. The header row is then written,
/// followed by one row per site of every scaffold, as each scaffold is completed.
/// On a fatal error the rows of earlier scaffolds are flushed and kept, and no row
/// of the failing scaffold is written.
///
/// # Arguments
/// - fasta_paths: one pseudoreference FASTA per sample, in sample order
/// - populations: population assignment of each sample, resolved against `fasta_paths`
/// - out: destination of the statistics table
///
pub fn calculate_dxy<S, W>(fasta_paths: &[S], populations: &PopulationMap, out: W) -> Result<RunSummary>
where
    S: AsRef<str>,
    W: Write,
{
    if populations.n_samples() != fasta_paths.len() {
        return Err(PopDivError::SampleCountMismatch {
            expected: populations.n_samples(),
            found: fasta_paths.len(),
        });
    }

    let stream = ScaffoldStream::open(fasta_paths)?;
    info!("Opened {} input FASTA files.", stream.n_sources());

    let mut writer = StatsWriter::new(out, populations.n_populations());
    writer.write_header()?;

    let outcome = write_scaffolds(stream, populations, &mut writer);
    let flushed = writer.flush();
    let summary = outcome?;
    flushed?;

    info!(
        "Processed {} scaffolds: {} sites written, {} omitted for missing data.",
        summary.scaffolds, summary.sites, summary.omitted_sites
    );

    Ok(summary)
}

fn write_scaffolds<W: Write>(
    stream: ScaffoldStream,
    populations: &PopulationMap,
    writer: &mut StatsWriter<W>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for scaffold in stream {
        let scaffold = scaffold?;
        info!(
            "Processing scaffold {} of length {}",
            scaffold.name,
            scaffold.len()
        );

        let scaffold_summary = process_scaffold(&scaffold, populations, writer)?;
        summary.scaffolds += 1;
        summary.sites += scaffold_summary.sites;
        summary.omitted_sites += scaffold_summary.omitted_sites;
    }

    Ok(summary)
}
