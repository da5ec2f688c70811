use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use popdiv_core::PopDivError;
use popdiv_core::models::{PopulationCount, PopulationMap};
use popdiv_dxy::calculate_dxy;

pub fn run_dxy(matches: &ArgMatches) -> Result<()> {
    // get arguments from CLI
    let popfile = matches
        .get_one::<String>("popfile")
        .expect("A population TSV file is required.");

    let fastas: Vec<String> = matches
        .get_many::<String>("fastas")
        .expect("At least one FASTA is required.")
        .cloned()
        .collect();

    let output = matches.get_one::<String>("output");

    info!("Using population TSV file {}", popfile);
    let populations = PopulationMap::from_file(Path::new(popfile), &fastas)?;
    info!("Read in {} populations.", populations.n_populations());
    for (ordinal, id) in populations.population_ids().iter().enumerate() {
        info!(
            "Output column {} is population {} ({} samples)",
            ordinal + 1,
            id,
            populations.samples_in(ordinal)
        );
    }

    match output {
        Some(p) => {
            let file = File::create(Path::new(p))
                .map_err(PopDivError::from)
                .with_context(|| format!("Failed to create output file: {}", p))?;
            calculate_dxy(&fastas, &populations, BufWriter::new(file))?;
            info!("Output written to {}", p);
        }
        None => {
            let stdout = io::stdout();
            calculate_dxy(&fastas, &populations, BufWriter::new(stdout.lock()))?;
        }
    }

    Ok(())
}
