use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use crate::errors::{PopDivError, Result};

///
/// Resolved `sample index -> population` assignment.
///
/// Population ids from the population file are mapped to dense ordinals
/// `0..n_populations` in ascending id order, and every lookup goes through
/// that ordinal, so ids like `1` and `3` occupy columns 1 and 2.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationMap {
    sample_to_population: Vec<usize>,
    population_ids: Vec<u64>,
}

pub trait PopulationLookup {
    /// Dense, 0-based population ordinal of a sample.
    fn population_of_sample(&self, sample: usize) -> usize;
}

pub trait PopulationCount {
    fn n_populations(&self) -> usize;

    /// Number of samples covered by the assignment.
    fn n_samples(&self) -> usize;
}

impl PopulationLookup for PopulationMap {
    fn population_of_sample(&self, sample: usize) -> usize {
        self.sample_to_population[sample]
    }
}

impl PopulationCount for PopulationMap {
    fn n_populations(&self) -> usize {
        self.population_ids.len()
    }

    fn n_samples(&self) -> usize {
        self.sample_to_population.len()
    }
}

impl PopulationMap {
    ///
    /// Read a population TSV file of `(FASTA path, population id)` rows and resolve
    /// it against the sequence files supplied for this run.
    ///
    /// # Arguments
    /// - path: path to the population TSV file
    /// - sample_paths: sequence file paths, in sample order
    ///
    pub fn from_file<S: AsRef<str>>(path: &Path, sample_paths: &[S]) -> Result<Self> {
        let file = File::open(path).map_err(|source| PopDivError::PopulationFileOpen {
            path: path.display().to_string(),
            source,
        })?;

        let reader = BufReader::new(file);
        let mut assignments: Vec<(String, u64)> = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| PopDivError::PopulationFileRead {
                path: path.display().to_string(),
                line: index + 1,
                source,
            })?;

            if line.trim().is_empty() {
                continue;
            }

            assignments.push(parse_population_line(&line, index + 1)?);
        }

        Self::from_assignments(sample_paths, assignments)
    }

    ///
    /// Build the map from already parsed `(path, population id)` pairs.
    ///
    /// Paths are matched by exact string equality against `sample_paths`; a row
    /// matching no sample still contributes its id to the population set. A later
    /// row for the same sample replaces an earlier one.
    ///
    pub fn from_assignments<S, I>(sample_paths: &[S], assignments: I) -> Result<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (String, u64)>,
    {
        let mut assigned: Vec<Option<u64>> = vec![None; sample_paths.len()];
        let mut ids: BTreeSet<u64> = BTreeSet::new();

        for (path, id) in assignments {
            ids.insert(id);

            match sample_paths.iter().position(|p| p.as_ref() == path) {
                Some(index) => {
                    if let Some(previous) = assigned[index].replace(id) {
                        if previous != id {
                            warn!(
                                "{} reassigned from population {} to population {}",
                                path, previous, id
                            );
                        }
                    }
                }
                None => warn!("Population file entry {} matches no input FASTA", path),
            }
        }

        let ordinals: BTreeMap<u64, usize> = ids
            .iter()
            .enumerate()
            .map(|(ordinal, id)| (*id, ordinal))
            .collect();

        let sample_to_population = assigned
            .iter()
            .zip(sample_paths)
            .enumerate()
            .map(|(index, (id, path))| match id {
                Some(id) => Ok(ordinals[id]),
                None => Err(PopDivError::UnassignedSample {
                    index,
                    path: path.as_ref().to_string(),
                }),
            })
            .collect::<Result<Vec<usize>>>()?;

        if ids.len() < 2 {
            return Err(PopDivError::TooFewPopulations(ids.len()));
        }

        let map = PopulationMap {
            sample_to_population,
            population_ids: ids.into_iter().collect(),
        };

        for (sample, path) in sample_paths.iter().enumerate() {
            debug!(
                "Sample {} ({}) -> population {}",
                sample + 1,
                path.as_ref(),
                map.population_ids[map.sample_to_population[sample]]
            );
        }

        Ok(map)
    }

    ///
    /// Population ids as written in the population file, indexed by ordinal
    ///
    pub fn population_ids(&self) -> &[u64] {
        &self.population_ids
    }

    pub fn samples_in(&self, population: usize) -> usize {
        self.sample_to_population
            .iter()
            .filter(|p| **p == population)
            .count()
    }
}

///
/// Every unordered pair of population ordinals `(p, q)` with `p < q`, in output order.
///
pub fn population_pairs(n_populations: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n_populations).flat_map(move |p| (p + 1..n_populations).map(move |q| (p, q)))
}

fn parse_population_line(line: &str, line_number: usize) -> Result<(String, u64)> {
    let mut parts = line.split('\t');

    let (Some(path), Some(population)) = (parts.next(), parts.next()) else {
        return Err(PopDivError::PopulationLine {
            line: line_number,
            reason: format!("Expected two tab-separated values, found: {:?}", line),
        });
    };

    let population: u64 = population
        .trim()
        .parse()
        .map_err(|_| PopDivError::PopulationLine {
            line: line_number,
            reason: format!(
                "Population id {:?} must be a positive integer",
                population
            ),
        })?;

    if population == 0 {
        return Err(PopDivError::PopulationLine {
            line: line_number,
            reason: "Population id 0 is not allowed, ids start at 1".to_string(),
        });
    }

    Ok((path.to_string(), population))
}
