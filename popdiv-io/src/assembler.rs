use std::mem;

use log::debug;

use popdiv_core::consts::HEADER_MARKER;
use popdiv_core::models::{SampleSequence, Scaffold};
use popdiv_core::{PopDivError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSetKind {
    /// Every line starts with `>`
    Header,
    /// No line starts with `>`
    Sequence,
    /// Some lines are headers and some are not
    Mixed,
}

///
/// Classify one line from every source. An empty line counts as a sequence line.
///
pub fn classify_line_set(lines: &[Vec<u8>]) -> LineSetKind {
    let n_headers = lines
        .iter()
        .filter(|line| line.first() == Some(&HEADER_MARKER))
        .count();

    if n_headers == lines.len() {
        LineSetKind::Header
    } else if n_headers == 0 {
        LineSetKind::Sequence
    } else {
        LineSetKind::Mixed
    }
}

///
/// Accumulates synchronized, possibly line-wrapped FASTA records into one
/// complete [`Scaffold`] at a time.
///
pub struct ScaffoldAssembler {
    paths: Vec<String>,
    header: Option<Vec<u8>>,
    sequences: Vec<SampleSequence>,
    fault: Option<PopDivError>,
}

impl ScaffoldAssembler {
    ///
    /// # Arguments
    /// - paths: source names, used to report which inputs disagree
    ///
    pub fn new(paths: Vec<String>) -> Self {
        ScaffoldAssembler {
            paths,
            header: None,
            sequences: Vec::new(),
            fault: None,
        }
    }

    ///
    /// Feed one synchronized line set.
    ///
    /// Returns the previous scaffold once a new header block completes it. If the
    /// new header block is itself inconsistent, the completed scaffold is still
    /// returned and the fault is held back for [`ScaffoldAssembler::take_fault`].
    ///
    /// # Arguments
    /// - lines: one line per source, line endings removed
    /// - line: 1-based line number of this set within every source
    ///
    pub fn push_line_set(&mut self, lines: &[Vec<u8>], line: usize) -> Result<Option<Scaffold>> {
        match classify_line_set(lines) {
            LineSetKind::Header => {
                let completed = self.take_scaffold()?;

                match header_mismatch(lines) {
                    None => {
                        self.header = lines.first().cloned();
                        Ok(completed)
                    }
                    Some(err) if completed.is_some() => {
                        self.fault = Some(err);
                        Ok(completed)
                    }
                    Some(err) => Err(err),
                }
            }
            LineSetKind::Sequence => {
                if self.header.is_none() {
                    return Err(PopDivError::SequenceBeforeHeader { line });
                }

                if self.sequences.is_empty() {
                    self.sequences = lines.to_vec();
                } else {
                    for (sequence, part) in self.sequences.iter_mut().zip(lines) {
                        sequence.extend_from_slice(part);
                    }
                }
                Ok(None)
            }
            LineSetKind::Mixed => Err(PopDivError::MixedLineSet { line }),
        }
    }

    ///
    /// Flush the last scaffold at end of input, if it has any sequence data.
    ///
    pub fn finish(&mut self) -> Result<Option<Scaffold>> {
        self.take_scaffold()
    }

    ///
    /// A synchronization fault detected while completing the previous scaffold
    ///
    pub fn take_fault(&mut self) -> Option<PopDivError> {
        self.fault.take()
    }

    fn take_scaffold(&mut self) -> Result<Option<Scaffold>> {
        if self.sequences.is_empty() {
            return Ok(None);
        }

        let Some(header) = self.header.take() else {
            return Ok(None);
        };

        let scaffold = Scaffold {
            name: String::from_utf8_lossy(&header[1..]).into_owned(),
            sequences: mem::take(&mut self.sequences),
        };

        if let Some(index) = scaffold.first_length_mismatch() {
            return Err(PopDivError::SequenceLengthMismatch {
                scaffold: scaffold.name.clone(),
                first_path: self.path(0),
                first_len: scaffold.len(),
                other_path: self.path(index),
                other_len: scaffold.sequences[index].len(),
            });
        }

        debug!("Assembled scaffold {}", scaffold);

        Ok(Some(scaffold))
    }

    fn path(&self, index: usize) -> String {
        self.paths
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("input {}", index + 1))
    }
}

fn header_mismatch(lines: &[Vec<u8>]) -> Option<PopDivError> {
    let first = lines.first()?;
    lines
        .iter()
        .find(|line| *line != first)
        .map(|other| PopDivError::HeaderMismatch {
            first: String::from_utf8_lossy(first).into_owned(),
            other: String::from_utf8_lossy(other).into_owned(),
        })
}
