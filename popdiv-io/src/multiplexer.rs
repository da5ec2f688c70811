use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use popdiv_core::utils::{get_dynamic_reader, trim_line_ending};
use popdiv_core::{PopDivError, Result};

struct FastaSource {
    path: String,
    reader: BufReader<Box<dyn Read>>,
}

///
/// A set of FASTA files read in lock-step, one line from every file per call.
///
/// Handles are owned here and closed when the multiplexer is dropped, on both
/// the success path and every error path.
///
pub struct FastaMultiplexer {
    sources: Vec<FastaSource>,
    lines: Vec<Vec<u8>>,
    line_number: usize,
}

impl FastaMultiplexer {
    ///
    /// Open every path, in order. Fails on the first file that cannot be opened,
    /// closing the ones already opened.
    ///
    /// # Arguments
    /// - paths: sequence files, in sample order. Files ending in `.gz` are decompressed.
    ///
    pub fn open<S: AsRef<str>>(paths: &[S]) -> Result<Self> {
        let sources = paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                let reader =
                    get_dynamic_reader(Path::new(path)).map_err(|source| PopDivError::Open {
                        path: path.to_string(),
                        source,
                    })?;
                Ok(FastaSource {
                    path: path.to_string(),
                    reader,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_sources(sources))
    }

    ///
    /// Multiplex already opened readers; the names are used in error messages.
    ///
    pub fn from_readers(readers: Vec<(String, Box<dyn Read>)>) -> Self {
        let sources = readers
            .into_iter()
            .map(|(path, reader)| FastaSource {
                path,
                reader: BufReader::new(reader),
            })
            .collect();

        Self::from_sources(sources)
    }

    fn from_sources(sources: Vec<FastaSource>) -> Self {
        let lines = vec![Vec::new(); sources.len()];
        FastaMultiplexer {
            sources,
            lines,
            line_number: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn paths(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.path.clone()).collect()
    }

    ///
    /// Number of line sets read so far
    ///
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    ///
    /// Advance every source by exactly one line.
    ///
    /// Returns `Ok(None)` when every source is at end of file together. When some
    /// sources end first, the others are drained: if nothing but blank lines is
    /// left in them, that is also a clean end. Any remaining content is a
    /// synchronization error, and a failing read is a read error.
    ///
    pub fn read_line_set(&mut self) -> Result<Option<&[Vec<u8>]>> {
        if self.sources.is_empty() {
            return Ok(None);
        }

        let mut at_eof = vec![false; self.sources.len()];

        for ((source, line), ended) in self
            .sources
            .iter_mut()
            .zip(self.lines.iter_mut())
            .zip(at_eof.iter_mut())
        {
            *ended = !read_line(source, line)?;
        }

        if let Some(index) = at_eof.iter().position(|ended| *ended) {
            if self.drain_blank_tails(&at_eof)? {
                return Ok(None);
            }
            return Err(PopDivError::UnevenEof {
                path: self.sources[index].path.clone(),
                line: self.line_number,
            });
        }

        self.line_number += 1;
        Ok(Some(&self.lines))
    }

    /// Read the sources that have not ended yet to their end; true if only blank lines remained.
    fn drain_blank_tails(&mut self, at_eof: &[bool]) -> Result<bool> {
        let sources = self.sources.iter_mut().zip(self.lines.iter_mut());
        for ((source, line), ended) in sources.zip(at_eof) {
            if *ended {
                continue;
            }
            loop {
                if !is_blank(line) {
                    return Ok(false);
                }
                if !read_line(source, line)? {
                    break;
                }
            }
        }
        Ok(true)
    }
}

/// Read the next line of a source into `line`, without its line ending. False at end of file.
fn read_line(source: &mut FastaSource, line: &mut Vec<u8>) -> Result<bool> {
    line.clear();
    let bytes_read = source
        .reader
        .read_until(b'\n', line)
        .map_err(|err| PopDivError::Read {
            path: source.path.clone(),
            source: err,
        })?;

    if bytes_read == 0 {
        return Ok(false);
    }
    trim_line_ending(line);
    Ok(true)
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}
