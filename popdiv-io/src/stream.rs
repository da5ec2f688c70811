use popdiv_core::Result;
use popdiv_core::models::Scaffold;

use crate::assembler::ScaffoldAssembler;
use crate::multiplexer::FastaMultiplexer;

///
/// Iterator over complete, synchronized scaffolds of a set of FASTA files.
///
/// Only the scaffold being assembled is held in memory. The first error ends the
/// iteration; a scaffold interrupted by an error is never yielded.
///
pub struct ScaffoldStream {
    multiplexer: FastaMultiplexer,
    assembler: ScaffoldAssembler,
    finished: bool,
}

impl ScaffoldStream {
    pub fn new(multiplexer: FastaMultiplexer) -> Self {
        let assembler = ScaffoldAssembler::new(multiplexer.paths());
        ScaffoldStream {
            multiplexer,
            assembler,
            finished: false,
        }
    }

    ///
    /// Open every path and stream their scaffolds
    ///
    pub fn open<S: AsRef<str>>(paths: &[S]) -> Result<Self> {
        Ok(Self::new(FastaMultiplexer::open(paths)?))
    }

    pub fn n_sources(&self) -> usize {
        self.multiplexer.len()
    }

    fn next_scaffold(&mut self) -> Result<Option<Scaffold>> {
        loop {
            if let Some(fault) = self.assembler.take_fault() {
                return Err(fault);
            }

            let line = self.multiplexer.line_number() + 1;
            match self.multiplexer.read_line_set()? {
                Some(lines) => {
                    if let Some(scaffold) = self.assembler.push_line_set(lines, line)? {
                        return Ok(Some(scaffold));
                    }
                }
                None => return self.assembler.finish(),
            }
        }
    }
}

impl Iterator for ScaffoldStream {
    type Item = Result<Scaffold>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_scaffold();
        if !matches!(result, Ok(Some(_))) {
            self.finished = true;
        }

        result.transpose()
    }
}
