use std::io::Write;

use popdiv_core::Result;
use popdiv_core::models::{SiteEstimate, population_pairs};

use crate::format::format_float;

///
/// Column names of the statistics table for `n_populations` populations.
///
/// `Scaffold, Position, D_1,2, omit_position, pi_1..pi_P`, then `D_i,j, Da_i,j`
/// for every population pair in order. Columns are numbered by population
/// order, starting at 1.
///
pub fn header_columns(n_populations: usize) -> Vec<String> {
    let mut columns: Vec<String> = vec![
        "Scaffold".to_string(),
        "Position".to_string(),
        "D_1,2".to_string(),
        "omit_position".to_string(),
    ];

    columns.extend((1..=n_populations).map(|i| format!("pi_{i}")));

    for (p, q) in population_pairs(n_populations) {
        columns.push(format!("D_{},{}", p + 1, q + 1));
        columns.push(format!("Da_{},{}", p + 1, q + 1));
    }

    columns
}

///
/// Writes the tab-separated statistics table, one row per site.
///
/// Usable and omitted rows always have the same number of fields, so columns
/// stay aligned across the whole table.
///
pub struct StatsWriter<W: Write> {
    out: W,
    n_populations: usize,
    n_pairs: usize,
    header_written: bool,
}

impl<W: Write> StatsWriter<W> {
    pub fn new(out: W, n_populations: usize) -> Self {
        StatsWriter {
            out,
            n_populations,
            n_pairs: population_pairs(n_populations).count(),
            header_written: false,
        }
    }

    ///
    /// Write the header line. Only the first call writes anything.
    ///
    pub fn write_header(&mut self) -> Result<()> {
        if self.header_written {
            return Ok(());
        }
        writeln!(self.out, "{}", header_columns(self.n_populations).join("\t"))?;
        self.header_written = true;
        Ok(())
    }

    ///
    /// Write the row for one site.
    ///
    /// # Arguments
    /// - scaffold: scaffold name
    /// - position: 1-based site position
    /// - estimate: the site's statistics, or `Omitted`
    ///
    pub fn write_site(&mut self, scaffold: &str, position: usize, estimate: &SiteEstimate) -> Result<()> {
        write!(self.out, "{}\t{}", scaffold, position)?;

        match estimate {
            SiteEstimate::Usable { pi, divergence } => {
                let d12 = divergence.first().map_or(0.0, |d| d.dxy);
                write!(self.out, "\t{}\t0", format_float(d12))?;

                for value in pi {
                    write!(self.out, "\t{}", format_float(*value))?;
                }
                for pair in divergence {
                    write!(
                        self.out,
                        "\t{}\t{}",
                        format_float(pair.dxy),
                        format_float(pair.da)
                    )?;
                }
            }
            SiteEstimate::Omitted => {
                write!(self.out, "\t0\t1")?;
                for _ in 0..self.n_populations + 2 * self.n_pairs {
                    write!(self.out, "\t0")?;
                }
            }
        }

        writeln!(self.out)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
