use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rstest::*;

use popdiv_core::models::PopulationMap;
use popdiv_core::{FailureKind, PopDivError};
use popdiv_dxy::{RunSummary, calculate_dxy};

#[fixture]
fn path_to_data() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../tests/data")
}

fn fasta_paths(dir: &Path, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .map(|name| dir.join(name).display().to_string())
        .collect()
}

fn populations(paths: &[String], ids: &[u64]) -> PopulationMap {
    let rows = paths.iter().cloned().zip(ids.iter().copied());
    PopulationMap::from_assignments(paths, rows).unwrap()
}

fn run(paths: &[String], map: &PopulationMap) -> (Result<RunSummary, PopDivError>, String) {
    let mut out: Vec<u8> = Vec::new();
    let result = calculate_dxy(paths, map, &mut out);
    (result, String::from_utf8(out).unwrap())
}

/// A sink that refuses writes past a fixed capacity
struct FullDisk {
    capacity: usize,
    written: Vec<u8>,
}

impl Write for FullDisk {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() + buf.len() > self.capacity {
            return Err(io::Error::other("no space left on device"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn write_fastas(dir: &Path, contents: &[&str]) -> Vec<String> {
    contents
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let path = dir.join(format!("sample{}.fa", i + 1));
            fs::write(&path, c).unwrap();
            path.display().to_string()
        })
        .collect()
}

mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    fn test_matches_expected_table(path_to_data: PathBuf) {
        let dir = path_to_data.join("dxy");
        let paths = fasta_paths(
            &dir,
            &["pop1_ind1.fa", "pop1_ind2.fa", "pop2_ind1.fa", "pop2_ind2.fa"],
        );
        let map = populations(&paths, &[1, 1, 2, 2]);

        let (result, table) = run(&paths, &map);
        let expected = fs::read_to_string(dir.join("expected.tsv")).unwrap();

        assert_eq!(table, expected);
        assert_eq!(
            result.unwrap(),
            RunSummary {
                scaffolds: 2,
                sites: 10,
                omitted_sites: 2
            }
        );
    }

    #[rstest]
    fn test_population_file_resolves_against_paths(path_to_data: PathBuf) {
        let dir = path_to_data.join("dxy");
        let tempdir = tempfile::tempdir().unwrap();
        let paths = fasta_paths(
            &dir,
            &["pop1_ind1.fa", "pop2_ind1.fa", "pop1_ind2.fa", "pop2_ind2.fa"],
        );

        // populations 5 and 9 become columns 1 and 2
        let popfile = tempdir.path().join("pops.tsv");
        let rows: Vec<String> = paths
            .iter()
            .zip([5, 9, 5, 9])
            .map(|(p, id)| format!("{p}\t{id}"))
            .collect();
        fs::write(&popfile, rows.join("\n")).unwrap();

        let map = PopulationMap::from_file(&popfile, &paths).unwrap();
        let (result, table) = run(&paths, &map);
        let expected = fs::read_to_string(dir.join("expected.tsv")).unwrap();

        assert!(result.is_ok());
        assert_eq!(table, expected);
    }

    #[rstest]
    fn test_single_sample_populations_flag_missing_site() {
        let tempdir = tempfile::tempdir().unwrap();
        let paths = write_fastas(tempdir.path(), &[">scaffold1\nACGT\n", ">scaffold1\nACGN\n"]);
        let map = populations(&paths, &[1, 2]);

        let (result, table) = run(&paths, &map);
        assert!(result.is_ok());

        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[3], "scaffold1\t3\t0\t0\t0\t0\t0\t0");
        assert_eq!(rows[4], "scaffold1\t4\t0\t1\t0\t0\t0\t0");
    }

    #[rstest]
    fn test_three_populations() {
        let tempdir = tempfile::tempdir().unwrap();
        let paths = write_fastas(tempdir.path(), &[">s\nA\n", ">s\nC\n", ">s\nM\n"]);
        let map = populations(&paths, &[1, 2, 3]);

        let (result, table) = run(&paths, &map);
        assert!(result.is_ok());

        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(
            rows[0],
            "Scaffold\tPosition\tD_1,2\tomit_position\tpi_1\tpi_2\tpi_3\tD_1,2\tDa_1,2\tD_1,3\tDa_1,3\tD_2,3\tDa_2,3"
        );
        // pi_3 = 2 * 0.5 * 0.5 * 2 / 1 = 1
        assert_eq!(rows[1], "s\t1\t1\t0\t0\t0\t1\t1\t1\t0.5\t0\t0.5\t0");
    }

    #[rstest]
    fn test_header_mismatch_keeps_earlier_scaffolds(path_to_data: PathBuf) {
        let dir = path_to_data.join("desync");
        let paths = fasta_paths(&dir, &["a.fa", "b.fa"]);
        let map = populations(&paths, &[1, 2]);

        let (result, table) = run(&paths, &map);

        let err = result.unwrap_err();
        assert!(matches!(err, PopDivError::HeaderMismatch { .. }));
        assert_eq!(err.exit_code(), 3);

        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[1..].iter().all(|r| r.starts_with("s1\t")));
    }

    #[rstest]
    fn test_wrapping_mismatch_writes_no_rows_for_scaffold() {
        let tempdir = tempfile::tempdir().unwrap();
        let paths = write_fastas(
            tempdir.path(),
            &[">s1\nAC\n>s2\nACG\nT\n", ">s1\nAC\n>s2\nACGT\n>s3\n"],
        );
        let map = populations(&paths, &[1, 2]);

        let (result, table) = run(&paths, &map);

        assert_eq!(result.unwrap_err().kind(), FailureKind::Sync);
        assert_eq!(table.lines().count(), 3);
        assert!(!table.contains("s2\t"));
    }

    #[rstest]
    fn test_missing_fasta_writes_nothing() {
        let tempdir = tempfile::tempdir().unwrap();
        let mut paths = write_fastas(tempdir.path(), &[">s\nA\n"]);
        paths.push(tempdir.path().join("absent.fa").display().to_string());
        let map = populations(&paths, &[1, 2]);

        let (result, table) = run(&paths, &map);

        assert_eq!(result.unwrap_err().kind(), FailureKind::Open);
        assert!(table.is_empty());
    }

    #[rstest]
    fn test_sample_count_must_match_map() {
        let tempdir = tempfile::tempdir().unwrap();
        let paths = write_fastas(tempdir.path(), &[">s\nA\n", ">s\nC\n"]);
        let map = populations(&paths, &[1, 2]);

        let (result, _) = run(&paths[..1], &map);
        assert!(matches!(
            result.unwrap_err(),
            PopDivError::SampleCountMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[rstest]
    fn test_trailing_blank_line_in_one_file_keeps_last_scaffold() {
        let tempdir = tempfile::tempdir().unwrap();
        let paths = write_fastas(tempdir.path(), &[">s1\nACGT\n\n", ">s1\nACGT\n"]);
        let map = populations(&paths, &[1, 2]);

        let (result, table) = run(&paths, &map);

        assert_eq!(result.unwrap().sites, 4);
        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4], "s1\t4\t0\t0\t0\t0\t0\t0");
    }

    #[rstest]
    fn test_output_failure_is_reported(path_to_data: PathBuf) {
        let dir = path_to_data.join("dxy");
        let paths = fasta_paths(
            &dir,
            &["pop1_ind1.fa", "pop1_ind2.fa", "pop2_ind1.fa", "pop2_ind2.fa"],
        );
        let map = populations(&paths, &[1, 1, 2, 2]);
        let mut disk = FullDisk {
            capacity: 100,
            written: Vec::new(),
        };

        let err = calculate_dxy(&paths, &map, &mut disk).unwrap_err();

        assert_eq!(err.kind(), FailureKind::Output);
        assert_eq!(err.exit_code(), 6);
        assert!(disk.written.starts_with(b"Scaffold\tPosition\t"));
    }
}
