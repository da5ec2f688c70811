use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use rstest::*;

use popdiv_core::models::Scaffold;
use popdiv_core::{FailureKind, Result};
use popdiv_io::ScaffoldStream;

fn write_gz(path: &Path, contents: &str) {
    let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

#[rstest]
fn test_plain_and_gzipped_files_stream_together() {
    let tempdir = tempfile::tempdir().unwrap();
    let plain = tempdir.path().join("sample1.fa");
    let gzipped = tempdir.path().join("sample2.fa.gz");
    fs::write(&plain, ">chr1\nACGT\nAC\r\n>chr2\nGG\n").unwrap();
    write_gz(&gzipped, ">chr1\nMCGN\nTT\n>chr2\nGA\n");

    let paths = vec![plain.display().to_string(), gzipped.display().to_string()];
    let stream = ScaffoldStream::open(&paths).unwrap();
    assert_eq!(stream.n_sources(), 2);

    let scaffolds: Vec<Scaffold> = stream.collect::<Result<_>>().unwrap();
    assert_eq!(scaffolds.len(), 2);
    assert_eq!(scaffolds[0].name, "chr1");
    assert_eq!(scaffolds[0].sequences[0], b"ACGTAC".to_vec());
    assert_eq!(scaffolds[0].sequences[1], b"MCGNTT".to_vec());
    assert_eq!(scaffolds[1].to_string(), "chr2 (2 sites, 2 samples)");
}

#[rstest]
fn test_unopenable_file_is_reported_by_path() {
    let tempdir = tempfile::tempdir().unwrap();
    let present = tempdir.path().join("present.fa");
    fs::write(&present, ">s\nA\n").unwrap();
    let absent = tempdir.path().join("absent.fa").display().to_string();

    let err = match ScaffoldStream::open(&[present.display().to_string(), absent.clone()]) {
        Ok(_) => panic!("opening a missing file should fail"),
        Err(err) => err,
    };

    assert_eq!(err.kind(), FailureKind::Open);
    assert!(err.to_string().contains(&absent));
}

#[rstest]
fn test_uneven_files_are_a_sync_failure() {
    let tempdir = tempfile::tempdir().unwrap();
    let short = tempdir.path().join("short.fa");
    let long = tempdir.path().join("long.fa");
    fs::write(&short, ">s\nAC\n").unwrap();
    fs::write(&long, ">s\nAC\nGT\n").unwrap();

    let paths = vec![short.display().to_string(), long.display().to_string()];
    let results: Vec<Result<Scaffold>> = ScaffoldStream::open(&paths).unwrap().collect();

    assert_eq!(results.len(), 1);
    let err = results.into_iter().next().unwrap().unwrap_err();
    assert_eq!(err.kind(), FailureKind::Sync);
}
