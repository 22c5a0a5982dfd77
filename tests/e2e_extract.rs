// MatrixMeta - tests/e2e_extract.rs
//
// End-to-end tests for the extraction pipeline.
//
// These tests exercise the real filesystem: a series matrix written to a
// temp directory, extracted through `app::extract::extract`, and the output
// file read back byte for byte. No mocks, no stubs.

use matrixmeta::app::extract::{extract, preview};
use matrixmeta::core::markers::MarkerSet;
use matrixmeta::core::model::{ExtractConfig, OutputMode};
use matrixmeta::util::error::ExtractError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

const SCENARIO_INPUT: &str = "!Series_title \"Example study\"\n\
                              !Sample_geo_accession\t\"GSM1\"\t\"GSM2\"\n\
                              !Sample_title\t\"control\"\t\"treated\"\n\
                              !Sample_organism\t\"Homo sapiens\"\n";

const SCENARIO_OUTPUT: &str = "!Sample_geo_accession\t\"GSM1\"\t\"GSM2\"\n\
                               !Sample_title\t\"control\"\t\"treated\"\n";

/// A more realistic GEO export: series header, sample block, data table.
const SERIES_MATRIX: &str = "!Series_title\t\"Islet expression in T2D\"\n\
!Series_geo_accession\t\"GSE20966\"\n\
\n\
!Sample_title\t\"beta-cells_control_rep1\"\t\"beta-cells_T2D_rep1\"\n\
!Sample_geo_accession\t\"GSM524151\"\t\"GSM524152\"\n\
!Sample_status\t\"Public on Jun 01 2010\"\t\"Public on Jun 01 2010\"\n\
!Sample_source_name_ch1\t\"pancreatic beta-cells\"\t\"pancreatic beta-cells\"\n\
!series_matrix_table_begin\n\
\"ID_REF\"\t\"GSM524151\"\t\"GSM524152\"\n\
\"1007_s_at\"\t9.12\t9.40\n\
!series_matrix_table_end\n";

fn setup(content: &[u8]) -> (TempDir, ExtractConfig) {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("GSE_series_matrix.txt");
    fs::write(&input, content).expect("write input");
    let config = ExtractConfig {
        input,
        output: dir.path().join("GSE_metadata.txt"),
        ..Default::default()
    };
    (dir, config)
}

fn read(path: &Path) -> Vec<u8> {
    fs::read(path).expect("read output")
}

fn count_matching(content: &str, markers: &MarkerSet) -> usize {
    content
        .split_inclusive('\n')
        .filter(|l| markers.iter().any(|m| l.starts_with(m)))
        .count()
}

// =============================================================================
// Selection
// =============================================================================

/// The worked example: two matching lines, in order, nothing else.
#[test]
fn e2e_scenario_output_is_exact() {
    let (_dir, config) = setup(SCENARIO_INPUT.as_bytes());
    let report = extract(&config).unwrap();

    assert_eq!(read(&config.output), SCENARIO_OUTPUT.as_bytes());
    assert_eq!(report.lines_scanned, 4);
    assert_eq!(report.lines_matched, 2);
}

/// Output line count equals the count of matching input lines, and lines
/// not starting with a marker never appear.
#[test]
fn e2e_counts_and_negative_containment() {
    let (_dir, config) = setup(SERIES_MATRIX.as_bytes());
    let report = extract(&config).unwrap();

    let output = String::from_utf8(read(&config.output)).unwrap();
    let expected = count_matching(SERIES_MATRIX, &config.markers);
    assert_eq!(expected, 2);
    assert_eq!(output.lines().count(), expected);
    assert_eq!(report.lines_matched as usize, expected);

    for line in output.lines() {
        assert!(
            line.starts_with("!Sample_geo_accession") || line.starts_with("!Sample_title"),
            "unexpected line in output: {line:?}"
        );
    }
    assert!(!output.contains("GSE20966"));
    assert!(!output.contains("ID_REF"));
}

/// Matches keep input order even when it differs from marker order.
#[test]
fn e2e_output_order_follows_input() {
    let (_dir, config) = setup(SERIES_MATRIX.as_bytes());
    extract(&config).unwrap();

    let output = String::from_utf8(read(&config.output)).unwrap();
    let keys: Vec<_> = output
        .lines()
        .map(|l| l.split('\t').next().unwrap_or_default())
        .collect();
    assert_eq!(keys, vec!["!Sample_title", "!Sample_geo_accession"]);
}

/// CRLF terminators, trailing spaces, and a missing final newline all
/// survive unchanged.
#[test]
fn e2e_lines_are_byte_identical() {
    let input = b"!Sample_title\t\"a\"  \r\n!Other\tx\r\n!Sample_geo_accession\t\"GSM1\"";
    let (_dir, config) = setup(input);
    extract(&config).unwrap();

    assert_eq!(
        read(&config.output),
        b"!Sample_title\t\"a\"  \r\n!Sample_geo_accession\t\"GSM1\"".to_vec()
    );
}

/// Custom markers replace the default set.
#[test]
fn e2e_custom_markers() {
    let (_dir, mut config) = setup(SERIES_MATRIX.as_bytes());
    config.markers = MarkerSet::new(["!Sample_source_name_ch1", "!Series_geo_accession"]).unwrap();
    let report = extract(&config).unwrap();

    assert_eq!(
        String::from_utf8(read(&config.output)).unwrap(),
        "!Series_geo_accession\t\"GSE20966\"\n\
         !Sample_source_name_ch1\t\"pancreatic beta-cells\"\t\"pancreatic beta-cells\"\n"
    );
    assert_eq!(report.per_marker[0].count, 1);
    assert_eq!(report.per_marker[1].count, 1);
}

// =============================================================================
// Append semantics
// =============================================================================

/// Running twice appends a second copy rather than replacing the file.
#[test]
fn e2e_second_run_appends_second_copy() {
    let (_dir, config) = setup(SCENARIO_INPUT.as_bytes());
    extract(&config).unwrap();
    extract(&config).unwrap();

    let expected = format!("{SCENARIO_OUTPUT}{SCENARIO_OUTPUT}");
    assert_eq!(read(&config.output), expected.as_bytes());
}

/// Existing output content is preserved ahead of new matches.
#[test]
fn e2e_existing_output_not_truncated() {
    let (_dir, config) = setup(SCENARIO_INPUT.as_bytes());
    fs::write(&config.output, b"previous run\n").unwrap();
    extract(&config).unwrap();

    let expected = format!("previous run\n{SCENARIO_OUTPUT}");
    assert_eq!(read(&config.output), expected.as_bytes());
}

/// Both output modes produce the same file, including across runs.
#[test]
fn e2e_output_modes_are_equivalent() {
    let (_dir, per_line) = setup(SERIES_MATRIX.as_bytes());
    let once = ExtractConfig {
        output: per_line.output.with_file_name("once.txt"),
        output_mode: OutputMode::Once,
        ..per_line.clone()
    };

    for _ in 0..2 {
        extract(&per_line).unwrap();
        extract(&once).unwrap();
    }
    assert_eq!(read(&per_line.output), read(&once.output));
}

/// With no matching lines the output file is never created.
#[test]
fn e2e_no_matches_leaves_no_output() {
    for mode in [OutputMode::PerLine, OutputMode::Once] {
        let (_dir, mut config) = setup(b"!Series_title\t\"x\"\n!Sample_organism\t\"y\"\n");
        config.output_mode = mode;
        let report = extract(&config).unwrap();
        assert_eq!(report.lines_matched, 0);
        assert_eq!(report.lines_scanned, 2);
        assert!(!config.output.exists(), "mode {mode} created an empty output");
    }
}

// =============================================================================
// Errors
// =============================================================================

/// A missing input is reported as InputOpen/NotFound and creates no output.
#[test]
fn e2e_missing_input_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExtractConfig {
        input: dir.path().join("absent_series_matrix.txt"),
        output: dir.path().join("meta.txt"),
        ..Default::default()
    };
    let err = extract(&config).unwrap_err();
    assert!(err.is_input_not_found(), "expected not-found, got {err:?}");
    assert!(!config.output.exists());
}

/// An output path under a missing directory fails on the first match.
#[test]
fn e2e_unwritable_output_is_error() {
    let (dir, mut config) = setup(SCENARIO_INPUT.as_bytes());
    config.output = dir.path().join("missing_dir").join("meta.txt");
    let err = extract(&config).unwrap_err();
    assert!(
        matches!(err, ExtractError::OutputOpen { .. }),
        "expected OutputOpen, got {err:?}"
    );
}

/// Invalid UTF-8 aborts the scan with the offending line number; matches
/// before it are already on disk.
#[test]
fn e2e_invalid_encoding_aborts_with_line_number() {
    let mut input = b"!Sample_title\t\"a\"\n".to_vec();
    input.extend_from_slice(b"!Sample_geo_accession\t\"\xff\"\n");
    let (_dir, config) = setup(&input);

    match extract(&config) {
        Err(ExtractError::InvalidEncoding { line_number, path, .. }) => {
            assert_eq!(line_number, 2);
            assert_eq!(path, config.input);
        }
        other => panic!("expected InvalidEncoding, got {other:?}"),
    }
    assert_eq!(read(&config.output), b"!Sample_title\t\"a\"\n".to_vec());
}

// =============================================================================
// Preview
// =============================================================================

/// Preview selects the same lines and writes nothing.
#[test]
fn e2e_preview_matches_extract_without_writing() {
    let (_dir, config) = setup(SCENARIO_INPUT.as_bytes());
    let selected = preview(&config).unwrap();
    assert!(!config.output.exists());
    assert_eq!(selected, SCENARIO_OUTPUT.as_bytes());

    extract(&config).unwrap();
    assert_eq!(read(&config.output), selected);
}

/// Default config still points at the GSE20966 layout.
#[test]
fn e2e_default_paths() {
    let config = ExtractConfig::default();
    assert_eq!(
        config.input,
        PathBuf::from("Data/GSE20966/GSE20966_series_matrix.txt")
    );
    assert_eq!(config.output, PathBuf::from("Data/GSE20966/GSE20966_metadata.txt"));
}
