// MatrixMeta - app/extract.rs
//
// Runs one extraction: scan the input line by line and append every line
// that starts with a marker to the output, unchanged and in input order.
//
// Errors are not handled here. The first I/O or encoding failure aborts the
// scan and is returned to the caller; lines appended before the failure stay
// on disk.

use crate::core::filter;
use crate::core::markers::MarkerSet;
use crate::core::model::{ExtractConfig, ExtractReport, OutputMode};
use crate::platform::fs::{AppendFile, LineReader, LineSink};
use crate::util::constants;
use crate::util::error::ExtractError;
use std::io::BufRead;

/// Extract marker lines from `config.input` and append them to `config.output`.
///
/// The output is created if absent and never truncated, so running twice
/// against the same output leaves two copies of the selection.
pub fn extract(config: &ExtractConfig) -> Result<ExtractReport, ExtractError> {
    tracing::info!(
        input = %config.input.display(),
        output = %config.output.display(),
        markers = config.markers.len(),
        mode = %config.output_mode,
        "Extraction starting"
    );

    let mut reader = LineReader::open(&config.input)?;
    let mut sink = match config.output_mode {
        OutputMode::PerLine => AppendFile::per_line(&config.output),
        OutputMode::Once => AppendFile::held(&config.output),
    };

    let mut report = ExtractReport::new(config);
    scan(&mut reader, &config.markers, &mut sink, &mut report)?;

    tracing::info!(
        scanned = report.lines_scanned,
        matched = report.lines_matched,
        output = %sink.path().display(),
        "Extraction complete"
    );
    if report.lines_matched == 0 {
        tracing::warn!(
            input = %config.input.display(),
            "No lines matched any marker; output left untouched"
        );
    }
    Ok(report)
}

/// Core loop shared by file-backed extraction and in-memory previews.
///
/// The sink is always finished, even when the scan aborts, so lines already
/// accepted reach their destination. A finish failure after an aborted scan
/// is logged; the scan error is the one returned.
pub fn scan<R, S>(
    reader: &mut LineReader<R>,
    markers: &MarkerSet,
    sink: &mut S,
    report: &mut ExtractReport,
) -> Result<(), ExtractError>
where
    R: BufRead,
    S: LineSink + ?Sized,
{
    match append_matches(reader, markers, sink, report) {
        Ok(()) => sink.finish(),
        Err(e) => {
            if let Err(flush) = sink.finish() {
                tracing::warn!(
                    error = %flush,
                    line = reader.line_number(),
                    "Could not flush output after aborted scan"
                );
            }
            Err(e)
        }
    }
}

fn append_matches<R, S>(
    reader: &mut LineReader<R>,
    markers: &MarkerSet,
    sink: &mut S,
    report: &mut ExtractReport,
) -> Result<(), ExtractError>
where
    R: BufRead,
    S: LineSink + ?Sized,
{
    let mut buf = Vec::new();
    while let Some(line) = reader.next_line(&mut buf)? {
        report.lines_scanned += 1;
        if let Some(idx) = filter::matching_marker(line, markers) {
            sink.append_line(line.as_bytes())?;
            report.record_match(idx);
            tracing::trace!(
                line = reader.line_number(),
                text = %truncate_for_log(line),
                "Selected"
            );
        }
    }
    Ok(())
}

/// Selected lines of `config.input`, concatenated verbatim, without
/// touching the output file.
///
/// The input is streamed; only matching lines are buffered.
pub fn preview(config: &ExtractConfig) -> Result<Vec<u8>, ExtractError> {
    let mut reader = LineReader::open(&config.input)?;
    let mut selected: Vec<u8> = Vec::new();
    let mut report = ExtractReport::new(config);
    scan(&mut reader, &config.markers, &mut selected, &mut report)?;
    tracing::debug!(
        scanned = report.lines_scanned,
        matched = report.lines_matched,
        "Preview complete"
    );
    Ok(selected)
}

fn truncate_for_log(line: &str) -> &str {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.char_indices().nth(constants::MAX_LOGGED_LINE_CHARS) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
