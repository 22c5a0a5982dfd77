// MatrixMeta - core/model.rs
//
// Core data types for one extraction run.

use crate::core::markers::MarkerSet;
use crate::util::constants;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Output mode
// =============================================================================

/// How the output file is held open while matches are appended.
///
/// Both modes append and never truncate, and neither touches the output
/// when nothing matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Open, append, and close the output for every matching line.
    #[default]
    PerLine,
    /// Open the output on the first match and keep it for the whole scan.
    Once,
}

impl OutputMode {
    /// Parse a config-file value (case-insensitive).
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "per_line" | "per-line" => Some(Self::PerLine),
            "once" => Some(Self::Once),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PerLine => "per_line",
            Self::Once => "once",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Extraction configuration
// =============================================================================

/// Everything one extraction run needs: where to read, where to append,
/// which prefixes to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Series matrix file to scan.
    pub input: PathBuf,
    /// File the selected lines are appended to. Created if absent.
    pub output: PathBuf,
    /// Line prefixes that select a row.
    pub markers: MarkerSet,
    /// Output handle lifetime.
    pub output_mode: OutputMode,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(constants::DEFAULT_INPUT_PATH),
            output: PathBuf::from(constants::DEFAULT_OUTPUT_PATH),
            markers: MarkerSet::default(),
            output_mode: OutputMode::default(),
        }
    }
}

// =============================================================================
// Extraction report
// =============================================================================

/// Match count for one marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerCount {
    pub marker: String,
    pub count: u64,
}

/// Summary of a completed extraction, used for logging and `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub output_mode: OutputMode,
    /// Lines read from the input, including non-matching ones.
    pub lines_scanned: u64,
    /// Lines appended to the output.
    pub lines_matched: u64,
    /// Matches per marker, in marker order.
    pub per_marker: Vec<MarkerCount>,
}

impl ExtractReport {
    /// Empty report for a run about to start.
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            input: config.input.clone(),
            output: config.output.clone(),
            output_mode: config.output_mode,
            lines_scanned: 0,
            lines_matched: 0,
            per_marker: config
                .markers
                .iter()
                .map(|m| MarkerCount {
                    marker: m.to_string(),
                    count: 0,
                })
                .collect(),
        }
    }

    /// Record a match against the marker at `marker_index`.
    pub fn record_match(&mut self, marker_index: usize) {
        self.lines_matched += 1;
        if let Some(mc) = self.per_marker.get_mut(marker_index) {
            mc.count += 1;
        }
    }
}
