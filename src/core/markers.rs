// MatrixMeta - core/markers.rs
//
// The set of literal line prefixes that select rows for extraction.
// Core layer: pure logic, no I/O.

use crate::util::constants;
use crate::util::error::ConfigError;

/// Ordered, de-duplicated set of non-empty line prefixes.
///
/// Order only matters for reporting (per-marker counts are listed in the
/// order markers were given); selection is "starts with any".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    markers: Vec<String>,
}

impl MarkerSet {
    /// Build a marker set, rejecting empty prefixes and oversize sets.
    ///
    /// Duplicates are dropped keeping the first occurrence.
    pub fn new<I, S>(markers: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for (index, marker) in markers.into_iter().enumerate() {
            let marker = marker.into();
            if marker.is_empty() {
                return Err(ConfigError::EmptyMarker { index });
            }
            if !unique.contains(&marker) {
                unique.push(marker);
            }
        }

        if unique.is_empty() {
            return Err(ConfigError::NoMarkers);
        }
        if unique.len() > constants::MAX_MARKERS {
            return Err(ConfigError::TooManyMarkers {
                count: unique.len(),
                max: constants::MAX_MARKERS,
            });
        }

        Ok(Self { markers: unique })
    }

    /// Sample accession and sample title rows.
    pub fn sample_metadata() -> Self {
        Self {
            markers: constants::DEFAULT_MARKERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    /// Markers in their configured order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Index of the first marker `line` starts with, if any.
    pub fn position_in(&self, line: &str) -> Option<usize> {
        self.markers.iter().position(|m| line.starts_with(m.as_str()))
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::sample_metadata()
    }
}
