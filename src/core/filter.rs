// MatrixMeta - core/filter.rs
//
// Prefix-based line selection.
// Core layer: pure logic, no I/O. Lines are never modified.

use crate::core::markers::MarkerSet;

/// Index of the marker `line` starts with, or `None` if it is not selected.
///
/// Matching is on the raw line including any terminator; since markers are
/// non-empty and contain no newline, the terminator never affects the result.
pub fn matching_marker(line: &str, markers: &MarkerSet) -> Option<usize> {
    markers.position_in(line)
}

/// Select the lines that start with any marker, in input order.
///
/// Returns borrowed slices of the input; nothing is trimmed, re-encoded,
/// or de-duplicated.
pub fn select_lines<'a, I>(lines: I, markers: &MarkerSet) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter(|line| matching_marker(line, markers).is_some())
        .collect()
}
