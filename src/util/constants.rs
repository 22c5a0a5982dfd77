// MatrixMeta - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "MatrixMeta";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "MatrixMeta";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Extraction defaults
// =============================================================================

/// Row prefix carrying the GSM accession of every sample.
pub const MARKER_GEO_ACCESSION: &str = "!Sample_geo_accession";

/// Row prefix carrying the human-readable title of every sample.
pub const MARKER_TITLE: &str = "!Sample_title";

/// Markers selected when neither config nor CLI supplies any.
pub const DEFAULT_MARKERS: &[&str] = &[MARKER_GEO_ACCESSION, MARKER_TITLE];

/// Input path used when neither config nor CLI supplies one.
pub const DEFAULT_INPUT_PATH: &str = "Data/GSE20966/GSE20966_series_matrix.txt";

/// Output path used when neither config nor CLI supplies one.
pub const DEFAULT_OUTPUT_PATH: &str = "Data/GSE20966/GSE20966_metadata.txt";

/// Upper bound on the number of markers in one set.
pub const MAX_MARKERS: usize = 64;

/// Read buffer capacity for the input reader.
pub const READ_BUFFER_SIZE: usize = 64 * 1024; // 64 KB

/// Maximum number of characters of a line echoed into trace log output.
pub const MAX_LOGGED_LINE_CHARS: usize = 120;

// =============================================================================
// Logging
// =============================================================================

/// Log level used when nothing else is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// File names
// =============================================================================

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
