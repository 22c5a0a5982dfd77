// MatrixMeta - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all MatrixMeta operations.
#[derive(Debug)]
pub enum MatrixMetaError {
    /// Extraction failed (input, output, or encoding).
    Extract(ExtractError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Serialising the JSON report failed.
    Report(serde_json::Error),

    /// I/O error outside extraction (e.g. writing to stdout).
    Io {
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for MatrixMetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extract(e) => write!(f, "Extraction error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Report(e) => write!(f, "Report error: {e}"),
            Self::Io { operation, source } => write!(f, "I/O error {operation}: {source}"),
        }
    }
}

impl std::error::Error for MatrixMetaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Extract(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Report(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for MatrixMetaError {
    fn from(e: serde_json::Error) -> Self {
        Self::Report(e)
    }
}

// ---------------------------------------------------------------------------
// Extraction errors
// ---------------------------------------------------------------------------

/// Errors raised while scanning the input and appending to the output.
#[derive(Debug)]
pub enum ExtractError {
    /// The input file does not exist or could not be opened for reading.
    InputOpen { path: PathBuf, source: io::Error },

    /// Reading from an already-opened input file failed.
    InputRead {
        path: PathBuf,
        line_number: u64,
        source: io::Error,
    },

    /// A line of the input is not valid UTF-8.
    InvalidEncoding {
        path: PathBuf,
        line_number: u64,
        source: std::str::Utf8Error,
    },

    /// The output file could not be opened (or created) for appending.
    OutputOpen { path: PathBuf, source: io::Error },

    /// Appending a line to the output file failed.
    OutputWrite { path: PathBuf, source: io::Error },
}

impl ExtractError {
    /// True when the input file is simply absent.
    pub fn is_input_not_found(&self) -> bool {
        matches!(
            self,
            Self::InputOpen { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputOpen { path, source } => {
                write!(f, "Cannot open input '{}': {source}", path.display())
            }
            Self::InputRead {
                path,
                line_number,
                source,
            } => write!(
                f,
                "'{}' line {line_number}: read failed: {source}",
                path.display()
            ),
            Self::InvalidEncoding {
                path,
                line_number,
                source,
            } => write!(
                f,
                "'{}' line {line_number}: invalid UTF-8 encoding: {source}",
                path.display()
            ),
            Self::OutputOpen { path, source } => write!(
                f,
                "Cannot open output '{}' for appending: {source}",
                path.display()
            ),
            Self::OutputWrite { path, source } => {
                write!(f, "Write to output '{}' failed: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InputOpen { source, .. } => Some(source),
            Self::InputRead { source, .. } => Some(source),
            Self::InvalidEncoding { source, .. } => Some(source),
            Self::OutputOpen { source, .. } => Some(source),
            Self::OutputWrite { source, .. } => Some(source),
        }
    }
}

impl From<ExtractError> for MatrixMetaError {
    fn from(e: ExtractError) -> Self {
        Self::Extract(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading and marker validation.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// An explicitly requested config file does not exist.
    NotFound { path: PathBuf },

    /// A marker is the empty string, which would select every line.
    EmptyMarker { index: usize },

    /// No markers remain after configuration.
    NoMarkers,

    /// More markers than the configured limit.
    TooManyMarkers { count: usize, max: usize },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::NotFound { path } => {
                write!(f, "Config file '{}' does not exist", path.display())
            }
            Self::EmptyMarker { index } => write!(
                f,
                "Marker #{} is empty; an empty prefix would match every line",
                index + 1
            ),
            Self::NoMarkers => write!(f, "At least one marker is required"),
            Self::TooManyMarkers { count, max } => {
                write!(f, "Too many markers ({count}), maximum is {max}")
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for MatrixMetaError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for MatrixMeta results.
pub type Result<T> = std::result::Result<T, MatrixMetaError>;
