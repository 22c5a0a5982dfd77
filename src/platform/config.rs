// MatrixMeta - platform/config.rs
//
// Platform config directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::markers::MarkerSet;
use crate::core::model::{ExtractConfig, OutputMode};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for MatrixMeta configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/matrixmeta/ or %APPDATA%\MatrixMeta\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Location of `config.toml` inside the config directory.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[extract]` section.
    pub extract: ExtractSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[extract]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    /// Series matrix file to read.
    pub input: Option<PathBuf>,
    /// File to append selected lines to.
    pub output: Option<PathBuf>,
    /// Line prefixes to select.
    pub markers: Option<Vec<String>>,
    /// "per_line" or "once".
    pub output_mode: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Extraction settings before CLI overrides.
    pub extract: ExtractConfig,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

/// Where the config file comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Platform default location; a missing file means "use defaults".
    Default,
    /// Named on the command line; a missing file is an error.
    Explicit,
}

/// Load and validate a config file.
///
/// Returns the config and a list of non-fatal warnings. Values that only
/// affect presentation (log level, output mode) fall back to defaults with a
/// warning; invalid markers are fatal because they change what is extracted.
pub fn load_config(
    path: &Path,
    source: ConfigSource,
) -> Result<(AppConfig, Vec<String>), ConfigError> {
    if !path.exists() {
        return match source {
            ConfigSource::Default => {
                tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
                Ok((AppConfig::default(), Vec::new()))
            }
            ConfigSource::Explicit => Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            }),
        };
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let parsed = parse_config(&content, path)?;
    tracing::info!(path = %path.display(), "Loaded config.toml");
    Ok(parsed)
}

/// Parse and validate config.toml content. `path` is used in messages only.
pub fn parse_config(content: &str, path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut warnings: Vec<String> = Vec::new();
    let mut config = AppConfig::default();

    // -- Extract: paths --
    if let Some(input) = raw.extract.input {
        config.extract.input = input;
    }
    if let Some(output) = raw.extract.output {
        config.extract.output = output;
    }

    // -- Extract: markers --
    if let Some(markers) = raw.extract.markers {
        config.extract.markers = MarkerSet::new(markers)?;
    }

    // -- Extract: output_mode --
    if let Some(ref mode) = raw.extract.output_mode {
        match OutputMode::from_config_str(mode) {
            Some(m) => config.extract.output_mode = m,
            None => warnings.push(format!(
                "[extract] output_mode = \"{mode}\" is not recognised. \
                 Expected \"per_line\" or \"once\". Using default (per_line).",
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    Ok((config, warnings))
}
