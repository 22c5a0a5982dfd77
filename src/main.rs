// MatrixMeta - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading (platform default or --config)
// 3. Logging initialisation (debug mode support)
// 4. Running the extraction and mapping errors to the exit status

use clap::Parser;
use matrixmeta::app;
use matrixmeta::core::markers::MarkerSet;
use matrixmeta::core::model::{ExtractConfig, OutputMode};
use matrixmeta::platform::config::{self, ConfigSource, PlatformPaths};
use matrixmeta::util::{self, error::MatrixMetaError, error::Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// MatrixMeta - extract sample metadata rows from a GEO series matrix file.
///
/// Appends every `!Sample_geo_accession` and `!Sample_title` line of INPUT
/// to the output file, byte for byte and in input order. The output is
/// never truncated: running twice appends the rows twice.
#[derive(Parser, Debug)]
#[command(name = "matrixmeta", version, about)]
struct Cli {
    /// Series matrix file to read (default: config, then built-in path).
    input: Option<PathBuf>,

    /// File to append selected lines to.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Line prefix to select; repeat to select several. Replaces the default set.
    #[arg(short = 'm', long = "marker")]
    markers: Vec<String>,

    /// Keep the output open for the whole scan instead of reopening per line.
    #[arg(long = "open-once")]
    open_once: bool,

    /// Print the matching lines to stdout without touching the output file.
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Print a JSON summary of the run to stdout.
    #[arg(long = "json", conflicts_with = "dry_run")]
    json: bool,

    /// Configuration file (default: platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the file configuration.
    fn apply_to(&self, mut extract: ExtractConfig) -> Result<ExtractConfig> {
        if let Some(ref input) = self.input {
            extract.input = input.clone();
        }
        if let Some(ref output) = self.output {
            extract.output = output.clone();
        }
        if !self.markers.is_empty() {
            extract.markers = MarkerSet::new(self.markers.iter().cloned())?;
        }
        if self.open_once {
            extract.output_mode = OutputMode::Once;
        }
        Ok(extract)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let (config_path, source) = match cli.config {
        Some(ref path) => (path.clone(), ConfigSource::Explicit),
        None => (PlatformPaths::resolve().config_file(), ConfigSource::Default),
    };
    let (app_config, warnings) = config::load_config(&config_path, source)?;

    util::logging::init(cli.debug, app_config.log_level.as_deref());
    tracing::debug!(
        version = util::constants::APP_VERSION,
        config = %config_path.display(),
        "MatrixMeta starting"
    );
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let extract = cli.apply_to(app_config.extract)?;

    if cli.dry_run {
        // Selected lines carry their own terminators.
        let selected = app::extract::preview(&extract)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&selected).map_err(stdout_err)?;
        stdout.flush().map_err(stdout_err)?;
        return Ok(());
    }

    let report = app::extract::extract(&extract)?;
    if cli.json {
        let json = serde_json::to_string_pretty(&report)?;
        writeln!(std::io::stdout(), "{json}").map_err(stdout_err)?;
    }
    Ok(())
}

fn stdout_err(source: std::io::Error) -> MatrixMetaError {
    MatrixMetaError::Io {
        operation: "writing to stdout",
        source,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "MatrixMeta failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
