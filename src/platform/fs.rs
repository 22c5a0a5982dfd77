// MatrixMeta - platform/fs.rs
//
// File access for extraction: a line reader that keeps terminators intact
// and append-only sinks for the output file.
//
// Every handle here is scoped: it is closed when dropped, on success and on
// every error path.

use crate::util::constants;
use crate::util::error::ExtractError;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

// =============================================================================
// Input
// =============================================================================

/// Reads a text file one line at a time, terminator included.
///
/// `\n` and `\r\n` are left exactly as they appear; a final line without a
/// terminator is returned as-is.
pub struct LineReader<R> {
    inner: R,
    path: PathBuf,
    line_number: u64,
}

impl LineReader<BufReader<File>> {
    /// Open `path` for reading.
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let file = File::open(path).map_err(|e| ExtractError::InputOpen {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "Opened input");
        Ok(Self::new(
            BufReader::with_capacity(constants::READ_BUFFER_SIZE, file),
            path,
        ))
    }
}

impl<R: BufRead> LineReader<R> {
    /// Wrap an already-open reader. `path` is only used in error messages.
    pub fn new(inner: R, path: &Path) -> Self {
        Self {
            inner,
            path: path.to_path_buf(),
            line_number: 0,
        }
    }

    /// 1-based number of the line most recently returned.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Read the next line into `buf` (cleared first) and return it as text.
    ///
    /// Returns `Ok(None)` at end of file. A line that is not valid UTF-8
    /// yields `InvalidEncoding`.
    pub fn next_line<'b>(&mut self, buf: &'b mut Vec<u8>) -> Result<Option<&'b str>, ExtractError> {
        buf.clear();
        let read = self
            .inner
            .read_until(b'\n', buf)
            .map_err(|e| ExtractError::InputRead {
                path: self.path.clone(),
                line_number: self.line_number + 1,
                source: e,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let text = std::str::from_utf8(buf).map_err(|e| ExtractError::InvalidEncoding {
            path: self.path.clone(),
            line_number: self.line_number,
            source: e,
        })?;
        Ok(Some(text))
    }
}

// =============================================================================
// Output
// =============================================================================

/// Destination for selected lines.
pub trait LineSink {
    /// Append one line exactly as given.
    fn append_line(&mut self, line: &[u8]) -> Result<(), ExtractError>;

    /// Flush anything buffered. Called once after the last line.
    fn finish(&mut self) -> Result<(), ExtractError> {
        Ok(())
    }
}

/// In-memory sink, used for previews and tests.
impl LineSink for Vec<u8> {
    fn append_line(&mut self, line: &[u8]) -> Result<(), ExtractError> {
        self.extend_from_slice(line);
        Ok(())
    }
}

/// Open `path` for appending, creating it if absent. Never truncates.
fn open_append(path: &Path) -> Result<File, ExtractError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ExtractError::OutputOpen {
            path: path.to_path_buf(),
            source: e,
        })
}

fn write_err(path: &Path) -> impl FnOnce(io::Error) -> ExtractError + '_ {
    move |e| ExtractError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    }
}

/// Appends to a file on disk.
///
/// The file is not touched until the first line arrives, so a run with no
/// matches leaves no output behind.
#[derive(Debug)]
pub enum AppendFile {
    /// Open, write, close for every line.
    PerLine { path: PathBuf },
    /// Open on first line, keep the handle until `finish`.
    Held {
        path: PathBuf,
        writer: Option<BufWriter<File>>,
    },
}

impl AppendFile {
    pub fn per_line(path: &Path) -> Self {
        Self::PerLine {
            path: path.to_path_buf(),
        }
    }

    pub fn held(path: &Path) -> Self {
        Self::Held {
            path: path.to_path_buf(),
            writer: None,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::PerLine { path } | Self::Held { path, .. } => path,
        }
    }
}

impl LineSink for AppendFile {
    fn append_line(&mut self, line: &[u8]) -> Result<(), ExtractError> {
        match self {
            Self::PerLine { path } => {
                let mut file = open_append(path)?;
                file.write_all(line).map_err(write_err(path))?;
                Ok(())
            }
            Self::Held { path, writer } => {
                let w = match writer.take() {
                    Some(w) => w,
                    None => {
                        tracing::debug!(path = %path.display(), "Opened output for appending");
                        BufWriter::new(open_append(path)?)
                    }
                };
                writer.insert(w).write_all(line).map_err(write_err(path))
            }
        }
    }

    fn finish(&mut self) -> Result<(), ExtractError> {
        match self {
            Self::PerLine { .. } => Ok(()),
            Self::Held { path, writer } => match writer.take() {
                Some(mut w) => w.flush().map_err(write_err(path)),
                None => Ok(()),
            },
        }
    }
}
