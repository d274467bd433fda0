// ABOUTME: Append-only operational text log with timestamped LOG/ERR lines.
// ABOUTME: Creation is exclusive so a racing creator surfaces instead of being silently ignored.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;

/// Errors that can occur during operational log operations.
#[derive(Debug, Error)]
pub enum SystemLogError {
    #[error("An error occurred while trying to write to the file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The plain-text operational log. One line per entry, each carrying a
/// ctime-style timestamp, a `[LOG]` or `[ERR]` severity tag, and a free-text
/// message. Append-only outside of an explicit clear.
pub struct SystemLog {
    path: PathBuf,
}

impl SystemLog {
    /// Create a handle for the operational log at `path`. The file itself is
    /// created lazily on the first append.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path to the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry as a single open-append-release cycle.
    pub fn append(&self, message: &str, is_error: bool) -> Result<(), SystemLogError> {
        self.ensure_file()?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_err(source))?;

        let tag = if is_error { "[ERR]" } else { "[LOG]" };
        let stamp = Local::now().format("%a %b %e %H:%M:%S %Y");
        writeln!(file, "{stamp}: {tag} - {message}").map_err(|source| self.io_err(source))?;

        Ok(())
    }

    /// Truncate the log to zero length. No template is written; the file
    /// stays empty until the next append.
    pub fn clear(&self) -> Result<(), SystemLogError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io_err(source))?;
        }
        File::create(&self.path).map_err(|source| self.io_err(source))?;
        Ok(())
    }

    /// Create the file if absent. The create is exclusive: losing a race to
    /// a concurrent creator is an error, not a silent no-op.
    fn ensure_file(&self) -> Result<(), SystemLogError> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io_err(source))?;
        }
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|source| self.io_err(source))?;

        Ok(())
    }

    fn io_err(&self, source: std::io::Error) -> SystemLogError {
        SystemLogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
