// ABOUTME: Whole-document JSON event log with lazy creation and read-modify-write appends.
// ABOUTME: Every append rewrites the full document; records are validated loosely on the way in.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use thiserror::Error;

/// Errors that can occur during event log operations.
#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("No {0} provided in event log")]
    MissingField(&'static str),

    #[error("Invalid JSON in file {}: {detail}", .path.display())]
    Corrupt { path: PathBuf, detail: String },

    #[error("An error occurred while trying to write to the file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("An error occurred while serializing the content to JSON for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A durable event log backed by a single JSON document of the form
/// `{"events": [...]}`. Records are open-schema'd: only `timestamp` and
/// `event_type` are validated, extra keys pass through untouched.
///
/// The append is a non-atomic read-parse-append-rewrite of the whole file.
/// Callers running concurrently must serialize access around each call or
/// the second reader will overwrite the first's update.
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    /// Create a handle for the event log at `path`. The file itself is
    /// created lazily on the first append or clear.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path to the underlying JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record to the `events` sequence and rewrite the document.
    ///
    /// The record must carry non-empty string `timestamp` and `event_type`
    /// fields; on a validation failure the file is left untouched. A file
    /// that is absent or zero-length is initialized to the empty template
    /// first; any other unparseable content is corrupt, whitespace-only
    /// included.
    pub fn append(&self, record: &Value) -> Result<(), EventLogError> {
        validate_record(record)?;
        self.ensure_file()?;

        let contents = fs::read_to_string(&self.path).map_err(|source| EventLogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut doc: Value =
            serde_json::from_str(&contents).map_err(|err| EventLogError::Corrupt {
                path: self.path.clone(),
                detail: err.to_string(),
            })?;

        let Some(obj) = doc.as_object_mut() else {
            return Err(EventLogError::Corrupt {
                path: self.path.clone(),
                detail: "top-level value is not an object".to_string(),
            });
        };

        // A missing, null, or empty `events` key all mean the same thing:
        // no events yet. Anything else that is not an array cannot hold
        // events and is surfaced rather than silently replaced.
        let mut events = match obj.remove("events") {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => Vec::new(),
            Some(_) => {
                return Err(EventLogError::Corrupt {
                    path: self.path.clone(),
                    detail: "\"events\" holds a non-array value".to_string(),
                });
            }
        };
        events.push(record.clone());

        tracing::debug!(path = %self.path.display(), total = events.len(), "appended event");
        obj.insert("events".to_string(), Value::Array(events));
        self.write_document(&doc)
    }

    /// Reset the log to the empty template: truncate, then reinitialize
    /// through the same lazy-creation rule an append uses.
    pub fn clear(&self) -> Result<(), EventLogError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| EventLogError::Io {
                path: self.path.clone(),
                source,
            })?;
        }
        File::create(&self.path).map_err(|source| EventLogError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.ensure_file()
    }

    /// Initialize the file to `{"events": []}` when it is absent or
    /// zero-length. Creates parent directories as needed.
    fn ensure_file(&self) -> Result<(), EventLogError> {
        let needs_init = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(err) if err.kind() == io::ErrorKind::NotFound => true,
            Err(source) => {
                return Err(EventLogError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if needs_init {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).map_err(|source| EventLogError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            }
            self.write_document(&json!({ "events": [] }))?;
        }

        Ok(())
    }

    /// Rewrite the whole document, pretty-printed.
    fn write_document(&self, doc: &Value) -> Result<(), EventLogError> {
        let json = serde_json::to_string_pretty(doc).map_err(|source| EventLogError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        let mut file = File::create(&self.path).map_err(|source| EventLogError::Io {
            path: self.path.clone(),
            source,
        })?;
        file.write_all(json.as_bytes())
            .map_err(|source| EventLogError::Io {
                path: self.path.clone(),
                source,
            })?;

        Ok(())
    }
}

/// Records must name a non-empty `timestamp` and `event_type`, checked in
/// that order. Missing, null, non-string, and empty-string values all count
/// as absent.
fn validate_record(record: &Value) -> Result<(), EventLogError> {
    for field in ["timestamp", "event_type"] {
        let present = record
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty());
        if !present {
            return Err(EventLogError::MissingField(field));
        }
    }
    Ok(())
}
