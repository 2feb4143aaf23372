//! Diary Document I/O
//!
//! Reading and writing the exported diary document: a pretty-printed JSON
//! array of event records.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::log::EventLog;

/// Errors that can occur while reading or writing a diary document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization or parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File name of an exported diary for the given date.
pub fn diary_file_name(date: &str) -> String {
    format!("diario_emocional_{}.json", date)
}

impl EventLog {
    /// Serializes the log to a pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a log from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the log as a JSON document to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), DocumentError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a log from the JSON document at `path`.
    pub fn read_from(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
