//! Shared record types and serialization for the emotional diary.
//!
//! This crate contains pure data structures with no inference logic.
//! It is a dependency for all other crates in the workspace.

pub mod document;
pub mod log;
pub mod record;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export record types
pub use record::{
    format_percent, EventRecord, InterpretationRecord, INTERPRETATIONS_PER_EVENT,
};

// Re-export log types
pub use log::EventLog;

// Re-export document I/O
pub use document::{diary_file_name, DocumentError};
