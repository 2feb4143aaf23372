//! Emotional diary: Bayesian scoring of event interpretations.
//!
//! Each logged event carries three candidate interpretations with a prior and
//! a likelihood. The posterior engine applies Bayes' rule, the record is
//! appended to the session's log, and the table and graph projections are
//! rebuilt from the full log on every read.
//!
//! # Architecture
//!
//! ```text
//! EventEntry ──▶ posterior ──▶ Session (EventLog) ──▶ projection::{table, graph}
//!                                                  └─▶ render (SVG) ──▶ export
//! ```
//!
//! # Modules
//!
//! - [`posterior`]: Bayes' rule over three hypotheses
//! - [`entry`]: The input form for one event
//! - [`session`]: Session-scoped log ownership
//! - [`projection`]: Table and graph views of the log
//! - [`render`]: SVG drawing of the graph
//! - [`export`]: Writing the diary document and graph image
//! - [`config`]: TOML configuration
//! - [`shell`]: Line-oriented interactive front end
//! - [`input`]: Scripted and line-editing input for the shell

pub mod config;
pub mod entry;
pub mod export;
pub mod input;
pub mod posterior;
pub mod projection;
pub mod render;
pub mod session;
pub mod shell;

// Re-export engine types
pub use posterior::{compute_posteriors, to_display_percent, PosteriorUpdate, HYPOTHESES};

// Re-export entry types
pub use entry::{clamp_probability, EventEntry};

// Re-export session types
pub use session::{today, Session, SessionId, SessionRegistry};

// Re-export projection types
pub use projection::{
    render_table, to_graph, to_rows, EmotionGraph, GraphEdge, GraphNode, NodeKeying, NodeKind,
    Position, TableRow, TABLE_HEADERS,
};

// Re-export rendering and export types
pub use export::{ExportPaths, ExportWriter};
pub use render::{graph_file_name, SvgRenderer};

// Re-export config types
pub use config::{
    default_config_toml, ConfigError, DiaryConfig, ExportConfig, GraphConfig, RenderConfig,
    SessionConfig, TomlSerializeError,
};

pub use input::{EditorInput, LineSource, ScriptInput};
pub use shell::Shell;

use diary_events::DocumentError;
use thiserror::Error;

/// Errors that can occur in diary operations.
#[derive(Debug, Error)]
pub enum DiaryError {
    /// Error loading configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Error reading or writing a diary document
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
    /// I/O error outside document handling
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Terminal line editor could not start
    #[error("Line editor error: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),
}
