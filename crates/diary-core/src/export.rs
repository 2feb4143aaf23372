//! One-shot export of a session's diary and graph image.

use std::fs;
use std::path::{Path, PathBuf};

use diary_events::{diary_file_name, EventLog};

use crate::projection::EmotionGraph;
use crate::render::{graph_file_name, SvgRenderer};
use crate::DiaryError;

/// Paths written by [`ExportWriter::write_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub diary: PathBuf,
    pub graph: PathBuf,
}

/// Writes exported artifacts into an output directory.
///
/// # Output Files
///
/// - `diario_emocional_<date>.json` - The full event log
/// - `grafo_emocional_<date>.svg` - The rendered graph
#[derive(Debug, Clone)]
pub struct ExportWriter {
    output_dir: PathBuf,
}

impl ExportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the diary document. Creates the directory if it doesn't exist.
    pub fn write_diary(&self, log: &EventLog, date: &str) -> Result<PathBuf, DiaryError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(diary_file_name(date));
        log.write_to(&path)?;
        tracing::info!(path = %path.display(), events = log.len(), "Wrote diary");
        Ok(path)
    }

    /// Renders and writes the graph image. Creates the directory if it
    /// doesn't exist.
    pub fn write_graph(
        &self,
        graph: &EmotionGraph,
        renderer: &SvgRenderer,
        date: &str,
    ) -> Result<PathBuf, DiaryError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(graph_file_name(date));
        fs::write(&path, renderer.render(graph))?;
        tracing::info!(path = %path.display(), nodes = graph.node_count(), "Wrote graph");
        Ok(path)
    }

    /// Writes both the diary document and the graph image.
    pub fn write_all(
        &self,
        log: &EventLog,
        graph: &EmotionGraph,
        renderer: &SvgRenderer,
        date: &str,
    ) -> Result<ExportPaths, DiaryError> {
        Ok(ExportPaths {
            diary: self.write_diary(log, date)?,
            graph: self.write_graph(graph, renderer, date)?,
        })
    }
}
