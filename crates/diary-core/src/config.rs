//! Configuration loading for the diary.
//!
//! All settings are loaded from a TOML configuration file. Every section
//! falls back to its defaults, so partial files are fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::entry::EventEntry;
use crate::projection::NodeKeying;

/// Complete diary configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiaryConfig {
    /// Session owner settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Prefilled values of the entry form
    #[serde(default)]
    pub defaults: EventEntry,
    /// Graph projection settings
    #[serde(default)]
    pub graph: GraphConfig,
    /// SVG rendering settings
    #[serde(default)]
    pub render: RenderConfig,
    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl DiaryConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, TomlSerializeError> {
        toml::to_string_pretty(self).map_err(TomlSerializeError)
    }
}

/// Session owner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name recorded on every event
    pub owner_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            owner_name: "Hans".to_string(),
        }
    }
}

/// Graph projection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// How records map to node identities
    pub keying: NodeKeying,
}

/// SVG rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Empty border around the layout in pixels
    pub margin: f64,
    /// Node circle radius in pixels
    pub node_radius: f64,
    /// Node fill color (any SVG color)
    pub node_color: String,
    /// Edge and arrowhead color
    pub edge_color: String,
    /// Canvas background color
    pub background_color: String,
    /// Label font size
    pub font_size: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 600.0,
            margin: 60.0,
            node_radius: 31.0,
            node_color: "lightblue".to_string(),
            edge_color: "black".to_string(),
            background_color: "white".to_string(),
            font_size: 9.0,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported files are written to
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Error that can occur during TOML serialization.
#[derive(Debug, Error)]
#[error("TOML serialize error: {0}")]
pub struct TomlSerializeError(#[source] pub toml::ser::Error);

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Emotional Diary Configuration

[session]
owner_name = "Hans"

[defaults]
event_label = "Crítica"
interpretations = ["Me ayudan", "Me humillan", "Reflexiono"]
priors = [0.2, 0.6, 0.2]
likelihoods = [0.1, 0.8, 0.3]

[graph]
# "label" merges nodes with identical labels, "record" keeps one node per record
keying = "label"

[render]
width = 1400.0
height = 600.0
margin = 60.0
node_radius = 31.0
node_color = "lightblue"
edge_color = "black"
background_color = "white"
font_size = 9.0

[export]
output_dir = "output"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DiaryConfig::default();

        assert_eq!(config.session.owner_name, "Hans");
        assert_eq!(config.defaults.event_label, "Crítica");
        assert_eq!(config.graph.keying, NodeKeying::Label);
        assert_eq!(config.render.node_color, "lightblue");
        assert_eq!(config.export.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_render_config_default() {
        let render = RenderConfig::default();

        assert_eq!(render.width, 1400.0);
        assert_eq!(render.height, 600.0);
        assert_eq!(render.node_radius, 31.0);
        assert_eq!(render.font_size, 9.0);
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            [session]
            owner_name = "Ada"

            [defaults]
            event_label = "Llamada"
            priors = [0.3, 0.3, 0.4]

            [graph]
            keying = "record"
        "#;

        let config = DiaryConfig::from_str(toml).unwrap();

        assert_eq!(config.session.owner_name, "Ada");
        assert_eq!(config.defaults.event_label, "Llamada");
        assert_eq!(config.defaults.priors, [0.3, 0.3, 0.4]);
        assert_eq!(config.graph.keying, NodeKeying::Record);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [defaults]
            likelihoods = [0.5, 0.5, 0.5]
        "#;

        let config = DiaryConfig::from_str(toml).unwrap();

        // Specified value
        assert_eq!(config.defaults.likelihoods, [0.5, 0.5, 0.5]);
        // Default values
        assert_eq!(config.defaults.priors, [0.2, 0.6, 0.2]);
        assert_eq!(config.defaults.interpretations[2], "Reflexiono");
        assert_eq!(config.session.owner_name, "Hans");
        assert_eq!(config.render.width, 1400.0);
    }

    #[test]
    fn test_empty_config() {
        let config = DiaryConfig::from_str("").unwrap();
        assert_eq!(config.session.owner_name, "Hans");
    }

    #[test]
    fn test_invalid_keying_is_rejected() {
        let toml = r#"
            [graph]
            keying = "random"
        "#;

        let err = DiaryConfig::from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_config_to_toml() {
        let config = DiaryConfig::default();
        let toml = config.to_toml().unwrap();

        assert!(toml.contains("[session]"));
        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("[render]"));

        let parsed = DiaryConfig::from_str(&toml).unwrap();
        assert_eq!(parsed.defaults, config.defaults);
        assert_eq!(parsed.export.output_dir, config.export.output_dir);
    }

    #[test]
    fn test_default_config_toml_parses() {
        let toml = default_config_toml();
        let config = DiaryConfig::from_str(&toml).unwrap();

        assert_eq!(config.session.owner_name, "Hans");
        assert_eq!(config.defaults, EventEntry::default());
        assert_eq!(config.render.node_color, "lightblue");
    }

    #[test]
    fn test_from_missing_file() {
        let err = DiaryConfig::from_file(Path::new("/nonexistent/diary.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
