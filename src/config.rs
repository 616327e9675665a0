//! Document configuration.
//!
//! Controls the parts of the rendered document that are not scene content:
//! page title, map runtime script, base map type and container id. Loadable
//! from YAML; every field has a default.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Base map imagery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    /// Street map.
    #[default]
    Roadmap,
    /// Satellite imagery.
    Satellite,
    /// Satellite imagery with street overlay.
    Hybrid,
    /// Physical relief.
    Terrain,
}

impl MapType {
    /// Identifier in the map runtime (`google.maps.MapTypeId.*`).
    #[must_use]
    pub const fn runtime_id(self) -> &'static str {
        match self {
            Self::Roadmap => "ROADMAP",
            Self::Satellite => "SATELLITE",
            Self::Hybrid => "HYBRID",
            Self::Terrain => "TERRAIN",
        }
    }
}

/// Options for the rendered HTML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Page title.
    #[serde(default = "default_title")]
    pub title: String,

    /// URL of the map runtime script (must load the visualization library).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Optional API key appended to the script URL.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base map type.
    #[serde(default)]
    pub map_type: MapType,

    /// Id of the map container element.
    #[serde(default = "default_canvas_id")]
    pub canvas_id: String,
}

fn default_title() -> String {
    "Google Maps - trueno-map".to_string()
}
fn default_api_url() -> String {
    "https://maps.googleapis.com/maps/api/js?libraries=visualization".to_string()
}
fn default_canvas_id() -> String {
    "map_canvas".to_string()
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            api_url: default_api_url(),
            api_key: None,
            map_type: MapType::default(),
            canvas_id: default_canvas_id(),
        }
    }
}

impl DocumentConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Script URL with the API key appended, if any.
    #[must_use]
    pub fn script_url(&self) -> String {
        match self.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => {
                let sep = if self.api_url.contains('?') { '&' } else { '?' };
                format!("{}{sep}key={key}", self.api_url)
            }
            None => self.api_url.clone(),
        }
    }
}
