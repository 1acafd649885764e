//! Analysis configuration
//!
//! Loaded from YAML; every field is optional and falls back to its default.
//!
//! ```yaml
//! num_minisectors: 25
//! session: Q
//! render:
//!   width: 2000
//!   height: 1200
//!   reference_color: "#FF1E1E"
//!   comparison_color: "#00FF00"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::comparator::{DEFAULT_MINISECTORS, MAX_MINISECTORS};
use crate::render::RenderOptions;
use crate::types::SessionKind;
use crate::{AnalysisError, Result};

/// Settings for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of equal-length minisectors the track is divided into
    pub num_minisectors: usize,
    /// Session analysed when the host does not name one
    pub session: SessionKind,
    pub render: RenderOptions,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            num_minisectors: DEFAULT_MINISECTORS,
            session: SessionKind::default(),
            render: RenderOptions::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_yaml_ng::from_str(yaml)
            .map_err(|e| AnalysisError::parse("analysis config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AnalysisError::file_error(path.to_path_buf(), e))?;
        let config = Self::from_yaml_str(&contents)?;
        debug!(path = %path.display(), num_minisectors = config.num_minisectors, "Loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_minisectors == 0 {
            return Err(AnalysisError::config("num_minisectors", "must be at least 1"));
        }
        if self.num_minisectors > MAX_MINISECTORS {
            return Err(AnalysisError::config(
                "num_minisectors",
                format!("must be at most {}, got {}", MAX_MINISECTORS, self.num_minisectors),
            ));
        }
        self.render.validate()
    }
}
