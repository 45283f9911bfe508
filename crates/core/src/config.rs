use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::{InputError, RandomSpec, parse_heights};
use crate::session::DEFAULT_SPEED_MS;
use crate::trace::HeightArray;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config heights: {0}")]
    InvalidHeights(#[from] InputError),
}

/// Startup settings, loaded from JSON. Every field is optional.
///
/// ```json
/// { "speed_ms": 400, "heights": "1,8,6,2,5,4,8,3,7", "dark": false }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Milliseconds per autoplay step.
    pub speed_ms: u64,
    /// Comma-separated initial heights; the default array when absent.
    pub heights: Option<String>,
    /// Bounds for the randomizer.
    pub random: RandomSpec,
    /// Dark palette for SVG export.
    pub dark: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed_ms: DEFAULT_SPEED_MS,
            heights: None,
            random: RandomSpec::default(),
            dark: true,
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.initial_heights()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("loaded config from {}", path.display());
        Self::from_json(&text)
    }

    pub fn initial_heights(&self) -> Result<HeightArray, InputError> {
        match &self.heights {
            Some(text) => parse_heights(text),
            None => Ok(HeightArray::default()),
        }
    }
}
