// config.rs - Configuration for a Life session, loaded from optional YAML

use crate::codec::{self, DecodeError};
use crate::patterns::Pattern;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Largest accepted board side and history depth.
pub const MAX_DIMENSION: usize = 1000;
pub const MAX_DEPTH: usize = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("invalid board: {0}")]
    Board(#[from] DecodeError),
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Board width in cells
    pub width: usize,
    /// Board height in cells
    pub height: usize,
    /// How many generations back a repeated state counts as a cycle
    pub depth: usize,
    /// Probability that a freshly seeded cell is alive (0.0 - 1.0)
    pub life_ratio: f64,
    /// Fraction of each side kept lifeless when seeding (0.0 - 0.5)
    pub life_border: f64,
    /// Milliseconds between generations
    pub speed_ms: u64,
    /// Encoded board to start from instead of a random one
    pub board: Option<String>,
    /// Named pattern to start from
    pub pattern: Option<String>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 40,
            depth: 12,
            life_ratio: 0.3,
            life_border: 0.1,
            speed_ms: 100,
            board: None,
            pattern: None,
        }
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}

impl LifeConfig {
    /// Load and validate configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: LifeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let max_dimension = MAX_DIMENSION as f64;
        check_range("width", self.width as f64, 1.0, max_dimension)?;
        check_range("height", self.height as f64, 1.0, max_dimension)?;
        check_range("depth", self.depth as f64, 0.0, MAX_DEPTH as f64)?;
        check_range("life_ratio", self.life_ratio, 0.0, 1.0)?;
        check_range("life_border", self.life_border, 0.0, 0.5)?;
        check_range("speed_ms", self.speed_ms as f64, 1.0, u32::MAX as f64)?;

        if let Some(board) = &self.board {
            codec::try_decode(board)?;
        }
        if let Some(name) = &self.pattern {
            if Pattern::find(name).is_none() {
                return Err(ConfigError::UnknownPattern(name.clone()));
            }
        }
        Ok(())
    }
}
