//! Session configuration
//!
//! Loaded from JSON (a `<script id="game-config">` block on the web, a file
//! path natively). Missing fields fall back to the defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{SPAWN_PADDING, TOP_MARGIN};
use crate::sim::FOOD_TYPES;

/// Playfield size in logical canvas units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 720.0,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Default pointer target before any input arrives
    pub fn initial_pointer(&self) -> (f32, f32) {
        (self.width / 2.0, self.height * 3.0 / 5.0)
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: Playfield,
    /// Items spawned at session start
    pub food_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            food_count: 30,
        }
    }
}

/// Reasons a configuration is rejected
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config is not valid JSON: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Same config with a different playfield (e.g. the canvas' real size)
    pub fn with_playfield(mut self, width: f32, height: f32) -> Self {
        self.playfield = Playfield::new(width, height);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Playfield { width, height } = self.playfield;
        if !width.is_finite() || !height.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "playfield must be finite, got {}x{}",
                width, height
            )));
        }
        // Largest item plus padding must fit between the edges
        let clearance = FOOD_TYPES
            .iter()
            .map(|f| f.radius)
            .fold(0.0, f32::max)
            + SPAWN_PADDING;
        if width < 2.0 * clearance {
            return Err(ConfigError::Invalid(format!(
                "playfield width {} leaves no room between the side margins",
                width
            )));
        }
        if height < TOP_MARGIN + clearance {
            return Err(ConfigError::Invalid(format!(
                "playfield height {} leaves no room below the HUD band",
                height
            )));
        }
        if self.food_count == 0 {
            return Err(ConfigError::Invalid("food_count must be at least 1".into()));
        }
        Ok(())
    }
}
