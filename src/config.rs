// src/config.rs

//! Configuration for a plotter instance.
//!
//! The structure can be deserialized from JSON; every field has a default, so
//! a config file only needs to list what it changes.

use crate::color::Color;
use crate::renderer::actor::DEFAULT_THREAD_NAME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Plotter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // Apply default values for every missing field.
pub struct Config {
    /// Buffer width in pixels.
    pub width: u32,
    /// Buffer height in pixels.
    pub height: u32,
    /// Color used by drawing commands until changed.
    pub front_color: Color,
    /// Color used by `clear` until changed.
    pub clear_color: Color,
    /// Name of the render thread, visible in logs and panic messages.
    pub thread_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 640,
            height: 480,
            front_color: Color::DEFAULT_FRONT,
            clear_color: Color::DEFAULT_CLEAR,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl Config {
    /// Parses a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse plotter configuration")
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Width / height, as used for perspective projections.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}
