//! Loop configuration, loaded from TOML

use crate::input::InputBindings;
use ember_core::{EmberError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings for one run of the frame loop.
///
/// Window flags are passed through to whatever opens the platform; the loop
/// itself only reads `fps`, `vsync`, `quit_on_window_close` and `bindings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Target frame rate; 0 runs uncapped
    pub fps: u32,
    pub resizable: bool,
    pub fullscreen: bool,
    pub borderless: bool,
    pub vsync: bool,
    pub software_render: bool,
    pub quit_on_window_close: bool,
    pub bindings: InputBindings,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            title: "Ember".to_string(),
            width: 800,
            height: 600,
            fps: 60,
            resizable: false,
            fullscreen: false,
            borderless: false,
            vsync: false,
            software_render: false,
            quit_on_window_close: true,
            bindings: InputBindings::default(),
        }
    }
}

impl LoopConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_toml_string()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EmberError::invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Per-frame budget for the pacing sleep, if the loop should sleep at all
    pub fn frame_budget(&self) -> Option<Duration> {
        if self.vsync || self.fps == 0 {
            None
        } else {
            Some(Duration::from_secs_f64(1.0 / self.fps as f64))
        }
    }
}
