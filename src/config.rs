use anyhow::Result;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placement of the widget's layer surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_anchor")]
    pub anchor: Anchor,

    #[serde(default = "default_margins")]
    pub margins: Margins,

    #[serde(default = "default_size")]
    pub size: Size,

    #[serde(default)]
    pub exclusive_zone: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anchor: default_anchor(),
            margins: default_margins(),
            size: default_size(),
            exclusive_zone: 0,
        }
    }
}

fn default_anchor() -> Anchor {
    Anchor::TopRight
}

fn default_margins() -> Margins {
    Margins {
        top: 8,
        right: 8,
        bottom: 8,
        left: 8,
    }
}

fn default_size() -> Size {
    Size {
        width: 360,
        height: 640,
    }
}

impl Config {
    /// Reads `moving-blocks/config.toml` from the user config directory.
    /// A missing or unreadable file falls back to the defaults.
    pub fn load() -> Self {
        let Some(config_dir) = dirs::config_dir() else {
            warn!("Could not find config directory, using defaults");
            return Config::default();
        };
        let config_path = config_dir.join("moving-blocks").join("config.toml");

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring {}: {:#}", config_path.display(), e);
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if config.size.width == 0 || config.size.height == 0 {
            anyhow::bail!(
                "size must be non-zero, got {}x{}",
                config.size.width,
                config.size.height
            );
        }
        Ok(config)
    }
}
