use crate::doom::WindDirection;
use crate::palette::Palette;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub fire: FireSettings,
}

/// Defaults for the fire, overridden by command-line flags
#[derive(Debug, Default, Deserialize)]
pub struct FireSettings {
    pub wind: Option<WindDirection>,
    pub time_step: Option<f32>,  // seconds per frame
    pub palette: Option<Palette>,
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring malformed settings file");
                Self::default()
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read settings file");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("doomfire")
            .join("config.toml")
    }
}
