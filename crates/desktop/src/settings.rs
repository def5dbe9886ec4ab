use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use pixelscope_core::pipeline::magnifier_view::MagnifierConfig;
use pixelscope_core::shared::constants::{
    DEFAULT_PLAYBACK_INTERVAL_MS, DEFAULT_WINDOW_RADIUS, DEFAULT_ZOOM,
};

pub const RADIUS_RANGE: std::ops::RangeInclusive<u32> = 0..=50;
pub const ZOOM_RANGE: std::ops::RangeInclusive<u32> = 1..=16;
pub const INTERVAL_RANGE: std::ops::RangeInclusive<u32> = 10..=500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    System,
    Dark,
    Light,
}

impl Appearance {
    pub const ALL: &[Appearance] = &[Appearance::System, Appearance::Dark, Appearance::Light];
}

impl std::fmt::Display for Appearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Appearance::System => write!(f, "System"),
            Appearance::Dark => write!(f, "Dark"),
            Appearance::Light => write!(f, "Light"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub window_radius: u32,
    pub zoom: u32,
    #[serde(default = "default_interval")]
    pub playback_interval_ms: u32,
    pub appearance: Appearance,
    #[serde(default)]
    pub high_contrast: bool,
    pub font_scale: f32,
}

fn default_interval() -> u32 {
    DEFAULT_PLAYBACK_INTERVAL_MS as u32
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_radius: DEFAULT_WINDOW_RADIUS,
            zoom: DEFAULT_ZOOM,
            playback_interval_ms: default_interval(),
            appearance: Appearance::System,
            high_contrast: false,
            font_scale: 1.0,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("PixelScope").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| Self::from_json(&json))
            .unwrap_or_default()
    }

    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    log::warn!("Could not save settings to {}: {e}", path.display());
                }
            }
            Err(e) => log::warn!("Could not serialize settings: {e}"),
        }
    }

    /// Parses stored settings, clamping values edited out of range.
    fn from_json(json: &str) -> Option<Self> {
        let mut s: Settings = serde_json::from_str(json).ok()?;
        s.window_radius = s
            .window_radius
            .clamp(*RADIUS_RANGE.start(), *RADIUS_RANGE.end());
        s.zoom = s.zoom.clamp(*ZOOM_RANGE.start(), *ZOOM_RANGE.end());
        s.playback_interval_ms = s
            .playback_interval_ms
            .clamp(*INTERVAL_RANGE.start(), *INTERVAL_RANGE.end());
        Some(s)
    }

    pub fn magnifier_config(&self) -> MagnifierConfig {
        MagnifierConfig {
            radius: self.window_radius,
            zoom: self.zoom,
        }
    }
}
