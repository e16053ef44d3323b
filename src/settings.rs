//! Host-level settings
//!
//! The page may pass a JSON object in the canvas `data-settings` attribute;
//! anything missing falls back to the defaults.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GameError;
use crate::tuning::SceneConfig;

/// Which revision of the game to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum ScenePreset {
    Classic,
    #[default]
    Adventure,
}

impl ScenePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenePreset::Classic => "Classic",
            ScenePreset::Adventure => "Adventure",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(ScenePreset::Classic),
            "adventure" | "adv" => Some(ScenePreset::Adventure),
            _ => None,
        }
    }

    pub fn scene_config(&self) -> SceneConfig {
        match self {
            ScenePreset::Classic => SceneConfig::classic(),
            ScenePreset::Adventure => SceneConfig::adventure(),
        }
    }
}

impl<'de> Deserialize<'de> for ScenePreset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        ScenePreset::from_str(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown preset `{name}`")))
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preset: ScenePreset,
    /// Upper bound on the per-frame time step in seconds. `None` passes the
    /// measured frame time through unchanged, stalls included.
    pub max_frame_dt: Option<f32>,
}

impl Settings {
    pub fn from_preset(preset: ScenePreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    /// Parse settings JSON; an empty string means defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_json::from_str(json)?;
        log::info!(
            "Settings: preset {}, frame dt clamp {:?}",
            settings.preset.as_str(),
            settings.max_frame_dt
        );
        Ok(settings)
    }

    pub fn scene_config(&self) -> SceneConfig {
        self.preset.scene_config()
    }

    /// Apply the optional frame time clamp
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        match self.max_frame_dt {
            Some(max) if dt > max => {
                log::debug!("Frame dt {dt:.3}s clamped to {max:.3}s");
                max
            }
            _ => dt,
        }
    }
}
