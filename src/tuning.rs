//! Data-driven game balance
//!
//! Desktop and touch devices play differently enough to need separate
//! constant sets; they live here as tuning profiles, and a profile can be
//! overridden from a JSON file for balance experiments.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Which input device the balance values target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlProfile {
    #[default]
    Desktop,
    Touch,
}

impl ControlProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlProfile::Desktop => "Desktop",
            ControlProfile::Touch => "Touch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" | "keyboard" => Some(ControlProfile::Desktop),
            "touch" | "mobile" => Some(ControlProfile::Touch),
            _ => None,
        }
    }
}

/// Balance values for one control profile
///
/// Steps are px per tick at the fixed 60 Hz timestep; intervals are seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub profile: ControlProfile,
    /// Player movement per held direction per tick
    pub player_step: f32,
    /// Bullet travel per tick
    pub bullet_step: f32,
    /// Enemy descent speed at difficulty level 0
    pub base_enemy_speed: f32,
    /// Upper bound for the random per-enemy speed variance
    pub enemy_speed_variance: f32,
    /// Speed added per difficulty level
    pub enemy_speed_increase: f32,
    /// Hard cap on the pre-variance enemy speed
    pub enemy_speed_cap: f32,
    /// Minimum seconds between auto-fire shots while dragging
    pub auto_fire_interval: f32,
    /// Fastest the spawn gate can get
    pub min_spawn_interval: f32,
    /// Spawn gate at difficulty level 0
    pub max_spawn_interval: f32,
    /// Seconds shaved off the gate per difficulty level
    pub spawn_rate_step: f32,
    pub enemy_size_min: f32,
    pub enemy_size_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::desktop()
    }
}

impl Tuning {
    pub fn desktop() -> Self {
        Self {
            profile: ControlProfile::Desktop,
            player_step: 12.0,
            bullet_step: 7.0,
            base_enemy_speed: 1.0,
            enemy_speed_variance: 0.6,
            enemy_speed_increase: 0.2,
            enemy_speed_cap: 3.0,
            auto_fire_interval: 0.3,
            min_spawn_interval: 0.5,
            max_spawn_interval: 1.5,
            spawn_rate_step: 0.2,
            enemy_size_min: 30.0,
            enemy_size_max: 50.0,
        }
    }

    /// Touch profile: slower ship for precision, faster and denser enemies
    pub fn touch() -> Self {
        Self {
            profile: ControlProfile::Touch,
            player_step: 5.0,
            bullet_step: 9.0,
            base_enemy_speed: 2.0,
            enemy_speed_variance: 0.8,
            enemy_speed_increase: 0.3,
            enemy_speed_cap: 3.0,
            auto_fire_interval: 0.2,
            min_spawn_interval: 0.2,
            max_spawn_interval: 0.8,
            spawn_rate_step: 0.25,
            enemy_size_min: 25.0,
            enemy_size_max: 45.0,
        }
    }

    pub fn for_profile(profile: ControlProfile) -> Self {
        match profile {
            ControlProfile::Desktop => Self::desktop(),
            ControlProfile::Touch => Self::touch(),
        }
    }

    /// Load tuning overrides from a JSON file, falling back to the given
    /// profile's defaults when the file is missing or malformed.
    pub fn load_or_default(path: &Path, profile: ControlProfile) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("bad tuning file {}: {err}", path.display());
                    Self::for_profile(profile)
                }
            },
            Err(_) => Self::for_profile(profile),
        }
    }

    /// Write the tuning out as pretty JSON (for producing a template to edit)
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
