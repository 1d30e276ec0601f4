//! Game tuning and variants
//!
//! Two versions of the game shipped with different rules and feel. Both are
//! presets of the same `Settings`; `Variant::Sensor` is the default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::{BasketGeometry, FlickTuning};

/// Which phase a fresh session starts in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StartMode {
    /// Ball is live immediately
    #[default]
    Live,
    /// Idle until the first tap anywhere
    WaitForTap,
}

/// Which sensor event counts as a made shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoringTrigger {
    /// Ball entered the sensor
    OnEnter,
    /// Ball left the sensor after passing through
    #[default]
    OnExit,
}

/// Named presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Variant {
    /// Live start, score on sensor exit
    #[default]
    Sensor,
    /// Tap to start, score on sensor entry, damped side aim
    Solid,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Sensor => "sensor",
            Variant::Solid => "solid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sensor" => Some(Variant::Sensor),
            "solid" => Some(Variant::Solid),
            _ => None,
        }
    }
}

/// Physics world parameters for the bundled simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub playfield: Vec2,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub restitution: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            playfield: Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            gravity: GRAVITY,
            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,
            restitution: BALL_RESTITUTION,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub start_mode: StartMode,
    pub scoring_trigger: ScoringTrigger,
    pub flick: FlickTuning,
    /// Height above the rim the ball must reach before the basket engages
    pub apex_margin: f32,
    pub basket: BasketGeometry,
    /// Launch shrink factor (cosmetic)
    pub shrink_scale: f32,
    /// Seconds the launch shrink takes
    pub shrink_duration: f32,
    /// Respawn the ball at a random x after a made shot
    pub randomize_reset_x: bool,
    /// Seed for the respawn RNG
    pub seed: u64,
    pub world: WorldSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_mode: StartMode::Live,
            scoring_trigger: ScoringTrigger::OnExit,
            flick: FlickTuning::default(),
            apex_margin: APEX_MARGIN,
            basket: BasketGeometry::default(),
            shrink_scale: SHRINK_SCALE,
            shrink_duration: SHRINK_DURATION,
            randomize_reset_x: true,
            seed: 0x5eed,
            world: WorldSettings::default(),
        }
    }
}

impl Settings {
    /// Settings for a named variant
    pub fn from_variant(variant: Variant) -> Self {
        match variant {
            Variant::Sensor => Self::default(),
            Variant::Solid => Self {
                start_mode: StartMode::WaitForTap,
                scoring_trigger: ScoringTrigger::OnEnter,
                flick: FlickTuning {
                    base_magnitude: 850.0,
                    horizontal_damping: 2.0,
                },
                ..Self::default()
            },
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid(format!("{name} must be positive, got {v}")))
            }
        };
        let non_negative = |name: &str, v: f32| {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid(format!(
                    "{name} must be finite and non-negative, got {v}"
                )))
            }
        };

        positive("flick.base_magnitude", self.flick.base_magnitude)?;
        if !(self.flick.horizontal_damping >= 1.0 && self.flick.horizontal_damping.is_finite()) {
            return Err(SettingsError::Invalid(format!(
                "flick.horizontal_damping must be >= 1, got {}",
                self.flick.horizontal_damping
            )));
        }
        positive("basket.width", self.basket.width)?;
        positive("basket.ring_height", self.basket.ring_height)?;
        if self.basket.width <= 4.0 * self.basket.ring_height {
            return Err(SettingsError::Invalid(
                "basket.width leaves no opening between the rim stubs".to_string(),
            ));
        }
        positive("shrink_scale", self.shrink_scale)?;
        // A negative margin would engage the rim under a resting ball
        non_negative("apex_margin", self.apex_margin)?;
        non_negative("shrink_duration", self.shrink_duration)?;
        positive("world.playfield.x", self.world.playfield.x)?;
        positive("world.playfield.y", self.world.playfield.y)?;
        positive("world.ball_radius", self.world.ball_radius)?;
        positive("world.ball_mass", self.world.ball_mass)?;
        Ok(())
    }
}
