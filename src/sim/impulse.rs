//! Flick gesture to launch impulse

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::FLICK_BASE_MAGNITUDE;
use crate::error::GestureError;

/// Tunables for turning a drag into an impulse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlickTuning {
    /// Impulse length for every accepted flick
    pub base_magnitude: f32,
    /// Horizontal drag is divided by this (>= 1) to tame side-to-side aim
    pub horizontal_damping: f32,
}

impl Default for FlickTuning {
    fn default() -> Self {
        Self {
            base_magnitude: FLICK_BASE_MAGNITUDE,
            horizontal_damping: 1.0,
        }
    }
}

/// Compute the launch impulse for a drag from `start` to `end`
///
/// The horizontal component is damped before normalizing, so damping bends
/// the direction toward vertical without changing the magnitude.
pub fn flick_impulse(start: Vec2, end: Vec2, tuning: &FlickTuning) -> Result<Vec2, GestureError> {
    let delta = end - start;
    let damped = Vec2::new(delta.x / tuning.horizontal_damping, delta.y);
    let length = damped.length();

    if !length.is_finite() || length <= f32::EPSILON {
        return Err(GestureError::Degenerate { start, end });
    }

    Ok(damped / length * tuning.base_magnitude)
}
