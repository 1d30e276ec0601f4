//! Error types
//!
//! Only construction and configuration failures propagate. Gameplay
//! conditions (wrong-state taps, stale contacts) are silent no-ops.

use glam::Vec2;
use thiserror::Error;

/// A flick gesture that cannot be turned into an impulse
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GestureError {
    /// Drag start and end coincide (or are non-finite), so there is no direction
    #[error("degenerate gesture: drag from {start} to {end} has no usable length")]
    Degenerate { start: Vec2, end: Vec2 },
}

/// Fatal problems while building a scene
#[derive(Debug, Error)]
pub enum SceneError {
    /// A node the game needs (ball, backboard) is not present in the world
    #[error("scene is missing required node `{0}`")]
    MissingNode(String),
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

/// Settings loading and validation failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}
