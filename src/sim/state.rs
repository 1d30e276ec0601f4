//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Per-session score bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Made shots this session (never decreases)
    pub score: u32,
    /// Set once when the run ends on a miss
    pub is_game_over: bool,
    /// Current flight already went through the net
    pub has_scored_current_shot: bool,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a made shot for the current flight
    pub fn record_score(&mut self) {
        self.score += 1;
        self.has_scored_current_shot = true;
    }

    /// New flight or ball reset
    pub fn clear_shot(&mut self) {
        self.has_scored_current_shot = false;
    }
}

/// Ball draw order relative to the rim
///
/// Flipping to `BehindRim` once the ball crests makes it look like it drops
/// through the hoop plane instead of over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZOrder {
    BehindRim,
    #[default]
    InFrontOfRim,
}

/// Snapshot of the ball body as reported by the physics world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub z_order: ZOrder,
    pub affected_by_gravity: bool,
    /// Cosmetic scale (1.0 = full size)
    pub scale: f32,
}

impl Default for BallState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            z_order: ZOrder::InFrontOfRim,
            affected_by_gravity: false,
            scale: 1.0,
        }
    }
}
