//! Hoop Shot - A flick-to-shoot basketball arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (impulse math, basket, physics adapter, state machine, scoring)
//! - `input`: Touch events queued between ticks
//! - `presentation`: Host-facing notifications (score, game over, resets, sound cues)
//! - `settings`: Data-driven tuning and game variants

pub mod audio;
pub mod error;
pub mod input;
pub mod presentation;
pub mod settings;
pub mod sim;

pub use error::{GestureError, SceneError, SettingsError};
pub use presentation::{Presentation, PresentationEvent, RecordingPresentation};
pub use settings::{ScoringTrigger, Settings, StartMode, Variant};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default playfield width (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    /// Default playfield height (pixels)
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Hoop width, rim stub to rim stub
    pub const BASKET_WIDTH: f32 = 175.0;
    /// Rim plane height above the basket origin; stubs are twice this long
    pub const RING_HEIGHT: f32 = 10.0;
    /// Sensor edge sits this far below the rim plane
    pub const SENSOR_DEPTH: f32 = 50.0;
    /// Ball must rise this far above the rim before the basket engages
    pub const APEX_MARGIN: f32 = 50.0;

    /// Backboard sits at 2/3 of the playfield height plus this offset
    pub const BACKBOARD_OFFSET: f32 = 20.0;
    /// Backboard half extents (x, y)
    pub const BACKBOARD_HALF_SIZE: (f32, f32) = (110.0, 70.0);

    /// Ball radius (pixels)
    pub const BALL_RADIUS: f32 = 30.0;
    /// Ball mass; impulses divide by this
    pub const BALL_MASS: f32 = 1.0;
    /// Gap between the bottom of the playfield and the resting ball
    pub const BALL_REST_HEIGHT: f32 = 50.0;
    /// Share of normal speed kept when bouncing off the rim
    pub const BALL_RESTITUTION: f32 = 0.5;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 980.0;

    /// Flick impulse magnitude
    pub const FLICK_BASE_MAGNITUDE: f32 = 1000.0;

    /// Cosmetic shrink applied to the ball on launch
    pub const SHRINK_SCALE: f32 = 0.7;
    /// Seconds the launch shrink takes
    pub const SHRINK_DURATION: f32 = 1.0;

    /// Ball node name looked up at startup
    pub const BALL_NODE: &str = "ball";
    /// Backboard node name looked up at startup
    pub const BACKBOARD_NODE: &str = "backboard";
}
