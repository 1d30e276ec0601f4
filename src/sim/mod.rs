//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders or plays
//! sound; physics goes through `PhysicsWorld` and host output through
//! `Presentation`:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Input applied at tick boundaries

pub mod basket;
pub mod collision;
pub mod impulse;
pub mod phase;
pub mod physics;
pub mod scene;
pub mod scoring;
pub mod state;
pub mod world;

pub use basket::{Basket, BasketGeometry};
pub use collision::{CollisionResult, Rect, Segment, ball_segment_collision};
pub use impulse::{FlickTuning, flick_impulse};
pub use phase::{GamePhase, Transition};
pub use physics::{BodyId, Category, CollisionMasks, ContactEvent, PhysicsWorld};
pub use scene::{Scene, SceneContext};
pub use state::{BallState, GameSession, ZOrder};
pub use world::SimWorld;
