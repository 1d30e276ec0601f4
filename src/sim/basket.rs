//! The hoop: a solid rim plus a contact-only scoring sensor
//!
//! Both pieces start inert. The scoring controller engages them once the
//! ball has risen above the rim, so a ball coming up from below passes
//! straight through and cannot score on the way up.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Segment;
use super::physics::{BodyId, Category, CollisionMasks, ContactEvent, PhysicsWorld};
use crate::consts::{BASKET_WIDTH, RING_HEIGHT, SENSOR_DEPTH};

/// Hoop dimensions, in basket-local coordinates (origin at rim's left end)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasketGeometry {
    pub width: f32,
    pub ring_height: f32,
    /// Distance of the sensor line below the rim origin
    pub sensor_depth: f32,
}

impl Default for BasketGeometry {
    fn default() -> Self {
        Self {
            width: BASKET_WIDTH,
            ring_height: RING_HEIGHT,
            sensor_depth: SENSOR_DEPTH,
        }
    }
}

impl BasketGeometry {
    /// The two rim stubs at either end of the hoop
    pub fn ring_edges(&self) -> [Segment; 2] {
        let h = self.ring_height;
        let w = self.width;
        [
            Segment::new(Vec2::new(0.0, h), Vec2::new(2.0 * h, h)),
            Segment::new(Vec2::new(w - 2.0 * h, h), Vec2::new(w, h)),
        ]
    }

    /// Sensor line spanning the opening, below the rim
    ///
    /// It only covers the gap between the stubs so a ball has to go through
    /// the opening to cross it.
    pub fn sensor_edge(&self) -> Segment {
        let h = self.ring_height;
        let y = -self.sensor_depth;
        Segment::new(Vec2::new(2.0 * h, y), Vec2::new(self.width - 2.0 * h, y))
    }
}

/// Rim + sensor pair with a single enable switch
#[derive(Debug, Clone)]
pub struct Basket {
    pub position: Vec2,
    pub geometry: BasketGeometry,
    pub ring: BodyId,
    pub sensor: BodyId,
    enabled: bool,
}

impl Basket {
    /// Create the rim and sensor bodies in `world`, disabled
    pub fn spawn(world: &mut dyn PhysicsWorld, position: Vec2, geometry: BasketGeometry) -> Self {
        let ring = world.spawn_edges("ring", position, &geometry.ring_edges());
        let sensor = world.spawn_edges("sensor", position, &[geometry.sensor_edge()]);

        let mut basket = Self {
            position,
            geometry,
            ring,
            sensor,
            enabled: true,
        };
        basket.set_enabled(world, false);
        basket
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Engage or release both rim and sensor
    pub fn set_enabled(&mut self, world: &mut dyn PhysicsWorld, enabled: bool) {
        self.enabled = enabled;
        world.set_masks(self.ring, Self::ring_masks(enabled));
        world.set_masks(self.sensor, Self::sensor_masks(enabled));
    }

    /// Rim: real collision response while enabled
    pub fn ring_masks(enabled: bool) -> CollisionMasks {
        if enabled {
            CollisionMasks {
                category: Category::BASKET,
                collision: Category::BALL,
                contact_test: Category::NONE,
            }
        } else {
            CollisionMasks::INERT
        }
    }

    /// Sensor: contact-test only, never collides
    pub fn sensor_masks(enabled: bool) -> CollisionMasks {
        CollisionMasks {
            category: Category::SENSOR,
            collision: Category::NONE,
            contact_test: if enabled { Category::BALL } else { Category::NONE },
        }
    }

    /// World height of the basket origin
    pub fn rim_y(&self) -> f32 {
        self.position.y
    }

    /// Height the ball must exceed before the basket engages
    pub fn apex_y(&self, margin: f32) -> f32 {
        self.rim_y() + margin
    }

    /// Whether a contact event is between the sensor and `ball`
    pub fn is_sensor_contact(&self, event: &ContactEvent, ball: BodyId) -> bool {
        event.involves(self.sensor, ball)
    }
}
