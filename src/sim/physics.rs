//! Physics world adapter
//!
//! The game core never touches physics bodies directly. It holds `BodyId`
//! handles and goes through `PhysicsWorld`, which any engine binding (or the
//! bundled `SimWorld`) implements.

use std::ops::BitOr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, Segment};
use super::state::{BallState, ZOrder};

/// Handle to a body owned by a physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Collision category bit mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category(pub u32);

impl Category {
    /// Placeholder category that nothing else tests against
    pub const NONE: Category = Category(1 << 0);
    pub const BALL: Category = Category(1 << 1);
    pub const BASKET: Category = Category(1 << 2);
    pub const SENSOR: Category = Category(1 << 3);

    pub fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Category {
    type Output = Category;

    fn bitor(self, rhs: Category) -> Category {
        Category(self.0 | rhs.0)
    }
}

/// The three masks that decide how a body interacts with others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionMasks {
    /// What this body is
    pub category: Category,
    /// Categories this body physically bounces off
    pub collision: Category,
    /// Categories whose overlap with this body is reported as contact events
    pub contact_test: Category,
}

impl CollisionMasks {
    /// Interacts with nothing
    pub const INERT: CollisionMasks = CollisionMasks {
        category: Category::NONE,
        collision: Category::NONE,
        contact_test: Category::NONE,
    };

    /// Whether `self` gets a collision response from touching `other`
    pub fn collides_with(&self, other: &CollisionMasks) -> bool {
        self.collision.intersects(other.category)
    }

    /// Whether an overlap between the two bodies produces contact events
    pub fn reports_contact_with(&self, other: &CollisionMasks) -> bool {
        self.category.intersects(other.contact_test) || other.category.intersects(self.contact_test)
    }
}

impl Default for CollisionMasks {
    fn default() -> Self {
        Self::INERT
    }
}

/// Overlap start/end between two bodies' contact regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    Begin(BodyId, BodyId),
    End(BodyId, BodyId),
}

impl ContactEvent {
    pub fn bodies(&self) -> (BodyId, BodyId) {
        match *self {
            ContactEvent::Begin(a, b) | ContactEvent::End(a, b) => (a, b),
        }
    }

    /// Whether this event is between `x` and `y`, in either order
    pub fn involves(&self, x: BodyId, y: BodyId) -> bool {
        let (a, b) = self.bodies();
        (a == x && b == y) || (a == y && b == x)
    }
}

/// Everything the game core needs from a physics engine
///
/// `BodyId`s passed in must come from the same world.
pub trait PhysicsWorld {
    /// Visible playfield, origin at bottom-left
    fn playfield(&self) -> Rect;

    /// Look up a body by scene node name
    fn find_body(&self, name: &str) -> Option<BodyId>;

    /// Create a static body made of edges, positioned at `origin`
    fn spawn_edges(&mut self, name: &str, origin: Vec2, edges: &[Segment]) -> BodyId;

    /// Topmost body containing `point`
    fn body_at(&self, point: Vec2) -> Option<BodyId>;

    fn position(&self, body: BodyId) -> Vec2;

    fn set_position(&mut self, body: BodyId, position: Vec2);

    /// Visual bounding box (scale included)
    fn frame(&self, body: BodyId) -> Rect;

    /// Snapshot of a dynamic body
    fn ball_state(&self, body: BodyId) -> BallState;

    fn masks(&self, body: BodyId) -> CollisionMasks;

    fn set_masks(&mut self, body: BodyId, masks: CollisionMasks);

    /// Queue an impulse; it takes effect on the next `step`
    fn apply_impulse(&mut self, body: BodyId, impulse: Vec2);

    fn set_affected_by_gravity(&mut self, body: BodyId, enabled: bool);

    fn set_z_order(&mut self, body: BodyId, z_order: ZOrder);

    /// Cosmetic scale animation by `factor` over `duration` seconds
    fn run_scale(&mut self, body: BodyId, factor: f32, duration: f32);

    /// Zero velocity, spin and rotation, drop pending impulses, restore scale
    fn reset_motion(&mut self, body: BodyId);

    /// Advance the simulation, appending contact begin/end events
    fn step(&mut self, dt: f32, contacts: &mut Vec<ContactEvent>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_contact_only_when_enabled() {
        let ball = CollisionMasks {
            category: Category::BALL,
            collision: Category::BASKET,
            contact_test: Category::NONE,
        };
        let sensor_off = CollisionMasks {
            category: Category::SENSOR,
            collision: Category::NONE,
            contact_test: Category::NONE,
        };
        let sensor_on = CollisionMasks {
            contact_test: Category::BALL,
            ..sensor_off
        };

        assert!(!ball.reports_contact_with(&sensor_off));
        assert!(ball.reports_contact_with(&sensor_on));
        assert!(sensor_on.reports_contact_with(&ball));
        assert!(!ball.collides_with(&sensor_on));
    }

    #[test]
    fn test_ring_collides_only_as_basket() {
        let ball = CollisionMasks {
            category: Category::BALL,
            collision: Category::BASKET,
            contact_test: Category::NONE,
        };
        let ring_on = CollisionMasks {
            category: Category::BASKET,
            collision: Category::BALL,
            contact_test: Category::NONE,
        };

        assert!(ball.collides_with(&ring_on));
        assert!(!ball.collides_with(&CollisionMasks::INERT));
    }

    #[test]
    fn test_contact_event_involves_either_order() {
        let e = ContactEvent::End(BodyId(3), BodyId(1));
        assert!(e.involves(BodyId(1), BodyId(3)));
        assert!(e.involves(BodyId(3), BodyId(1)));
        assert!(!e.involves(BodyId(1), BodyId(2)));
        assert_eq!((Category::BALL | Category::SENSOR).0, 0b1010);
    }
}
