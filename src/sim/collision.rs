//! Collision detection and response for edge geometry
//!
//! The basket is built from thin edges (two rim stubs, one sensor line), so
//! everything here is circle-versus-segment with a couple of rectangle helpers
//! for frames and hit testing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Whether two rectangles share any area (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Closest point inside the rectangle
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// A line segment (edge body piece)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn offset(&self, by: Vec2) -> Self {
        Self {
            a: self.a + by,
            b: self.b + by,
        }
    }

    /// Closest point on the segment to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let ab = self.b - self.a;
        let len_sq = ab.length_squared();
        if len_sq <= f32::EPSILON {
            return self.a;
        }
        let t = ((p - self.a).dot(ab) / len_sq).clamp(0.0, 1.0);
        self.a + ab * t
    }

    pub fn distance_to(&self, p: Vec2) -> f32 {
        (p - self.closest_point(p)).length()
    }
}

/// Ball-versus-edge contact
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    pub hit: bool,
    /// Unit push-out direction, toward the ball center
    pub normal: Vec2,
    /// Overlap depth along `normal`
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a ball and a segment
pub fn ball_segment_collision(ball_pos: Vec2, ball_radius: f32, segment: &Segment) -> CollisionResult {
    let closest = segment.closest_point(ball_pos);
    let offset = ball_pos - closest;
    let dist = offset.length();

    if dist >= ball_radius {
        return CollisionResult::miss();
    }

    // Center exactly on the edge: push out along the segment's left-hand normal
    let normal = if dist > f32::EPSILON {
        offset / dist
    } else {
        (segment.b - segment.a).perp().normalize_or_zero()
    };

    CollisionResult {
        hit: true,
        normal,
        penetration: ball_radius - dist,
    }
}

/// Whether a circle overlaps a rectangle
pub fn ball_rect_overlap(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> bool {
    (ball_pos - rect.clamp(ball_pos)).length_squared() < ball_radius * ball_radius
}

/// Bounce off a surface, keeping `restitution` of the normal speed
///
/// Leaves velocity alone when the ball is already separating.
pub fn bounce_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let vn = velocity.dot(normal);
    if vn >= 0.0 {
        return velocity;
    }
    velocity - (1.0 + restitution) * vn * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_segment_collision_from_above() {
        let edge = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));

        let result = ball_segment_collision(Vec2::new(50.0, 5.0), 8.0, &edge);
        assert!(result.hit);
        assert!((result.normal - Vec2::Y).length() < 1e-5);
        assert!((result.penetration - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_ball_segment_collision_endpoint() {
        let edge = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0));

        // Beyond the right endpoint, diagonally
        let result = ball_segment_collision(Vec2::new(24.0, 3.0), 8.0, &edge);
        assert!(result.hit);
        assert!(result.normal.x > 0.0 && result.normal.y > 0.0);
        assert!((result.penetration - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_ball_segment_miss() {
        let edge = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0));
        let result = ball_segment_collision(Vec2::new(10.0, 30.0), 8.0, &edge);
        assert!(!result.hit);
    }

    #[test]
    fn test_bounce_keeps_tangent_and_ignores_separating() {
        let bounced = bounce_velocity(Vec2::new(30.0, -100.0), Vec2::Y, 0.5);
        assert!((bounced.x - 30.0).abs() < 1e-4);
        assert!((bounced.y - 50.0).abs() < 1e-4);

        let separating = Vec2::new(0.0, 20.0);
        assert_eq!(bounce_velocity(separating, Vec2::Y, 0.5), separating);
    }

    #[test]
    fn test_rect_intersection() {
        let field = Rect::new(Vec2::ZERO, Vec2::new(400.0, 600.0));
        let inside = Rect::from_center(Vec2::new(200.0, 300.0), Vec2::splat(30.0));
        let below = Rect::from_center(Vec2::new(200.0, -31.0), Vec2::splat(30.0));
        let touching = Rect::from_center(Vec2::new(200.0, -30.0), Vec2::splat(30.0));

        assert!(field.intersects(&inside));
        assert!(!field.intersects(&below));
        assert!(!field.intersects(&touching));
    }

    #[test]
    fn test_ball_rect_overlap() {
        let rect = Rect::from_center(Vec2::ZERO, Vec2::new(10.0, 5.0));
        assert!(ball_rect_overlap(Vec2::new(0.0, 8.0), 4.0, &rect));
        assert!(!ball_rect_overlap(Vec2::new(0.0, 10.0), 4.0, &rect));
    }
}
