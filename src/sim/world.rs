//! Built-in physics world
//!
//! A small deterministic engine covering exactly what the game needs: one or
//! more dynamic circles under gravity, static edge and box bodies, mask-based
//! collision filtering and begin/end contact reporting. Hosts with their own
//! engine implement `PhysicsWorld` instead.

use std::collections::BTreeSet;

use glam::Vec2;

use super::collision::{
    Rect, Segment, ball_rect_overlap, ball_segment_collision, bounce_velocity,
};
use super::physics::{BodyId, CollisionMasks, ContactEvent, PhysicsWorld};
use super::state::{BallState, ZOrder};
use crate::consts::*;
use crate::settings::WorldSettings;

/// Body shape
#[derive(Debug, Clone)]
pub enum Shape {
    Circle { radius: f32 },
    Box { half: Vec2 },
    /// Edges in body-local coordinates
    Edges(Vec<Segment>),
}

/// Linear scale animation toward a target
#[derive(Debug, Clone, Copy)]
struct ScaleAnim {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

/// A body in the world
#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub shape: Shape,
    pub pos: Vec2,
    pub vel: Vec2,
    pub angular_vel: f32,
    pub rotation: f32,
    pub mass: f32,
    pub restitution: f32,
    /// Static bodies never move and never respond to collisions
    pub dynamic: bool,
    pub affected_by_gravity: bool,
    pub masks: CollisionMasks,
    pub z_order: ZOrder,
    pub scale: f32,
    scale_anim: Option<ScaleAnim>,
    pending_impulse: Vec2,
}

impl Body {
    fn new(name: &str, shape: Shape, pos: Vec2, dynamic: bool) -> Self {
        Self {
            name: name.to_string(),
            shape,
            pos,
            vel: Vec2::ZERO,
            angular_vel: 0.0,
            rotation: 0.0,
            mass: 1.0,
            restitution: BALL_RESTITUTION,
            dynamic,
            affected_by_gravity: false,
            masks: CollisionMasks::INERT,
            z_order: ZOrder::InFrontOfRim,
            scale: 1.0,
            scale_anim: None,
            pending_impulse: Vec2::ZERO,
        }
    }

    /// World-space edges (empty for non-edge shapes)
    fn world_edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let edges: &[Segment] = match &self.shape {
            Shape::Edges(edges) => edges,
            _ => &[],
        };
        edges.iter().map(move |e| e.offset(self.pos))
    }

    fn frame(&self) -> Rect {
        match &self.shape {
            Shape::Circle { radius } => Rect::from_center(self.pos, Vec2::splat(radius * self.scale)),
            Shape::Box { half } => Rect::from_center(self.pos, *half * self.scale),
            Shape::Edges(edges) => {
                let mut min = Vec2::splat(f32::MAX);
                let mut max = Vec2::splat(f32::MIN);
                for e in edges {
                    min = min.min(e.a).min(e.b);
                    max = max.max(e.a).max(e.b);
                }
                if edges.is_empty() {
                    Rect::new(self.pos, self.pos)
                } else {
                    Rect::new(min + self.pos, max + self.pos)
                }
            }
        }
    }

    fn contains(&self, p: Vec2) -> bool {
        match &self.shape {
            Shape::Circle { radius } => (p - self.pos).length() <= radius * self.scale,
            Shape::Box { .. } => self.frame().contains(p),
            Shape::Edges(_) => false,
        }
    }

    fn advance_scale(&mut self, dt: f32) {
        if let Some(anim) = self.scale_anim.as_mut() {
            anim.elapsed = (anim.elapsed + dt).min(anim.duration);
            let t = if anim.duration > 0.0 {
                anim.elapsed / anim.duration
            } else {
                1.0
            };
            self.scale = anim.from + (anim.to - anim.from) * t;
            if anim.elapsed >= anim.duration {
                self.scale_anim = None;
            }
        }
    }
}

/// Deterministic physics world
#[derive(Debug, Clone)]
pub struct SimWorld {
    size: Vec2,
    /// Acceleration applied to gravity-affected bodies
    pub gravity: Vec2,
    bodies: Vec<Body>,
    /// Overlapping contact pairs (lower id first)
    contacts: BTreeSet<(BodyId, BodyId)>,
}

impl SimWorld {
    /// Empty world with a playfield of `size`, origin bottom-left
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            gravity: Vec2::new(0.0, -GRAVITY),
            bodies: Vec::new(),
            contacts: BTreeSet::new(),
        }
    }

    /// The standard court: a ball resting near the bottom and a backboard
    pub fn court(settings: &WorldSettings) -> Self {
        let mut world = Self::new(settings.playfield);
        world.gravity = Vec2::new(0.0, -settings.gravity);

        let (bw, bh) = BACKBOARD_HALF_SIZE;
        world.add_box(
            BACKBOARD_NODE,
            Vec2::new(settings.playfield.x / 2.0, settings.playfield.y * 2.0 / 3.0),
            Vec2::new(bw, bh),
        );
        let ball = world.add_ball(
            BALL_NODE,
            Vec2::new(settings.playfield.x / 2.0, settings.ball_radius + BALL_REST_HEIGHT),
            settings.ball_radius,
            settings.ball_mass,
        );
        world.body_mut(ball).restitution = settings.restitution;
        world
    }

    /// Add a dynamic circle
    pub fn add_ball(&mut self, name: &str, pos: Vec2, radius: f32, mass: f32) -> BodyId {
        let mut body = Body::new(name, Shape::Circle { radius }, pos, true);
        body.mass = mass.max(f32::EPSILON);
        self.push(body)
    }

    /// Add a static box
    pub fn add_box(&mut self, name: &str, pos: Vec2, half: Vec2) -> BodyId {
        self.push(Body::new(name, Shape::Box { half }, pos, false))
    }

    fn push(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(body);
        id
    }

    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.0 as usize]
    }

    pub fn body_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.0 as usize]
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Set a body's velocity directly
    pub fn set_velocity(&mut self, id: BodyId, vel: Vec2) {
        self.body_mut(id).vel = vel;
    }

    /// Integrate one dynamic body and resolve collisions against static bodies
    fn integrate(&mut self, index: usize, dt: f32) {
        let gravity = self.gravity;
        let (statics_before, rest) = self.bodies.split_at_mut(index);
        let Some((body, statics_after)) = rest.split_first_mut() else {
            return;
        };

        if body.pending_impulse != Vec2::ZERO {
            body.vel += body.pending_impulse / body.mass;
            body.pending_impulse = Vec2::ZERO;
        }
        if body.affected_by_gravity {
            body.vel += gravity * dt;
        }
        body.pos += body.vel * dt;
        body.rotation += body.angular_vel * dt;
        body.advance_scale(dt);

        let Shape::Circle { radius } = body.shape else {
            return;
        };

        for other in statics_before.iter().chain(statics_after.iter()) {
            if other.dynamic || !body.masks.collides_with(&other.masks) {
                continue;
            }
            for edge in other.world_edges() {
                let hit = ball_segment_collision(body.pos, radius, &edge);
                if !hit.hit {
                    continue;
                }
                body.pos += hit.normal * hit.penetration;
                body.vel = bounce_velocity(body.vel, hit.normal, body.restitution);
                // Rolling contact sets spin from the tangential speed
                let tangent = hit.normal.perp();
                body.angular_vel = -body.vel.dot(tangent) / radius;
            }
        }
    }

    /// Whether a circle body overlaps another body
    fn overlaps(circle: &Body, other: &Body) -> bool {
        let Shape::Circle { radius } = circle.shape else {
            return false;
        };
        match &other.shape {
            Shape::Circle { radius: r2 } => (circle.pos - other.pos).length() < radius + r2,
            Shape::Box { .. } => ball_rect_overlap(circle.pos, radius, &other.frame()),
            Shape::Edges(_) => other
                .world_edges()
                .any(|e| e.distance_to(circle.pos) < radius),
        }
    }

    /// Current set of overlapping, contact-reporting pairs
    fn collect_contacts(&self) -> BTreeSet<(BodyId, BodyId)> {
        let mut current = BTreeSet::new();
        for (i, a) in self.bodies.iter().enumerate() {
            if !a.dynamic {
                continue;
            }
            for (j, b) in self.bodies.iter().enumerate() {
                if i == j || !a.masks.reports_contact_with(&b.masks) {
                    continue;
                }
                if Self::overlaps(a, b) {
                    current.insert(ordered(BodyId(i as u32), BodyId(j as u32)));
                }
            }
        }
        current
    }
}

fn ordered(a: BodyId, b: BodyId) -> (BodyId, BodyId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl PhysicsWorld for SimWorld {
    fn playfield(&self) -> Rect {
        Rect::new(Vec2::ZERO, self.size)
    }

    fn find_body(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name == name)
            .map(|i| BodyId(i as u32))
    }

    fn spawn_edges(&mut self, name: &str, origin: Vec2, edges: &[Segment]) -> BodyId {
        self.push(Body::new(name, Shape::Edges(edges.to_vec()), origin, false))
    }

    fn body_at(&self, point: Vec2) -> Option<BodyId> {
        // Later bodies draw on top; front-of-rim beats behind-rim
        let topmost = |z: ZOrder| {
            self.bodies
                .iter()
                .enumerate()
                .rev()
                .find(|(_, b)| b.z_order == z && b.contains(point))
                .map(|(i, _)| BodyId(i as u32))
        };
        topmost(ZOrder::InFrontOfRim).or_else(|| topmost(ZOrder::BehindRim))
    }

    fn position(&self, body: BodyId) -> Vec2 {
        self.body(body).pos
    }

    fn set_position(&mut self, body: BodyId, position: Vec2) {
        self.body_mut(body).pos = position;
    }

    fn frame(&self, body: BodyId) -> Rect {
        self.body(body).frame()
    }

    fn ball_state(&self, body: BodyId) -> BallState {
        let b = self.body(body);
        BallState {
            position: b.pos,
            velocity: b.vel,
            angular_velocity: b.angular_vel,
            z_order: b.z_order,
            affected_by_gravity: b.affected_by_gravity,
            scale: b.scale,
        }
    }

    fn masks(&self, body: BodyId) -> CollisionMasks {
        self.body(body).masks
    }

    fn set_masks(&mut self, body: BodyId, masks: CollisionMasks) {
        self.body_mut(body).masks = masks;
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec2) {
        self.body_mut(body).pending_impulse += impulse;
    }

    fn set_affected_by_gravity(&mut self, body: BodyId, enabled: bool) {
        self.body_mut(body).affected_by_gravity = enabled;
    }

    fn set_z_order(&mut self, body: BodyId, z_order: ZOrder) {
        self.body_mut(body).z_order = z_order;
    }

    fn run_scale(&mut self, body: BodyId, factor: f32, duration: f32) {
        let b = self.body_mut(body);
        b.scale_anim = Some(ScaleAnim {
            from: b.scale,
            to: b.scale * factor,
            duration: duration.max(0.0),
            elapsed: 0.0,
        });
    }

    fn reset_motion(&mut self, body: BodyId) {
        let b = self.body_mut(body);
        b.vel = Vec2::ZERO;
        b.angular_vel = 0.0;
        b.rotation = 0.0;
        b.pending_impulse = Vec2::ZERO;
        b.scale = 1.0;
        b.scale_anim = None;
    }

    fn step(&mut self, dt: f32, contacts: &mut Vec<ContactEvent>) {
        for i in 0..self.bodies.len() {
            if self.bodies[i].dynamic {
                self.integrate(i, dt);
            }
        }

        let current = self.collect_contacts();
        for &(a, b) in current.difference(&self.contacts) {
            contacts.push(ContactEvent::Begin(a, b));
        }
        for &(a, b) in self.contacts.difference(&current) {
            contacts.push(ContactEvent::End(a, b));
        }
        self.contacts = current;
    }
}
