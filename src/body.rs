/*
 * Body Module
 *
 * This module defines the Body (mover) struct: a particle with a location,
 * velocity, acceleration and mass, plus a bounding box and a colour used
 * only for display.
 *
 * The vector values of a Body never change unless `update()` is invoked.
 * Forces accumulate into acceleration, and `update()` integrates them:
 * 1. velocity += acceleration
 * 2. velocity is clamped to the velocity limit
 * 3. location += velocity
 * 4. acceleration is reset to zero
 */

use std::sync::{PoisonError, RwLock};

use rand::Rng;

use crate::error::{MoverError, MoverResult};
use crate::vector::Vector2D;

// Default velocity limit shared by every body that does not override it
pub const DEFAULT_VELOCITY_LIMIT: f64 = 5.0;

static SHARED_VELOCITY_LIMIT: RwLock<f64> = RwLock::new(DEFAULT_VELOCITY_LIMIT);

// Current process-wide velocity limit
pub fn shared_velocity_limit() -> f64 {
    *SHARED_VELOCITY_LIMIT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

// Change the process-wide velocity limit; bodies pick it up on their next update
pub fn set_shared_velocity_limit(limit: f64) -> MoverResult<()> {
    check_limit(limit)?;
    *SHARED_VELOCITY_LIMIT
        .write()
        .unwrap_or_else(PoisonError::into_inner) = limit;
    Ok(())
}

fn check_limit(limit: f64) -> MoverResult<()> {
    if limit.is_finite() && limit >= 0.0 {
        Ok(())
    } else {
        Err(MoverError::InvalidLimit(limit))
    }
}

// Which speed clamp a body applies during update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VelocityLimit {
    #[default]
    Shared,
    Fixed(f64),
    Unlimited,
}

impl VelocityLimit {
    pub fn resolve(&self) -> Option<f64> {
        match *self {
            VelocityLimit::Shared => Some(shared_velocity_limit()),
            VelocityLimit::Fixed(limit) => Some(limit),
            VelocityLimit::Unlimited => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 220, g: 220, b: 220 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

// Axis-aligned box anchored at a body's location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn center(&self) -> Vector2D {
        Vector2D::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Vector2D) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

// Read-only copy of the parts of a body a renderer needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub location: Vector2D,
    pub velocity: Vector2D,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl BodySnapshot {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.location.x,
            y: self.location.y,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    location: Vector2D,
    velocity: Vector2D,
    acceleration: Vector2D,
    mass: f64,
    width: f64,
    height: f64,
    limit: VelocityLimit,
    color: Color,
}

impl Body {
    // A massless body; applying a force to it fails with DivideByZero
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            location: Vector2D::new(x, y),
            velocity: Vector2D::ZERO,
            acceleration: Vector2D::ZERO,
            mass: 0.0,
            width,
            height,
            limit: VelocityLimit::Shared,
            color: Color::default(),
        }
    }

    pub fn with_mass(x: f64, y: f64, width: f64, height: f64, mass: f64) -> MoverResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(MoverError::InvalidMass(mass));
        }
        Ok(Self {
            mass,
            ..Self::new(x, y, width, height)
        })
    }

    // Accumulate force / mass into acceleration
    pub fn apply_force(&mut self, force: Vector2D) -> MoverResult<()> {
        if self.mass == 0.0 {
            return Err(MoverError::DivideByZero);
        }
        self.acceleration += force / self.mass;
        Ok(())
    }

    // Integrate one tick and clear the accumulated acceleration
    pub fn update(&mut self) {
        self.velocity += self.acceleration;

        if let Some(limit) = self.limit.resolve() {
            self.velocity.limit(limit);
        }

        self.location += self.velocity;

        self.acceleration = Vector2D::ZERO;
    }

    // Bounce off the left, right and bottom edges of a width x height area.
    // The top edge (y < 0) is intentionally left open.
    pub fn check_edges(&mut self, bounds_width: f64, bounds_height: f64) {
        if self.location.x > bounds_width {
            self.location.x = bounds_width;
            self.velocity.negate_x();
        } else if self.location.x < 0.0 {
            self.location.x = 0.0;
            self.velocity.negate_x();
        }

        if self.location.y > bounds_height {
            self.location.y = bounds_height;
            self.velocity.negate_y();
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.location.x,
            y: self.location.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            location: self.location,
            velocity: self.velocity,
            width: self.width,
            height: self.height,
            color: self.color,
        }
    }

    pub fn location(&self) -> Vector2D {
        self.location
    }

    pub fn set_location(&mut self, location: Vector2D) {
        self.location = location;
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector2D) {
        self.velocity = velocity;
    }

    pub fn acceleration(&self) -> Vector2D {
        self.acceleration
    }

    // Overwrite the acceleration for the next update
    pub fn set_acceleration(&mut self, acceleration: Vector2D) {
        self.acceleration = acceleration;
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_frame(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.location.set(x, y);
        self.width = width;
        self.height = height;
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    pub fn velocity_limit(&self) -> VelocityLimit {
        self.limit
    }

    pub fn set_velocity_limit(&mut self, limit: VelocityLimit) -> MoverResult<()> {
        if let VelocityLimit::Fixed(value) = limit {
            check_limit(value)?;
        }
        self.limit = limit;
        Ok(())
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f64 = 1e-12;

    fn heavy(mass: f64) -> Body {
        let mut body = Body::with_mass(0.0, 0.0, 10.0, 10.0, mass).unwrap();
        body.set_velocity_limit(VelocityLimit::Unlimited).unwrap();
        body
    }

    #[test]
    fn force_is_scaled_by_mass() {
        let mut body = heavy(4.0);
        body.apply_force(Vector2D::new(8.0, -2.0)).unwrap();
        assert_eq!(body.acceleration(), Vector2D::new(2.0, -0.5));
    }

    #[test]
    fn forces_accumulate_one_term_each() {
        let mut body = heavy(2.0);
        body.apply_force(Vector2D::new(2.0, 0.0)).unwrap();
        body.apply_force(Vector2D::new(0.0, 4.0)).unwrap();
        body.apply_force(Vector2D::new(2.0, 2.0)).unwrap();
        assert_eq!(body.acceleration(), Vector2D::new(2.0, 3.0));
    }

    #[test]
    fn massless_body_rejects_force() {
        let mut body = Body::new(0.0, 0.0, 5.0, 5.0);
        let result = body.apply_force(Vector2D::new(1.0, 1.0));
        assert!(matches!(result, Err(MoverError::DivideByZero)));
        assert_eq!(body.acceleration(), Vector2D::ZERO);
    }

    #[test]
    fn non_positive_mass_is_rejected() {
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Body::with_mass(0.0, 0.0, 1.0, 1.0, mass),
                Err(MoverError::InvalidMass(_))
            ));
        }
    }

    #[test]
    fn update_integrates_in_order_and_clears_acceleration() {
        let mut body = heavy(1.0);
        body.set_velocity(Vector2D::new(1.0, 0.0));
        body.apply_force(Vector2D::new(0.5, 0.5)).unwrap();
        body.update();
        assert_eq!(body.velocity(), Vector2D::new(1.5, 0.5));
        assert_eq!(body.location(), Vector2D::new(1.5, 0.5));
        assert_eq!(body.acceleration(), Vector2D::ZERO);
    }

    #[test]
    fn setting_acceleration_alone_does_not_move() {
        let mut body = heavy(1.0);
        body.set_acceleration(Vector2D::new(3.0, 3.0));
        assert_eq!(body.location(), Vector2D::ZERO);
        assert_eq!(body.velocity(), Vector2D::ZERO);
    }

    #[test]
    fn fixed_limit_clamps_velocity() {
        let mut body = heavy(1.0);
        body.set_velocity_limit(VelocityLimit::Fixed(2.0)).unwrap();
        body.apply_force(Vector2D::new(30.0, 40.0)).unwrap();
        body.update();
        assert_relative_eq!(body.velocity().magnitude(), 2.0, epsilon = TOLERANCE);
        assert_relative_eq!(body.velocity().x, 1.2, epsilon = TOLERANCE);
        assert_relative_eq!(body.location().y, 1.6, epsilon = TOLERANCE);
    }

    #[test]
    fn invalid_fixed_limit_is_rejected() {
        let mut body = heavy(1.0);
        assert!(matches!(
            body.set_velocity_limit(VelocityLimit::Fixed(-1.0)),
            Err(MoverError::InvalidLimit(_))
        ));
        assert_eq!(body.velocity_limit(), VelocityLimit::Unlimited);
    }

    #[test]
    fn check_edges_bounces_off_right_edge() {
        let mut body = heavy(1.0);
        body.set_location(Vector2D::new(105.0, 50.0));
        body.set_velocity(Vector2D::new(3.0, 1.0));
        body.check_edges(100.0, 100.0);
        assert_eq!(body.location().x, 100.0);
        assert_eq!(body.velocity(), Vector2D::new(-3.0, 1.0));
    }

    #[test]
    fn check_edges_bounces_off_left_and_bottom() {
        let mut body = heavy(1.0);
        body.set_location(Vector2D::new(-2.0, 120.0));
        body.set_velocity(Vector2D::new(-1.0, 4.0));
        body.check_edges(100.0, 100.0);
        assert_eq!(body.location(), Vector2D::new(0.0, 100.0));
        assert_eq!(body.velocity(), Vector2D::new(1.0, -4.0));
    }

    #[test]
    fn check_edges_leaves_top_open() {
        let mut body = heavy(1.0);
        body.set_location(Vector2D::new(50.0, -5.0));
        body.set_velocity(Vector2D::new(0.0, -2.0));
        body.check_edges(100.0, 100.0);
        assert_eq!(body.location(), Vector2D::new(50.0, -5.0));
        assert_eq!(body.velocity(), Vector2D::new(0.0, -2.0));
    }

    #[test]
    fn bounds_are_anchored_at_location() {
        let mut body = Body::new(3.0, 4.0, 10.0, 6.0);
        let before = body.clone();
        let bounds = body.bounds();
        assert_eq!(bounds, Bounds { x: 3.0, y: 4.0, width: 10.0, height: 6.0 });
        assert_eq!(bounds.center(), Vector2D::new(8.0, 7.0));
        assert_eq!(body.location(), before.location());

        body.set_frame(0.0, 0.0, 0.0, 0.0);
        assert!(body.is_empty());
    }
}
