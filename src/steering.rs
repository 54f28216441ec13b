/*
 * Steering Module
 *
 * Forces that steer bodies around the surface. The noise generator is an
 * outside collaborator and is only seen through the NoiseField trait.
 */

use crate::body::Body;
use crate::error::MoverResult;
use crate::vector::Vector2D;

// Scalar field sampled at a point, e.g. Perlin noise
pub trait NoiseField {
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<F> NoiseField for F
where
    F: Fn(f64, f64) -> f64,
{
    fn sample(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

// Constant field, handy when steering should not flicker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform(pub f64);

impl NoiseField for Uniform {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}

// Unit direction from `location` towards `target`, scaled by |noise| sampled at `location`
pub fn attraction<N: NoiseField + ?Sized>(target: Vector2D, location: Vector2D, noise: &N) -> Vector2D {
    let direction = (target - location).normalized();
    if direction.is_zero() {
        return Vector2D::ZERO;
    }
    direction * noise.sample(location.x, location.y).abs()
}

// Push a body towards `target`, weighted by `strength`
pub fn steer_towards<N: NoiseField + ?Sized>(
    body: &mut Body,
    target: Vector2D,
    noise: &N,
    strength: f64,
) -> MoverResult<()> {
    let force = attraction(target, body.location(), noise) * strength;
    body.apply_force(force)
}
