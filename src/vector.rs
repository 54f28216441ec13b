/*
 * Vector Module
 *
 * This module defines Vector2D, the plain 2D value type used for every
 * location, velocity, acceleration and force in the simulation.
 * A Vector2D owns its components; copies never alias each other.
 */

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    // Add a scalar to both components
    pub fn add_scalar(&mut self, n: f64) {
        self.x += n;
        self.y += n;
    }

    // Subtract a scalar from both components
    pub fn sub_scalar(&mut self, n: f64) {
        self.x -= n;
        self.y -= n;
    }

    // Componentwise product of two vectors
    pub fn mul_elem(self, other: Vector2D) -> Vector2D {
        Vector2D::new(self.x * other.x, self.y * other.y)
    }

    // Componentwise quotient of two vectors
    pub fn div_elem(self, other: Vector2D) -> Vector2D {
        Vector2D::new(self.x / other.x, self.y / other.y)
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn distance(&self, other: Vector2D) -> f64 {
        (*self - other).magnitude()
    }

    // Scale to unit length; the zero vector is left untouched
    pub fn normalize(&mut self) {
        let m = self.magnitude();
        if m != 0.0 {
            *self /= m;
        }
    }

    pub fn normalized(mut self) -> Vector2D {
        self.normalize();
        self
    }

    // Rescale to `max` only when the magnitude strictly exceeds it
    pub fn limit(&mut self, max: f64) {
        if self.magnitude() > max {
            self.normalize();
            *self *= max;
        }
    }

    pub fn limited(mut self, max: f64) -> Vector2D {
        self.limit(max);
        self
    }

    pub fn negate_x(&mut self) {
        self.x = -self.x;
    }

    pub fn negate_y(&mut self) {
        self.y = -self.y;
    }
}

impl From<(f64, f64)> for Vector2D {
    fn from((x, y): (f64, f64)) -> Self {
        Vector2D::new(x, y)
    }
}

impl From<[f64; 2]> for Vector2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Vector2D::new(x, y)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Vector2D) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Vector2D) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        Vector2D::new(self.x * rhs, self.y * rhs)
    }
}

impl MulAssign<f64> for Vector2D {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f64> for Vector2D {
    type Output = Vector2D;

    fn div(self, rhs: f64) -> Vector2D {
        Vector2D::new(self.x / rhs, self.y / rhs)
    }
}

impl DivAssign<f64> for Vector2D {
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D::new(-self.x, -self.y)
    }
}
