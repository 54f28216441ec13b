/*
 * Physics Module
 *
 * The per-tick update hook used by the demo scene. Every body is pulled
 * towards the pointer by a force whose strength comes from a noise field,
 * then integrated and bounced off the surface edges.
 *
 * Bodies are independent of each other, so the work is split across
 * threads with rayon.
 */

use std::sync::{Arc, Mutex, PoisonError};

use nannou::noise::{NoiseFn, Perlin};
use rayon::prelude::*;
use tracing::warn;

use crate::animation::Updater;
use crate::body::Body;
use crate::steering::{self, NoiseField};
use crate::vector::Vector2D;

// Perlin noise sampled on a scaled grid; integer lattice points are always zero
pub struct PerlinField {
    perlin: Perlin,
    scale: f64,
}

impl PerlinField {
    pub fn new(scale: f64) -> Self {
        Self {
            perlin: Perlin::new(),
            scale,
        }
    }
}

impl Default for PerlinField {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl NoiseField for PerlinField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x * self.scale, y * self.scale])
    }
}

// Values the UI thread changes while the animation runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringInput {
    pub pointer: Vector2D,
    pub strength: f64,
}

pub type SharedSteering = Arc<Mutex<SteeringInput>>;

pub struct SceneUpdater<N = PerlinField> {
    steering: SharedSteering,
    noise: N,
    width: f64,
    height: f64,
    warned_massless: bool,
}

impl<N: NoiseField + Send + Sync + 'static> SceneUpdater<N> {
    pub fn new(steering: SharedSteering, noise: N, width: f64, height: f64) -> Self {
        Self {
            steering,
            noise,
            width,
            height,
            warned_massless: false,
        }
    }
}

impl<N: NoiseField + Send + Sync + 'static> Updater for SceneUpdater<N> {
    fn update(&mut self, bodies: &mut [Body]) {
        let input = *self.steering.lock().unwrap_or_else(PoisonError::into_inner);
        let (noise, width, height) = (&self.noise, self.width, self.height);

        let rejected: usize = bodies
            .par_iter_mut()
            .map(|body| {
                let rejected = steering::steer_towards(body, input.pointer, noise, input.strength).is_err();
                body.update();
                body.check_edges(width, height);
                usize::from(rejected)
            })
            .sum();

        if rejected > 0 && !self.warned_massless {
            self.warned_massless = true;
            warn!(rejected, "massless bodies ignore steering forces");
        }
    }
}
