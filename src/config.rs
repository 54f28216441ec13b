/*
 * Configuration Module
 *
 * A scene describes the drawing surface, the pacing, and how the initial
 * body set is spawned. Scenes are loaded from YAML:
 *
 *   title: "movers"
 *   width: 1000
 *   height: 800
 *   target_fps: 60
 *   velocity_limit: 5.0     # optional, overrides the shared default
 *   attraction: 1.0         # scale of the pointer attraction force
 *
 *   bodies:
 *     count: 100
 *     size: 10.0
 *     mass: 1.0             # default 1.0, an explicit null spawns massless bodies
 *     initial_speed: 0.0
 *     seed: 42              # optional, deterministic spawn
 *
 * Every field has a default, so an empty document is a valid scene.
 */

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::Deserialize;

use crate::animation::frame_interval_for;
use crate::body::{Body, Color, VelocityLimit};
use crate::error::{MoverError, MoverResult};
use crate::vector::Vector2D;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BodiesConfig {
    pub count: usize,          // number of bodies spawned
    pub size: f64,             // width and height of each body
    pub mass: Option<f64>,     // mass of each body, None -> massless
    pub initial_speed: f64,    // magnitude of the random initial velocity
    pub seed: Option<u64>,     // deterministic RNG seed
}

impl Default for BodiesConfig {
    fn default() -> Self {
        Self {
            count: 100,
            size: 10.0,
            mass: Some(1.0),
            initial_speed: 0.0,
            seed: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub title: String,
    pub width: u32,                  // surface width, also the bounce bound
    pub height: u32,                 // surface height, also the bounce bound
    pub target_fps: u32,
    pub velocity_limit: Option<f64>, // overrides the shared default when set
    pub attraction: f64,             // pointer attraction strength
    pub bodies: BodiesConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "movers".to_string(),
            width: 1000,
            height: 800,
            target_fps: 60,
            velocity_limit: None,
            attraction: 1.0,
            bodies: BodiesConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_yaml_str(yaml: &str) -> MoverResult<Self> {
        let config: SceneConfig =
            serde_yaml::from_str(yaml).map_err(|err| MoverError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> MoverResult<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .map_err(|err| MoverError::Config(format!("{}: {}", path.display(), err)))?;
        Self::from_yaml_str(&yaml)
    }

    // Fail fast on anything the animation or physics would reject later
    pub fn validate(&self) -> MoverResult<()> {
        frame_interval_for(self.target_fps)?;

        if self.width == 0 || self.height == 0 {
            return Err(MoverError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }

        if let Some(mass) = self.bodies.mass {
            if !(mass.is_finite() && mass > 0.0) {
                return Err(MoverError::InvalidMass(mass));
            }
        }

        if let Some(limit) = self.velocity_limit {
            if !(limit.is_finite() && limit >= 0.0) {
                return Err(MoverError::InvalidLimit(limit));
            }
        }

        Ok(())
    }

    pub fn velocity_limit(&self) -> VelocityLimit {
        self.velocity_limit
            .map_or(VelocityLimit::Shared, VelocityLimit::Fixed)
    }

    // Random positions inside the surface, random colours
    pub fn spawn_bodies<R: Rng + ?Sized>(&self, rng: &mut R) -> MoverResult<Vec<Body>> {
        let width = f64::from(self.width);
        let height = f64::from(self.height);
        let size = self.bodies.size;

        (0..self.bodies.count)
            .map(|_| {
                let x = rng.gen_range(0.0..width);
                let y = rng.gen_range(0.0..height);
                let mut body = match self.bodies.mass {
                    Some(mass) => Body::with_mass(x, y, size, size, mass)?,
                    None => Body::new(x, y, size, size),
                };

                if self.bodies.initial_speed > 0.0 {
                    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
                    body.set_velocity(Vector2D::new(angle.cos(), angle.sin()) * self.bodies.initial_speed);
                }

                body.set_velocity_limit(self.velocity_limit())?;
                body.set_color(Color::random(rng));
                Ok(body)
            })
            .collect()
    }
}
