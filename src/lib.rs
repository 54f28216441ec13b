/*
 * Movers - Module Definitions
 *
 * The animation core (vector maths, body physics, frame clock, drive loop)
 * does not depend on any windowing code. The nannou presentation used by
 * the binary lives in app, input, renderer and ui.
 */

// Re-export key components for easier access
pub use animation::{
    Animated, AnimationController, AnimationState, Frame, NoRender, NoUpdate, Renderer, Updater,
    DEFAULT_TARGET_FPS,
};
pub use body::{
    set_shared_velocity_limit, shared_velocity_limit, Body, BodySnapshot, Bounds, Color,
    VelocityLimit, DEFAULT_VELOCITY_LIMIT,
};
pub use clock::FrameClock;
pub use config::{BodiesConfig, SceneConfig};
pub use error::{MoverError, MoverResult};
pub use steering::NoiseField;
pub use vector::Vector2D;

// Animation core
pub mod animation;
pub mod body;
pub mod clock;
pub mod error;
pub mod steering;
pub mod vector;

// Ambient
pub mod config;
pub mod logging;

// Presentation
pub mod app;
pub mod debug;
pub mod input;
pub mod params;
pub mod physics;
pub mod renderer;
pub mod ui;
