/*
 * Application Module
 *
 * This module wires the animation core into a nannou window:
 * - Scene::build turns a SceneConfig into bodies, hooks and a controller
 * - model() opens the window and starts the animation
 * - update() runs the egui panel and applies the user's requests
 *
 * The animation runs on its own threads; nannou only reads the latest
 * frame snapshot, so window redraws and physics ticks are not coupled.
 */

use std::sync::{Arc, Mutex, PoisonError};

use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::animation::{Animated, AnimationController};
use crate::config::SceneConfig;
use crate::debug::DebugInfo;
use crate::error::MoverResult;
use crate::input;
use crate::params::SceneParams;
use crate::physics::{PerlinField, SceneUpdater, SharedSteering, SteeringInput};
use crate::renderer::{self, LatestFrame, SurfaceRenderer};
use crate::ui;
use crate::vector::Vector2D;

pub type SceneController = AnimationController<SceneUpdater, SurfaceRenderer>;

// Everything the window needs, built before nannou takes over the main thread
pub struct Scene {
    pub config: SceneConfig,
    pub controller: SceneController,
    pub steering: SharedSteering,
    pub latest: LatestFrame,
}

impl Scene {
    pub fn build(config: SceneConfig) -> MoverResult<Self> {
        config.validate()?;

        let mut rng = match config.bodies.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let bodies = config.spawn_bodies(&mut rng)?;

        let width = config.width as f64;
        let height = config.height as f64;
        let steering = Arc::new(Mutex::new(SteeringInput {
            pointer: Vector2D::new(width / 2.0, height / 2.0),
            strength: config.attraction,
        }));
        let latest = LatestFrame::default();

        let updater = SceneUpdater::new(Arc::clone(&steering), PerlinField::default(), width, height);
        let renderer = SurfaceRenderer::new(Arc::clone(&latest));
        let controller = AnimationController::new(config.target_fps, bodies, updater, renderer)?;

        info!(
            bodies = config.bodies.count,
            width = config.width,
            height = config.height,
            target_fps = config.target_fps,
            "scene built"
        );

        Ok(Self {
            config,
            controller,
            steering,
            latest,
        })
    }
}

// Handed from main() to model(), which nannou calls without arguments
static PENDING_SCENE: Mutex<Option<Scene>> = Mutex::new(None);

pub fn stage(scene: Scene) {
    *PENDING_SCENE.lock().unwrap_or_else(PoisonError::into_inner) = Some(scene);
}

pub struct Model {
    pub controller: SceneController,
    pub steering: SharedSteering,
    pub latest: LatestFrame,
    pub params: SceneParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let scene = PENDING_SCENE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .expect("scene must be staged before the app starts");

    let window_id = app
        .new_window()
        .title(&scene.config.title)
        .size(scene.config.width, scene.config.height)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to open window");

    let window = app.window(window_id).expect("window vanished after creation");
    let egui = Egui::from_window(&window);

    if let Err(err) = scene.controller.start() {
        warn!(%err, "animation did not start");
    }

    Model {
        params: SceneParams::from_config(&scene.config),
        controller: scene.controller,
        steering: scene.steering,
        latest: scene.latest,
        egui,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(_app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = model.controller.fps();
    model.debug_info.frame_time = update.since_last;
    model.debug_info.frames_rendered = model.controller.frames_rendered();
    model.debug_info.state = model.controller.state();
    if let Some(frame) = model.latest.lock().unwrap_or_else(PoisonError::into_inner).as_ref() {
        model.debug_info.displayed_frame = Some(frame.index);
        model.debug_info.bodies = frame.bodies.len();
    }

    let requests = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if requests.changes.target_fps {
        if let Err(err) = model.controller.set_target_fps(model.params.target_fps) {
            warn!(%err, "target fps rejected");
        }
    }

    if requests.changes.attraction {
        model
            .steering
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .strength = model.params.attraction;
    }

    if requests.toggle_pause {
        input::toggle_pause(model);
    }
    if requests.toggle_run {
        input::toggle_run(model);
    }
}
