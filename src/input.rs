/*
 * Input Module
 *
 * Pointer and keyboard handlers:
 * - the pointer position steers the bodies
 * - Space pauses / resumes
 * - S stops / starts
 * - D toggles the debug overlay
 */

use std::sync::PoisonError;

use nannou::prelude::*;
use tracing::warn;

use crate::animation::{Animated, AnimationState};
use crate::app::Model;
use crate::renderer::screen_to_surface;

pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    // Pointer over the panel should not drag the bodies around
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }
    let pointer = screen_to_surface(pos, app.window_rect());
    model
        .steering
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pointer = pointer;
}

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Space => toggle_pause(model),
        Key::S => toggle_run(model),
        Key::D => model.params.show_debug = !model.params.show_debug,
        _ => {}
    }
}

pub fn toggle_pause(model: &Model) {
    match model.controller.state() {
        AnimationState::Running => model.controller.pause(),
        AnimationState::Paused => model.controller.resume(),
        AnimationState::Stopped => {}
    }
}

pub fn toggle_run(model: &Model) {
    if model.controller.state() == AnimationState::Stopped {
        if let Err(err) = model.controller.start() {
            warn!(%err, "could not restart animation");
        }
    } else {
        model.controller.stop();
    }
}

pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
