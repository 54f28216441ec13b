/*
 * Renderer Module
 *
 * This module is the presentation side of the demo. The SurfaceRenderer
 * hook runs on the animation's presenter thread and only parks the newest
 * frame snapshot; nannou's view function draws whatever frame is parked.
 *
 * Surface coordinates have their origin in the top-left corner with y
 * growing downwards; nannou's have the origin in the centre with y growing
 * upwards.
 */

use std::sync::{Arc, Mutex, PoisonError};

use nannou::prelude::*;
use tracing::warn;

use crate::animation::{self, Renderer};
use crate::app::Model;
use crate::ui;
use crate::vector::Vector2D;

pub type LatestFrame = Arc<Mutex<Option<animation::Frame>>>;

#[derive(Clone, Default)]
pub struct SurfaceRenderer {
    latest: LatestFrame,
}

impl SurfaceRenderer {
    pub fn new(latest: LatestFrame) -> Self {
        Self { latest }
    }
}

impl Renderer for SurfaceRenderer {
    fn render(&mut self, frame: &animation::Frame) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(frame.clone());
    }
}

// Convert a surface point to nannou screen space
pub fn surface_to_screen(point: Vector2D, window_rect: Rect) -> Point2 {
    pt2(
        window_rect.left() + point.x as f32,
        window_rect.top() - point.y as f32,
    )
}

// Convert a nannou screen point to surface space
pub fn screen_to_surface(point: Point2, window_rect: Rect) -> Vector2D {
    Vector2D::new(
        (point.x - window_rect.left()) as f64,
        (window_rect.top() - point.y) as f64,
    )
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();

    // Clone the Arc so the presenter thread is not held up while drawing
    let latest = model
        .latest
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();

    if let Some(latest) = &latest {
        for body in latest.bodies.iter() {
            let bounds = body.bounds();
            let color = body.color;
            draw.ellipse()
                .xy(surface_to_screen(bounds.center(), window_rect))
                .w_h(bounds.width as f32, bounds.height as f32)
                .color(rgb(color.r, color.g, color.b));
        }
    }

    if model.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "failed to draw frame");
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(?err, "failed to draw ui");
    }
}
