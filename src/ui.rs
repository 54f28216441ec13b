/*
 * UI Module
 *
 * The egui control panel (pacing, steering strength, run/pause buttons,
 * measured FPS) and the on-screen debug overlay.
 */

use nannou_egui::{egui, Egui};

use crate::animation::AnimationState;
use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SceneParams};

// What the user asked for during this UI pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiRequests {
    pub toggle_pause: bool,
    pub toggle_run: bool,
    pub changes: ParamChanges,
}

pub fn update_ui(egui: &mut Egui, params: &mut SceneParams, debug_info: &DebugInfo) -> UiRequests {
    let mut requests = UiRequests::default();

    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Animation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.horizontal(|ui| {
                let run_label = match debug_info.state {
                    AnimationState::Stopped => "Start",
                    _ => "Stop",
                };
                if ui.button(run_label).clicked() {
                    requests.toggle_run = true;
                }

                let pause_label = match debug_info.state {
                    AnimationState::Paused => "Resume",
                    _ => "Pause",
                };
                if ui.button(pause_label).clicked() && debug_info.state != AnimationState::Stopped {
                    requests.toggle_pause = true;
                }
            });

            ui.add(egui::Slider::new(&mut params.target_fps, SceneParams::target_fps_range()).text("Target FPS"));
            ui.add(egui::Slider::new(&mut params.attraction, SceneParams::attraction_range()).text("Attraction"));

            ui.separator();

            ui.label(format!("State: {:?}", debug_info.state));
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frames: {}", debug_info.frames_rendered));
            ui.label(format!("Bodies: {}", debug_info.bodies));

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
        });

    requests.changes = params.detect_changes();
    requests
}

// Draw debug information in the top-left corner
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let margin = 20.0;
    let line_height = 20.0;

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.bottom() + margin + line_height * 4.0;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Frames: {}", debug_info.frames_rendered),
        format!("Render lag: {}", debug_info.render_lag()),
        format!("Bodies: {}", debug_info.bodies),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
