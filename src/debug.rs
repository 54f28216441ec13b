/*
 * Debug Information Module
 *
 * Metrics shown in the UI panel and the on-screen overlay:
 * - measured animation FPS (once-per-second estimate from the drive loop)
 * - nannou frame time
 * - frames dispatched and the index of the frame on screen
 * - animation state and body count
 */

use std::time::Duration;

use crate::animation::AnimationState;

#[derive(Debug, Clone)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub frames_rendered: u64,
    pub displayed_frame: Option<u64>,
    pub bodies: usize,
    pub state: AnimationState,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            frames_rendered: 0,
            displayed_frame: None,
            bodies: 0,
            state: AnimationState::Stopped,
        }
    }
}

impl DebugInfo {
    // Frames the surface is behind the drive loop
    pub fn render_lag(&self) -> u64 {
        match self.displayed_frame {
            Some(index) => self.frames_rendered.saturating_sub(index + 1),
            None => self.frames_rendered,
        }
    }
}
