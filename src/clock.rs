/*
 * Frame Clock Module
 *
 * Counts rendered frames and converts them into a frames-per-second figure
 * once per measurement window (at least one second). The estimate is coarse
 * on purpose: it changes once a second, not every frame.
 */

use std::time::{Duration, Instant};

pub const FPS_WINDOW: Duration = Duration::from_secs(1);

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

#[derive(Debug, Clone)]
pub struct FrameClock {
    previous_timestamp: Instant,
    frame_count: u32,
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            previous_timestamp: now,
            frame_count: 0,
            fps: 0.0,
        }
    }

    // Record one frame at the current time
    pub fn tick(&mut self) -> Option<f32> {
        self.tick_at(Instant::now())
    }

    // Record one frame at `now`. Returns the new rate when a window closes.
    pub fn tick_at(&mut self, now: Instant) -> Option<f32> {
        self.frame_count += 1;

        let elapsed = now.saturating_duration_since(self.previous_timestamp);
        if elapsed < FPS_WINDOW {
            return None;
        }

        self.fps = (self.frame_count as f64 * NANOS_PER_SECOND / elapsed.as_nanos() as f64) as f32;
        self.frame_count = 0;
        self.previous_timestamp = now;
        Some(self.fps)
    }

    // Last computed rate; zero until the first window has closed
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    // Start a fresh window without forgetting the last rate
    pub fn restart_at(&mut self, now: Instant) {
        self.previous_timestamp = now;
        self.frame_count = 0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
