/*
 * Scene Parameters Module
 *
 * This module defines the SceneParams struct that holds the parameters the
 * UI can change while the animation runs. Change detection works by
 * snapshotting the values before the UI pass and comparing afterwards.
 */

use crate::config::SceneConfig;

// Parameters for the scene that can be adjusted via UI
#[derive(Debug, Clone, PartialEq)]
pub struct SceneParams {
    pub target_fps: u32,
    pub attraction: f64,
    pub show_debug: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Debug, Clone, Copy, PartialEq)]
struct ParamSnapshot {
    target_fps: u32,
    attraction: f64,
}

// What changed during the last UI pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub target_fps: bool,
    pub attraction: bool,
}

impl ParamChanges {
    pub fn any(&self) -> bool {
        self.target_fps || self.attraction
    }
}

impl SceneParams {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            target_fps: config.target_fps,
            attraction: config.attraction,
            show_debug: false,
            previous_values: None,
        }
    }

    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            target_fps: self.target_fps,
            attraction: self.attraction,
        });
    }

    // Without a snapshot nothing counts as changed
    pub fn detect_changes(&self) -> ParamChanges {
        match &self.previous_values {
            Some(prev) => ParamChanges {
                target_fps: self.target_fps != prev.target_fps,
                attraction: self.attraction != prev.attraction,
            },
            None => ParamChanges::default(),
        }
    }

    // Get parameter ranges for UI sliders
    pub fn target_fps_range() -> std::ops::RangeInclusive<u32> {
        1..=240
    }

    pub fn attraction_range() -> std::ops::RangeInclusive<f64> {
        0.0..=5.0
    }
}
