//! Fingertip-to-screen cursor mapping with integer smoothing.
//!
//! Each frame the cursor moves a `1/k` share of the remaining distance to
//! the fingertip's screen position. Steps are whole pixels rounded away from
//! zero, so the cursor lands on the target exactly and never passes it.

use pinchpoint_common::config::ScreenConfig;
use pinchpoint_gesture_model::landmark::Landmark;
use serde::{Deserialize, Serialize};

/// Absolute screen position in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Smoothed pointer mapper.
#[derive(Debug, Clone)]
pub struct PointerMapper {
    screen_width: u32,
    screen_height: u32,
    smoothing: u32,
}

impl PointerMapper {
    /// `smoothing` below 1 is treated as 1 (no smoothing).
    pub fn new(screen: ScreenConfig, smoothing: u32) -> Self {
        Self {
            screen_width: screen.width,
            screen_height: screen.height,
            smoothing: smoothing.max(1),
        }
    }

    pub fn smoothing(&self) -> u32 {
        self.smoothing
    }

    /// Raw screen position of a normalized landmark.
    ///
    /// Coordinates are clamped to the unit square and truncated, so the
    /// result always lies on screen.
    pub fn target(&self, tip: &Landmark) -> ScreenPoint {
        ScreenPoint {
            x: scale_axis(tip.x, self.screen_width),
            y: scale_axis(tip.y, self.screen_height),
        }
    }

    /// Advance the smoothed position one frame toward the fingertip.
    pub fn step(&self, prev: ScreenPoint, tip: &Landmark) -> ScreenPoint {
        self.step_toward(prev, self.target(tip))
    }

    /// Advance the smoothed position one frame toward an explicit target.
    pub fn step_toward(&self, prev: ScreenPoint, target: ScreenPoint) -> ScreenPoint {
        ScreenPoint {
            x: smooth_axis(prev.x, target.x, self.smoothing),
            y: smooth_axis(prev.y, target.y, self.smoothing),
        }
    }
}

fn scale_axis(normalized: f64, extent: u32) -> i32 {
    let max = extent.saturating_sub(1) as f64;
    (normalized.clamp(0.0, 1.0) * extent as f64).min(max) as i32
}

/// One smoothing step on a single axis.
///
/// For a negative remaining distance this is exactly `prev + floor(d / k)`;
/// for a positive one the step is rounded up instead, so positions below
/// the target do not stall up to `k - 1` pixels short.
pub fn smooth_axis(prev: i32, target: i32, k: u32) -> i32 {
    let k = i64::from(k.max(1));
    let remaining = i64::from(target) - i64::from(prev);
    let magnitude = (remaining.abs() + k - 1) / k;
    let next = i64::from(prev) + remaining.signum() * magnitude;
    next as i32
}
