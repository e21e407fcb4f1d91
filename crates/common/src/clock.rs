//! Clock and frame-rate utilities for the per-frame loop.
//!
//! Detector frames carry monotonic timestamps relative to a session epoch
//! captured when the loop starts. This module provides utilities for:
//! - Capturing the epoch
//! - Measuring frame rate from consecutive frame timestamps
//! - Throttling periodic work (e.g. telemetry logging)

use std::time::Instant;

/// A session clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment the session started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Get seconds elapsed since session start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }
}

/// Instantaneous frame-rate meter fed with frame timestamps.
#[derive(Debug, Default)]
pub struct FpsMeter {
    last_ns: Option<u64>,
    frames: u64,
    fps: u32,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame and return the instantaneous rate (`1 / dt`).
    ///
    /// The first frame, and any frame whose timestamp does not advance,
    /// reports 0.
    pub fn tick(&mut self, timestamp_ns: u64) -> u32 {
        self.frames += 1;
        self.fps = match self.last_ns {
            Some(last) if timestamp_ns > last => {
                (1_000_000_000.0 / (timestamp_ns - last) as f64) as u32
            }
            _ => 0,
        };
        self.last_ns = Some(timestamp_ns);
        self.fps
    }

    /// Most recent rate reported by `tick`.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Total frames seen.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Rate controller for periodic work inside the frame loop.
#[derive(Debug)]
pub struct RateController {
    target_interval_ns: u64,
    last_tick_ns: Option<u64>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval_ns: 1_000_000_000 / target_hz.max(1) as u64,
            last_tick_ns: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, current_ns: u64) -> bool {
        match self.last_tick_ns {
            None => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            Some(last) if current_ns >= last.saturating_add(self.target_interval_ns) => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            _ => false,
        }
    }
}
