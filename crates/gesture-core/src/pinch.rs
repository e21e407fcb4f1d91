//! Pinch detection with a two-threshold hysteresis band.
//!
//! A pinch engages when the thumb-index distance drops below the start
//! threshold and releases only once it rises above the (larger) end
//! threshold. Distances inside the band keep whatever state the previous
//! frame left, which stops the signal chattering when the fingers hover near
//! a single boundary.

use std::cmp::Ordering;

use pinchpoint_common::config::GestureConfig;
use pinchpoint_common::error::{PinchpointError, PinchpointResult};
use pinchpoint_gesture_model::landmark::FrameSample;
use serde::{Deserialize, Serialize};

/// Classifier output for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchReading {
    /// Planar thumb-index distance in normalized frame units.
    pub distance: f64,
    /// Engagement after this frame.
    pub engaged: bool,
    /// Engagement went false → true on this frame.
    pub just_engaged: bool,
    /// Engagement went true → false on this frame.
    pub just_released: bool,
}

/// Stateful pinch classifier.
#[derive(Debug, Clone)]
pub struct PinchClassifier {
    start_threshold: f64,
    end_threshold: f64,
    engaged: bool,
}

impl PinchClassifier {
    /// Create a classifier. `start` must be strictly below `end`.
    pub fn new(start_threshold: f64, end_threshold: f64) -> PinchpointResult<Self> {
        if start_threshold.partial_cmp(&end_threshold) != Some(Ordering::Less) {
            return Err(PinchpointError::config(format!(
                "pinch start threshold ({start_threshold}) must be less than end threshold ({end_threshold})"
            )));
        }
        Ok(Self {
            start_threshold,
            end_threshold,
            engaged: false,
        })
    }

    pub fn from_config(config: &GestureConfig) -> PinchpointResult<Self> {
        Self::new(config.pinch_start_threshold, config.pinch_end_threshold)
    }

    /// Classify a raw distance, updating the held engagement state.
    pub fn classify_distance(&mut self, distance: f64) -> PinchReading {
        let was_engaged = self.engaged;
        if distance < self.start_threshold {
            self.engaged = true;
        } else if distance > self.end_threshold {
            self.engaged = false;
        }

        PinchReading {
            distance,
            engaged: self.engaged,
            just_engaged: self.engaged && !was_engaged,
            just_released: was_engaged && !self.engaged,
        }
    }

    /// Classify the pinch in a frame sample.
    pub fn classify(&mut self, sample: &FrameSample) -> PinchReading {
        self.classify_distance(sample.pinch_distance())
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Forget engagement (new session).
    pub fn reset(&mut self) {
        self.engaged = false;
    }
}
