//! Per-session gesture pipeline.
//!
//! A [`GestureSession`] owns every piece of state that must survive between
//! frames and exposes a single per-frame entry point. Frames must be fed in
//! order; a frame without a usable hand leaves all state untouched, so a
//! momentary detection dropout neither jumps the cursor nor ends a drag.

use pinchpoint_common::config::{AppConfig, CameraConfig};
use pinchpoint_common::error::PinchpointResult;
use pinchpoint_gesture_model::frame::{DetectorFrame, TimestampNs};
use pinchpoint_gesture_model::intent::{Intent, IntentRecord};
use pinchpoint_gesture_model::landmark::FrameSample;
use serde::{Deserialize, Serialize};

use crate::machine::{GestureStateMachine, Mode};
use crate::pinch::{PinchClassifier, PinchReading};
use crate::pointer::{PointerMapper, ScreenPoint};

/// Snapshot of the long-lived session state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub mode: Mode,
    pub smoothed_cursor: ScreenPoint,
    pub pinch_engaged: bool,
}

/// Everything one frame produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub timestamp_ns: TimestampNs,

    /// Intents in emission order: `move` first, then any drag/scroll intent.
    pub intents: Vec<Intent>,

    /// Mode after this frame, inlined as `mode` (plus `anchor_y` while
    /// scrolling).
    #[serde(flatten)]
    pub mode: Mode,

    /// Pinch reading, absent when no hand was usable.
    pub pinch: Option<PinchReading>,

    /// Fingertip in camera pixels, for an overlay renderer.
    pub overlay: Option<ScreenPoint>,
}

impl FrameReport {
    pub fn hand_detected(&self) -> bool {
        self.pinch.is_some()
    }
}

/// Gesture interpretation for one capture session.
#[derive(Debug, Clone)]
pub struct GestureSession {
    mapper: PointerMapper,
    classifier: PinchClassifier,
    machine: GestureStateMachine,
    camera: CameraConfig,
    mirror: bool,
    cursor: ScreenPoint,
    frames_processed: u64,
    hands_seen: u64,
}

impl GestureSession {
    /// Build a session. Invalid configuration is rejected here, before any
    /// frame is processed.
    pub fn new(config: &AppConfig) -> PinchpointResult<Self> {
        config.validate()?;

        let gesture = &config.gesture;
        tracing::debug!(
            start = gesture.pinch_start_threshold,
            end = gesture.pinch_end_threshold,
            scroll_delta = gesture.scroll_delta_threshold,
            smoothing = gesture.smoothing,
            "Gesture session configured"
        );

        Ok(Self {
            mapper: PointerMapper::new(config.screen, gesture.smoothing),
            classifier: PinchClassifier::from_config(gesture)?,
            machine: GestureStateMachine::new(gesture),
            camera: config.camera,
            mirror: gesture.mirror,
            cursor: ScreenPoint::default(),
            frames_processed: 0,
            hands_seen: 0,
        })
    }

    /// Process one detector frame.
    pub fn process_frame(&mut self, frame: &DetectorFrame) -> FrameReport {
        let sample = frame.sample(self.mirror);
        if sample.is_none() && frame.landmarks.is_some() {
            tracing::debug!(
                t = frame.timestamp_ns,
                "Hand missing required landmarks, treating as no hand"
            );
        }
        self.process_sample(frame.timestamp_ns, sample.as_ref())
    }

    /// Process one already-extracted sample (`None` = no hand).
    pub fn process_sample(
        &mut self,
        timestamp_ns: TimestampNs,
        sample: Option<&FrameSample>,
    ) -> FrameReport {
        self.frames_processed += 1;

        let Some(sample) = sample else {
            return FrameReport {
                timestamp_ns,
                intents: Vec::new(),
                mode: self.machine.mode(),
                pinch: None,
                overlay: None,
            };
        };
        self.hands_seen += 1;

        let mut intents = Vec::with_capacity(2);

        self.cursor = self.mapper.step(self.cursor, &sample.index_tip);
        intents.push(Intent::Move {
            x: self.cursor.x,
            y: self.cursor.y,
        });

        let pinch = self.classifier.classify(sample);
        if let Some(intent) = self.machine.step(&pinch, sample.palm.y) {
            intents.push(intent);
        }

        let mode = self.machine.mode();
        tracing::trace!(
            t = timestamp_ns,
            distance = pinch.distance,
            engaged = pinch.engaged,
            mode = mode.name(),
            "Frame processed"
        );

        FrameReport {
            timestamp_ns,
            intents,
            mode,
            pinch: Some(pinch),
            overlay: Some(self.overlay_point(sample)),
        }
    }

    /// Process a whole recorded stream, flattening the intents.
    pub fn process_all(&mut self, frames: &[DetectorFrame]) -> Vec<IntentRecord> {
        frames
            .iter()
            .flat_map(|frame| {
                let report = self.process_frame(frame);
                report
                    .intents
                    .into_iter()
                    .map(move |intent| IntentRecord {
                        timestamp_ns: report.timestamp_ns,
                        intent,
                    })
            })
            .collect()
    }

    /// Current long-lived state.
    pub fn state(&self) -> SessionState {
        SessionState {
            mode: self.machine.mode(),
            smoothed_cursor: self.cursor,
            pinch_engaged: self.classifier.is_engaged(),
        }
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Frames that carried a usable hand.
    pub fn hands_seen(&self) -> u64 {
        self.hands_seen
    }

    /// Back to the session-start state.
    pub fn reset(&mut self) {
        self.classifier.reset();
        self.machine.reset();
        self.cursor = ScreenPoint::default();
        self.frames_processed = 0;
        self.hands_seen = 0;
    }

    fn overlay_point(&self, sample: &FrameSample) -> ScreenPoint {
        ScreenPoint {
            x: (sample.index_tip.x * self.camera.width as f64) as i32,
            y: (sample.index_tip.y * self.camera.height as f64) as i32,
        }
    }
}
