//! Hand landmarks and the per-frame sample extracted from them.
//!
//! Indices follow the 21-point hand topology used by common hand-landmark
//! detectors (wrist = 0, thumb tip = 4, index tip = 8, ...).

use serde::{Deserialize, Serialize};

pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;

/// Number of landmarks in a complete hand.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// A single normalized keypoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Normalized X coordinate, nominally [0.0, 1.0].
    pub x: f64,
    /// Normalized Y coordinate, nominally [0.0, 1.0].
    pub y: f64,
    /// Relative depth. Carried through but never used by the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Planar distance to another landmark, ignoring depth.
    pub fn planar_distance(&self, other: &Landmark) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn mirrored(self) -> Self {
        Self {
            x: 1.0 - self.x,
            ..self
        }
    }
}

/// The landmarks the gesture core reads each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub index_tip: Landmark,
    pub thumb_tip: Landmark,
    pub index_base: Landmark,
    /// Stable palm point (middle-finger MCP) used as the scroll anchor.
    pub palm: Landmark,
}

impl FrameSample {
    /// Pull the required points out of a detector hand.
    ///
    /// Returns `None` when any required index is missing or non-finite, which
    /// callers treat exactly like "no hand this frame". With `mirror` set, x
    /// is flipped so a selfie-view camera moves the cursor the way the hand
    /// moves.
    pub fn from_landmarks(landmarks: &[Landmark], mirror: bool) -> Option<Self> {
        let pick = |idx: usize| -> Option<Landmark> {
            let lm = *landmarks.get(idx)?;
            if !lm.is_finite() {
                return None;
            }
            Some(if mirror { lm.mirrored() } else { lm })
        };

        Some(Self {
            index_tip: pick(INDEX_TIP)?,
            thumb_tip: pick(THUMB_TIP)?,
            index_base: pick(INDEX_MCP)?,
            palm: pick(MIDDLE_MCP)?,
        })
    }

    /// Build a sample directly from the four points (tests, synthetic input).
    pub fn new(index_tip: Landmark, thumb_tip: Landmark, palm: Landmark) -> Self {
        Self {
            index_tip,
            thumb_tip,
            index_base: palm,
            palm,
        }
    }

    /// Thumb-index pinch distance.
    pub fn pinch_distance(&self) -> f64 {
        self.thumb_tip.planar_distance(&self.index_tip)
    }
}

/// Build a full 21-point hand with every point at `fill`, then overwrite the
/// sample points. Handy for synthetic streams.
pub fn synthetic_hand(sample: &FrameSample, fill: Landmark) -> Vec<Landmark> {
    let mut hand = vec![fill; HAND_LANDMARK_COUNT];
    hand[INDEX_TIP] = sample.index_tip;
    hand[THUMB_TIP] = sample.thumb_tip;
    hand[INDEX_MCP] = sample.index_base;
    hand[MIDDLE_MCP] = sample.palm;
    hand
}
