//! Detector frames: what the hand-landmark detector hands us each tick.
//!
//! Streams are JSONL, one frame per line. Lines starting with `#` are
//! headers or comments and are skipped.

use serde::{Deserialize, Serialize};

use crate::landmark::{FrameSample, Landmark};

/// Monotonic timestamp in nanoseconds since session start.
pub type TimestampNs = u64;

/// One detector result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorFrame {
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// The detected hand, or `None` when no hand was found.
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
}

impl DetectorFrame {
    /// A frame carrying a detected hand.
    pub fn hand(timestamp_ns: TimestampNs, landmarks: Vec<Landmark>) -> Self {
        Self {
            timestamp_ns,
            landmarks: Some(landmarks),
        }
    }

    /// A frame where the detector found nothing.
    pub fn empty(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            landmarks: None,
        }
    }

    /// Extract the gesture sample. Missing hands and malformed landmark sets
    /// both come back as `None`.
    pub fn sample(&self, mirror: bool) -> Option<FrameSample> {
        self.landmarks
            .as_deref()
            .and_then(|lms| FrameSample::from_landmarks(lms, mirror))
    }
}

/// Parse one JSONL line. Returns `Ok(None)` for blank and `#` lines.
pub fn parse_frame_line(line: &str) -> Result<Option<DetectorFrame>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Parse frames from JSONL content (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<DetectorFrame>, serde_json::Error> {
    jsonl
        .lines()
        .filter_map(|line| parse_frame_line(line).transpose())
        .collect()
}

/// Serialize frames to JSONL format.
pub fn serialize_frames(frames: &[DetectorFrame]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}
