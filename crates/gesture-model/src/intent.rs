//! Pointer intents emitted by the gesture core.
//!
//! An intent is a discrete action for the OS injector. Intents are recorded
//! as JSONL with the same `t`/`type` layout as the detector stream so that a
//! session can be replayed and diffed.

use serde::{Deserialize, Serialize};

use crate::frame::TimestampNs;

/// A discrete pointer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Move the cursor to absolute screen coordinates.
    Move { x: i32, y: i32 },

    /// Press the primary button.
    DragStart,

    /// Release the primary button.
    DragEnd,

    /// Scroll by `step` injector units. Positive scrolls up.
    Scroll { step: i32 },
}

impl Intent {
    pub fn is_move(&self) -> bool {
        matches!(self, Intent::Move { .. })
    }

    /// Short label for logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Move { .. } => "move",
            Intent::DragStart => "drag_start",
            Intent::DragEnd => "drag_end",
            Intent::Scroll { .. } => "scroll",
        }
    }
}

/// An intent stamped with the frame it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentRecord {
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    #[serde(flatten)]
    pub intent: Intent,
}

/// Header written as the first (`#`-prefixed) line of an intent stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at session start (RFC 3339).
    pub epoch_wall: String,

    /// Screen the move coordinates refer to.
    pub screen_width: u32,
    pub screen_height: u32,
}

/// Parse intent records from JSONL content, skipping `#` lines.
pub fn parse_intents(jsonl: &str) -> Result<Vec<IntentRecord>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}
