//! Pinchpoint Gesture Model
//!
//! Defines the data contracts at the edges of the gesture core:
//! - **Landmarks:** Normalized hand keypoints and the per-frame sample
//!   the core reads
//! - **Frames:** Timestamped detector output (a hand or nothing)
//! - **Intents:** Discrete pointer actions handed to the injector
//!
//! Landmark coordinates are normalized to `[0.0, 1.0]` relative to the
//! camera frame; intent coordinates are absolute screen pixels.

pub mod frame;
pub mod intent;
pub mod landmark;

pub use frame::*;
pub use intent::*;
pub use landmark::*;
