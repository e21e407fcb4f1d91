//! Pinchpoint Gesture Core
//!
//! Interprets a stream of hand landmarks as pointer intents:
//! - **Pointer mapping:** Integer-quantized smoothing of the index fingertip
//!   onto screen pixels
//! - **Pinch classification:** Thumb-index distance with a two-threshold
//!   hysteresis band
//! - **Gesture state machine:** Idle / Dragging / Scrolling transitions that
//!   emit drag and scroll intents
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! Frames go in, intents come out, one frame at a time and strictly in order.

pub mod machine;
pub mod pinch;
pub mod pointer;
pub mod session;

pub use machine::{GestureStateMachine, Mode};
pub use pinch::{PinchClassifier, PinchReading};
pub use pointer::{PointerMapper, ScreenPoint};
pub use session::{FrameReport, GestureSession, SessionState};
