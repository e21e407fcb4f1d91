//! The drag/scroll gesture state machine.
//!
//! One pinch signal drives two gestures, so the machine keeps a single
//! [`Mode`] rather than independent flags: a session can never be dragging
//! and scrolling at once, and the scroll anchor only exists while scrolling.
//!
//! Transitions, checked once per frame in this order:
//!
//! | From      | Condition                         | To        | Intent        |
//! |-----------|-----------------------------------|-----------|---------------|
//! | Idle      | pinch engage edge, drag bound     | Dragging  | `drag_start`  |
//! | Dragging  | pinch released                    | Idle      | `drag_end`    |
//! | Idle      | pinch engaged, scroll bound       | Scrolling | (arms anchor) |
//! | Scrolling | engaged, palm moved past threshold| Scrolling | `scroll`      |
//! | Scrolling | pinch released                    | Idle      | (none)        |

use pinchpoint_common::config::{GestureConfig, PinchBindings};
use pinchpoint_gesture_model::intent::Intent;
use serde::{Deserialize, Serialize};

use crate::pinch::PinchReading;

/// Gesture mode. The scroll anchor lives inside `Scrolling`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Idle,
    Dragging,
    Scrolling {
        /// Palm y at scroll entry or at the last emitted tick.
        anchor_y: f64,
    },
}

impl Mode {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Mode::Dragging)
    }

    pub fn is_scrolling(&self) -> bool {
        matches!(self, Mode::Scrolling { .. })
    }

    /// Scroll anchor, present iff scrolling.
    pub fn scroll_anchor_y(&self) -> Option<f64> {
        match self {
            Mode::Scrolling { anchor_y } => Some(*anchor_y),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Dragging => "dragging",
            Mode::Scrolling { .. } => "scrolling",
        }
    }
}

/// Drag/scroll state machine.
#[derive(Debug, Clone)]
pub struct GestureStateMachine {
    mode: Mode,
    bindings: PinchBindings,
    scroll_delta_threshold: f64,
    scroll_step: i32,
}

impl GestureStateMachine {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            mode: Mode::Idle,
            bindings: config.bindings,
            scroll_delta_threshold: config.scroll_delta_threshold,
            scroll_step: config.scroll_step,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Apply one frame's pinch reading and palm height.
    ///
    /// Returns the drag or scroll intent this frame produced, if any. At most
    /// one such intent is produced per frame.
    pub fn step(&mut self, pinch: &PinchReading, palm_y: f64) -> Option<Intent> {
        match self.mode {
            Mode::Idle => {
                if pinch.just_engaged && self.bindings.drag {
                    self.mode = Mode::Dragging;
                    tracing::info!(distance = pinch.distance, "Drag started");
                    Some(Intent::DragStart)
                } else if pinch.engaged && self.bindings.scroll {
                    self.mode = Mode::Scrolling { anchor_y: palm_y };
                    tracing::info!(anchor_y = palm_y, "Scroll mode on");
                    None
                } else {
                    None
                }
            }
            Mode::Dragging => {
                if pinch.engaged {
                    return None;
                }
                self.mode = Mode::Idle;
                tracing::info!(distance = pinch.distance, "Dropped");
                Some(Intent::DragEnd)
            }
            Mode::Scrolling { anchor_y } => {
                if !pinch.engaged {
                    self.mode = Mode::Idle;
                    tracing::info!("Scroll mode off");
                    return None;
                }

                let delta = palm_y - anchor_y;
                let step = if delta > self.scroll_delta_threshold {
                    -self.scroll_step
                } else if delta < -self.scroll_delta_threshold {
                    self.scroll_step
                } else {
                    return None;
                };

                self.mode = Mode::Scrolling { anchor_y: palm_y };
                tracing::debug!(delta, step, "Scroll tick");
                Some(Intent::Scroll { step })
            }
        }
    }

    /// Return to `Idle` (new session).
    pub fn reset(&mut self) {
        self.mode = Mode::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pinch::PinchClassifier;

    fn machine(drag: bool, scroll: bool) -> GestureStateMachine {
        GestureStateMachine::new(&GestureConfig {
            bindings: PinchBindings { drag, scroll },
            ..GestureConfig::default()
        })
    }

    fn readings(distances: &[f64]) -> Vec<PinchReading> {
        let mut c = PinchClassifier::new(0.03, 0.05).unwrap();
        distances.iter().map(|d| c.classify_distance(*d)).collect()
    }

    #[test]
    fn test_drag_cycle() {
        let mut m = machine(true, true);
        let out: Vec<_> = readings(&[0.08, 0.02, 0.02, 0.04, 0.06])
            .iter()
            .map(|r| m.step(r, 0.5))
            .collect();
        assert_eq!(
            out,
            vec![None, Some(Intent::DragStart), None, None, Some(Intent::DragEnd)]
        );
        assert_eq!(m.mode(), Mode::Idle);
    }

    #[test]
    fn test_drag_shadows_scroll_on_engage_edge() {
        let mut m = machine(true, true);
        let r = readings(&[0.01]);
        assert_eq!(m.step(&r[0], 0.5), Some(Intent::DragStart));
        assert!(m.mode().is_dragging());
        assert_eq!(m.mode().scroll_anchor_y(), None);
    }

    #[test]
    fn test_held_pinch_without_edge_enters_scroll() {
        let mut m = machine(true, true);
        let held = PinchReading {
            distance: 0.01,
            engaged: true,
            just_engaged: false,
            just_released: false,
        };
        assert_eq!(m.step(&held, 0.4), None);
        assert_eq!(m.mode(), Mode::Scrolling { anchor_y: 0.4 });
    }

    #[test]
    fn test_scroll_entry_arms_anchor_only() {
        let mut m = machine(false, true);
        let r = readings(&[0.02]);
        assert_eq!(m.step(&r[0], 0.5), None);
        assert_eq!(m.mode().scroll_anchor_y(), Some(0.5));
    }

    #[test]
    fn test_scroll_ticks_and_reanchors() {
        let mut m = machine(false, true);
        let r = readings(&[0.02; 5]);
        let ys = [0.5, 0.52, 0.6, 0.5, 0.5];
        let out: Vec<_> = r.iter().zip(ys).map(|(r, y)| m.step(r, y)).collect();
        assert_eq!(
            out,
            vec![
                None,
                None,
                Some(Intent::Scroll { step: -60 }),
                Some(Intent::Scroll { step: 60 }),
                None,
            ]
        );
        assert_eq!(m.mode().scroll_anchor_y(), Some(0.5));
    }

    #[test]
    fn test_scroll_release_clears_anchor() {
        let mut m = machine(false, true);
        for r in readings(&[0.02, 0.045, 0.07]) {
            assert_eq!(m.step(&r, 0.5), None);
        }
        assert_eq!(m.mode(), Mode::Idle);
        assert_eq!(m.mode().scroll_anchor_y(), None);
    }

    #[test]
    fn test_drag_only_binding_ignores_held_pinch() {
        let mut m = machine(true, false);
        let held = PinchReading {
            distance: 0.01,
            engaged: true,
            just_engaged: false,
            just_released: false,
        };
        assert_eq!(m.step(&held, 0.5), None);
        assert_eq!(m.mode(), Mode::Idle);
    }

    #[test]
    fn test_mode_serializes_with_tag() {
        let json = serde_json::to_string(&Mode::Scrolling { anchor_y: 0.25 }).unwrap();
        assert_eq!(json, r#"{"mode":"scrolling","anchor_y":0.25}"#);
        assert_eq!(Mode::Dragging.name(), "dragging");
    }

    #[test]
    fn test_reset() {
        let mut m = machine(true, true);
        m.step(&readings(&[0.0])[0], 0.5);
        m.reset();
        assert_eq!(m.mode(), Mode::Idle);
    }
}
