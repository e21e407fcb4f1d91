use pinchpoint_common::config::{AppConfig, PinchBindings};
use pinchpoint_gesture_core::{GestureSession, Mode};
use pinchpoint_gesture_model::frame::DetectorFrame;
use pinchpoint_gesture_model::intent::Intent;
use pinchpoint_gesture_model::landmark::{synthetic_hand, FrameSample, Landmark};
use proptest::prelude::*;

fn config(bindings: PinchBindings) -> AppConfig {
    let mut config = AppConfig::default();
    config.gesture.pinch_start_threshold = 0.03;
    config.gesture.pinch_end_threshold = 0.05;
    config.gesture.scroll_delta_threshold = 0.04;
    config.gesture.mirror = false;
    config.gesture.bindings = bindings;
    config
}

/// A hand whose thumb sits `pinch` to the right of the index tip and whose
/// palm point is at height `palm_y`.
fn frame(t: u64, pinch: f64, palm_y: f64) -> DetectorFrame {
    let sample = FrameSample::new(
        Landmark::new(0.4, 0.4),
        Landmark::new(0.4 + pinch, 0.4),
        Landmark::new(0.5, palm_y),
    );
    DetectorFrame::hand(t, synthetic_hand(&sample, Landmark::new(0.5, 0.9)))
}

fn labels(intents: &[Intent]) -> Vec<&'static str> {
    intents.iter().map(Intent::label).collect()
}

#[test]
fn pinch_then_release_produces_one_drag() {
    let mut session = GestureSession::new(&config(PinchBindings::default())).unwrap();

    let distances = [0.08, 0.02, 0.02, 0.06];
    let reports: Vec<_> = distances
        .iter()
        .enumerate()
        .map(|(i, d)| session.process_frame(&frame(i as u64, *d, 0.5)))
        .collect();

    assert_eq!(labels(&reports[0].intents), vec!["move"]);
    assert_eq!(labels(&reports[1].intents), vec!["move", "drag_start"]);
    assert_eq!(labels(&reports[2].intents), vec!["move"]);
    assert_eq!(labels(&reports[3].intents), vec!["move", "drag_end"]);
    assert_eq!(session.state().mode, Mode::Idle);
}

#[test]
fn sustained_pinch_scrolls_down_then_up() {
    let bindings = PinchBindings {
        drag: false,
        scroll: true,
    };
    let mut session = GestureSession::new(&config(bindings)).unwrap();

    let ys = [0.5, 0.52, 0.6, 0.5, 0.5];
    let mut scrolls = Vec::new();
    for (i, y) in ys.iter().enumerate() {
        let report = session.process_frame(&frame(i as u64, 0.02, *y));
        for intent in report.intents.iter().filter(|it| !it.is_move()) {
            scrolls.push((i, *intent));
        }
        if i == 2 {
            assert_eq!(report.mode.scroll_anchor_y(), Some(0.6));
        }
    }

    assert_eq!(
        scrolls,
        vec![
            (2, Intent::Scroll { step: -60 }),
            (3, Intent::Scroll { step: 60 }),
        ]
    );
    assert_eq!(session.state().mode, Mode::Scrolling { anchor_y: 0.5 });
}

#[test]
fn detection_gap_during_drag_does_not_drop() {
    let mut session = GestureSession::new(&config(PinchBindings::default())).unwrap();
    session.process_frame(&frame(0, 0.01, 0.5));

    for t in 1..30 {
        let report = session.process_frame(&DetectorFrame::empty(t));
        assert!(report.intents.is_empty());
    }
    assert!(session.state().mode.is_dragging());

    let report = session.process_frame(&frame(30, 0.01, 0.5));
    assert_eq!(labels(&report.intents), vec!["move"]);
}

#[test]
fn monotonic_palm_descent_scrolls_once_per_threshold() {
    let bindings = PinchBindings {
        drag: false,
        scroll: true,
    };
    let mut session = GestureSession::new(&config(bindings)).unwrap();

    // Anchor at 0.1, then descend 0.01 per frame to 0.9. Each tick fires on
    // the first frame more than 0.04 below the last anchor.
    let mut y = 0.1;
    let mut anchor = y;
    let mut expected = 0;
    let mut ticks = 0;
    session.process_frame(&frame(0, 0.02, y));
    for t in 1..=80 {
        y = 0.1 + t as f64 * 0.01;
        if y - anchor > 0.04 {
            expected += 1;
            anchor = y;
        }
        let report = session.process_frame(&frame(t, 0.02, y));
        for intent in &report.intents {
            if let Intent::Scroll { step } = intent {
                assert_eq!(*step, -60);
                ticks += 1;
                assert_eq!(report.mode.scroll_anchor_y(), Some(y));
            }
        }
    }
    assert_eq!(ticks, expected);
    assert!(ticks >= 15);
}

#[test]
fn smoothing_reaches_fingertip_exactly() {
    let mut config = config(PinchBindings::default());
    config.gesture.smoothing = 7;
    let mut session = GestureSession::new(&config).unwrap();

    let target = (0.4 * 1920.0) as i32;
    let mut last = 0;
    for t in 0..200 {
        let report = session.process_frame(&frame(t, 0.2, 0.5));
        if let Some(Intent::Move { x, .. }) = report.intents.first() {
            assert!(*x >= last && *x <= target);
            last = *x;
        }
    }
    assert_eq!(last, target);
}

proptest! {
    #[test]
    fn prop_idle_survives_any_number_of_empty_frames(n in 0usize..500) {
        let mut session = GestureSession::new(&config(PinchBindings::default())).unwrap();
        for t in 0..n {
            let report = session.process_frame(&DetectorFrame::empty(t as u64));
            prop_assert!(report.intents.is_empty());
        }
        prop_assert_eq!(session.state().mode, Mode::Idle);
    }

    #[test]
    fn prop_modes_stay_exclusive_and_anchor_tracks_scrolling(
        steps in prop::collection::vec(
            prop::option::of((0.0f64..0.1, 0.0f64..1.0)),
            1..150,
        ),
        drag in any::<bool>(),
    ) {
        let bindings = PinchBindings { drag, scroll: true };
        let mut session = GestureSession::new(&config(bindings)).unwrap();
        let mut prev_mode = Mode::Idle;

        for (t, hand) in steps.iter().enumerate() {
            let f = match hand {
                Some((pinch, y)) => frame(t as u64, *pinch, *y),
                None => DetectorFrame::empty(t as u64),
            };
            let report = session.process_frame(&f);
            let mode = report.mode;

            prop_assert!(!(mode.is_dragging() && mode.is_scrolling()));
            prop_assert_eq!(mode.scroll_anchor_y().is_some(), mode.is_scrolling());

            let gestures: Vec<_> = report.intents.iter().filter(|i| !i.is_move()).collect();
            prop_assert!(gestures.len() <= 1);
            if let Some(intent) = gestures.first() {
                match intent {
                    Intent::DragStart => {
                        prop_assert!(prev_mode == Mode::Idle && mode.is_dragging());
                    }
                    Intent::DragEnd => {
                        prop_assert!(prev_mode.is_dragging() && mode == Mode::Idle);
                    }
                    Intent::Scroll { .. } => {
                        prop_assert!(prev_mode.is_scrolling() && mode.is_scrolling());
                    }
                    Intent::Move { .. } => unreachable!(),
                }
            }
            if hand.is_none() {
                prop_assert_eq!(mode, prev_mode);
            }
            prev_mode = mode;
        }
    }
}
