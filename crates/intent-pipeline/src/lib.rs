//! Pinchpoint Pipeline
//!
//! Connects a detector frame stream to the gesture core and forwards the
//! resulting intents to a pluggable sink:
//!
//! - **JSONL:** Append-only intent log for an external injector
//! - **Log:** Intents reported through `tracing`
//!
//! Frames are processed one at a time in arrival order. The async reader
//! only ever waits between frames, so dropping a running pipeline (e.g. on
//! Ctrl+C) never leaves a frame half-applied.

pub mod sinks;
pub mod writer;

use pinchpoint_common::clock::{FpsMeter, RateController};
use pinchpoint_common::error::PinchpointResult;
use pinchpoint_gesture_core::{FrameReport, GestureSession};
use pinchpoint_gesture_model::frame::{parse_frame_line, DetectorFrame};
use pinchpoint_gesture_model::intent::{Intent, IntentRecord};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Destination for emitted intents.
pub trait IntentSink: Send {
    /// Accept one intent.
    fn emit(&mut self, record: &IntentRecord) -> PinchpointResult<()>;

    /// Push buffered intents downstream.
    fn flush(&mut self) -> PinchpointResult<()> {
        Ok(())
    }

    /// Sink name for logging.
    fn name(&self) -> &str;
}

/// Counters for a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub frames: u64,
    pub hands: u64,
    pub skipped_lines: u64,
    pub moves: u64,
    pub drag_starts: u64,
    pub drag_ends: u64,
    pub scroll_up: u64,
    pub scroll_down: u64,
}

impl RunStats {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        if report.hand_detected() {
            self.hands += 1;
        }
        for intent in &report.intents {
            match intent {
                Intent::Move { .. } => self.moves += 1,
                Intent::DragStart => self.drag_starts += 1,
                Intent::DragEnd => self.drag_ends += 1,
                Intent::Scroll { step } if *step > 0 => self.scroll_up += 1,
                Intent::Scroll { .. } => self.scroll_down += 1,
            }
        }
    }
}

/// Drives a [`GestureSession`] from detector frames into an [`IntentSink`].
pub struct GesturePipeline {
    session: GestureSession,
    sink: Box<dyn IntentSink>,
    fps: FpsMeter,
    fps_log: RateController,
    flush_each_frame: bool,
    stats: RunStats,
}

impl GesturePipeline {
    pub fn new(session: GestureSession, sink: Box<dyn IntentSink>) -> Self {
        Self {
            session,
            sink,
            fps: FpsMeter::new(),
            fps_log: RateController::new(1),
            flush_each_frame: false,
            stats: RunStats::default(),
        }
    }

    /// Flush the sink after every frame that produced intents. Needed when a
    /// live injector is reading the other end.
    pub fn flush_each_frame(mut self, enabled: bool) -> Self {
        self.flush_each_frame = enabled;
        self
    }

    /// Run one frame through the session and forward its intents.
    pub fn process_frame(&mut self, frame: &DetectorFrame) -> PinchpointResult<FrameReport> {
        let report = self.session.process_frame(frame);

        for intent in &report.intents {
            self.sink.emit(&IntentRecord {
                timestamp_ns: report.timestamp_ns,
                intent: *intent,
            })?;
        }
        if self.flush_each_frame && !report.intents.is_empty() {
            self.sink.flush()?;
        }

        let fps = self.fps.tick(frame.timestamp_ns);
        if self.fps_log.should_tick(frame.timestamp_ns) {
            tracing::debug!(fps, frames = self.fps.frames(), mode = report.mode.name(), "Frame rate");
        }

        self.stats.record(&report);
        Ok(report)
    }

    /// Parse and process one JSONL line.
    ///
    /// Blank and `#` lines yield `Ok(None)`. Unparseable lines are logged and
    /// skipped, which leaves the session exactly as a no-hand frame would.
    pub fn process_line(&mut self, line: &str) -> PinchpointResult<Option<FrameReport>> {
        match parse_frame_line(line) {
            Ok(Some(frame)) => self.process_frame(&frame).map(Some),
            Ok(None) => Ok(None),
            Err(e) => {
                self.stats.skipped_lines += 1;
                tracing::warn!(error = %e, "Skipping unparseable detector frame");
                Ok(None)
            }
        }
    }

    /// Consume a JSONL frame stream until EOF.
    pub async fn run<R>(&mut self, reader: R) -> PinchpointResult<RunStats>
    where
        R: AsyncBufRead + Unpin,
    {
        tracing::info!(sink = %self.sink.name(), "Gesture pipeline started");

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            self.process_line(&line)?;
        }

        self.finish()
    }

    /// Flush the sink and return the run counters.
    pub fn finish(&mut self) -> PinchpointResult<RunStats> {
        self.sink.flush()?;
        tracing::info!(
            frames = self.stats.frames,
            hands = self.stats.hands,
            skipped = self.stats.skipped_lines,
            "Gesture pipeline stopped"
        );
        Ok(self.stats.clone())
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }
}
