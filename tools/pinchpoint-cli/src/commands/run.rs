//! Run a live gesture session over a detector frame stream.

use std::path::PathBuf;

use pinchpoint_common::clock::SessionClock;
use pinchpoint_common::config::AppConfig;
use pinchpoint_gesture_core::GestureSession;
use pinchpoint_gesture_model::intent::IntentStreamHeader;
use pinchpoint_pipeline::sinks::{FanoutSink, LogSink};
use pinchpoint_pipeline::writer::IntentWriter;
use pinchpoint_pipeline::{GesturePipeline, IntentSink};
use tokio::io::{AsyncBufRead, BufReader};

use super::is_stdio;

pub async fn run(config: AppConfig, input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let session = GestureSession::new(&config)
        .map_err(|e| anyhow::anyhow!("Refusing to start: {e}"))?;

    // Open the input first so a bad path never truncates an existing output.
    let reader: Box<dyn AsyncBufRead + Unpin + Send> = if is_stdio(&input) {
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        let file = tokio::fs::File::open(&input)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open {}: {e}", input.display()))?;
        Box::new(BufReader::new(file))
    };

    let clock = SessionClock::start();
    let header = IntentStreamHeader {
        schema_version: "1.0".to_string(),
        epoch_wall: clock.epoch_wall().to_string(),
        screen_width: config.screen.width,
        screen_height: config.screen.height,
    };

    let live_output = is_stdio(&output);
    let writer: Box<dyn IntentSink> = if live_output {
        Box::new(IntentWriter::new(std::io::stdout(), &header)?)
    } else {
        Box::new(IntentWriter::create(&output, &header)?)
    };
    let sink = FanoutSink::new(vec![writer, Box::new(LogSink)]);

    let mut pipeline = GesturePipeline::new(session, Box::new(sink)).flush_each_frame(live_output);

    eprintln!("Gesture controller started. Press Ctrl+C to quit.");
    eprintln!(
        "  Screen: {}x{}  Smoothing: {}  Pinch: {} / {}",
        config.screen.width,
        config.screen.height,
        config.gesture.smoothing,
        config.gesture.pinch_start_threshold,
        config.gesture.pinch_end_threshold
    );

    let finished = tokio::select! {
        result = pipeline.run(reader) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    let stats = match finished {
        Some(result) => result?,
        None => {
            eprintln!();
            eprintln!("Ctrl+C detected, stopping...");
            pipeline.finish()?
        }
    };

    eprintln!();
    eprintln!(
        "Session ended after {:.1}s: {} frames ({} with a hand), {} skipped",
        clock.elapsed_secs(),
        stats.frames,
        stats.hands,
        stats.skipped_lines
    );
    eprintln!(
        "  Drags: {}  Scroll up: {}  Scroll down: {}",
        stats.drag_starts, stats.scroll_up, stats.scroll_down
    );
    if !live_output {
        eprintln!("  Intents written to: {}", output.display());
    }

    Ok(())
}
