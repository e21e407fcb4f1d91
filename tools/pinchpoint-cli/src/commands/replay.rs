//! Replay a recorded detector frame file.

use std::path::PathBuf;

use pinchpoint_common::clock::SessionClock;
use pinchpoint_common::config::AppConfig;
use pinchpoint_gesture_core::{GestureSession, SessionState};
use pinchpoint_gesture_model::intent::Intent;
use pinchpoint_pipeline::sinks::LogSink;
use pinchpoint_pipeline::{GesturePipeline, RunStats};

pub fn run(config: AppConfig, frames_path: PathBuf, json: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&frames_path)
        .map_err(|_| anyhow::anyhow!("Frame file not found: {}", frames_path.display()))?;

    if !json {
        println!("Replaying {}", frames_path.display());
    }

    let (stats, state) = replay(&config, &content, json)?;
    if json {
        return Ok(());
    }

    println!();
    println!("  Frames: {} ({} with a hand)", stats.frames, stats.hands);
    if stats.skipped_lines > 0 {
        println!("  Skipped lines: {}", stats.skipped_lines);
    }
    println!("  Moves: {}", stats.moves);
    println!("  Drags: {} started, {} ended", stats.drag_starts, stats.drag_ends);
    println!(
        "  Scroll ticks: {} up, {} down",
        stats.scroll_up, stats.scroll_down
    );
    println!(
        "  Final cursor: ({}, {})",
        state.smoothed_cursor.x, state.smoothed_cursor.y
    );
    println!("  Final mode: {}", state.mode.name());

    Ok(())
}

/// Feed every line of a frame file through a fresh session, printing as it
/// goes. Unparseable lines are skipped and counted.
fn replay(config: &AppConfig, content: &str, json: bool) -> anyhow::Result<(RunStats, SessionState)> {
    let session = GestureSession::new(config)
        .map_err(|e| anyhow::anyhow!("Refusing to replay: {e}"))?;
    let mut pipeline = GesturePipeline::new(session, Box::new(LogSink));

    let mut last_mode = pipeline.session().state().mode;
    for line in content.lines() {
        let Some(report) = pipeline.process_line(line)? else {
            continue;
        };

        if json {
            println!("{}", serde_json::to_string(&report)?);
            continue;
        }

        let secs = SessionClock::ns_to_secs(report.timestamp_ns);
        for intent in report.intents.iter().filter(|i| !i.is_move()) {
            match intent {
                Intent::Scroll { step } => println!("  {secs:>8.3}s  scroll {step:+}"),
                other => println!("  {secs:>8.3}s  {}", other.label()),
            }
        }
        if report.mode.name() != last_mode.name() {
            println!("  {secs:>8.3}s  mode -> {}", report.mode.name());
        }
        last_mode = report.mode;
    }

    let stats = pipeline.finish()?;
    Ok((stats, pipeline.session().state()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinchpoint_gesture_core::Mode;

    const FRAMES_WITH_BROKEN_LINE: &str = concat!(
        "# recorded by a flaky detector\n",
        "{\"t\":0,\"landmarks\":null}\n",
        "{broken\n",
        "{\"t\":66666666,\"landmarks\":null}\n",
    );

    #[test]
    fn test_replay_skips_and_counts_broken_lines() {
        let (stats, state) = replay(&AppConfig::default(), FRAMES_WITH_BROKEN_LINE, false).unwrap();
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.hands, 0);
        assert_eq!(stats.skipped_lines, 1);
        assert_eq!(state.mode, Mode::Idle);
    }

    #[test]
    fn test_replay_file_with_broken_line_succeeds() {
        let dir = std::env::temp_dir().join("pinchpoint_test_replay_broken");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("frames.jsonl");
        std::fs::write(&path, FRAMES_WITH_BROKEN_LINE).unwrap();

        run(AppConfig::default(), path.clone(), false).unwrap();
        run(AppConfig::default(), path, true).unwrap();

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_replay_fixture_session() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../fixtures/sample-session/frames.jsonl");
        let content = std::fs::read_to_string(path).unwrap();

        let (stats, state) = replay(&AppConfig::default(), &content, true).unwrap();
        assert_eq!(stats.frames, 34);
        assert_eq!(stats.skipped_lines, 0);
        assert_eq!((stats.drag_starts, stats.drag_ends), (1, 1));
        assert_eq!(state.mode, Mode::Idle);
    }
}
