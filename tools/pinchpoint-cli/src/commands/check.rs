//! Validate the effective configuration.

use pinchpoint_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Pinchpoint Configuration Check");
    println!("{}", "=".repeat(50));
    println!("  Standard location: {}", config_file_path().display());

    let g = &config.gesture;
    println!(
        "  Pinch engage < {}  release > {}",
        g.pinch_start_threshold, g.pinch_end_threshold
    );
    println!(
        "  Scroll: {} units per {} of palm travel",
        g.scroll_step, g.scroll_delta_threshold
    );
    println!("  Smoothing: {}", g.smoothing);
    println!("  Mirror: {}", g.mirror);
    println!(
        "  Bindings: drag={} scroll={}",
        g.bindings.drag, g.bindings.scroll
    );
    println!(
        "  Screen: {}x{}  Camera: {}x{}",
        config.screen.width, config.screen.height, config.camera.width, config.camera.height
    );
    println!();

    match config.validate() {
        Ok(()) => {
            if g.bindings.drag && g.bindings.scroll {
                println!("[NOTE] Pinch engage starts a drag; use --no-drag to scroll instead.");
            }
            println!("[OK] Configuration is valid.");
            Ok(())
        }
        Err(e) => {
            println!("[FAIL] {e}");
            Err(anyhow::anyhow!("Invalid configuration"))
        }
    }
}
