pub mod check;
pub mod config;
pub mod replay;
pub mod run;

use std::path::Path;

use clap::Args;
use pinchpoint_common::config::{AppConfig, ScreenConfig};

/// Load the config from an explicit path, or the standard location with
/// defaults as fallback.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display())),
        None => Ok(AppConfig::load()),
    }
}

/// `-` means stdin/stdout.
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Per-invocation overrides of the gesture config.
#[derive(Args, Debug, Default)]
pub struct GestureOverrides {
    /// Do not bind the pinch to drag (pinch scrolls instead)
    #[arg(long)]
    pub no_drag: bool,

    /// Do not bind the pinch to scroll
    #[arg(long)]
    pub no_scroll: bool,

    /// Screen size as WIDTHxHEIGHT
    #[arg(long)]
    pub screen: Option<String>,

    /// Pointer smoothing divisor (1 = none)
    #[arg(long)]
    pub smoothing: Option<u32>,

    /// Disable horizontal mirroring of landmarks
    #[arg(long)]
    pub no_mirror: bool,
}

impl GestureOverrides {
    pub fn apply(&self, config: &mut AppConfig) -> anyhow::Result<()> {
        if self.no_drag {
            config.gesture.bindings.drag = false;
        }
        if self.no_scroll {
            config.gesture.bindings.scroll = false;
        }
        if self.no_mirror {
            config.gesture.mirror = false;
        }
        if let Some(smoothing) = self.smoothing {
            config.gesture.smoothing = smoothing;
        }
        if let Some(screen) = &self.screen {
            config.screen = parse_screen(screen)?;
        }
        Ok(())
    }
}

fn parse_screen(value: &str) -> anyhow::Result<ScreenConfig> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow::anyhow!("Screen size must look like 1920x1080, got '{value}'"))?;
    Ok(ScreenConfig {
        width: w.trim().parse()?,
        height: h.trim().parse()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_screen() {
        assert_eq!(
            parse_screen("2560x1440").unwrap(),
            ScreenConfig {
                width: 2560,
                height: 1440
            }
        );
        assert!(parse_screen("2560").is_err());
        assert!(parse_screen("widexhigh").is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = AppConfig::default();
        let overrides = GestureOverrides {
            no_drag: true,
            smoothing: Some(2),
            no_mirror: true,
            ..Default::default()
        };
        overrides.apply(&mut config).unwrap();
        assert!(!config.gesture.bindings.drag);
        assert!(config.gesture.bindings.scroll);
        assert_eq!(config.gesture.smoothing, 2);
        assert!(!config.gesture.mirror);
    }

    #[test]
    fn test_stdio_marker() {
        assert!(is_stdio(Path::new("-")));
        assert!(!is_stdio(Path::new("frames.jsonl")));
    }
}
