//! Application configuration.
//!
//! Every tunable is fixed at startup. `AppConfig::validate` must pass before
//! a gesture session is constructed; an invalid pinch hysteresis band is a
//! fatal error, not something to recover from mid-session.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PinchpointError, PinchpointResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gesture interpretation tunables.
    pub gesture: GestureConfig,

    /// Target screen the cursor is mapped onto.
    pub screen: ScreenConfig,

    /// Camera frame the detector runs on.
    pub camera: CameraConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Gesture thresholds and smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pinch engages when thumb-index distance drops below this.
    pub pinch_start_threshold: f64,

    /// Pinch releases when thumb-index distance rises above this.
    pub pinch_end_threshold: f64,

    /// Normalized vertical palm travel needed for one scroll step.
    pub scroll_delta_threshold: f64,

    /// Injector units per scroll step.
    pub scroll_step: i32,

    /// Pointer smoothing divisor; 1 = snap, higher = smoother.
    pub smoothing: u32,

    /// Mirror landmarks horizontally (selfie view).
    pub mirror: bool,

    /// Which gestures the pinch drives.
    pub bindings: PinchBindings,
}

/// Gestures the pinch signal is bound to.
///
/// With both enabled, the engage edge starts a drag and scroll mode is only
/// entered when a pinch is held without a fresh edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchBindings {
    pub drag: bool,
    pub scroll: bool,
}

/// Screen dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

/// Camera frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "pinchpoint=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_start_threshold: 0.03,
            pinch_end_threshold: 0.05,
            scroll_delta_threshold: 0.04,
            scroll_step: 60,
            smoothing: 5,
            mirror: true,
            bindings: PinchBindings::default(),
        }
    }
}

impl Default for PinchBindings {
    fn default() -> Self {
        Self {
            drag: true,
            scroll: true,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl GestureConfig {
    /// Reject configurations that break the hysteresis contract or would make
    /// the mapper and scroll quantizer meaningless.
    pub fn validate(&self) -> PinchpointResult<()> {
        let start = self.pinch_start_threshold;
        let end = self.pinch_end_threshold;

        if !start.is_finite() || !end.is_finite() || start <= 0.0 {
            return Err(PinchpointError::config(format!(
                "pinch thresholds must be finite and positive (start={start}, end={end})"
            )));
        }
        if start >= end {
            return Err(PinchpointError::config(format!(
                "pinch_start_threshold ({start}) must be less than pinch_end_threshold ({end})"
            )));
        }
        if !self.scroll_delta_threshold.is_finite() || self.scroll_delta_threshold <= 0.0 {
            return Err(PinchpointError::config(format!(
                "scroll_delta_threshold must be finite and positive (got {})",
                self.scroll_delta_threshold
            )));
        }
        if self.scroll_step == 0 {
            return Err(PinchpointError::config("scroll_step must be non-zero"));
        }
        if self.smoothing == 0 {
            return Err(PinchpointError::config("smoothing must be at least 1"));
        }
        if !self.bindings.drag && !self.bindings.scroll {
            return Err(PinchpointError::config(
                "at least one of bindings.drag and bindings.scroll must be enabled",
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Missing files are an error here.
    pub fn load_from(path: &Path) -> PinchpointResult<Self> {
        if !path.exists() {
            return Err(PinchpointError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> PinchpointResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate every startup constant.
    pub fn validate(&self) -> PinchpointResult<()> {
        self.gesture.validate()?;
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(PinchpointError::config(format!(
                "screen dimensions must be non-zero (got {}x{})",
                self.screen.width, self.screen.height
            )));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(PinchpointError::config(format!(
                "camera dimensions must be non-zero (got {}x{})",
                self.camera.width, self.camera.height
            )));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("pinchpoint").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = AppConfig::default();
        config.gesture.pinch_start_threshold = 0.05;
        config.gesture.pinch_end_threshold = 0.05;
        let err = config.validate().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("must be less than"));
    }

    #[test]
    fn test_zero_smoothing_rejected() {
        let mut config = AppConfig::default();
        config.gesture.smoothing = 0;
        assert!(config.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_no_bindings_rejected() {
        let mut config = AppConfig::default();
        config.gesture.bindings = PinchBindings {
            drag: false,
            scroll: false,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_screen_rejected() {
        let mut config = AppConfig::default();
        config.screen.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let raw = r#"{ "gesture": { "smoothing": 8 }, "screen": { "width": 2560, "height": 1440 } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.gesture.smoothing, 8);
        assert_eq!(config.gesture.pinch_start_threshold, 0.03);
        assert_eq!(config.screen.width, 2560);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = std::env::temp_dir().join("pinchpoint_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.gesture.scroll_step = 120;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = AppConfig::load_from(Path::new("/nonexistent/pinchpoint.json")).unwrap_err();
        assert!(matches!(err, PinchpointError::FileNotFound { .. }));
    }
}
