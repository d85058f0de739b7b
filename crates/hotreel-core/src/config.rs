//! Application configuration

use crate::{playback::SurfaceLayout, types::WindowSize, Error, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Environment variable overriding the bindings file location
pub const ENV_BINDINGS: &str = "HOTREEL_BINDINGS";
/// Environment variable overriding the dimension probe delay (milliseconds)
pub const ENV_PROBE_DELAY_MS: &str = "HOTREEL_PROBE_DELAY_MS";
/// Environment variable overriding the settings shortcut key name
pub const ENV_SETTINGS_KEY: &str = "HOTREEL_SETTINGS_KEY";

/// Default bindings document, relative to the working directory
pub const DEFAULT_BINDINGS_FILE: &str = "media_files.json";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// JSON document holding the bindings
    pub bindings_path: PathBuf,
    /// Fixed main window size
    pub window: WindowSize,
    /// Space kept above and below the fitted video
    pub surface_padding: u32,
    /// Wait after starting playback before querying video dimensions
    pub probe_delay: Duration,
    /// Key (egui key name) that opens the settings window
    pub settings_key: String,
    /// Main window background, RGB
    pub background: [u8; 3],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings_path: PathBuf::from(DEFAULT_BINDINGS_FILE),
            window: WindowSize::new(640, 480),
            surface_padding: 20,
            probe_delay: Duration::from_millis(100),
            settings_key: "Tab".to_string(),
            background: [0, 128, 0],
        }
    }
}

impl AppConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup. Unusable values are logged
    /// and ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_BINDINGS).filter(|v| !v.trim().is_empty()) {
            self.bindings_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(ENV_PROBE_DELAY_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.probe_delay = Duration::from_millis(ms),
                Err(e) => warn!(variable = ENV_PROBE_DELAY_MS, value = %raw, error = %e, "Ignoring invalid value"),
            }
        }

        if let Some(key) = lookup(ENV_SETTINGS_KEY) {
            let key = key.trim();
            if key.is_empty() {
                warn!(variable = ENV_SETTINGS_KEY, "Ignoring empty value");
            } else {
                self.settings_key = key.to_string();
            }
        }

        self
    }

    /// Check that the configuration describes a usable window
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::InvalidConfig("window size must be non-zero".into()));
        }
        if self.surface_padding.saturating_mul(2) >= self.window.height {
            return Err(Error::InvalidConfig(format!(
                "surface padding {} leaves no room in a {}px window",
                self.surface_padding, self.window.height
            )));
        }
        if self.settings_key.trim().is_empty() {
            return Err(Error::InvalidConfig("settings key must not be empty".into()));
        }
        Ok(())
    }

    pub fn surface_layout(&self) -> SurfaceLayout {
        SurfaceLayout {
            window: self.window,
            padding: self.surface_padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bindings_path, PathBuf::from("media_files.json"));
        assert_eq!(config.window, WindowSize::new(640, 480));
        assert_eq!(config.probe_delay, Duration::from_millis(100));
        assert_eq!(config.settings_key, "Tab");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default().with_overrides(lookup(&[
            (ENV_BINDINGS, "/tmp/hotreel/bindings.json"),
            (ENV_PROBE_DELAY_MS, "250"),
            (ENV_SETTINGS_KEY, "F1"),
        ]));
        assert_eq!(config.bindings_path, PathBuf::from("/tmp/hotreel/bindings.json"));
        assert_eq!(config.probe_delay, Duration::from_millis(250));
        assert_eq!(config.settings_key, "F1");
    }

    #[test]
    fn test_invalid_overrides_ignored() {
        let config = AppConfig::default()
            .with_overrides(lookup(&[(ENV_PROBE_DELAY_MS, "soon"), (ENV_SETTINGS_KEY, "  ")]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validate_padding() {
        let config = AppConfig {
            surface_padding: 240,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
