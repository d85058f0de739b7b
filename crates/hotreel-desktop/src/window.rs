//! Window configuration for the main and settings windows

use egui::{Color32, ViewportBuilder, ViewportId};
use hotreel_core::AppConfig;

/// Main window configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub decorations: bool,
    pub background: Color32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::from_app(&AppConfig::default())
    }
}

impl WindowConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        let [r, g, b] = config.background;
        Self {
            title: "Hotreel".to_string(),
            width: config.window.width,
            height: config.window.height,
            decorations: false,
            background: Color32::from_rgb(r, g, b),
        }
    }

    /// Borderless, fixed-size main viewport
    pub fn viewport(&self) -> ViewportBuilder {
        let size = [self.width as f32, self.height as f32];
        ViewportBuilder::default()
            .with_title(self.title.clone())
            .with_inner_size(size)
            .with_min_inner_size(size)
            .with_max_inner_size(size)
            .with_resizable(false)
            .with_decorations(self.decorations)
    }
}

/// Identifier of the settings viewport
pub fn settings_viewport_id() -> ViewportId {
    ViewportId::from_hash_of("hotreel_settings")
}

pub fn settings_viewport() -> ViewportBuilder {
    ViewportBuilder::default()
        .with_title("Settings")
        .with_inner_size([300.0, 250.0])
        .with_min_inner_size([300.0, 250.0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_window_defaults() {
        let window = WindowConfig::default();
        assert_eq!((window.width, window.height), (640, 480));
        assert!(!window.decorations);
        assert_eq!(window.background, Color32::from_rgb(0, 128, 0));
    }
}
