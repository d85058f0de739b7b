//! Keyboard handling for the main window

use egui::{Context, Key};
use hotreel_core::AppConfig;
use tracing::warn;

/// Actions reachable from the main window keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    OpenSettings,
}

/// Maps local key presses to actions
#[derive(Debug, Clone, Copy)]
pub struct Controls {
    settings_key: Key,
}

impl Controls {
    pub fn new(settings_key: Key) -> Self {
        Self { settings_key }
    }

    /// Resolve the configured key name, falling back to Tab
    pub fn from_config(config: &AppConfig) -> Self {
        let key = Key::from_name(&config.settings_key).unwrap_or_else(|| {
            warn!(key = %config.settings_key, "Unknown settings key, using Tab");
            Key::Tab
        });
        Self::new(key)
    }

    pub fn action_for_key(&self, key: Key) -> Option<ControlAction> {
        (key == self.settings_key).then_some(ControlAction::OpenSettings)
    }

    /// Actions triggered during this frame
    pub fn poll(&self, ctx: &Context) -> Option<ControlAction> {
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, self.settings_key)) {
            return self.action_for_key(self.settings_key);
        }
        None
    }
}
