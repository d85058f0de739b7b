//! egui windows

mod main_window;
mod settings;

pub use main_window::HotreelApp;
pub use settings::SettingsWindow;

use egui::Color32;
use hotreel_core::{Notice, NoticeLevel};

pub(crate) fn notice_color(notice: &Notice) -> Color32 {
    match notice.level {
        NoticeLevel::Info => Color32::LIGHT_GRAY,
        NoticeLevel::Warning => Color32::YELLOW,
        NoticeLevel::Error => Color32::LIGHT_RED,
    }
}
