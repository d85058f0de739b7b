//! Settings window for editing hotkey bindings

use crate::ui::notice_color;
use crate::window::{settings_viewport, settings_viewport_id};
use crate::DesktopState;
use hotreel_core::{BindingEntry, Error};
use tracing::debug;

/// Editor state of the settings window
#[derive(Debug, Default)]
pub struct SettingsWindow {
    open: bool,
    key_input: String,
    file_input: String,
    selected: Option<String>,
    status: Option<String>,
}

impl SettingsWindow {
    pub fn open(&mut self) {
        if !self.open {
            debug!("Opening settings");
        }
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show(&mut self, ctx: &egui::Context, state: &mut DesktopState) {
        if !self.open {
            return;
        }

        ctx.show_viewport_immediate(settings_viewport_id(), settings_viewport(), |ctx, _class| {
            egui::CentralPanel::default().show(ctx, |ui| self.contents(ui, state));

            if ctx.input(|i| i.viewport().close_requested()) {
                self.open = false;
            }
        });
    }

    fn contents(&mut self, ui: &mut egui::Ui, state: &mut DesktopState) {
        ui.add(
            egui::TextEdit::singleline(&mut self.key_input)
                .hint_text("Enter key combination (e.g., 'shift+t')")
                .desired_width(f32::INFINITY),
        );
        ui.add(
            egui::TextEdit::singleline(&mut self.file_input)
                .hint_text("Enter media file path")
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            if ui.button("Browse").clicked() {
                self.browse();
            }
            if ui.button("Save Binding").clicked() {
                let result = state.add_binding(&self.key_input, &self.file_input);
                self.report(result, "Saved");
            }
            let delete = ui.add_enabled(self.selected.is_some(), egui::Button::new("Delete Binding"));
            if delete.clicked() {
                self.delete_selected(state);
            }
        });

        if let Some(status) = &self.status {
            ui.small(status);
        }
        for notice in state.notices() {
            ui.colored_label(notice_color(notice), &notice.message);
        }

        ui.separator();
        let entries = state.entries();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for entry in &entries {
                self.entry_row(ui, entry);
            }
        });
    }

    fn entry_row(&mut self, ui: &mut egui::Ui, entry: &BindingEntry) {
        let selected = self.selected.as_deref() == Some(entry.key.as_str());
        if ui.selectable_label(selected, &entry.display).clicked() {
            self.selected = Some(entry.key.clone());
        }
    }

    fn browse(&mut self) {
        if let Some(path) = rfd::FileDialog::new().set_title("Select Media File").pick_file() {
            self.file_input = path.display().to_string();
        }
    }

    fn delete_selected(&mut self, state: &mut DesktopState) {
        let Some(key) = self.selected.take() else {
            return;
        };
        let result = state.remove_binding(&key);
        self.report(result, "Deleted");
    }

    fn report(&mut self, result: Result<(), Error>, done: &str) {
        self.status = Some(match result {
            Ok(()) => done.to_string(),
            Err(e) => e.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_status() {
        let mut settings = SettingsWindow::default();
        settings.report(Ok(()), "Saved");
        assert_eq!(settings.status.as_deref(), Some("Saved"));

        settings.report(Err(Error::EmptyFilePath), "Saved");
        assert_eq!(settings.status, Some(Error::EmptyFilePath.to_string()));
    }

    #[test]
    fn test_open_once() {
        let mut settings = SettingsWindow::default();
        assert!(!settings.is_open());
        settings.open();
        settings.open();
        assert!(settings.is_open());
    }
}
