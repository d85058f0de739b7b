//! Borderless main window

use crate::controls::{ControlAction, Controls};
use crate::hotkeys::GlobalHotkeys;
use crate::player::{GstBackend, VideoFrame};
use crate::ui::{notice_color, SettingsWindow};
use crate::window::WindowConfig;
use crate::DesktopState;
use anyhow::Context as _;
use egui::{pos2, vec2, Color32, ColorImage, Rect, Sense, TextureHandle, TextureOptions};
use hotreel_core::{AppConfig, AppState, SessionId, SurfaceRect, Waker};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub struct HotreelApp {
    state: DesktopState,
    window: WindowConfig,
    controls: Controls,
    settings: SettingsWindow,
    texture: Option<(SessionId, TextureHandle)>,
}

impl HotreelApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> anyhow::Result<Self> {
        let ctx = cc.egui_ctx.clone();
        let waker: Waker = Arc::new(move || ctx.request_repaint());

        let hotkeys = GlobalHotkeys::new().context("Global hotkeys unavailable")?;
        let media = GstBackend::new().context("GStreamer unavailable")?;

        let window = WindowConfig::from_app(&config);
        let controls = Controls::from_config(&config);
        let state = AppState::new(config, hotkeys, media, Some(waker));
        info!(bindings = state.bindings().len(), "Main window ready");

        Ok(Self {
            state,
            window,
            controls,
            settings: SettingsWindow::default(),
            texture: None,
        })
    }

    fn upload_frame(&mut self, ctx: &egui::Context) {
        let active = self.state.playback().active_session();
        if self.texture.as_ref().is_some_and(|(id, _)| Some(*id) != active) {
            self.texture = None;
        }

        let Some(frame) = self.state.playback().backend().frames().take() else {
            return;
        };
        if Some(frame.session) != active {
            return;
        }

        let image = color_image(&frame);
        match &mut self.texture {
            Some((_, texture)) => texture.set(image, TextureOptions::LINEAR),
            None => {
                let texture = ctx.load_texture("hotreel_video", image, TextureOptions::LINEAR);
                self.texture = Some((frame.session, texture));
            }
        }
    }

    fn paint(&self, ui: &mut egui::Ui) {
        let surface = self.state.surface();
        if !surface.visible {
            return;
        }
        let Some((_, texture)) = &self.texture else {
            return;
        };
        let rect = to_egui_rect(surface.rect).translate(ui.max_rect().min.to_vec2());
        ui.painter().image(
            texture.id(),
            rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        );
    }

    fn paint_notice(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.state.notices().last().cloned() else {
            return;
        };
        let rect = ui.max_rect();
        let anchor = pos2(rect.left() + 8.0, rect.bottom() - 8.0);
        let response = ui.put(
            Rect::from_min_max(pos2(anchor.x, anchor.y - 20.0), pos2(rect.right() - 8.0, anchor.y)),
            egui::Label::new(egui::RichText::new(&notice.message).color(notice_color(&notice)))
                .sense(Sense::click()),
        );
        if response.clicked() {
            self.state.dismiss_notices();
        }
    }
}

impl eframe::App for HotreelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let handled = self.state.pump(Instant::now());
        if handled > 0 {
            debug!(handled, state = %self.state.playback_state(), "UI tasks handled");
        }
        if let Some(deadline) = self.state.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }

        if let Some(ControlAction::OpenSettings) = self.controls.poll(ctx) {
            self.settings.open();
        }

        self.upload_frame(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.window.background))
            .show(ctx, |ui| {
                let response = ui.interact(ui.max_rect(), ui.id().with("drag"), Sense::click_and_drag());
                if response.drag_started() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }
                self.paint(ui);
                self.paint_notice(ui);
            });

        self.settings.show(ctx, &mut self.state);
    }
}

impl Drop for HotreelApp {
    fn drop(&mut self) {
        self.texture = None;
        self.state.shutdown();
    }
}

fn color_image(frame: &VideoFrame) -> ColorImage {
    ColorImage::from_rgba_unmultiplied([frame.width as usize, frame.height as usize], &frame.pixels)
}

fn to_egui_rect(rect: SurfaceRect) -> Rect {
    Rect::from_min_size(
        pos2(rect.x as f32, rect.y as f32),
        vec2(rect.width as f32, rect.height as f32),
    )
}
