//! Hotreel Desktop - hotkey-triggered media playback window
//!
//! Native shell around `hotreel-core`:
//! - GStreamer playback with decoded frames drawn by egui
//! - System-wide hotkeys through `global-hotkey`
//! - Borderless main window and a settings window for editing bindings

pub mod controls;
pub mod hotkeys;
pub mod player;
pub mod ui;
pub mod window;

pub use controls::{ControlAction, Controls};
pub use hotkeys::{parse_combo, GlobalHotkeys};
pub use player::{check_gstreamer_installation, FrameSlot, GStreamerInfo, GstBackend, VideoFrame};
pub use ui::HotreelApp;
pub use window::WindowConfig;

/// Application state wired to the native backends
pub type DesktopState = hotreel_core::AppState<GlobalHotkeys, GstBackend>;
