//! Hotreel Core - hotkey-triggered media playback
//!
//! This crate provides everything behind the Hotreel window that does not
//! need a display:
//! - Binding set and its JSON persistence
//! - Global hotkey registration over a pluggable backend
//! - Single-session playback control over a pluggable media backend
//! - The task queue that marshals hotkey and media events onto the UI context
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         Hotreel Core                          │
//! ├───────────────────────────────────────────────────────────────┤
//! │                                                               │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐         │
//! │  │   Binding    │  │    Hotkey    │  │   Playback   │         │
//! │  │    Store     │  │  Registrar   │  │  Controller  │         │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘         │
//! │         │                 │                 │                 │
//! │         └─────────────────┼─────────────────┘                 │
//! │                           │                                   │
//! │                    ┌──────┴──────┐                            │
//! │                    │  AppState   │◀──── UiQueue (UI tasks)    │
//! │                    └─────────────┘                            │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod hotkeys;
pub mod layout;
pub mod playback;
pub mod store;
pub mod types;

pub use app::{AppState, Notice, NoticeLevel};
pub use config::AppConfig;
pub use dispatch::{ui_channel, UiDispatcher, UiQueue, UiTask, Waker};
pub use error::{Error, Result};
pub use hotkeys::{
    HotkeyBackend, HotkeyHandler, HotkeyRegistrar, HotkeyToken, RebindReport, RegistrationFailure,
};
pub use layout::fit_surface;
pub use playback::{
    DisplaySurface, MediaBackend, MediaSession, PlaybackController, PlaybackState, SessionEvents,
    SurfaceLayout,
};
pub use store::BindingStore;
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log library startup
pub fn init() {
    tracing::info!(version = VERSION, "Hotreel Core initialized");
}
