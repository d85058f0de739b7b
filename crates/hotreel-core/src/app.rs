//! Application state composing the store, the registrar and playback
//!
//! ```text
//! hotkey thread ──Play{combo,path}──▶ UiQueue ──pump()──▶ PlaybackController
//! media thread  ──EndOfMedia/Failed─▶    │                      │
//!                                        └──ProbeDimensions─────┘ (deferred)
//! settings actions ──▶ BindingSet ──save──▶ BindingStore ──▶ rebind
//! ```

use crate::{
    config::AppConfig,
    dispatch::{ui_channel, UiDispatcher, UiQueue, UiTask, Waker},
    hotkeys::{HotkeyBackend, HotkeyRegistrar, RebindReport, RegistrationFailure},
    playback::{DisplaySurface, MediaBackend, PlaybackController, PlaybackState},
    store::BindingStore,
    types::{BindingEntry, BindingSet},
    Error, Result,
};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Message shown to the user in the main or settings window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything the main window and settings window operate on
pub struct AppState<H: HotkeyBackend, M: MediaBackend> {
    config: AppConfig,
    store: BindingStore,
    bindings: BindingSet,
    registrar: HotkeyRegistrar<H>,
    playback: PlaybackController<M>,
    dispatcher: UiDispatcher,
    queue: UiQueue,
    failed_hotkeys: Vec<RegistrationFailure>,
    notices: Vec<Notice>,
}

impl<H: HotkeyBackend, M: MediaBackend> AppState<H, M> {
    /// Load bindings and register their hotkeys.
    ///
    /// A malformed or unreadable bindings file is reported as a notice and
    /// the application starts with no bindings; the file is not touched
    /// until the next change is saved.
    pub fn new(config: AppConfig, hotkeys: H, media: M, waker: Option<Waker>) -> Self {
        let (dispatcher, queue) = ui_channel(waker);
        let store = BindingStore::new(&config.bindings_path);
        let mut notices = Vec::new();

        let bindings = match store.load() {
            Ok(bindings) => bindings,
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Starting without bindings");
                notices.push(Notice::error(format!("{e}. Starting with no bindings.")));
                BindingSet::new()
            }
        };

        let playback =
            PlaybackController::new(media, config.surface_layout(), dispatcher.clone());

        let mut state = Self {
            config,
            store,
            bindings,
            registrar: HotkeyRegistrar::new(hotkeys),
            playback,
            dispatcher,
            queue,
            failed_hotkeys: Vec::new(),
            notices,
        };
        state.rebind();
        state
    }

    /// Create or replace a binding, persist it and re-register hotkeys
    pub fn add_binding(&mut self, key: &str, path: &str) -> Result<()> {
        let key = key.trim();
        let path = path.trim();
        if key.is_empty() {
            return Err(Error::EmptyKeyCombination);
        }
        if path.is_empty() {
            return Err(Error::EmptyFilePath);
        }

        let snapshot = self.bindings.clone();
        self.bindings.insert(key, path);
        if let Err(e) = self.store.save(&self.bindings) {
            self.bindings = snapshot;
            return Err(e);
        }

        info!(combo = key, path, "Binding saved");
        self.rebind();
        Ok(())
    }

    /// Delete a binding, persist the change and re-register hotkeys
    pub fn remove_binding(&mut self, key: &str) -> Result<()> {
        if !self.bindings.contains(key) {
            return Err(Error::UnknownBinding(key.to_string()));
        }

        let snapshot = self.bindings.clone();
        self.bindings.remove(key);
        if let Err(e) = self.store.save(&self.bindings) {
            self.bindings = snapshot;
            return Err(e);
        }

        info!(combo = key, "Binding deleted");
        self.rebind();
        Ok(())
    }

    /// Enqueue playback for a bound combination, as if its hotkey fired
    pub fn trigger(&self, combo: &str) -> bool {
        match self.bindings.get(combo) {
            Some(path) => self.dispatcher.send(UiTask::Play {
                combo: combo.to_string(),
                path: path.to_string(),
            }),
            None => {
                debug!(combo, "Trigger for unbound combination ignored");
                false
            }
        }
    }

    /// Run all UI tasks that are due. Returns how many were handled.
    pub fn pump(&mut self, now: Instant) -> usize {
        let tasks = self.queue.drain(now);
        let count = tasks.len();
        for task in tasks {
            self.handle(task);
        }
        count
    }

    fn handle(&mut self, task: UiTask) {
        match task {
            UiTask::Play { combo, path } => self.start_playback(&combo, &path),
            UiTask::ProbeDimensions(id) => {
                self.playback.probe_dimensions(id);
            }
            UiTask::EndOfMedia(id) => {
                self.playback.end_of_media(id);
            }
            UiTask::PlaybackFailed { session, message } => {
                if self.playback.playback_failed(session, &message) {
                    self.notices.push(Notice::error(format!("Playback failed: {message}")));
                }
            }
        }
    }

    fn start_playback(&mut self, combo: &str, path: &str) {
        info!(combo, path, "Starting playback");
        match self.playback.play(Path::new(path)) {
            Ok(id) => self
                .queue
                .schedule_after(self.config.probe_delay, UiTask::ProbeDimensions(id)),
            Err(e) => self.notices.push(Notice::error(format!("{combo}: {e}"))),
        }
    }

    fn rebind(&mut self) {
        let dispatcher = self.dispatcher.clone();
        let report: RebindReport = self.registrar.rebind(&self.bindings, move |binding| {
            dispatcher.send(UiTask::Play {
                combo: binding.key.clone(),
                path: binding.path.clone(),
            });
        });

        if !report.is_complete() {
            self.notices.push(Notice::warning(format!(
                "Could not register: {}",
                report.failed_combos()
            )));
        }
        self.failed_hotkeys = report.failed;
    }

    /// Earliest deferred task, for scheduling the next UI frame
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.next_deadline()
    }

    pub fn bindings(&self) -> &BindingSet {
        &self.bindings
    }

    /// Tagged list items for the settings window
    pub fn entries(&self) -> Vec<BindingEntry> {
        self.bindings.entries()
    }

    pub fn surface(&self) -> DisplaySurface {
        self.playback.surface()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn playback(&self) -> &PlaybackController<M> {
        &self.playback
    }

    pub fn registrar(&self) -> &HotkeyRegistrar<H> {
        &self.registrar
    }

    /// Combinations rejected by the last rebind
    pub fn failed_hotkeys(&self) -> &[RegistrationFailure] {
        &self.failed_hotkeys
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn push_error(&mut self, error: &Error) {
        self.notices.push(Notice::error(error.to_string()));
    }

    pub fn dismiss_notices(&mut self) {
        self.notices.clear();
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &BindingStore {
        &self.store
    }

    /// Unregister hotkeys and release the active session
    pub fn shutdown(&mut self) {
        info!("Shutting down");
        self.registrar.shutdown();
        self.playback.shutdown();
    }
}
