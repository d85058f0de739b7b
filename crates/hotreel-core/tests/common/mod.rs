//! Recording fakes for the hotkey and media backends

#![allow(dead_code)]

use hotreel_core::{
    AppConfig, Error, HotkeyBackend, HotkeyHandler, HotkeyToken, MediaBackend, MediaSession,
    Result, SessionEvents, VideoDimensions,
};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

// =============================================================================
// Hotkeys
// =============================================================================

#[derive(Default)]
struct HotkeyInner {
    next: u32,
    active: Vec<(HotkeyToken, String, HotkeyHandler)>,
}

/// Hotkey backend whose handlers are fired by the test
#[derive(Clone, Default)]
pub struct FakeHotkeys {
    inner: Arc<Mutex<HotkeyInner>>,
}

impl FakeHotkeys {
    /// Invoke every handler registered for `combo`, returning how many ran
    pub fn fire(&self, combo: &str) -> usize {
        let handlers: Vec<HotkeyHandler> = self
            .inner
            .lock()
            .active
            .iter()
            .filter(|(_, registered, _)| registered == combo)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in &handlers {
            handler();
        }
        handlers.len()
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().active.len()
    }

    pub fn registrations_for(&self, combo: &str) -> usize {
        self.inner
            .lock()
            .active
            .iter()
            .filter(|(_, registered, _)| registered == combo)
            .count()
    }
}

impl HotkeyBackend for FakeHotkeys {
    fn register(&mut self, combo: &str, handler: HotkeyHandler) -> Result<HotkeyToken> {
        let malformed = combo.split('+').any(|part| part.is_empty() || part.contains(' '));
        if malformed {
            return Err(Error::InvalidHotkey {
                combo: combo.to_string(),
                reason: "unrecognized key".to_string(),
            });
        }
        let mut inner = self.inner.lock();
        inner.next += 1;
        let token = HotkeyToken(inner.next);
        inner.active.push((token, combo.to_string(), handler));
        Ok(token)
    }

    fn unregister(&mut self, token: HotkeyToken) -> Result<()> {
        self.inner.lock().active.retain(|(t, _, _)| *t != token);
        Ok(())
    }
}

// =============================================================================
// Media
// =============================================================================

#[derive(Default)]
struct MediaInner {
    log: Vec<String>,
    live: usize,
    dimensions: Option<VideoDimensions>,
    fail_open: bool,
    fail_play: bool,
    events: Vec<SessionEvents>,
}

/// Media backend that records every native call
#[derive(Clone, Default)]
pub struct FakeMedia {
    inner: Arc<Mutex<MediaInner>>,
}

impl FakeMedia {
    pub fn log(&self) -> Vec<String> {
        self.inner.lock().log.clone()
    }

    /// Sessions opened and not yet released
    pub fn live_sessions(&self) -> usize {
        self.inner.lock().live
    }

    pub fn set_dimensions(&self, dimensions: Option<VideoDimensions>) {
        self.inner.lock().dimensions = dimensions;
    }

    pub fn fail_open(&self, fail: bool) {
        self.inner.lock().fail_open = fail;
    }

    pub fn fail_play(&self, fail: bool) {
        self.inner.lock().fail_play = fail;
    }

    /// Event handle of the n-th opened session
    pub fn events(&self, index: usize) -> SessionEvents {
        self.inner.lock().events[index].clone()
    }

    pub fn opened(&self) -> usize {
        self.inner.lock().events.len()
    }
}

pub struct FakeSession {
    name: String,
    inner: Arc<Mutex<MediaInner>>,
}

impl MediaBackend for FakeMedia {
    type Session = FakeSession;

    fn open(&mut self, path: &Path, events: SessionEvents) -> Result<FakeSession> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut inner = self.inner.lock();
        if inner.fail_open {
            inner.log.push(format!("open-failed {name}"));
            return Err(Error::media_open(path, "unsupported container"));
        }
        inner.log.push(format!("open {name}"));
        inner.live += 1;
        inner.events.push(events);
        Ok(FakeSession {
            name,
            inner: self.inner.clone(),
        })
    }
}

impl MediaSession for FakeSession {
    fn play(&mut self) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.log.push(format!("play {}", self.name));
        if inner.fail_play {
            return Err(Error::Playback("no decoder".into()));
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.inner.lock().log.push(format!("stop {}", self.name));
    }

    fn video_dimensions(&self) -> Option<VideoDimensions> {
        self.inner.lock().dimensions
    }

    fn release(self) {
        let mut inner = self.inner.lock();
        inner.log.push(format!("release {}", self.name));
        inner.live -= 1;
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Temp directory with empty `a.mp4` and `b.mp4` media files
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.mp4", "b.mp4"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        Self { dir }
    }

    pub fn media(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }

    pub fn bindings_path(&self) -> PathBuf {
        self.dir.path().join("media_files.json")
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            bindings_path: self.bindings_path(),
            probe_delay: Duration::ZERO,
            ..AppConfig::default()
        }
    }

    /// Write a bindings document before the app starts
    pub fn seed(&self, pairs: &[(&str, &str)]) {
        let map: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(self.media(v))))
            .collect();
        std::fs::write(self.bindings_path(), serde_json::to_string(&map).unwrap()).unwrap();
    }
}
