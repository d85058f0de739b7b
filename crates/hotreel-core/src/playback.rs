//! Playback Controller - owns the single active media session
//!
//! Lifecycle:
//! - `play` releases any previous session before opening the next one
//! - the display surface is shown as soon as playback is requested
//! - dimensions are probed once after start and the surface is refitted
//! - end of media hides the surface; the session stays allocated until
//!   the next `play` or `stop` releases it
//!
//! All methods run on the UI-owning context. Native callbacks reach the
//! controller only through [`SessionEvents`], which enqueue [`UiTask`]s.

use crate::{
    dispatch::{UiDispatcher, UiTask},
    layout::fit_surface,
    types::{SessionId, SurfaceRect, VideoDimensions, WindowSize},
    Error, Result,
};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Native media playback library
pub trait MediaBackend {
    type Session: MediaSession;

    /// Construct a player for `path` bound to the display surface.
    ///
    /// The session reports end-of-media and errors through `events`.
    fn open(&mut self, path: &Path, events: SessionEvents) -> Result<Self::Session>;
}

/// One native player instance
pub trait MediaSession {
    fn play(&mut self) -> Result<()>;

    fn stop(&mut self);

    /// Native video size, if the decoder has reported it yet
    fn video_dimensions(&self) -> Option<VideoDimensions>;

    /// Free the native player
    fn release(self)
    where
        Self: Sized,
    {
    }
}

/// Callback handle given to a session; usable from any thread
#[derive(Clone)]
pub struct SessionEvents {
    id: SessionId,
    dispatcher: UiDispatcher,
}

impl SessionEvents {
    pub fn new(id: SessionId, dispatcher: UiDispatcher) -> Self {
        Self { id, dispatcher }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn end_of_media(&self) {
        self.dispatcher.send(UiTask::EndOfMedia(self.id));
    }

    pub fn failed(&self, message: impl Into<String>) {
        self.dispatcher.send(UiTask::PlaybackFailed {
            session: self.id,
            message: message.into(),
        });
    }

    /// A new video frame is ready to be drawn
    pub fn frame_ready(&self) {
        self.dispatcher.wake();
    }
}

impl fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEvents").field("id", &self.id).finish()
    }
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Playing => write!(f, "playing"),
        }
    }
}

/// Visible region into which video frames are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySurface {
    pub visible: bool,
    pub rect: SurfaceRect,
}

/// Layout parameters for the display surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceLayout {
    pub window: WindowSize,
    pub padding: u32,
}

struct ActiveSession<S> {
    id: SessionId,
    path: PathBuf,
    session: S,
    dimensions: Option<VideoDimensions>,
    ended: bool,
}

/// Owner of at most one media session
pub struct PlaybackController<B: MediaBackend> {
    backend: B,
    layout: SurfaceLayout,
    dispatcher: UiDispatcher,
    active: Option<ActiveSession<B::Session>>,
    surface: DisplaySurface,
}

impl<B: MediaBackend> PlaybackController<B> {
    pub fn new(backend: B, layout: SurfaceLayout, dispatcher: UiDispatcher) -> Self {
        Self {
            backend,
            layout,
            dispatcher,
            active: None,
            surface: DisplaySurface {
                visible: false,
                rect: SurfaceRect::full(layout.window),
            },
        }
    }

    /// Replace the active session with a new one for `path`.
    ///
    /// On failure the surface is hidden and the controller is Idle.
    pub fn play(&mut self, path: impl AsRef<Path>) -> Result<SessionId> {
        let path = path.as_ref();
        self.release_active();

        self.surface.visible = true;

        match self.start(path) {
            Ok(id) => Ok(id),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Playback could not start");
                self.surface.visible = false;
                Err(e)
            }
        }
    }

    fn start(&mut self, path: &Path) -> Result<SessionId> {
        if !path.exists() {
            return Err(Error::MediaNotFound(path.to_path_buf()));
        }

        let id = SessionId::new();
        let events = SessionEvents::new(id, self.dispatcher.clone());
        let mut session = self.backend.open(path, events)?;

        if let Err(e) = session.play() {
            session.stop();
            session.release();
            return Err(e);
        }

        info!(session_id = %id, path = %path.display(), "Playback started");
        self.surface.rect = SurfaceRect::full(self.layout.window);
        self.active = Some(ActiveSession {
            id,
            path: path.to_path_buf(),
            session,
            dimensions: None,
            ended: false,
        });
        Ok(id)
    }

    /// Refit the surface to the session's video size, if it is known by now.
    ///
    /// Returns true when the surface was resized.
    pub fn probe_dimensions(&mut self, id: SessionId) -> bool {
        let Some(active) = self.active.as_mut().filter(|a| a.id == id) else {
            debug!(session_id = %id, "Dimension probe for inactive session ignored");
            return false;
        };

        let Some(dimensions) = active.session.video_dimensions() else {
            debug!(session_id = %id, "Video dimensions not available yet");
            return false;
        };
        active.dimensions = Some(dimensions);

        match fit_surface(dimensions, self.layout.window, self.layout.padding) {
            Some(rect) => {
                debug!(
                    session_id = %id,
                    video_width = dimensions.width,
                    video_height = dimensions.height,
                    surface_width = rect.width,
                    surface_height = rect.height,
                    "Surface fitted to video"
                );
                self.surface.rect = rect;
                true
            }
            None => false,
        }
    }

    /// Hide the surface if `id` is the active session
    pub fn end_of_media(&mut self, id: SessionId) -> bool {
        match self.active.as_mut() {
            Some(active) if active.id == id => {
                info!(session_id = %id, "End of media");
                active.ended = true;
                self.surface.visible = false;
                true
            }
            _ => {
                debug!(session_id = %id, "End of media for released session ignored");
                false
            }
        }
    }

    /// Release the active session after a native error.
    ///
    /// Returns true if `id` was the active session.
    pub fn playback_failed(&mut self, id: SessionId, message: &str) -> bool {
        if self.active.as_ref().map(|a| a.id) != Some(id) {
            warn!(session_id = %id, reason = message, "Error from released session ignored");
            return false;
        }
        error!(session_id = %id, reason = message, "Playback failed");
        self.release_active();
        self.surface.visible = false;
        true
    }

    /// Stop and release the active session
    pub fn stop(&mut self) {
        self.release_active();
        self.surface.visible = false;
    }

    pub fn shutdown(&mut self) {
        self.stop();
    }

    pub fn state(&self) -> PlaybackState {
        match &self.active {
            Some(active) if !active.ended => PlaybackState::Playing,
            _ => PlaybackState::Idle,
        }
    }

    pub fn surface(&self) -> DisplaySurface {
        self.surface
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.active.as_ref().map(|a| a.id)
    }

    pub fn active_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|a| a.path.as_path())
    }

    pub fn video_dimensions(&self) -> Option<VideoDimensions> {
        self.active.as_ref().and_then(|a| a.dimensions)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn release_active(&mut self) {
        if let Some(mut previous) = self.active.take() {
            debug!(session_id = %previous.id, path = %previous.path.display(), "Releasing session");
            previous.session.stop();
            previous.session.release();
        }
    }
}

impl<B: MediaBackend> Drop for PlaybackController<B> {
    fn drop(&mut self) {
        self.release_active();
    }
}
