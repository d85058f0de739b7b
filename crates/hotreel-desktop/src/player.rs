//! GStreamer media backend
//!
//! Features:
//! - One `gst_player::Player` per session, signals emitted on the player thread
//! - Decoded RGBA frames pulled from an `AppSink` into a shared [`FrameSlot`]
//! - Hardware-accelerated decoding through playbin's decoder selection

use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use gstreamer_player as gst_player;
use gstreamer_video as gst_video;
use hotreel_core::{Error, MediaBackend, MediaSession, Result, SessionEvents, SessionId, VideoDimensions};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Tightly packed RGBA frame
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub session: SessionId,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Default)]
struct SlotInner {
    active: Option<SessionId>,
    latest: Option<VideoFrame>,
}

/// Latest decoded frame of the active session.
///
/// This is the display surface a session is bound to. Frames published by
/// any other session are dropped.
#[derive(Debug, Default)]
pub struct FrameSlot {
    inner: Mutex<SlotInner>,
}

impl FrameSlot {
    fn activate(&self, session: SessionId) {
        let mut inner = self.inner.lock();
        inner.active = Some(session);
        inner.latest = None;
    }

    fn deactivate(&self, session: SessionId) {
        let mut inner = self.inner.lock();
        if inner.active == Some(session) {
            inner.active = None;
            inner.latest = None;
        }
    }

    fn publish(&self, frame: VideoFrame) -> bool {
        let mut inner = self.inner.lock();
        if inner.active != Some(frame.session) {
            return false;
        }
        inner.latest = Some(frame);
        true
    }

    /// Take the newest frame, if one arrived since the last call
    pub fn take(&self) -> Option<VideoFrame> {
        self.inner.lock().latest.take()
    }
}

/// Backend creating one GStreamer player per session
pub struct GstBackend {
    frames: Arc<FrameSlot>,
}

impl GstBackend {
    /// Initialize GStreamer
    pub fn new() -> Result<Self> {
        gst::init().map_err(|e| Error::Internal(format!("Failed to initialize GStreamer: {e}")))?;
        Ok(Self {
            frames: Arc::new(FrameSlot::default()),
        })
    }

    /// Frame slot the main window draws from
    pub fn frames(&self) -> &Arc<FrameSlot> {
        &self.frames
    }
}

impl MediaBackend for GstBackend {
    type Session = GstSession;

    fn open(&mut self, path: &Path, events: SessionEvents) -> Result<GstSession> {
        let absolute = std::path::absolute(path).map_err(|e| Error::media_open(path, e))?;
        let uri = gst::glib::filename_to_uri(&absolute, None).map_err(|e| Error::media_open(path, e))?;
        info!(session_id = %events.id(), uri = %uri, "Opening media");

        let player = gst_player::Player::new(
            None::<gst_player::PlayerVideoRenderer>,
            None::<gst_player::PlayerSignalDispatcher>,
        );

        let appsink = gst_app::AppSink::builder()
            .caps(
                &gst_video::VideoCapsBuilder::new()
                    .format(gst_video::VideoFormat::Rgba)
                    .build(),
            )
            .max_buffers(1)
            .drop(true)
            .build();

        let id = events.id();
        let slot = self.frames.clone();
        let frame_events = events.clone();
        appsink.set_callbacks(
            gst_app::AppSinkCallbacks::builder()
                .new_sample(move |sink| {
                    let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                    if let Some(frame) = frame_from_sample(id, &sample) {
                        if slot.publish(frame) {
                            frame_events.frame_ready();
                        }
                    }
                    Ok(gst::FlowSuccess::Ok)
                })
                .build(),
        );
        player.pipeline().set_property("video-sink", &appsink);

        let dimensions = Arc::new(Mutex::new(None));

        let eos_events = events.clone();
        player.connect_end_of_stream(move |_player| {
            debug!(session_id = %eos_events.id(), "End of stream");
            eos_events.end_of_media();
        });

        let error_events = events.clone();
        player.connect_error(move |_player, err| {
            error!(session_id = %error_events.id(), error = %err, "Player error");
            error_events.failed(err.to_string());
        });

        player.connect_warning(|_player, warning| {
            warn!("Player warning: {}", warning);
        });

        let reported = dimensions.clone();
        player.connect_video_dimensions_changed(move |_player, width, height| {
            if width > 0 && height > 0 {
                *reported.lock() = Some(VideoDimensions::new(width as u32, height as u32));
                debug!(width, height, "Video dimensions");
            }
        });

        player.set_uri(Some(uri.as_str()));
        self.frames.activate(id);

        Ok(GstSession {
            id,
            player,
            frames: self.frames.clone(),
            dimensions,
        })
    }
}

/// One GStreamer player bound to the frame slot
pub struct GstSession {
    id: SessionId,
    player: gst_player::Player,
    frames: Arc<FrameSlot>,
    dimensions: Arc<Mutex<Option<VideoDimensions>>>,
}

impl MediaSession for GstSession {
    fn play(&mut self) -> Result<()> {
        self.player.play();
        Ok(())
    }

    fn stop(&mut self) {
        self.player.stop();
        self.frames.deactivate(self.id);
    }

    fn video_dimensions(&self) -> Option<VideoDimensions> {
        if let Some(dimensions) = *self.dimensions.lock() {
            return Some(dimensions);
        }
        self.player
            .current_video_track()
            .map(|track| (track.width(), track.height()))
            .filter(|(w, h)| *w > 0 && *h > 0)
            .map(|(w, h)| VideoDimensions::new(w as u32, h as u32))
    }

    fn release(self) {
        debug!(session_id = %self.id, "Releasing GStreamer player");
    }
}

impl Drop for GstSession {
    fn drop(&mut self) {
        self.stop();
    }
}

fn frame_from_sample(session: SessionId, sample: &gst::Sample) -> Option<VideoFrame> {
    let caps = sample.caps()?;
    let info = gst_video::VideoInfo::from_caps(caps).ok()?;
    let buffer = sample.buffer()?;
    let frame = gst_video::VideoFrameRef::from_buffer_ref_readable(buffer, &info).ok()?;

    let width = frame.width();
    let height = frame.height();
    let stride = usize::try_from(*frame.plane_stride().first()?).ok()?;
    let data = frame.plane_data(0).ok()?;

    Some(VideoFrame {
        session,
        width,
        height,
        pixels: pack_rows(data, stride, width as usize * 4, height as usize)?,
    })
}

/// Copy `height` rows of `row_len` bytes out of a strided plane
fn pack_rows(data: &[u8], stride: usize, row_len: usize, height: usize) -> Option<Vec<u8>> {
    if stride < row_len {
        return None;
    }
    let mut pixels = Vec::with_capacity(row_len * height);
    for row in 0..height {
        let start = row * stride;
        pixels.extend_from_slice(data.get(start..start + row_len)?);
    }
    Some(pixels)
}

/// Check GStreamer installation and capabilities
pub fn check_gstreamer_installation() -> Result<GStreamerInfo> {
    gst::init().map_err(|e| Error::Internal(format!("Failed to initialize GStreamer: {e}")))?;

    let (major, minor, micro, nano) = gst::version();
    let version = format!("{}.{}.{}.{}", major, minor, micro, nano);

    // Check for required elements
    let required_elements = [
        ("playbin", "Core playback"),
        ("decodebin", "Auto decoding"),
        ("appsink", "Frame delivery"),
        ("videoconvert", "Colorspace conversion"),
    ];

    let mut missing = Vec::new();
    for (element, desc) in &required_elements {
        if gst::ElementFactory::find(element).is_none() {
            missing.push(format!("{} ({})", element, desc));
        }
    }

    Ok(GStreamerInfo {
        version,
        missing_elements: missing,
    })
}

/// GStreamer installation information
#[derive(Debug)]
pub struct GStreamerInfo {
    pub version: String,
    pub missing_elements: Vec<String>,
}

impl GStreamerInfo {
    pub fn is_complete(&self) -> bool {
        self.missing_elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(session: SessionId) -> VideoFrame {
        VideoFrame {
            session,
            width: 1,
            height: 1,
            pixels: vec![0, 0, 0, 255],
        }
    }

    #[test]
    fn test_pack_rows_strips_padding() {
        // 2x2 RGBA with 4 bytes of row padding
        let data = [
            1, 1, 1, 1, 2, 2, 2, 2, 0, 0, 0, 0, //
            3, 3, 3, 3, 4, 4, 4, 4, 0, 0, 0, 0,
        ];
        let pixels = pack_rows(&data, 12, 8, 2).unwrap();
        assert_eq!(pixels, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4]);
    }

    #[test]
    fn test_pack_rows_rejects_short_plane() {
        assert!(pack_rows(&[0; 10], 8, 8, 2).is_none());
        assert!(pack_rows(&[0; 32], 4, 8, 2).is_none());
    }

    #[test]
    fn test_frame_slot_ignores_other_sessions() {
        let slot = FrameSlot::default();
        let current = SessionId::new();
        let stale = SessionId::new();
        slot.activate(current);

        assert!(!slot.publish(frame(stale)));
        assert!(slot.take().is_none());

        assert!(slot.publish(frame(current)));
        assert_eq!(slot.take().map(|f| f.session), Some(current));
        assert!(slot.take().is_none());

        slot.deactivate(stale);
        assert!(slot.publish(frame(current)));
        slot.deactivate(current);
        assert!(slot.take().is_none());
    }
}
