//! Hotreel - play a media file when a global hotkey fires

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use hotreel_core::AppConfig;
use hotreel_desktop::{check_gstreamer_installation, HotreelApp, WindowConfig};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hotreel=debug".to_string()),
        )
        .init();

    hotreel_core::init();

    let config = AppConfig::from_env();
    config.validate().context("Invalid configuration")?;
    info!(bindings = %config.bindings_path.display(), "Starting Hotreel");

    match check_gstreamer_installation() {
        Ok(gst) if gst.is_complete() => info!(version = %gst.version, "GStreamer ready"),
        Ok(gst) => warn!(
            version = %gst.version,
            missing = ?gst.missing_elements,
            "GStreamer installation is incomplete, playback may fail"
        ),
        Err(e) => warn!(error = %e, "GStreamer check failed"),
    }

    let options = eframe::NativeOptions {
        viewport: WindowConfig::from_app(&config).viewport(),
        ..Default::default()
    };

    eframe::run_native(
        "Hotreel",
        options,
        Box::new(move |cc| Ok(Box::new(HotreelApp::new(cc, config)?))),
    )
    .map_err(|e| anyhow::anyhow!("Window event loop failed: {e}"))?;

    info!("Hotreel exited");
    Ok(())
}
