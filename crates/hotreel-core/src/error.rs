//! Error types for Hotreel Core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for hotreel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Hotreel error types
#[derive(Error, Debug)]
pub enum Error {
    // Binding store errors
    #[error("Failed to read bindings file {path}: {source}")]
    StoreRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write bindings file {path}: {source}")]
    StoreWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed bindings file {path}: {source}")]
    StoreParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize bindings: {0}")]
    StoreSerialize(#[source] serde_json::Error),

    // Binding errors
    #[error("Key combination must not be empty")]
    EmptyKeyCombination,

    #[error("File path must not be empty")]
    EmptyFilePath,

    #[error("No binding for key combination '{0}'")]
    UnknownBinding(String),

    // Hotkey errors
    #[error("Invalid key combination '{combo}': {reason}")]
    InvalidHotkey { combo: String, reason: String },

    #[error("Hotkey '{combo}' could not be registered: {reason}")]
    HotkeyRegistration { combo: String, reason: String },

    #[error("Hotkey backend error: {0}")]
    HotkeyBackend(String),

    // Playback errors
    #[error("Media file not found: {0}")]
    MediaNotFound(PathBuf),

    #[error("Failed to open media {path}: {reason}")]
    MediaOpen { path: PathBuf, reason: String },

    #[error("Playback failed: {0}")]
    Playback(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a media open error
    pub fn media_open(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::MediaOpen {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if the user can correct this error and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::EmptyKeyCombination
                | Error::EmptyFilePath
                | Error::UnknownBinding(_)
                | Error::InvalidHotkey { .. }
                | Error::HotkeyRegistration { .. }
                | Error::MediaNotFound(_)
                | Error::MediaOpen { .. }
                | Error::StoreParse { .. }
        )
    }

    /// Returns a stable error code for logs and notices
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::StoreRead { .. } => "STORE_READ",
            Error::StoreWrite { .. } => "STORE_WRITE",
            Error::StoreParse { .. } => "STORE_PARSE",
            Error::StoreSerialize(_) => "STORE_SERIALIZE",
            Error::EmptyKeyCombination => "EMPTY_KEY",
            Error::EmptyFilePath => "EMPTY_PATH",
            Error::UnknownBinding(_) => "UNKNOWN_BINDING",
            Error::InvalidHotkey { .. } => "INVALID_HOTKEY",
            Error::HotkeyRegistration { .. } => "HOTKEY_REGISTER",
            Error::HotkeyBackend(_) => "HOTKEY_BACKEND",
            Error::MediaNotFound(_) => "MEDIA_NOT_FOUND",
            Error::MediaOpen { .. } => "MEDIA_OPEN",
            Error::Playback(_) => "PLAYBACK",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Internal(_) => "INTERNAL",
            Error::Io(_) => "IO",
        }
    }
}
