//! Session state shared between the controller and the UI.

use std::path::PathBuf;

/// Where the current download/trim session is.
///
/// `Request` is the initial state. `Error` and `SaveDirChanged` can be
/// entered from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Fetching video information.
    #[default]
    Request,
    /// Media is being downloaded.
    Downloading,
    /// Download finished, audio is being extracted/converted.
    Postprocessing,
    /// Audio file written.
    Done,
    /// A standalone trim finished.
    Trimmed,
    /// Something failed, see `Session::error_message`.
    Error,
    /// The default save directory was changed.
    SaveDirChanged,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Request => write!(f, "request"),
            SessionState::Downloading => write!(f, "downloading"),
            SessionState::Postprocessing => write!(f, "postprocessing"),
            SessionState::Done => write!(f, "done"),
            SessionState::Trimmed => write!(f, "trimmed"),
            SessionState::Error => write!(f, "error"),
            SessionState::SaveDirChanged => write!(f, "save_dir_changed"),
        }
    }
}

/// Display strings reported by the fetcher while downloading.
///
/// `progress` is whatever the tool printed (for example `" 42.0%"`) and may
/// still contain terminal colour sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadStatus {
    pub progress: String,
    pub speed: String,
    pub eta: String,
}

/// Everything the UI renders about the current session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub state: SessionState,
    pub download_status: DownloadStatus,
    pub error_message: String,
    /// Final audio file of the last download.
    pub save_path: Option<PathBuf>,
    /// Output of the last trim (standalone or after download).
    pub trim_filepath: Option<PathBuf>,
    /// Whether the last download was trimmed right after conversion.
    pub trimmed_download: bool,
    /// Default save directory, mirrored here for the status line.
    pub default_save_dir: String,
    /// A download or trim job is in flight.
    pub busy: bool,
}

impl Session {
    pub fn new(default_save_dir: impl Into<String>) -> Self {
        Self {
            default_save_dir: default_save_dir.into(),
            ..Default::default()
        }
    }
}
