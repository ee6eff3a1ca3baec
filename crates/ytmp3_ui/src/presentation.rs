//! Session → display text.
//!
//! Pure functions so the main window's progress bar and status line can be
//! tested without a running event loop.

use std::path::PathBuf;

use ytmp3_core::media::{parse_percent, strip_ansi};
use ytmp3_core::models::{Session, SessionState};

/// What the progress bar and percentage label should show.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    /// Bar fill in `[0, 1]`.
    pub fraction: f32,
    pub label: String,
}

/// Progress for states that drive the bar; `None` leaves it as it is.
pub fn progress_view(session: &Session) -> Option<ProgressView> {
    match session.state {
        SessionState::Request => Some(ProgressView {
            fraction: 0.0,
            label: "0%".to_string(),
        }),
        SessionState::Downloading => {
            let raw = &session.download_status.progress;
            let fraction = parse_percent(raw)?;
            Some(ProgressView {
                fraction,
                label: strip_ansi(raw).trim().to_string(),
            })
        }
        SessionState::Postprocessing => Some(ProgressView {
            fraction: 1.0,
            label: "100%".to_string(),
        }),
        _ => None,
    }
}

/// Status line under the progress bar.
pub fn log_line(session: &Session) -> String {
    match session.state {
        SessionState::Request => "Requesting information...".to_string(),
        SessionState::Downloading => format!(
            "Downloading... SPEED {} ETA {}",
            session.download_status.speed, session.download_status.eta
        ),
        SessionState::Postprocessing => "Postprocessing...".to_string(),
        SessionState::Done => {
            let trim_info = if session.trimmed_download {
                format!(",\n{}", display_path(&session.trim_filepath))
            } else {
                String::new()
            };
            format!(
                "Done! File saved at {}{}",
                display_path(&session.save_path),
                trim_info
            )
        }
        SessionState::Trimmed => format!(
            "File trimmed and saved at {}",
            display_path(&session.trim_filepath)
        ),
        SessionState::SaveDirChanged => format!(
            "Default save directory changed to {}",
            session.default_save_dir
        ),
        SessionState::Error => format!("An error occured: {}", session.error_message),
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}
