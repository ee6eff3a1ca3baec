//! ytmp3 Core - Backend logic for the ytmp3 audio downloader
//!
//! This crate contains all business logic with zero UI dependencies:
//! configuration, logging setup, the session model, and the download
//! controller that drives `yt-dlp` and `ffmpeg`.

pub mod config;
pub mod controller;
pub mod logging;
pub mod media;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
