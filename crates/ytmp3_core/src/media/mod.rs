//! External media tools.
//!
//! Downloads go through `yt-dlp` and trimming through `ffmpeg`. Both are
//! hidden behind small traits so the controller can be exercised with stubs.

mod ffmpeg;
mod progress;
mod ytdlp;

pub use ffmpeg::{trimmed_output_path, Ffmpeg};
pub use progress::{parse_fetch_line, parse_percent, strip_ansi};
pub use ytdlp::YtDlp;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::DownloadStatus;

/// Errors from running external tools.
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("{0} was not found in PATH")]
    ToolNotFound(String),

    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed ({status}): {tail}")]
    ToolFailed {
        tool: String,
        status: String,
        tail: String,
    },

    #[error("{0} finished without reporting an output file")]
    NoOutput(String),

    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),
}

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// What the fetcher reports while it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    /// Download progress display strings.
    Progress(DownloadStatus),
    /// A post-processor (audio extraction) started.
    Postprocessing(String),
    /// Final file written.
    Saved(PathBuf),
}

/// Everything needed to fetch one URL as audio.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub url: String,
    pub save_dir: PathBuf,
    /// File name without extension; `None` uses the video title.
    pub filename: Option<String>,
    pub audio_format: String,
    pub audio_quality: String,
}

/// Fetches a URL and converts it to audio. Blocking.
pub trait MediaFetcher: Send + Sync {
    fn check_available(&self) -> MediaResult<()>;

    /// Runs the download, calling `on_event` for each progress report, and
    /// returns the path of the converted file.
    fn fetch_audio(
        &self,
        request: &FetchRequest,
        on_event: &mut dyn FnMut(FetchEvent),
    ) -> MediaResult<PathBuf>;
}

/// Cuts an audio file to `[start, end)` seconds. Blocking.
pub trait Transcoder: Send + Sync {
    fn check_available(&self) -> MediaResult<()>;

    /// Returns the path of the new file.
    fn trim(&self, input: &Path, start: f64, end: f64) -> MediaResult<PathBuf>;
}

/// Look up an executable by name or path.
pub fn check_tool(program: &str) -> MediaResult<()> {
    which::which(program)
        .map(|_| ())
        .map_err(|_| MediaError::ToolNotFound(program.to_string()))
}

/// Last lines of a tool's output, kept for error messages.
#[derive(Debug)]
pub(crate) struct OutputTail {
    lines: VecDeque<String>,
    capacity: usize,
}

impl OutputTail {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn push(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.to_string());
    }

    /// Prefer `ERROR:` lines, fall back to the raw tail.
    pub(crate) fn summary(&self) -> String {
        let errors: Vec<&str> = self
            .lines
            .iter()
            .filter(|l| l.starts_with("ERROR"))
            .map(String::as_str)
            .collect();
        if errors.is_empty() {
            self.lines.iter().cloned().collect::<Vec<_>>().join("\n")
        } else {
            errors.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_last_lines() {
        let mut tail = OutputTail::new(2);
        tail.push("one");
        tail.push("   ");
        tail.push("two");
        tail.push("three");
        assert_eq!(tail.summary(), "two\nthree");
    }

    #[test]
    fn tail_prefers_error_lines() {
        let mut tail = OutputTail::new(10);
        tail.push("[youtube] abc: Downloading webpage");
        tail.push("ERROR: [youtube] abc: Video unavailable");
        tail.push("some trailing noise");
        assert_eq!(tail.summary(), "ERROR: [youtube] abc: Video unavailable");
    }

    #[test]
    fn missing_tool_is_reported() {
        let err = check_tool("definitely-not-a-real-tool-ytmp3").unwrap_err();
        assert!(matches!(err, MediaError::ToolNotFound(_)));
    }
}
