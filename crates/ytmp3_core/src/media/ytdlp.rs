//! yt-dlp runner.

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;

use super::progress::{
    parse_fetch_line, DOWNLOAD_MARKER, FIELD_SEPARATOR, POSTPROCESS_MARKER, SAVED_MARKER,
};
use super::{check_tool, FetchEvent, FetchRequest, MediaError, MediaFetcher, MediaResult, OutputTail};

/// Number of output lines kept for error messages.
const TAIL_LINES: usize = 20;

/// Fetches audio with the `yt-dlp` executable.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: String,
}

impl YtDlp {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Command-line arguments for one request.
    pub fn build_args(&self, request: &FetchRequest) -> Vec<String> {
        let name = request
            .filename
            .as_deref()
            .map(sanitize_filename)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "%(title)s".to_string());
        let output_template = request.save_dir.join(format!("{}.%(ext)s", name));

        vec![
            "--newline".to_string(),
            "--no-playlist".to_string(),
            "--format".to_string(),
            "bestaudio/best".to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            request.audio_format.clone(),
            "--audio-quality".to_string(),
            request.audio_quality.clone(),
            "--output".to_string(),
            output_template.to_string_lossy().to_string(),
            // --print implies --quiet, which would hide progress
            "--progress".to_string(),
            "--progress-template".to_string(),
            format!(
                "download:{} %(progress._percent_str)s{sep}%(progress._speed_str)s{sep}%(progress._eta_str)s",
                DOWNLOAD_MARKER,
                sep = FIELD_SEPARATOR
            ),
            "--progress-template".to_string(),
            format!("postprocess:{} %(progress.postprocessor)s", POSTPROCESS_MARKER),
            "--print".to_string(),
            format!("after_move:{} %(filepath)s", SAVED_MARKER),
            request.url.clone(),
        ]
    }
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl MediaFetcher for YtDlp {
    fn check_available(&self) -> MediaResult<()> {
        check_tool(&self.program)
    }

    fn fetch_audio(
        &self,
        request: &FetchRequest,
        on_event: &mut dyn FnMut(FetchEvent),
    ) -> MediaResult<PathBuf> {
        let args = self.build_args(request);
        tracing::debug!("Running {} {:?}", self.program, args);

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| MediaError::Spawn {
                tool: self.program.clone(),
                source,
            })?;

        // Both streams feed one channel so events stay on this thread
        let (line_tx, line_rx) = mpsc::channel::<String>();
        let readers: Vec<_> = [
            child.stdout.take().map(|s| Box::new(s) as Box<dyn Read + Send>),
            child.stderr.take().map(|s| Box::new(s) as Box<dyn Read + Send>),
        ]
        .into_iter()
        .flatten()
        .map(|stream| {
            let tx = line_tx.clone();
            thread::spawn(move || {
                for line in BufReader::new(stream).lines().map_while(Result::ok) {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })
        })
        .collect();
        drop(line_tx);

        let mut tail = OutputTail::new(TAIL_LINES);
        let mut saved: Option<PathBuf> = None;

        for line in line_rx {
            tracing::trace!("yt-dlp: {}", line);
            match parse_fetch_line(&line) {
                Some(FetchEvent::Saved(path)) => {
                    saved = Some(path.clone());
                    on_event(FetchEvent::Saved(path));
                }
                Some(event) => on_event(event),
                None => tail.push(&line),
            }
        }

        for reader in readers {
            let _ = reader.join();
        }

        let status = child.wait().map_err(|source| MediaError::Spawn {
            tool: self.program.clone(),
            source,
        })?;

        if !status.success() {
            return Err(MediaError::ToolFailed {
                tool: self.program.clone(),
                status: status.to_string(),
                tail: tail.summary(),
            });
        }

        saved.ok_or_else(|| MediaError::NoOutput(self.program.clone()))
    }
}

/// Replace characters that would escape the save directory or break the
/// output template.
fn sanitize_filename(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            // yt-dlp treats % as a template field
            '%' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(filename: Option<&str>) -> FetchRequest {
        FetchRequest {
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            save_dir: PathBuf::from("/music"),
            filename: filename.map(str::to_string),
            audio_format: "mp3".to_string(),
            audio_quality: "0".to_string(),
        }
    }

    fn output_arg(args: &[String]) -> &str {
        let idx = args.iter().position(|a| a == "--output").unwrap();
        &args[idx + 1]
    }

    #[test]
    fn title_template_without_custom_name() {
        let args = YtDlp::default().build_args(&request(None));
        assert_eq!(
            PathBuf::from(output_arg(&args)),
            PathBuf::from("/music").join("%(title)s.%(ext)s")
        );
        assert_eq!(args.last().unwrap(), "https://www.youtube.com/watch?v=abc");
    }

    #[test]
    fn custom_name_is_sanitized() {
        let args = YtDlp::default().build_args(&request(Some("my/song 100%")));
        assert_eq!(
            PathBuf::from(output_arg(&args)),
            PathBuf::from("/music").join("my_song 100_.%(ext)s")
        );
    }

    #[test]
    fn blank_custom_name_falls_back_to_title() {
        let args = YtDlp::default().build_args(&request(Some("   ")));
        assert!(output_arg(&args).ends_with("%(title)s.%(ext)s"));
    }

    #[test]
    fn audio_options_are_passed() {
        let args = YtDlp::default().build_args(&request(None));
        let idx = args.iter().position(|a| a == "--audio-format").unwrap();
        assert_eq!(args[idx + 1], "mp3");
        assert!(args.iter().any(|a| a.starts_with("after_move:[ytmp3:saved]")));
    }

    #[test]
    fn missing_binary_fails_to_spawn() {
        let fetcher = YtDlp::new("definitely-not-a-real-tool-ytmp3");
        let err = fetcher.fetch_audio(&request(None), &mut |_| {}).unwrap_err();
        assert!(matches!(err, MediaError::Spawn { .. }));
    }
}
