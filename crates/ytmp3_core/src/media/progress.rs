//! Parsing of yt-dlp output lines.
//!
//! yt-dlp is run with custom progress templates so every line we care about
//! starts with a `[ytmp3:<kind>]` marker. The percentage string yt-dlp fills
//! in can carry terminal colour codes, so those are stripped before parsing.

use std::path::PathBuf;

use crate::models::DownloadStatus;

use super::FetchEvent;

pub(crate) const DOWNLOAD_MARKER: &str = "[ytmp3:download]";
pub(crate) const POSTPROCESS_MARKER: &str = "[ytmp3:postprocess]";
pub(crate) const SAVED_MARKER: &str = "[ytmp3:saved]";

/// Separator between percent, speed and ETA in the download template.
pub(crate) const FIELD_SEPARATOR: char = '|';

/// Remove ANSI/VT100 escape sequences (CSI `ESC [ ... final`, OSC
/// `ESC ] ... BEL`, and two-byte `ESC x` forms).
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('[') => {
                // Parameters and intermediates, then one final byte in @..~
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                while let Some(c) = chars.next() {
                    if c == '\u{7}' {
                        break;
                    }
                    if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    out
}

/// Parse a percentage display string such as `" 42.5%"` into a fraction
/// in `[0, 1]`. Colour codes and surrounding whitespace are ignored.
pub fn parse_percent(progress: &str) -> Option<f32> {
    let clean = strip_ansi(progress);
    let number = clean.trim().trim_end_matches('%').trim();
    let value: f32 = number.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some((value / 100.0).clamp(0.0, 1.0))
}

/// Turn one line of yt-dlp output into an event, if it is one of ours.
pub fn parse_fetch_line(line: &str) -> Option<FetchEvent> {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(rest) = find_marker(line, DOWNLOAD_MARKER) {
        let mut fields = rest.splitn(3, FIELD_SEPARATOR);
        let progress = fields.next().unwrap_or_default().trim().to_string();
        let speed = fields.next().unwrap_or_default().trim().to_string();
        let eta = fields.next().unwrap_or_default().trim().to_string();
        return Some(FetchEvent::Progress(DownloadStatus {
            progress,
            speed,
            eta,
        }));
    }

    if let Some(rest) = find_marker(line, POSTPROCESS_MARKER) {
        return Some(FetchEvent::Postprocessing(rest.trim().to_string()));
    }

    if let Some(rest) = find_marker(line, SAVED_MARKER) {
        let path = rest.trim();
        if !path.is_empty() {
            return Some(FetchEvent::Saved(PathBuf::from(path)));
        }
    }

    // yt-dlp's own post-processor banner, in case the template is ignored
    if line.starts_with("[ExtractAudio]") {
        return Some(FetchEvent::Postprocessing("ExtractAudio".to_string()));
    }

    None
}

fn find_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker).map(|idx| &line[idx + marker.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_colour_codes() {
        assert_eq!(strip_ansi("\u{1b}[0;94m 50.0%\u{1b}[0m"), " 50.0%");
        assert_eq!(strip_ansi("plain"), "plain");
        assert_eq!(strip_ansi("\u{1b}]0;title\u{7}after"), "after");
    }

    #[test]
    fn percent_with_escape_sequences() {
        for k in [0u32, 50, 100] {
            let raw = format!("\u{1b}[0;94m{}%\u{1b}[0m", k);
            assert_eq!(parse_percent(&raw), Some(k as f32 / 100.0));
        }
    }

    #[test]
    fn percent_rejects_garbage() {
        assert_eq!(parse_percent("N/A"), None);
        assert_eq!(parse_percent(""), None);
    }

    #[test]
    fn parses_download_template_line() {
        let line = "[ytmp3:download] \u{1b}[0;94m 12.3%\u{1b}[0m|  1.20MiB/s|00:42";
        match parse_fetch_line(line) {
            Some(FetchEvent::Progress(status)) => {
                assert_eq!(strip_ansi(&status.progress), "12.3%");
                assert_eq!(status.speed, "1.20MiB/s");
                assert_eq!(status.eta, "00:42");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parses_saved_and_postprocess_lines() {
        assert_eq!(
            parse_fetch_line("[ytmp3:saved] /music/song.mp3\n"),
            Some(FetchEvent::Saved(PathBuf::from("/music/song.mp3")))
        );
        assert_eq!(
            parse_fetch_line("[ytmp3:postprocess] ExtractAudio"),
            Some(FetchEvent::Postprocessing("ExtractAudio".to_string()))
        );
        assert_eq!(parse_fetch_line("[youtube] abc: Downloading webpage"), None);
    }
}
