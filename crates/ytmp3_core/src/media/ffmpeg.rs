//! FFmpeg trimming.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::models::format_ffmpeg_timestamp;

use super::{check_tool, MediaError, MediaResult, OutputTail, Transcoder};

/// Trims audio with the `ffmpeg` executable.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: String,
}

impl Ffmpeg {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Command-line arguments for trimming `input` into `output`.
    pub fn build_trim_args(input: &Path, output: &Path, start: f64, end: f64) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-ss".to_string(),
            format_ffmpeg_timestamp(start),
            "-to".to_string(),
            format_ffmpeg_timestamp(end),
            "-vn".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Transcoder for Ffmpeg {
    fn check_available(&self) -> MediaResult<()> {
        check_tool(&self.program)
    }

    fn trim(&self, input: &Path, start: f64, end: f64) -> MediaResult<PathBuf> {
        if !input.is_file() {
            return Err(MediaError::InputNotFound(input.to_path_buf()));
        }

        let output = trimmed_output_path(input);
        let args = Self::build_trim_args(input, &output, start, end);
        tracing::debug!("Running {} {:?}", self.program, args);

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| MediaError::Spawn {
                tool: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            let mut tail = OutputTail::new(20);
            for line in String::from_utf8_lossy(&result.stderr).lines() {
                tail.push(line);
            }
            return Err(MediaError::ToolFailed {
                tool: self.program.clone(),
                status: result.status.to_string(),
                tail: tail.summary(),
            });
        }

        tracing::info!("Trimmed {} -> {}", input.display(), output.display());
        Ok(output)
    }
}

/// `<dir>/<stem>_trimmed.<ext>`, numbered if that file already exists.
pub fn trimmed_output_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "audio".to_string());
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let candidate = parent.join(format!("{}_trimmed{}", stem, ext));
    if !candidate.exists() {
        return candidate;
    }

    (1..)
        .map(|n| parent.join(format!("{}_trimmed_{}{}", stem, n, ext)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn output_sits_next_to_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("song.mp3");
        assert_eq!(trimmed_output_path(&input), dir.path().join("song_trimmed.mp3"));
    }

    #[test]
    fn output_is_numbered_when_taken() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("song.mp3");
        fs::write(dir.path().join("song_trimmed.mp3"), b"x").unwrap();
        fs::write(dir.path().join("song_trimmed_1.mp3"), b"x").unwrap();
        assert_eq!(
            trimmed_output_path(&input),
            dir.path().join("song_trimmed_2.mp3")
        );
    }

    #[test]
    fn trim_args_use_timestamps() {
        let args = Ffmpeg::build_trim_args(
            Path::new("in.mp3"),
            Path::new("out.mp3"),
            61.5,
            3600.0,
        );
        let ss = args.iter().position(|a| a == "-ss").unwrap();
        let to = args.iter().position(|a| a == "-to").unwrap();
        assert_eq!(args[ss + 1], "00:01:01.500");
        assert_eq!(args[to + 1], "01:00:00.000");
        assert_eq!(args.last().unwrap(), "out.mp3");
    }

    #[test]
    fn missing_input_is_rejected() {
        let dir = tempdir().unwrap();
        let err = Ffmpeg::default()
            .trim(&dir.path().join("nope.mp3"), 0.0, 1.0)
            .unwrap_err();
        assert!(matches!(err, MediaError::InputNotFound(_)));
    }
}
