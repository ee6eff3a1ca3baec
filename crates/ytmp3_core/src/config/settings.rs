//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Download and conversion settings.
    #[serde(default)]
    pub download: DownloadSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Path configuration for saved audio and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Directory downloads are saved to unless another one is picked.
    #[serde(default = "default_save_dir")]
    pub default_save_dir: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_save_dir() -> String {
    dirs::audio_dir()
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("downloads"))
        .to_string_lossy()
        .to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            default_save_dir: default_save_dir(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// How audio is fetched and converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadSettings {
    /// Target audio format passed to the extract-audio post-processor.
    #[serde(default = "default_audio_format")]
    pub audio_format: String,

    /// Audio quality (0 = best VBR, 9 = worst, or a bitrate like `192K`).
    #[serde(default = "default_audio_quality")]
    pub audio_quality: String,

    /// yt-dlp executable.
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: String,

    /// ffmpeg executable.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
}

fn default_audio_format() -> String {
    "mp3".to_string()
}

fn default_audio_quality() -> String {
    "0".to_string()
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            audio_format: default_audio_format(),
            audio_quality: default_audio_quality(),
            ytdlp_path: default_ytdlp_path(),
            ffmpeg_path: default_ffmpeg_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Level used when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Paths,
    Download,
    Logging,
}

impl ConfigSection {
    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Download => "download",
            ConfigSection::Logging => "logging",
        }
    }

    /// All sections, in file order.
    pub fn all() -> [ConfigSection; 3] {
        [
            ConfigSection::Paths,
            ConfigSection::Download,
            ConfigSection::Logging,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gets_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.download.audio_format, "mp3");
        assert_eq!(settings.download.ytdlp_path, "yt-dlp");
        assert_eq!(settings.paths.logs_folder, ".logs");
        assert_eq!(settings.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let settings: Settings =
            toml::from_str("[download]\naudio_format = \"opus\"\n").unwrap();
        assert_eq!(settings.download.audio_format, "opus");
        assert_eq!(settings.download.audio_quality, "0");
    }

    #[test]
    fn table_names_match_sections() {
        let names: Vec<_> = ConfigSection::all().iter().map(|s| s.table_name()).collect();
        assert_eq!(names, ["paths", "download", "logging"]);
    }
}
