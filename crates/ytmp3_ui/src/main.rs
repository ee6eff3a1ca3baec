//! ytmp3 - Main entry point
//!
//! Downloads the audio track of a video URL through yt-dlp, optionally
//! trimming it with ffmpeg. This file handles:
//! - Configuration loading
//! - Application-level logging initialization
//! - Directory creation
//! - Application launch

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use ytmp3_core::config::ConfigManager;
use ytmp3_core::controller::Controller;
use ytmp3_core::logging::{init_tracing, init_tracing_with_file};

mod app;
mod handlers;
mod pages;
mod presentation;
mod theme;
mod types;
mod widgets;
mod windows;

use app::App;

/// Default config path: .config/settings.toml (relative to current working directory)
fn default_config_path() -> PathBuf {
    PathBuf::from(".config").join("settings.toml")
}

fn main() -> iced::Result {
    // Load configuration first (needed for logs directory path)
    let config_path = default_config_path();
    let mut config_manager = ConfigManager::new(&config_path);

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    let logs_dir = config_manager.logs_folder();
    let level = config_manager.settings().logging.level;
    // The rolling appender needs the folder; fall back to stderr only
    let _log_guard = match std::fs::create_dir_all(&logs_dir) {
        Ok(()) => Some(init_tracing_with_file(level, &logs_dir)),
        Err(e) => {
            eprintln!("Warning: Failed to create logs folder {}: {}", logs_dir.display(), e);
            init_tracing(level);
            None
        }
    };

    tracing::info!("ytmp3 starting");
    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Core version: {}", ytmp3_core::version());

    if let Err(e) = config_manager.ensure_dirs_exist() {
        tracing::error!("Failed to create directories: {}", e);
        eprintln!("Warning: Failed to create directories: {}", e);
    }

    let config = Arc::new(Mutex::new(config_manager));
    let controller = Controller::with_configured_tools(config);

    iced::daemon(move || App::new(controller.clone()), App::update, App::view)
        .title(App::title)
        .subscription(App::subscription)
        .run()
}
