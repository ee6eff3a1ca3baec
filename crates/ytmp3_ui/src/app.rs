//! Main application module for ytmp3.
//!
//! Runs as an iced daemon so the trim and audio-settings windows can be
//! opened next to the main window. Session changes are pushed from the
//! controller through a channel and arrive as `Message::SessionChanged`.

use std::collections::HashMap;
use std::path::PathBuf;

use iced::futures::channel::mpsc;
use iced::widget::text;
use iced::{window, Element, Size, Subscription, Task};

use ytmp3_core::controller::Controller;
use ytmp3_core::models::{Session, TrimTimestamps};

use crate::pages::main_window;
use crate::presentation::{self, ProgressView};
use crate::types::{TrimField, TrimFieldOwner, TrimFieldTexts, WindowKind};
use crate::windows::{audio_settings, trim};

/// All possible messages the application can receive.
#[derive(Debug, Clone)]
pub enum Message {
    // Main window
    UrlChanged(String),
    PasteUrl,
    BrowseSaveDir,
    SaveDirSelected(Option<PathBuf>),
    SetDefaultSaveDir,
    StartDownload,
    DownloadFinished(Result<PathBuf, String>),
    SessionChanged(Session),
    OpenTrimWindow,
    OpenAudioSettingsWindow,

    // Trim window
    BrowseTrimFile,
    TrimFileSelected(Option<PathBuf>),
    CommitTrim,
    TrimFinished(Result<PathBuf, String>),
    CloseTrimWindow,

    // Shared by trim and audio settings windows
    TrimFieldChanged(TrimField, String),

    // Audio settings window
    FilenameChanged(String),
    CloseAudioSettingsWindow,

    // Window management
    WindowOpened(WindowKind, window::Id),
    WindowClosed(window::Id),
    Noop,
}

/// Main application state.
pub struct App {
    pub controller: Controller,

    // Window management
    pub window_map: HashMap<window::Id, WindowKind>,
    pub main_window_id: Option<window::Id>,
    pub trim_window_id: Option<window::Id>,
    pub audio_settings_window_id: Option<window::Id>,

    // Main window state
    pub url_input: String,
    /// Read-only display of the picked save directory.
    pub save_dir_display: String,
    pub progress: ProgressView,
    pub log_text: String,
    pub session: Session,

    // Trim window state
    /// Trim settings to restore when the trim window is closed.
    /// Cleared once a trim is committed.
    pub previous_trim_settings: Option<TrimTimestamps>,
    pub trim_file_path: String,
    pub trim_fields: TrimFieldTexts,
    /// Inline validation message, shown in the window that caused it.
    pub trim_input_error: Option<(TrimFieldOwner, String)>,

    // Audio settings window state
    pub filename_input: String,
    pub audio_trim_fields: TrimFieldTexts,
}

impl App {
    /// Create the app and open the main window.
    pub fn new(controller: Controller) -> (Self, Task<Message>) {
        let (session_tx, session_rx) = mpsc::unbounded::<Session>();
        controller.subscribe(Box::new(move |session: &Session| {
            let _ = session_tx.unbounded_send(session.clone());
        }));

        let session = controller.snapshot();
        let mut app = Self {
            controller,
            window_map: HashMap::new(),
            main_window_id: None,
            trim_window_id: None,
            audio_settings_window_id: None,
            url_input: String::new(),
            save_dir_display: String::new(),
            progress: ProgressView {
                fraction: 0.0,
                label: "0%".to_string(),
            },
            log_text: String::new(),
            session,
            previous_trim_settings: None,
            trim_file_path: String::new(),
            trim_fields: TrimFieldTexts::default(),
            trim_input_error: None,
            filename_input: String::new(),
            audio_trim_fields: TrimFieldTexts::default(),
        };

        let settings = window::Settings {
            size: Size::new(1200.0, 480.0),
            resizable: true,
            decorations: true,
            ..Default::default()
        };
        let (id, open_task) = window::open(settings);
        app.window_map.insert(id, WindowKind::Main);
        app.main_window_id = Some(id);

        let tasks = Task::batch([
            open_task.map(|id| Message::WindowOpened(WindowKind::Main, id)),
            Task::run(session_rx, Message::SessionChanged),
        ]);

        (app, tasks)
    }

    pub fn title(&self, id: window::Id) -> String {
        match self.window_map.get(&id) {
            Some(WindowKind::Trim) => "Trim".to_string(),
            Some(WindowKind::AudioSettings) => "Audio settings".to_string(),
            _ => "MP3 YouTube Downloader".to_string(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UrlChanged(url) => {
                self.url_input = url;
                Task::none()
            }
            Message::PasteUrl => {
                self.paste_url();
                Task::none()
            }
            Message::BrowseSaveDir => self.browse_save_dir(),
            Message::SaveDirSelected(path) => {
                self.handle_save_dir_selected(path);
                Task::none()
            }
            Message::SetDefaultSaveDir => {
                self.set_default_save_dir();
                Task::none()
            }
            Message::StartDownload => self.start_download(),
            Message::DownloadFinished(result) => {
                self.handle_job_finished("Download", result);
                Task::none()
            }
            Message::SessionChanged(session) => {
                self.handle_session_changed(session);
                Task::none()
            }
            Message::OpenTrimWindow => self.open_trim_window(),
            Message::OpenAudioSettingsWindow => self.open_audio_settings_window(),

            Message::BrowseTrimFile => self.browse_trim_file(),
            Message::TrimFileSelected(path) => {
                self.handle_trim_file_selected(path);
                Task::none()
            }
            Message::CommitTrim => self.commit_trim(),
            Message::TrimFinished(result) => {
                self.handle_job_finished("Trim", result);
                Task::none()
            }
            Message::CloseTrimWindow => self.close_trim_window(),

            Message::TrimFieldChanged(field, value) => {
                self.set_trim_field(field, value);
                Task::none()
            }

            Message::FilenameChanged(name) => {
                self.set_filename(name);
                Task::none()
            }
            Message::CloseAudioSettingsWindow => self.close_audio_settings_window(),

            Message::WindowOpened(kind, id) => self.handle_window_opened(kind, id),
            Message::WindowClosed(id) => self.handle_window_closed(id),
            Message::Noop => Task::none(),
        }
    }

    pub fn view(&self, id: window::Id) -> Element<'_, Message> {
        match self.window_map.get(&id) {
            Some(WindowKind::Main) => main_window::view(self),
            Some(WindowKind::Trim) => trim::view(self),
            Some(WindowKind::AudioSettings) => audio_settings::view(self),
            None => text("").into(),
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        window::close_events().map(Message::WindowClosed)
    }

    /// Apply a pushed session snapshot to the main window.
    pub fn handle_session_changed(&mut self, session: Session) {
        self.session = session;
        self.refresh_progress();
        self.refresh_log();
    }

    /// Update the progress bar and percentage label from the session.
    pub fn refresh_progress(&mut self) {
        if let Some(progress) = presentation::progress_view(&self.session) {
            self.progress = progress;
        }
    }

    /// Update the status line from the session.
    pub fn refresh_log(&mut self) {
        self.log_text = presentation::log_line(&self.session);
    }
}
