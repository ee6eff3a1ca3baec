//! Window management handlers.

use iced::window;
use iced::{Size, Task};

use crate::app::{App, Message};
use crate::types::{TrimFieldOwner, WindowKind};

impl App {
    /// Open the trim window.
    ///
    /// The current trim range is saved and then cleared, so the window
    /// starts empty. Closing it puts the saved range back unless a trim was
    /// committed from it.
    pub fn open_trim_window(&mut self) -> Task<Message> {
        if self.trim_window_id.is_some() {
            return Task::none();
        }

        self.previous_trim_settings = Some(self.controller.save_trim_settings());
        self.controller.reset_trim_settings();
        self.trim_fields.clear();
        self.trim_file_path.clear();
        self.clear_trim_input_error(TrimFieldOwner::Trim);

        let settings = window::Settings {
            size: Size::new(640.0, 300.0),
            resizable: false,
            decorations: true,
            ..Default::default()
        };

        let (id, open_task) = window::open(settings);
        self.window_map.insert(id, WindowKind::Trim);
        self.trim_window_id = Some(id);

        open_task.map(|_| Message::Noop)
    }

    /// Close the trim window, restoring the saved range if nothing was committed.
    pub fn close_trim_window(&mut self) -> Task<Message> {
        if let Some(id) = self.trim_window_id.take() {
            self.window_map.remove(&id);
            self.restore_trim_settings();
            return window::close(id);
        }
        Task::none()
    }

    fn restore_trim_settings(&mut self) {
        if let Some(saved) = self.previous_trim_settings.take() {
            self.controller.load_trim_settings(saved);
        }
        self.trim_fields.clear();
        self.clear_trim_input_error(TrimFieldOwner::Trim);
    }

    /// Open the audio settings window.
    pub fn open_audio_settings_window(&mut self) -> Task<Message> {
        if self.audio_settings_window_id.is_some() {
            return Task::none();
        }

        self.filename_input = self.controller.custom_filename();
        self.audio_trim_fields.clear();
        self.clear_trim_input_error(TrimFieldOwner::AudioSettings);

        let settings = window::Settings {
            size: Size::new(640.0, 280.0),
            resizable: false,
            decorations: true,
            ..Default::default()
        };

        let (id, open_task) = window::open(settings);
        self.window_map.insert(id, WindowKind::AudioSettings);
        self.audio_settings_window_id = Some(id);

        open_task.map(|_| Message::Noop)
    }

    /// Close the audio settings window. Settings made there are kept.
    pub fn close_audio_settings_window(&mut self) -> Task<Message> {
        if let Some(id) = self.audio_settings_window_id.take() {
            self.window_map.remove(&id);
            self.clear_trim_input_error(TrimFieldOwner::AudioSettings);
            return window::close(id);
        }
        Task::none()
    }

    /// Handle window closed event (e.g., user clicked X button).
    pub fn handle_window_closed(&mut self, id: window::Id) -> Task<Message> {
        if let Some(window_kind) = self.window_map.remove(&id) {
            match window_kind {
                WindowKind::Main => {
                    tracing::info!("Main window closed, exiting");
                    self.main_window_id = None;
                    return iced::exit();
                }
                WindowKind::Trim => {
                    self.trim_window_id = None;
                    self.restore_trim_settings();
                }
                WindowKind::AudioSettings => {
                    self.audio_settings_window_id = None;
                    self.clear_trim_input_error(TrimFieldOwner::AudioSettings);
                }
            }
        }
        Task::none()
    }

    /// Handle window opened event.
    pub fn handle_window_opened(&mut self, window_kind: WindowKind, id: window::Id) -> Task<Message> {
        self.window_map.insert(id, window_kind);
        Task::none()
    }
}
