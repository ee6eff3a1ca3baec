//! File and folder pickers.

use std::path::PathBuf;

use iced::Task;

use crate::app::{App, Message};

impl App {
    /// Browse for the folder downloads are saved into.
    pub fn browse_save_dir(&self) -> Task<Message> {
        Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .set_title("Select Save Directory")
                    .pick_folder()
                    .await
                    .map(|f| f.path().to_path_buf())
            },
            Message::SaveDirSelected,
        )
    }

    /// Handle folder selected from browser. A cancelled dialog changes nothing.
    pub fn handle_save_dir_selected(&mut self, path: Option<PathBuf>) {
        let Some(p) = path else {
            return;
        };
        let path_str = p.to_string_lossy().to_string();
        if path_str.is_empty() {
            return;
        }
        self.controller.set_save_dir(path_str.clone());
        self.save_dir_display = path_str;
    }

    /// Browse for an audio file to trim.
    pub fn browse_trim_file(&self) -> Task<Message> {
        Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .set_title("Select Audio File")
                    .add_filter("Audio Files", &["mp3", "m4a", "opus", "ogg", "wav", "flac"])
                    .add_filter("All Files", &["*"])
                    .pick_file()
                    .await
                    .map(|f| f.path().to_path_buf())
            },
            Message::TrimFileSelected,
        )
    }

    /// Handle file selected from browser.
    pub fn handle_trim_file_selected(&mut self, path: Option<PathBuf>) {
        if let Some(p) = path {
            let path_str = p.to_string_lossy().to_string();
            tracing::debug!("Trim file: {}", path_str);
            self.trim_file_path = path_str;
        }
    }
}
