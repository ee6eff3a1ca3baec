//! Standalone trim handler.

use iced::Task;

use crate::app::{App, Message};

impl App {
    /// Trim the file picked in the trim window with the current range.
    ///
    /// Invalid requests put the controller into `Error`; nothing is spawned.
    /// A started trim keeps its range when the window is closed.
    pub fn commit_trim(&mut self) -> Task<Message> {
        let path = match self.controller.check_trim_request(&self.trim_file_path) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Trim refused: {}", e);
                return Task::none();
            }
        };
        if !self.controller.should_trim() {
            return Task::none();
        }
        let Some(controller) = self.claim_job() else {
            return Task::none();
        };
        // Committed: closing the window keeps this range.
        self.previous_trim_settings = None;

        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    controller.trim_audio_file(&path).map_err(|e| e.to_string())
                })
                .await
                .unwrap_or_else(|e| Err(format!("Trim worker failed: {}", e)))
            },
            Message::TrimFinished,
        )
    }
}
