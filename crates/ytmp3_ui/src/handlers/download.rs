//! Download handlers.

use std::path::PathBuf;

use iced::Task;

use ytmp3_core::controller::Controller;
use ytmp3_core::models::SessionState;

use crate::app::{App, Message};

impl App {
    /// Fill the URL field from the system clipboard.
    pub fn paste_url(&mut self) {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => self.url_input = text.trim().to_string(),
            Err(e) => tracing::warn!("Failed to read clipboard: {}", e),
        }
    }

    /// Start downloading the URL in the entry field.
    ///
    /// Does nothing while a download is running.
    pub fn start_download(&mut self) -> Task<Message> {
        if self.session.state == SessionState::Downloading {
            tracing::debug!("Download already running, ignoring request");
            return Task::none();
        }
        self.controller.set_url(self.url_input.trim());
        let Some(controller) = self.claim_job() else {
            return Task::none();
        };

        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    controller.download().map_err(|e| e.to_string())
                })
                .await
                .unwrap_or_else(|e| Err(format!("Download worker failed: {}", e)))
            },
            Message::DownloadFinished,
        )
    }

    /// Claim the controller's job slot for a worker.
    pub(crate) fn claim_job(&self) -> Option<Controller> {
        match self.controller.begin_job() {
            Ok(()) => Some(self.controller.clone()),
            Err(e) => {
                tracing::info!("{}", e);
                None
            }
        }
    }

    /// Handle a worker finishing. The session already carries the outcome.
    pub fn handle_job_finished(&mut self, job: &str, result: Result<PathBuf, String>) {
        match result {
            Ok(path) => tracing::info!("{} finished: {}", job, path.display()),
            Err(e) => tracing::warn!("{} failed: {}", job, e),
        }
    }
}
