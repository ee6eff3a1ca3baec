//! Download controller.
//!
//! Owns the session the UI renders and the user's inputs (URL, save
//! directory, custom filename, trim range). Long operations (`download`,
//! `trim_audio_file`) block and are meant to run on a worker thread; every
//! change to the session is pushed to the subscribed observer as a snapshot.
//!
//! Only one job runs at a time. Callers claim the slot with `begin_job()`
//! before handing the controller to a worker; the blocking operation releases
//! it when it finishes. The inputs in effect at `begin_job()` are the ones the
//! job uses, so later edits from the UI do not leak into a running job.

mod error;

pub use error::{ControllerError, ControllerResult};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{ConfigManager, ConfigSection};
use crate::media::{FetchEvent, FetchRequest, Ffmpeg, MediaFetcher, Transcoder, YtDlp};
use crate::models::{
    parse_trim_field, DownloadStatus, Session, SessionState, TimePoint, TimeUnit, TimeValue,
    TrimEdit, TrimInputError, TrimTimestamps,
};

/// Callback receiving a snapshot after every session change.
pub type SessionObserver = Box<dyn Fn(&Session) + Send + Sync>;

/// What the user has typed or picked so far.
#[derive(Debug, Clone, Default)]
struct Inputs {
    url: String,
    /// Empty means "use the default save directory".
    save_dir: String,
    custom_filename: String,
    trim: TrimTimestamps,
}

/// Drives downloads and trims. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Controller {
    config: Arc<Mutex<ConfigManager>>,
    session: Arc<Mutex<Session>>,
    inputs: Arc<Mutex<Inputs>>,
    /// Inputs captured by `begin_job` for the next blocking operation.
    claimed: Arc<Mutex<Option<Inputs>>>,
    observer: Arc<Mutex<Option<SessionObserver>>>,
    fetcher: Arc<dyn MediaFetcher>,
    transcoder: Arc<dyn Transcoder>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("session", &*self.session.lock())
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Create a controller with explicit tool implementations.
    pub fn new(
        config: Arc<Mutex<ConfigManager>>,
        fetcher: Arc<dyn MediaFetcher>,
        transcoder: Arc<dyn Transcoder>,
    ) -> Self {
        let default_save_dir = config.lock().settings().paths.default_save_dir.clone();
        Self {
            config,
            session: Arc::new(Mutex::new(Session::new(default_save_dir))),
            inputs: Arc::new(Mutex::new(Inputs::default())),
            claimed: Arc::new(Mutex::new(None)),
            observer: Arc::new(Mutex::new(None)),
            fetcher,
            transcoder,
        }
    }

    /// Create a controller using the yt-dlp/ffmpeg paths from config.
    pub fn with_configured_tools(config: Arc<Mutex<ConfigManager>>) -> Self {
        let (ytdlp, ffmpeg) = {
            let cfg = config.lock();
            let download = &cfg.settings().download;
            (download.ytdlp_path.clone(), download.ffmpeg_path.clone())
        };
        Self::new(
            config,
            Arc::new(YtDlp::new(ytdlp)),
            Arc::new(Ffmpeg::new(ffmpeg)),
        )
    }

    /// Shared config manager.
    pub fn config(&self) -> Arc<Mutex<ConfigManager>> {
        Arc::clone(&self.config)
    }

    // --- Session -----------------------------------------------------------

    /// Register the observer notified after every session change.
    /// Replaces any previous observer.
    pub fn subscribe(&self, observer: SessionObserver) {
        *self.observer.lock() = Some(observer);
    }

    pub fn state(&self) -> SessionState {
        self.session.lock().state
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.session.lock().clone()
    }

    pub fn error_message(&self) -> String {
        self.session.lock().error_message.clone()
    }

    /// Force the session into `Error` with the given message.
    pub fn fail(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{}", message);
        self.update(|s| {
            s.state = SessionState::Error;
            s.error_message = message;
        });
    }

    /// Mutate the session and notify the observer.
    ///
    /// The observer runs under the session lock so snapshots reach it in
    /// the order the changes were made.
    fn update(&self, f: impl FnOnce(&mut Session)) {
        let mut session = self.session.lock();
        let before = session.state;
        f(&mut session);
        if session.state != before {
            tracing::debug!(from = %before, to = %session.state, "Session state changed");
        }
        self.notify(&session);
    }

    fn notify(&self, session: &Session) {
        if let Some(observer) = self.observer.lock().as_ref() {
            observer(session);
        }
    }

    // --- Inputs ------------------------------------------------------------

    pub fn url(&self) -> String {
        self.inputs.lock().url.clone()
    }

    pub fn set_url(&self, url: impl Into<String>) {
        self.inputs.lock().url = url.into();
    }

    /// Active save directory, falling back to the default.
    pub fn save_dir(&self) -> String {
        let picked = self.inputs.lock().save_dir.clone();
        if picked.is_empty() {
            self.default_save_dir()
        } else {
            picked
        }
    }

    pub fn set_save_dir(&self, dir: impl Into<String>) {
        let dir = dir.into();
        tracing::info!("Save directory: {}", dir);
        self.inputs.lock().save_dir = dir;
    }

    pub fn default_save_dir(&self) -> String {
        self.config.lock().settings().paths.default_save_dir.clone()
    }

    /// Persist `dir` as the default save directory.
    pub fn set_default_save_dir(&self, dir: impl Into<String>) -> ControllerResult<()> {
        let dir = dir.into();
        {
            let mut cfg = self.config.lock();
            cfg.settings_mut().paths.default_save_dir = dir.clone();
            cfg.update_section(ConfigSection::Paths)?;
        }
        tracing::info!("Default save directory changed to {}", dir);
        self.update(|s| {
            s.default_save_dir = dir;
            s.state = SessionState::SaveDirChanged;
        });
        Ok(())
    }

    pub fn custom_filename(&self) -> String {
        self.inputs.lock().custom_filename.clone()
    }

    pub fn set_custom_filename(&self, name: impl Into<String>) {
        self.inputs.lock().custom_filename = name.into();
    }

    // --- Trim settings -----------------------------------------------------

    pub fn trim_timestamps(&self) -> TrimTimestamps {
        self.inputs.lock().trim
    }

    pub fn set_trim_value(&self, point: TimePoint, unit: TimeUnit, value: TimeValue) {
        self.inputs.lock().trim.set(point, unit, value);
    }

    /// Parse an entry field and write it into the matching slot.
    ///
    /// Non-numeric text leaves the slot untouched and returns
    /// `TrimEdit::Ignored`; negative numbers are rejected.
    pub fn apply_trim_field(
        &self,
        point: TimePoint,
        unit: TimeUnit,
        text: &str,
    ) -> Result<TrimEdit, TrimInputError> {
        let edit = parse_trim_field(text)?;
        if let TrimEdit::Set(value) = edit {
            self.set_trim_value(point, unit, value);
        }
        Ok(edit)
    }

    pub fn trim_timestamps_not_set(&self) -> bool {
        self.inputs.lock().trim.not_set()
    }

    pub fn should_trim(&self) -> bool {
        !self.trim_timestamps_not_set()
    }

    /// Snapshot of the trim settings, for `load_trim_settings`.
    pub fn save_trim_settings(&self) -> TrimTimestamps {
        self.trim_timestamps()
    }

    pub fn load_trim_settings(&self, saved: TrimTimestamps) {
        self.inputs.lock().trim = saved;
    }

    pub fn reset_trim_settings(&self) {
        self.inputs.lock().trim = TrimTimestamps::default();
    }

    // --- Jobs --------------------------------------------------------------

    /// Claim the single job slot and capture the current inputs for it.
    pub fn begin_job(&self) -> ControllerResult<()> {
        let mut session = self.session.lock();
        if session.busy || session.state == SessionState::Downloading {
            return Err(ControllerError::DownloadInProgress);
        }
        *self.claimed.lock() = Some(self.inputs.lock().clone());
        session.busy = true;
        self.notify(&session);
        Ok(())
    }

    /// Inputs for the operation about to run: the ones captured by
    /// `begin_job`, or the live ones when no job was claimed.
    fn job_inputs(&self) -> Inputs {
        self.claimed
            .lock()
            .take()
            .unwrap_or_else(|| self.inputs.lock().clone())
    }

    pub fn is_busy(&self) -> bool {
        self.session.lock().busy
    }

    /// Download the current URL as audio. Blocking.
    ///
    /// Ends in `Done` (trimming first when trim timestamps are set) or
    /// `Error`, and releases the job slot either way.
    pub fn download(&self) -> ControllerResult<PathBuf> {
        self.update(|s| {
            s.state = SessionState::Request;
            s.download_status = DownloadStatus::default();
            s.error_message.clear();
            s.save_path = None;
            s.trim_filepath = None;
            s.trimmed_download = false;
        });

        let inputs = self.job_inputs();
        let result = self.run_download(&inputs);
        self.finish_job(result)
    }

    fn run_download(&self, inputs: &Inputs) -> ControllerResult<PathBuf> {
        let request = self.fetch_request(inputs)?;
        tracing::info!("Downloading {} into {}", request.url, request.save_dir.display());

        self.fetcher.check_available()?;
        fs::create_dir_all(&request.save_dir)?;

        let path = self.fetcher.fetch_audio(&request, &mut |event| match event {
            FetchEvent::Progress(status) => self.update(|s| {
                s.state = SessionState::Downloading;
                s.download_status = status;
            }),
            FetchEvent::Postprocessing(name) => {
                tracing::debug!("Post-processing with {}", name);
                self.update(|s| s.state = SessionState::Postprocessing);
            }
            FetchEvent::Saved(path) => tracing::debug!("yt-dlp saved {}", path.display()),
        })?;
        tracing::info!("Download saved at {}", path.display());

        let trim = inputs.trim;
        if !trim.not_set() {
            let (start, end) = trim
                .range_seconds()
                .ok_or(ControllerError::InvalidTrimRange)?;
            self.transcoder.check_available()?;
            let trimmed = self.transcoder.trim(&path, start, end)?;
            self.update(|s| {
                s.trimmed_download = true;
                s.trim_filepath = Some(trimmed);
            });
        }

        self.update(|s| {
            s.state = SessionState::Done;
            s.save_path = Some(path.clone());
        });
        Ok(path)
    }

    fn fetch_request(&self, inputs: &Inputs) -> ControllerResult<FetchRequest> {
        let url = inputs.url.trim().to_string();
        if url.is_empty() {
            return Err(ControllerError::EmptyUrl);
        }
        let filename = Some(inputs.custom_filename.clone()).filter(|n| !n.trim().is_empty());
        let save_dir = if inputs.save_dir.is_empty() {
            self.default_save_dir()
        } else {
            inputs.save_dir.clone()
        };
        let (audio_format, audio_quality) = {
            let cfg = self.config.lock();
            let download = &cfg.settings().download;
            (download.audio_format.clone(), download.audio_quality.clone())
        };
        Ok(FetchRequest {
            url,
            save_dir: PathBuf::from(save_dir),
            filename,
            audio_format,
            audio_quality,
        })
    }

    /// Validate a trim request from the trim window.
    ///
    /// On failure the session moves to `Error` with the reason, and the
    /// reason is returned.
    pub fn check_trim_request(&self, file: &str) -> ControllerResult<PathBuf> {
        let result = if self.trim_timestamps_not_set() {
            Err(ControllerError::TrimTimestampsNotSet)
        } else if file.trim().is_empty() {
            Err(ControllerError::NoFileSelected)
        } else if self.trim_timestamps().range_seconds().is_none() {
            Err(ControllerError::InvalidTrimRange)
        } else {
            Ok(PathBuf::from(file.trim()))
        };

        if let Err(e) = &result {
            self.fail(e.to_string());
        }
        result
    }

    /// Trim an existing audio file with the trim range captured by
    /// `begin_job` (or the current one when no job was claimed). Blocking.
    ///
    /// Ends in `Trimmed` or `Error` and releases the job slot.
    pub fn trim_audio_file(&self, path: &Path) -> ControllerResult<PathBuf> {
        let trim = self.job_inputs().trim;
        let result = self.run_trim(path, trim);
        self.finish_job(result)
    }

    fn run_trim(&self, path: &Path, trim: TrimTimestamps) -> ControllerResult<PathBuf> {
        let (start, end) = trim
            .range_seconds()
            .ok_or(ControllerError::InvalidTrimRange)?;
        self.transcoder.check_available()?;
        let trimmed = self.transcoder.trim(path, start, end)?;

        self.update(|s| {
            s.state = SessionState::Trimmed;
            s.trim_filepath = Some(trimmed.clone());
        });
        Ok(trimmed)
    }

    fn finish_job(&self, result: ControllerResult<PathBuf>) -> ControllerResult<PathBuf> {
        self.claimed.lock().take();
        match &result {
            Ok(_) => self.update(|s| s.busy = false),
            Err(e) => {
                let message = e.to_string();
                tracing::error!("Job failed: {}", message);
                self.update(|s| {
                    s.state = SessionState::Error;
                    s.error_message = message;
                    s.busy = false;
                });
            }
        }
        result
    }
}
