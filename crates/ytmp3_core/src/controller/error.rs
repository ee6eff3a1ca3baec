//! Controller errors.

use thiserror::Error;

use crate::config::ConfigError;
use crate::media::MediaError;

/// Why a controller operation did not go through.
#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("A download is already in progress")]
    DownloadInProgress,

    #[error("No URL given")]
    EmptyUrl,

    #[error("Trim timestamps not set!")]
    TrimTimestampsNotSet,

    #[error("Trim end must be after trim start")]
    InvalidTrimRange,

    #[error("No file selected to trim")]
    NoFileSelected,

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("Could not save settings: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not prepare save directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for controller operations.
pub type ControllerResult<T> = Result<T, ControllerError>;
