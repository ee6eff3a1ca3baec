//! Data models shared by the controller and the UI.

mod session;
mod trim;

pub use session::{DownloadStatus, Session, SessionState};
pub use trim::{
    format_ffmpeg_timestamp, parse_trim_field, TimePoint, TimeUnit, TimeValue, Timestamp,
    TrimEdit, TrimInputError, TrimTimestamps,
};
