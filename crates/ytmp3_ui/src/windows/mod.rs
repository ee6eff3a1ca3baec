//! Secondary windows

pub mod audio_settings;
pub mod trim;
