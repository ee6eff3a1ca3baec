//! Main window pages.

pub mod main_window;
