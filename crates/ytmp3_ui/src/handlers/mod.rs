//! Message handlers.
//!
//! Each module adds an `impl App` block for one area of the UI. Blocking
//! work is handed to the controller on a `spawn_blocking` worker.

mod browse;
mod download;
mod settings;
mod trim;
mod window;

#[cfg(test)]
mod tests;
