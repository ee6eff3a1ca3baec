//! Reusable widgets.

mod timestamp_row;
mod url_input;

pub use timestamp_row::timestamp_row;
pub use url_input::url_input_with_paste;
