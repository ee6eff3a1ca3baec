//! Save directory, filename and trim field handlers.

use ytmp3_core::models::TrimEdit;

use crate::app::App;
use crate::types::{TrimField, TrimFieldOwner};

impl App {
    /// Persist the displayed save directory as the default.
    pub fn set_default_save_dir(&mut self) {
        if self.save_dir_display.is_empty() {
            return;
        }
        if let Err(e) = self
            .controller
            .set_default_save_dir(self.save_dir_display.clone())
        {
            self.controller
                .fail(format!("Failed to save default directory: {}", e));
        }
    }

    /// Custom output filename from the audio settings window.
    pub fn set_filename(&mut self, name: String) {
        self.controller.set_custom_filename(name.clone());
        self.filename_input = name;
    }

    /// Apply one hh/mm/ss entry to the controller's trim range.
    ///
    /// The typed text is kept as is; the slot only changes when the text
    /// parses. A negative number leaves an inline hint in that window.
    pub fn set_trim_field(&mut self, field: TrimField, value: String) {
        let texts = match field.owner {
            TrimFieldOwner::Trim => &mut self.trim_fields,
            TrimFieldOwner::AudioSettings => &mut self.audio_trim_fields,
        };
        texts.set(field.point, field.unit, value.clone());

        match self.controller.apply_trim_field(field.point, field.unit, &value) {
            Ok(TrimEdit::Set(v)) => {
                tracing::debug!("Trim {:?} {:?} = {}", field.point, field.unit, v);
                self.clear_trim_input_error(field.owner);
            }
            Ok(TrimEdit::Ignored) => {}
            Err(e) => {
                tracing::warn!("{}", e);
                self.trim_input_error = Some((field.owner, e.to_string()));
            }
        }
    }

    pub(crate) fn clear_trim_input_error(&mut self, owner: TrimFieldOwner) {
        if matches!(&self.trim_input_error, Some((o, _)) if *o == owner) {
            self.trim_input_error = None;
        }
    }

    /// Validation hint for a window, if any.
    pub fn trim_input_error_for(&self, owner: TrimFieldOwner) -> Option<&str> {
        match &self.trim_input_error {
            Some((o, message)) if *o == owner => Some(message.as_str()),
            _ => None,
        }
    }
}
