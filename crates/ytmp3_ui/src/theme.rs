//! Theme constants for ytmp3.

use iced::Color;

/// Application colors.
pub mod colors {
    use super::Color;

    /// Paste button background
    pub const BUTTON_BG: Color = Color::from_rgb(0.20, 0.20, 0.20);

    /// Paste button hover
    pub const BUTTON_HOVER: Color = Color::from_rgb(0.25, 0.30, 0.35);

    /// Paste button pressed
    pub const BUTTON_PRESSED: Color = Color::from_rgb(0.20, 0.25, 0.30);

    /// Border color
    pub const BORDER: Color = Color::from_rgb(0.30, 0.30, 0.30);

    /// Inline validation hints
    pub const ERROR_TEXT: Color = Color::from_rgb(0.85, 0.35, 0.35);

    /// Labels next to inputs
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.53, 0.53, 0.53);
}

/// Spacing constants.
pub mod spacing {
    /// Extra small spacing (4px)
    pub const XS: f32 = 4.0;
    /// Small spacing (8px)
    pub const SM: f32 = 8.0;
    /// Medium spacing (12px)
    pub const MD: f32 = 12.0;
    /// Large spacing (16px)
    pub const LG: f32 = 16.0;
}

/// Font sizes.
pub mod font {
    /// Small font size
    pub const SM: f32 = 11.0;
    /// Normal font size
    pub const NORMAL: f32 = 13.0;
    /// Large font size
    pub const LG: f32 = 16.0;
}

/// Width of an hh/mm/ss entry.
pub const TIME_FIELD_WIDTH: f32 = 64.0;

/// Width of the label column in forms.
pub const LABEL_WIDTH: f32 = 110.0;
