//! Audio settings window view.
//!
//! Output filename and the trim range applied to the next download.

use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length};

use ytmp3_core::models::TimePoint;

use crate::app::{App, Message};
use crate::theme::{colors, font, spacing, LABEL_WIDTH};
use crate::types::TrimFieldOwner;
use crate::widgets::timestamp_row;

pub fn view(app: &App) -> Element<'_, Message> {
    let current = app.controller.trim_timestamps();

    let filename_row = row![
        text("Filename:")
            .size(font::NORMAL)
            .color(colors::TEXT_SECONDARY)
            .width(Length::Fixed(LABEL_WIDTH)),
        text_input("Video title", &app.filename_input)
            .on_input(Message::FilenameChanged)
            .size(font::NORMAL)
            .width(Length::Fill),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center);

    let mut content = column![
        text("Audio settings").size(font::LG),
        filename_row,
        timestamp_row(
            "Trim start:",
            TrimFieldOwner::AudioSettings,
            TimePoint::Start,
            &app.audio_trim_fields,
            &current
        ),
        timestamp_row(
            "Trim end:",
            TrimFieldOwner::AudioSettings,
            TimePoint::End,
            &app.audio_trim_fields,
            &current
        ),
    ]
    .spacing(spacing::MD)
    .padding(spacing::LG);

    if let Some(hint) = app.trim_input_error_for(TrimFieldOwner::AudioSettings) {
        content = content.push(text(hint).size(font::SM).color(colors::ERROR_TEXT));
    }

    content = content.push(
        button(text("Close").size(font::NORMAL))
            .on_press(Message::CloseAudioSettingsWindow)
            .padding([spacing::SM, spacing::LG]),
    );

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
