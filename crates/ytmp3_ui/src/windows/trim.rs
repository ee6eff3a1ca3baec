//! Trim window view.
//!
//! Picks an existing audio file and a start/end range, then trims it.

use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length};

use ytmp3_core::models::TimePoint;

use crate::app::{App, Message};
use crate::theme::{colors, font, spacing, LABEL_WIDTH};
use crate::types::TrimFieldOwner;
use crate::widgets::timestamp_row;

pub fn view(app: &App) -> Element<'_, Message> {
    let current = app.controller.trim_timestamps();

    let file_row = row![
        text("File:")
            .size(font::NORMAL)
            .color(colors::TEXT_SECONDARY)
            .width(Length::Fixed(LABEL_WIDTH)),
        text_input("No file selected", &app.trim_file_path)
            .size(font::NORMAL)
            .width(Length::Fill),
        button(text("Browse...").size(font::NORMAL))
            .on_press(Message::BrowseTrimFile)
            .padding([spacing::SM, spacing::LG]),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center);

    let mut content = column![
        text("Trim audio file").size(font::LG),
        file_row,
        timestamp_row(
            "Start:",
            TrimFieldOwner::Trim,
            TimePoint::Start,
            &app.trim_fields,
            &current
        ),
        timestamp_row(
            "End:",
            TrimFieldOwner::Trim,
            TimePoint::End,
            &app.trim_fields,
            &current
        ),
    ]
    .spacing(spacing::MD)
    .padding(spacing::LG);

    if let Some(hint) = app.trim_input_error_for(TrimFieldOwner::Trim) {
        content = content.push(text(hint).size(font::SM).color(colors::ERROR_TEXT));
    }

    content = content.push(
        row![
            button(text("Trim").size(font::NORMAL))
                .on_press(Message::CommitTrim)
                .padding([spacing::SM, spacing::LG]),
            button(text("Cancel").size(font::NORMAL))
                .on_press(Message::CloseTrimWindow)
                .padding([spacing::SM, spacing::LG]),
        ]
        .spacing(spacing::SM),
    );

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
