//! Main window view.
//!
//! URL entry, save directory, the two settings windows, the progress bar
//! and the status line.

use iced::widget::{button, column, container, progress_bar, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::app::{App, Message};
use crate::theme::{colors, font, spacing, LABEL_WIDTH};
use crate::widgets::url_input_with_paste;

/// Build the main window view.
pub fn view(app: &App) -> Element<'_, Message> {
    let content = column![
        url_row(app),
        save_dir_row(app),
        settings_row(),
        progress_row(app),
        text(&app.log_text).size(font::NORMAL),
    ]
    .spacing(spacing::MD)
    .padding(spacing::LG);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn label(s: &str) -> Element<'_, Message> {
    text(s)
        .size(font::NORMAL)
        .color(colors::TEXT_SECONDARY)
        .width(Length::Fixed(LABEL_WIDTH))
        .into()
}

fn url_row(app: &App) -> Element<'_, Message> {
    row![
        label("URL:"),
        url_input_with_paste(&app.url_input),
        button(text("Download").size(font::NORMAL))
            .on_press(Message::StartDownload)
            .padding([spacing::SM, spacing::LG]),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center)
    .into()
}

/// Read-only display of the picked directory with its two buttons.
fn save_dir_row(app: &App) -> Element<'_, Message> {
    row![
        label("Save to:"),
        text_input(&app.session.default_save_dir, &app.save_dir_display)
            .size(font::NORMAL)
            .width(Length::Fill),
        button(text("Set directory").size(font::NORMAL))
            .on_press(Message::BrowseSaveDir)
            .padding([spacing::SM, spacing::LG]),
        button(text("Set as default").size(font::NORMAL))
            .on_press(Message::SetDefaultSaveDir)
            .padding([spacing::SM, spacing::LG]),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center)
    .into()
}

fn settings_row<'a>() -> Element<'a, Message> {
    row![
        button(text("Trim file...").size(font::NORMAL))
            .on_press(Message::OpenTrimWindow)
            .padding([spacing::SM, spacing::LG]),
        button(text("Audio settings...").size(font::NORMAL))
            .on_press(Message::OpenAudioSettingsWindow)
            .padding([spacing::SM, spacing::LG]),
    ]
    .spacing(spacing::SM)
    .into()
}

fn progress_row(app: &App) -> Element<'_, Message> {
    row![
        progress_bar(0.0..=1.0, app.progress.fraction),
        text(&app.progress.label)
            .size(font::NORMAL)
            .width(Length::Fixed(60.0)),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center)
    .into()
}
