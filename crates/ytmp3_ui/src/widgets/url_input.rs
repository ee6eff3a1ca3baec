//! URL entry with a paste-from-clipboard button.

use iced::widget::{button, container, row, text, text_input};
use iced::{Alignment, Background, Border, Element, Length, Theme};

use crate::app::Message;
use crate::theme::{colors, font, spacing};

/// URL entry wired to `Message::UrlChanged`, with a paste button that
/// sends `Message::PasteUrl`. Enter starts the download.
pub fn url_input_with_paste(value: &str) -> Element<'_, Message> {
    let input = text_input("https://www.youtube.com/watch?v=...", value)
        .on_input(Message::UrlChanged)
        .on_submit(Message::StartDownload)
        .size(font::NORMAL)
        .width(Length::Fill);

    let paste_btn = button(
        container(text("📋").size(font::NORMAL))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .on_press(Message::PasteUrl)
    .width(28.0)
    .height(28.0)
    .style(|theme: &Theme, status| button::Style {
        background: Some(Background::Color(match status {
            button::Status::Hovered => colors::BUTTON_HOVER,
            button::Status::Pressed => colors::BUTTON_PRESSED,
            _ => colors::BUTTON_BG,
        })),
        text_color: theme.palette().text,
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 4.0.into(),
        },
        ..Default::default()
    });

    row![input, paste_btn]
        .spacing(spacing::XS)
        .align_y(Alignment::Center)
        .into()
}
