//! One `hh : mm : ss` row of trim entries.

use iced::widget::{row, text, text_input};
use iced::{Alignment, Element, Length};

use ytmp3_core::models::{TimePoint, TimeUnit, TrimTimestamps};

use crate::app::Message;
use crate::theme::{colors, font, spacing, LABEL_WIDTH, TIME_FIELD_WIDTH};
use crate::types::{TrimField, TrimFieldOwner, TrimFieldTexts};

/// Build the row for one end of the trim range.
///
/// Empty entries show the current value as placeholder when it is nonzero,
/// otherwise `hh`, `mm` or `ss`.
pub fn timestamp_row<'a>(
    label: &'a str,
    owner: TrimFieldOwner,
    point: TimePoint,
    texts: &'a TrimFieldTexts,
    current: &TrimTimestamps,
) -> Element<'a, Message> {
    let mut fields = row![text(label)
        .size(font::NORMAL)
        .color(colors::TEXT_SECONDARY)
        .width(Length::Fixed(LABEL_WIDTH))]
    .spacing(spacing::XS)
    .align_y(Alignment::Center);

    for (i, unit) in TimeUnit::ALL.into_iter().enumerate() {
        if i > 0 {
            fields = fields.push(text(":").size(font::NORMAL));
        }
        let value = current.get(point, unit);
        let placeholder = if value.is_zero() {
            unit.placeholder().to_string()
        } else {
            value.to_string()
        };
        let field = TrimField { owner, point, unit };
        fields = fields.push(
            text_input(&placeholder, texts.get(point, unit))
                .on_input(move |s| Message::TrimFieldChanged(field, s))
                .size(font::NORMAL)
                .width(Length::Fixed(TIME_FIELD_WIDTH)),
        );
    }

    fields.into()
}
