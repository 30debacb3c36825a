//! Reusable small widgets/helpers used across view modules.

use iced::widget::{button, column, container, image, text};
use iced::{Alignment, Element, Length};

use super::super::state::Message;

pub(crate) fn artwork_placeholder(size: f32) -> iced::widget::Container<'static, Message> {
    container(
        column![text("🎞").size(28), text("no artwork").size(12)]
            .spacing(4)
            .align_x(Alignment::Center),
    )
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .center_x(Length::Fill)
    .center_y(Length::Fill)
}

/// If `handle` exists, show it; otherwise show the placeholder.
/// Returns an Element so callers can embed it in `row![]` easily.
pub(crate) fn artwork(handle: Option<&image::Handle>, size: f32) -> Element<'static, Message> {
    match handle {
        Some(h) => container(image(h.clone()))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
        None => artwork_placeholder(size).into(),
    }
}

pub(crate) fn back_button() -> iced::widget::Button<'static, Message> {
    button("← Back").on_press(Message::Back)
}
