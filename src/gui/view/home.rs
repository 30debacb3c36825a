//! Home screen: open a title by id, or pick one from the recent list.

use iced::widget::{Column, button, column, row, scrollable, text, text_input};
use iced::{Alignment, Length};

use super::super::state::{Cinelink, Message};
use super::constants::RECENT_H;

pub(crate) fn build_home(state: &Cinelink) -> Column<'_, Message> {
    let id_input = text_input("Title id (ex: tt0133093)", &state.id_input)
        .on_input(Message::IdInputChanged)
        .on_submit(Message::OpenPressed)
        .width(Length::Fill);

    let open_btn = if state.id_input.trim().is_empty() {
        button("Open")
    } else {
        button("Open").on_press(Message::OpenPressed)
    };

    let mut recent = column![];
    for (i, id) in state.recent.items().iter().enumerate() {
        recent = recent.push(
            row![
                button(text(id)).on_press(Message::OpenRecent(i)),
                button("×").on_press(Message::RemoveRecent(i)),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );
    }

    let recent_panel: iced::Element<'_, Message> = if state.recent.items().is_empty() {
        text("Nothing opened yet.").size(14).into()
    } else {
        scrollable(recent.spacing(6))
            .height(Length::Fixed(RECENT_H))
            .into()
    };

    column![
        text("Open a title").size(18),
        row![id_input, open_btn].spacing(8),
        text("Recent").size(16),
        recent_panel,
    ]
    .spacing(12)
}
