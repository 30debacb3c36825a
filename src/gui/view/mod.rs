//! GUI renderer (reads state, produces widgets; no mutation).

mod constants;
mod controls;
mod detail;
mod home;
mod widgets;

use iced::Length;
use iced::widget::{Column, column, container, text};

use super::state::{Cinelink, Message, Screen};
use constants::CONTROL_BAR_H;
use controls::{ControlCallbacks, control_bar};

pub(crate) fn view(state: &Cinelink) -> Column<'_, Message> {
    let can_step = state.recent.can_step();
    let callbacks = ControlCallbacks {
        on_play_pause: Message::TogglePlayPause,
        on_next: can_step.then_some(Message::Next),
        on_previous: can_step.then_some(Message::Previous),
    };

    let bar = control_bar(
        state.detail.content.as_ref(),
        state.session.is_playing,
        &state.session,
        state.seek_preview,
        callbacks,
    )
    .height(Length::Fixed(CONTROL_BAR_H));

    let body: iced::Element<'_, Message> = match state.screen {
        Screen::Home => home::build_home(state).into(),
        Screen::Detail => detail::build_detail(state).into(),
    };

    column![
        bar,
        text(&state.status).size(13),
        container(body).width(Length::Fill).height(Length::Fill),
    ]
    .spacing(12)
    .padding(12)
}
