//! Detail page: metadata, quality menu, player panel, refresh affordance.

use iced::widget::{Column, button, column, container, row, text};
use iced::{Alignment, Length};

use super::super::state::{Cinelink, Message};
use super::super::util::{format_time, runtime_label};
use super::constants::{ARTWORK, DETAIL_TEXT_W};
use super::widgets::{artwork, back_button};
use crate::core::detail::Phase;
use crate::core::types::ContentRecord;

pub(crate) fn build_detail(state: &Cinelink) -> Column<'_, Message> {
    let page = &state.detail;

    match page.phase() {
        Phase::Idle => column![back_button()].spacing(12),
        Phase::Loading => column![back_button(), text("Loading...").size(16)].spacing(12),
        Phase::Error => column![
            back_button(),
            text("Not found").size(20),
            text(page.error.as_deref().unwrap_or("This title could not be loaded.")),
        ]
        .spacing(12),
        Phase::Ready => match &page.content {
            Some(content) => build_ready(state, content),
            None => column![back_button()],
        },
    }
}

fn build_ready<'a>(state: &'a Cinelink, content: &'a ContentRecord) -> Column<'a, Message> {
    let page = &state.detail;

    // Metadata
    let mut facts: Vec<String> = Vec::new();
    if let Some(who) = content.subtitle() {
        facts.push(who.to_string());
    }
    if let Some(year) = content.year {
        facts.push(year.to_string());
    }
    if let Some(rt) = runtime_label(content) {
        facts.push(rt);
    }

    let mut info = column![
        text(&content.title).size(24),
        text(facts.join(" · ")).size(14),
    ]
    .spacing(8)
    .width(Length::Fixed(DETAIL_TEXT_W));

    if let Some(overview) = &content.overview {
        info = info.push(text(overview).size(14));
    }

    info = info.push(build_quality_menu(state, content));
    info = info.push(build_actions(state, content));

    if let Some(notice) = &page.notice {
        info = info.push(text(notice).size(13));
    }

    let mut body = column![
        back_button(),
        row![artwork(state.artwork_handle(), ARTWORK), info]
            .spacing(16)
            .align_y(Alignment::Start),
    ]
    .spacing(12);

    if page.player_open {
        body = body.push(build_player_panel(state, content));
    }

    body
}

fn build_quality_menu<'a>(state: &'a Cinelink, content: &'a ContentRecord) -> Column<'a, Message> {
    let page = &state.detail;

    if content.qualities.is_empty() {
        return column![text("No streams available for this title.").size(14)];
    }

    let current = page.selected_quality.as_deref().unwrap_or("—");
    let arrow = if page.quality_menu_open { "▴" } else { "▾" };
    let toggle = button(text(format!("Quality: {current} {arrow}")))
        .on_press(Message::ToggleQualityMenu);

    let mut menu = column![toggle].spacing(4);

    if page.quality_menu_open {
        for q in &content.qualities {
            let marker = if page.selected_quality.as_deref() == Some(q.label.as_str()) {
                "▶ "
            } else {
                "  "
            };
            menu = menu.push(
                button(text(format!("{marker}{}", q.label)))
                    .on_press(Message::SelectQuality(q.label.clone())),
            );
        }
    }

    menu
}

fn build_actions<'a>(state: &'a Cinelink, content: &'a ContentRecord) -> iced::widget::Row<'a, Message> {
    let page = &state.detail;

    let play_toggle = if page.player_open {
        button("Close player").on_press(Message::ClosePlayer)
    } else {
        let can_play = content.is_playable() && page.selected_quality.is_some();
        button("Play").on_press_maybe(can_play.then_some(Message::PlaySelected))
    };

    let mut actions = row![play_toggle].spacing(8).align_y(Alignment::Center);

    if page.refreshing {
        actions = actions.push(button("Refreshing link..."));
    } else if page.playback_error {
        actions = actions.push(
            button("Refresh link").on_press_maybe(page.can_refresh().then_some(Message::RefreshLink)),
        );
    }

    actions
}

/// Stand-in for the video surface: what is loaded and where playback is.
fn build_player_panel<'a>(
    state: &'a Cinelink,
    content: &'a ContentRecord,
) -> iced::widget::Container<'a, Message> {
    let page = &state.detail;
    let quality = page.selected_quality.as_deref().unwrap_or("—");

    let line = if page.playback_error {
        "Playback failed. Try refreshing the link.".to_string()
    } else if state.session.has_source {
        format!(
            "{} [{}]  {} / {}",
            content.title,
            quality,
            format_time(state.session.current_time),
            format_time(state.session.duration),
        )
    } else {
        format!("Preparing {quality}...")
    };

    container(column![text("Player").size(16), text(line).size(14)].spacing(6))
        .padding(12)
        .width(Length::Fill)
}
