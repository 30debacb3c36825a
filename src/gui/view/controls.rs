//! Playback control bar.
//!
//! Pure view over (record, playing flag, session). Emits only Messages:
//! the caller's callbacks for play/pause/next/previous, `Message::Intent` for the rest.
//! A missing callback or a missing playable source renders the control disabled.

use iced::widget::{button, column, container, progress_bar, row, slider, text};
use iced::{Alignment, Length};

use super::super::state::Message;
use super::super::util::{
    VolumeGlyph, control_message, effective_duration, format_time, has_playable_source,
    seek_enabled,
};
use super::constants::VOLUME_W;
use crate::core::session::{PlaybackIntent, PlaybackSession, SkipDirection};
use crate::core::types::ContentRecord;

/// What the bar's transport buttons emit. `None` = control not offered.
#[derive(Debug, Clone)]
pub(crate) struct ControlCallbacks {
    pub on_play_pause: Message,
    pub on_next: Option<Message>,
    pub on_previous: Option<Message>,
}

pub(crate) fn control_bar<'a>(
    content: Option<&'a ContentRecord>,
    is_playing: bool,
    session: &PlaybackSession,
    seek_preview: Option<f64>,
    callbacks: ControlCallbacks,
) -> iced::widget::Container<'a, Message> {
    let playable = has_playable_source(content);
    let enabled = |msg: Option<Message>| control_message(playable, msg);

    // --- transport ---
    let play_label = if is_playing { "⏸" } else { "▶" };
    let prev_btn = button("⏮").on_press_maybe(enabled(callbacks.on_previous));
    let back_btn = button("⏪").on_press_maybe(enabled(Some(Message::Intent(
        PlaybackIntent::Skip(SkipDirection::Backward),
    ))));
    let play_btn = button(play_label).on_press_maybe(enabled(Some(callbacks.on_play_pause)));
    let fwd_btn = button("⏩").on_press_maybe(enabled(Some(Message::Intent(
        PlaybackIntent::Skip(SkipDirection::Forward),
    ))));
    let next_btn = button("⏭").on_press_maybe(enabled(callbacks.on_next));

    // --- seek ---
    let total = effective_duration(session.duration, content);
    let position = seek_preview.unwrap_or(session.current_time);

    let seek: iced::Element<'a, Message> = if playable && seek_enabled(total) {
        slider(0.0..=total, position.clamp(0.0, total), Message::SeekPreview)
            .on_release(Message::SeekCommit)
            .width(Length::Fill)
            .into()
    } else {
        container(progress_bar(0.0..=1.0, 0.0))
            .width(Length::Fill)
            .into()
    };

    let time_text = format!("{} / {}", format_time(position), format_time(total));

    // --- volume ---
    let volume = session.volume.clamp(0.0, 100.0);
    let glyph = text(VolumeGlyph::for_volume(volume).symbol()).size(14);
    let vol: iced::Element<'a, Message> = if playable {
        slider(0.0..=100.0, volume, |v| {
            Message::Intent(PlaybackIntent::SetVolume(v))
        })
        .width(Length::Fixed(VOLUME_W))
        .into()
    } else {
        container(progress_bar(0.0..=100.0, volume))
            .width(Length::Fixed(VOLUME_W))
            .into()
    };

    // --- now showing ---
    let (title, subtitle) = match content {
        Some(c) => (c.title.clone(), c.subtitle().unwrap_or_default().to_string()),
        None => ("Nothing selected".to_string(), String::new()),
    };

    let bar = row![
        // left: transport
        row![prev_btn, back_btn, play_btn, fwd_btn, next_btn]
            .spacing(6)
            .align_y(Alignment::Center),
        // middle: title + seek
        column![
            row![text(title).size(14), text(subtitle).size(12)]
                .spacing(8)
                .align_y(Alignment::Center),
            row![seek, text(time_text).size(12)]
                .spacing(10)
                .align_y(Alignment::Center),
        ]
        .spacing(6)
        .width(Length::Fill),
        // right: volume
        row![glyph, vol].spacing(8).align_y(Alignment::Center),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    container(bar).padding(12)
}
