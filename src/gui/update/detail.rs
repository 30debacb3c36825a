//! gui/update/detail.rs
//! Bridge between the detail page state machine and the async world.
//!
//! - `core::detail::DetailPage` decides; this file runs its `Effect`s as Tasks.
//! - Results come back as Messages carrying the request token.
//! - The live player handle (if the engine is up) is lent to the page per call.

use iced::Task;
use iced::widget::image;

use super::super::state::{Cinelink, Message};
use super::playback::{ensure_engine, pause};
use crate::core::detail::{Effect, Phase, RequestToken};
use crate::core::error::ApiError;
use crate::core::playback::MediaPlayer;
use crate::core::types::{ContentRecord, RefreshedLink};

pub(crate) fn run_effect(state: &Cinelink, effect: Effect) -> Task<Message> {
    let api = state.api.clone();

    match effect {
        Effect::FetchContent {
            id,
            force_refresh,
            token,
        } => Task::perform(
            async move { api.fetch_content(&id, force_refresh).await },
            move |result| Message::ContentLoaded(token, result),
        ),
        Effect::RefreshLink { id, quality, token } => Task::perform(
            async move { api.refresh_link(&id, &quality).await },
            move |result| Message::RefreshFinished(token, result),
        ),
    }
}

pub(crate) fn content_loaded(
    state: &mut Cinelink,
    token: RequestToken,
    result: Result<ContentRecord, ApiError>,
) -> Task<Message> {
    let player = state.playback.as_mut().map(|p| p as &mut dyn MediaPlayer);
    state.detail.content_loaded(token, result, player);

    match state.detail.phase() {
        Phase::Ready => {
            if let Some(c) = &state.detail.content {
                state.status = state
                    .detail
                    .notice
                    .clone()
                    .unwrap_or_else(|| format!("Loaded: {}", c.title));
            }
            fetch_artwork(state)
        }
        Phase::Error => {
            state.status = "Could not load this title.".to_string();
            Task::none()
        }
        Phase::Idle | Phase::Loading => Task::none(),
    }
}

/// Fetch artwork for the record on screen, unless we already hold it.
fn fetch_artwork(state: &Cinelink) -> Task<Message> {
    let Some(url) = state
        .detail
        .content
        .as_ref()
        .and_then(|c| c.artwork_url.clone())
    else {
        return Task::none();
    };

    if state.artwork.as_ref().is_some_and(|(have, _)| *have == url) {
        return Task::none();
    }

    let api = state.api.clone();
    let tag = url.clone();

    Task::perform(
        async move {
            match api.fetch_bytes(&url).await {
                Ok(bytes) => Some(image::Handle::from_bytes(bytes)),
                Err(e) => {
                    tracing::debug!(%url, error = %e, "artwork fetch failed");
                    None
                }
            }
        },
        move |handle| Message::ArtworkLoaded(tag, handle),
    )
}

pub(crate) fn artwork_loaded(
    state: &mut Cinelink,
    url: String,
    handle: Option<image::Handle>,
) -> Task<Message> {
    let wanted = state
        .detail
        .content
        .as_ref()
        .and_then(|c| c.artwork_url.as_deref());

    // Late arrival for a record we already left.
    if wanted != Some(url.as_str()) {
        return Task::none();
    }

    state.artwork = handle.map(|h| (url, h));
    Task::none()
}

pub(crate) fn toggle_quality_menu(state: &mut Cinelink) -> Task<Message> {
    state.detail.toggle_quality_menu();
    Task::none()
}

pub(crate) fn select_quality(state: &mut Cinelink, label: &str) -> Task<Message> {
    let Some(effect) = state.detail.select_quality(label) else {
        return Task::none();
    };

    // The page loads into the player when the refetch lands; make sure one exists.
    ensure_engine(state);
    state.status = format!("Fetching {label} link...");
    run_effect(state, effect)
}

pub(crate) fn play_selected(state: &mut Cinelink) -> Task<Message> {
    let Some(effect) = state.detail.play_selected() else {
        state.status = "Nothing to play for this title.".to_string();
        return Task::none();
    };

    ensure_engine(state);
    run_effect(state, effect)
}

pub(crate) fn close_player(state: &mut Cinelink) -> Task<Message> {
    state.detail.close_player();
    pause(state)
}

pub(crate) fn refresh_link(state: &mut Cinelink) -> Task<Message> {
    let Some(effect) = state.detail.request_refresh() else {
        return Task::none();
    };

    state.status = "Requesting a fresh link...".to_string();
    run_effect(state, effect)
}

pub(crate) fn refresh_finished(
    state: &mut Cinelink,
    token: RequestToken,
    result: Result<RefreshedLink, ApiError>,
) -> Task<Message> {
    match state.detail.refresh_finished(token, result) {
        Some(effect) => run_effect(state, effect),
        None => {
            if let Some(notice) = &state.detail.notice {
                state.status = notice.clone();
            }
            Task::none()
        }
    }
}
