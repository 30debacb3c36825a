//! gui/update/navigation.rs
//! Home screen input, recent list, opening/leaving a detail page,
//! and the control bar's previous/next (which walk the recent list).

use iced::Task;

use super::super::state::{Cinelink, Message, Screen};
use super::detail::run_effect;
use super::playback::stop;

pub(crate) fn id_input_changed(state: &mut Cinelink, s: String) -> Task<Message> {
    state.id_input = s;
    Task::none()
}

pub(crate) fn open_pressed(state: &mut Cinelink) -> Task<Message> {
    let id = state.id_input.trim().to_string();
    if id.is_empty() {
        return Task::none();
    }

    state.id_input.clear();
    open_content(state, &id)
}

pub(crate) fn open_content(state: &mut Cinelink, id: &str) -> Task<Message> {
    let id = id.trim();
    if id.is_empty() {
        return Task::none();
    }

    state.recent.touch(id);
    show_content(state, id)
}

/// Navigate without reordering the recent list (previous/next keep their walk stable).
fn show_content(state: &mut Cinelink, id: &str) -> Task<Message> {
    state.screen = Screen::Detail;

    let Some(effect) = state.detail.open(id) else {
        // Already showing it.
        return Task::none();
    };

    // Different title: whatever was playing belongs to the old page.
    stop(state);
    state.artwork = None;
    state.status = format!("Loading {id}...");

    run_effect(state, effect)
}

pub(crate) fn open_recent(state: &mut Cinelink, i: usize) -> Task<Message> {
    let Some(id) = state.recent.items().get(i).cloned() else {
        return Task::none();
    };
    open_content(state, &id)
}

pub(crate) fn remove_recent(state: &mut Cinelink, i: usize) -> Task<Message> {
    if let Some(removed) = state.recent.remove(i) {
        state.status = format!("Removed {removed} from recent.");
    }
    Task::none()
}

pub(crate) fn back(state: &mut Cinelink) -> Task<Message> {
    stop(state);
    state.detail.close();
    state.artwork = None;
    state.screen = Screen::Home;
    state.status = "Enter a title id to open it.".to_string();
    Task::none()
}

pub(crate) fn next(state: &mut Cinelink) -> Task<Message> {
    let current = state.detail.content_id.clone();
    let Some(id) = state.recent.after(current.as_deref()).map(str::to_string) else {
        return Task::none();
    };
    show_content(state, &id)
}

pub(crate) fn previous(state: &mut Cinelink) -> Task<Message> {
    let current = state.detail.content_id.clone();
    let Some(id) = state.recent.before(current.as_deref()).map(str::to_string) else {
        return Task::none();
    };
    show_content(state, &id)
}
