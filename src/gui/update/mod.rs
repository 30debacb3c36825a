//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{Cinelink, Message};

mod detail;
mod navigation;
mod playback;

pub(crate) fn update(state: &mut Cinelink, message: Message) -> Task<Message> {
    match message {
        Message::TickPlayback => playback::drain_events(state),

        // Home
        Message::IdInputChanged(s) => navigation::id_input_changed(state, s),
        Message::OpenPressed => navigation::open_pressed(state),
        Message::OpenContent(id) => navigation::open_content(state, &id),
        Message::OpenRecent(i) => navigation::open_recent(state, i),
        Message::RemoveRecent(i) => navigation::remove_recent(state, i),
        Message::Back => navigation::back(state),

        // Detail
        Message::ContentLoaded(token, result) => detail::content_loaded(state, token, result),
        Message::ArtworkLoaded(url, handle) => detail::artwork_loaded(state, url, handle),
        Message::ToggleQualityMenu => detail::toggle_quality_menu(state),
        Message::SelectQuality(label) => detail::select_quality(state, &label),
        Message::PlaySelected => detail::play_selected(state),
        Message::ClosePlayer => detail::close_player(state),
        Message::RefreshLink => detail::refresh_link(state),
        Message::RefreshFinished(token, result) => detail::refresh_finished(state, token, result),

        // Control bar
        Message::TogglePlayPause => playback::toggle_play_pause(state),
        Message::Next => navigation::next(state),
        Message::Previous => navigation::previous(state),
        Message::Intent(intent) => playback::apply_intent(state, intent),

        // Seek: preview vs commit
        Message::SeekPreview(t) => playback::seek_preview(state, t),
        Message::SeekCommit => playback::seek_commit(state),
    }
}
