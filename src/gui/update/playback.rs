//! gui/update/playback.rs
//! GUI-playback engine bridge
//!
//! - The control bar only emits intents; `PlaybackSession::apply` turns them into commands.
//! - Engine events update the session and, on playback failures, the detail page.
//! - Reports from a load that was since stopped or replaced are dropped.
//!
//! Design goals:
//! - GUI never touches rodio/symphonia directly.
//! - All IO / timing is driven by the engine + TickPlayback polling.

use iced::Task;

use super::super::state::{Cinelink, Message};
use super::detail::play_selected;
use crate::core::playback::{PlayerCommand, PlayerEvent, start_playback};
use crate::core::session::PlaybackIntent;

pub(crate) fn ensure_engine(state: &mut Cinelink) {
    if state.playback.is_some() && state.playback_events.is_some() {
        return;
    }

    let (controller, events) = start_playback();
    controller.send(PlayerCommand::SetVolume(state.session.volume / 100.0));

    state.playback = Some(controller);
    state.playback_events = Some(events);
}

pub(crate) fn drain_events(state: &mut Cinelink) -> Task<Message> {
    let (Some(rx), Some(controller)) = (state.playback_events.as_ref(), state.playback.as_ref())
    else {
        return Task::none();
    };

    let drained: Vec<PlayerEvent> = rx
        .try_iter()
        .filter(|report| {
            let keep = controller.accepts(report);
            if !keep {
                tracing::debug!(
                    load = report.load,
                    current = controller.current_load(),
                    event = ?report.event,
                    "dropping report from retired load"
                );
            }
            keep
        })
        .map(|report| report.event)
        .collect();

    for ev in drained {
        handle_event(state, ev);
    }

    Task::none()
}

fn handle_event(state: &mut Cinelink, event: PlayerEvent) {
    match &event {
        PlayerEvent::Loaded { url, duration_ms } => {
            tracing::debug!(%url, ?duration_ms, "engine loaded source");
        }
        PlayerEvent::Error(e) => tracing::debug!(error = %e, "engine error"),
        _ => {}
    }

    // If user is dragging the seek slider, don't fight them.
    if matches!(event, PlayerEvent::Position { .. }) && state.seek_preview.is_some() {
        return;
    }

    state.session.on_event(&event);

    if let Some(reason) = event.failure() {
        state.detail.playback_failed(reason);
        state.status = format!("Playback error: {reason}");
        return;
    }

    match event {
        PlayerEvent::Loaded { .. } => state.status = "Source loaded.".to_string(),
        PlayerEvent::Ended => state.status = "Playback finished.".to_string(),
        PlayerEvent::SeekRejected(reason) => state.status = reason,
        _ => {}
    }
}

pub(crate) fn toggle_play_pause(state: &mut Cinelink) -> Task<Message> {
    if !state.session.has_source {
        return play_selected(state);
    }

    if state.session.is_playing {
        pause(state)
    } else {
        resume(state)
    }
}

pub(crate) fn pause(state: &mut Cinelink) -> Task<Message> {
    if let Some(controller) = &state.playback {
        controller.send(PlayerCommand::Pause);
    }
    state.session.is_playing = false;
    Task::none()
}

fn resume(state: &mut Cinelink) -> Task<Message> {
    ensure_engine(state);

    if let Some(controller) = &state.playback {
        controller.send(PlayerCommand::Resume);
    }
    Task::none()
}

/// Drop the loaded source (navigation away from a title).
pub(crate) fn stop(state: &mut Cinelink) {
    if let Some(controller) = &mut state.playback {
        controller.stop();
    }
    state.session.on_event(&PlayerEvent::Stopped);
    state.seek_preview = None;
}

pub(crate) fn apply_intent(state: &mut Cinelink, intent: PlaybackIntent) -> Task<Message> {
    let Some(cmd) = state.session.apply(intent, state.config.skip_seconds) else {
        return Task::none();
    };

    tracing::debug!(?intent, ?cmd, "playback intent");

    if let Some(controller) = &state.playback {
        controller.send(cmd);
    }
    Task::none()
}

/// Seek slider moved: preview only (UI updates, no engine command).
pub(crate) fn seek_preview(state: &mut Cinelink, t: f64) -> Task<Message> {
    state.seek_preview = Some(t.max(0.0));
    Task::none()
}

/// Seek slider released: commit the last preview as a seek intent.
pub(crate) fn seek_commit(state: &mut Cinelink) -> Task<Message> {
    let Some(t) = state.seek_preview.take() else {
        return Task::none();
    };
    apply_intent(state, PlaybackIntent::Seek(t))
}
