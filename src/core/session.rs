//! core/session.rs
//! The playback session: what the control bar reads, and the only place it can change.
//!
//! - Views get `&PlaybackSession` and emit `PlaybackIntent`s.
//! - `apply` turns an intent into an optimistic state change + an engine command.
//! - `on_event` folds engine reports back in.

use super::playback::{PlayerCommand, PlayerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipDirection {
    Forward,
    Backward,
}

/// User intents the control bar may emit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackIntent {
    /// Absolute position, seconds.
    Seek(f64),
    /// 0..=100.
    SetVolume(f32),
    Skip(SkipDirection),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSession {
    /// Seconds.
    pub current_time: f64,
    /// Seconds, 0.0 while unknown.
    pub duration: f64,
    /// 0..=100.
    pub volume: f32,
    pub is_playing: bool,
    /// True once the engine reported a loaded source.
    pub has_source: bool,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: 0.0,
            volume: 80.0,
            is_playing: false,
            has_source: false,
        }
    }
}

impl PlaybackSession {
    pub fn apply(&mut self, intent: PlaybackIntent, skip_seconds: f64) -> Option<PlayerCommand> {
        match intent {
            PlaybackIntent::SetVolume(v) => {
                let v = if v.is_finite() { v.clamp(0.0, 100.0) } else { 0.0 };
                self.volume = v;
                Some(PlayerCommand::SetVolume(v / 100.0))
            }
            PlaybackIntent::Seek(t) => self.seek_to(t),
            PlaybackIntent::Skip(SkipDirection::Forward) => {
                self.seek_to(self.current_time + skip_seconds)
            }
            PlaybackIntent::Skip(SkipDirection::Backward) => {
                self.seek_to(self.current_time - skip_seconds)
            }
        }
    }

    fn seek_to(&mut self, t: f64) -> Option<PlayerCommand> {
        if !t.is_finite() || !self.has_source {
            return None;
        }

        let mut t = t.max(0.0);
        if self.duration > 0.0 {
            t = t.min(self.duration);
        }

        self.current_time = t;
        Some(PlayerCommand::Seek((t * 1000.0).round() as u64))
    }

    pub fn on_event(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::Loaded { duration_ms, .. } => {
                self.has_source = true;
                self.is_playing = false;
                self.current_time = 0.0;
                self.duration = duration_ms.map(|ms| ms as f64 / 1000.0).unwrap_or(0.0);
            }
            PlayerEvent::Resumed => self.is_playing = true,
            PlayerEvent::Paused => self.is_playing = false,
            PlayerEvent::Stopped => {
                *self = Self {
                    volume: self.volume,
                    ..Self::default()
                };
            }
            PlayerEvent::Position { position_ms } => {
                self.current_time = *position_ms as f64 / 1000.0;
            }
            // The engine drops its sink at the end; play has to load again.
            PlayerEvent::Ended => {
                self.is_playing = false;
                self.has_source = false;
                self.current_time = 0.0;
            }
            PlayerEvent::SeekRejected(_) => {}
            PlayerEvent::Error(_) => self.is_playing = false,
        }
    }
}
