//! core/playback/mod.rs
//! Player capability + the engine thread behind it.
//!
//! The detail page only ever sees `MediaPlayer` (load a source, play it).
//! Failures come back later as `PlayerEvent::Error`, polled by the GUI.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use super::types::MediaSource;

mod engine;
mod source;

pub use engine::PlaybackEngine;

/// Engine position tick; the GUI polls at the same rate.
pub const TICK_MS: u64 = 200;

/// Numbers each `Load`. Reports carry the id of the load they belong to.
pub type LoadId = u64;

/// Narrow capability the detail page depends on.
///
/// Errors are asynchronous: the implementation reports them through its own
/// event stream and the owner routes them to `DetailPage::playback_failed`.
pub trait MediaPlayer {
    fn load_source(&mut self, source: MediaSource);
    fn play(&mut self);
}

pub struct PlaybackController {
    command_tx: Sender<PlayerCommand>,
    current_load: LoadId,
}

impl PlaybackController {
    fn new(command_tx: Sender<PlayerCommand>) -> Self {
        Self {
            command_tx,
            current_load: 0,
        }
    }

    /// Best-effort send. If the engine died, the command is dropped.
    pub fn send(&self, cmd: PlayerCommand) {
        if self.command_tx.send(cmd).is_err() {
            tracing::warn!("playback engine is gone; command dropped");
        }
    }

    /// Stop and retire the current load: anything it still reports is ignored.
    pub fn stop(&mut self) {
        self.current_load += 1;
        self.send(PlayerCommand::Stop);
    }

    pub fn current_load(&self) -> LoadId {
        self.current_load
    }

    /// Reports from a retired load are dropped. Load 0 is the engine itself
    /// (startup failures) and always gets through.
    pub fn accepts(&self, report: &EngineReport) -> bool {
        report.load == 0 || report.load == self.current_load
    }

    /// Controller wired to a plain channel instead of an engine thread.
    #[cfg(test)]
    pub(crate) fn detached() -> (Self, Receiver<PlayerCommand>) {
        let (command_tx, command_rx) = mpsc::channel();
        (Self::new(command_tx), command_rx)
    }
}

impl MediaPlayer for PlaybackController {
    fn load_source(&mut self, source: MediaSource) {
        self.current_load += 1;
        self.send(PlayerCommand::Load {
            source,
            load: self.current_load,
        });
    }

    fn play(&mut self) {
        self.send(PlayerCommand::Play);
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("current_load", &self.current_load)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum PlayerCommand {
    Load { source: MediaSource, load: LoadId },
    Play,
    Pause,
    Resume,
    Stop,
    Seek(u64),      // ms
    SetVolume(f32), // 0.0..=1.0
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Loaded {
        url: String,
        duration_ms: Option<u64>,
    },
    Paused,
    Resumed,
    Stopped,
    Position {
        position_ms: u64,
    },
    Ended,
    /// The decoder can't seek; playback carries on where it was.
    SeekRejected(String),
    /// Fetch or decode failure. The source is unusable.
    Error(String),
}

impl PlayerEvent {
    /// Reason, if this event means the source failed to play.
    pub fn failure(&self) -> Option<&str> {
        match self {
            PlayerEvent::Error(reason) => Some(reason),
            _ => None,
        }
    }
}

/// What actually travels on the event channel.
#[derive(Debug, Clone)]
pub struct EngineReport {
    pub load: LoadId,
    pub event: PlayerEvent,
}

/// Spawns playback thread and returns:
/// - PlaybackController (store in GUI state)
/// - Receiver<EngineReport> (drained by the GUI tick)
pub fn start_playback() -> (PlaybackController, Receiver<EngineReport>) {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<EngineReport>();

    thread::spawn(move || {
        let mut engine = match PlaybackEngine::new(event_tx.clone()) {
            Ok(e) => e,
            Err(msg) => {
                tracing::error!(%msg, "audio output unavailable");
                let _ = event_tx.send(EngineReport {
                    load: 0,
                    event: PlayerEvent::Error(msg),
                });
                return;
            }
        };

        engine.run(command_rx);
    });

    (PlaybackController::new(command_tx), event_rx)
}
