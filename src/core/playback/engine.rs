//! core/playback/engine.rs
//! Playback engine (rodio owner).
//!
//! Owns:
//! - OutputStream (must stay alive)
//! - Sink (per loaded source, created paused)
//! - command loop + periodic position ticks
//!
//! Emits PlayerEvents back via a channel, stamped with the load they belong to.
//! No Iced imports.

use std::io::Cursor;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::source::{fetch_bytes, probe_duration_ms};
use super::{EngineReport, LoadId, PlayerCommand, PlayerEvent, TICK_MS};
use crate::core::types::MediaSource;

pub struct PlaybackEngine {
    // Keep this alive for the lifetime of the engine!
    stream: OutputStream,

    sink: Option<Sink>,
    current_url: Option<String>,
    current_load: LoadId,
    volume: f32,

    event_tx: Sender<EngineReport>,
}

impl PlaybackEngine {
    pub fn new(event_tx: Sender<EngineReport>) -> Result<Self, String> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| format!("Failed to open audio output: {e}"))?;

        Ok(Self {
            stream,
            sink: None,
            current_url: None,
            current_load: 0,
            volume: 1.0,
            event_tx,
        })
    }

    pub fn run(&mut self, command_rx: Receiver<PlayerCommand>) {
        let tick = Duration::from_millis(TICK_MS);

        loop {
            match command_rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            self.stop_internal();
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.stop_internal();
    }

    fn emit(&self, event: PlayerEvent) {
        let _ = self.event_tx.send(EngineReport {
            load: self.current_load,
            event,
        });
    }

    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        match cmd {
            PlayerCommand::Load { source, load } => {
                self.current_load = load;
                if let Err(e) = self.load(source) {
                    tracing::warn!(error = %e, "load failed");
                    self.emit(PlayerEvent::Error(e));
                }
            }
            PlayerCommand::Play | PlayerCommand::Resume => {
                let was_paused = self.sink.as_ref().map(|sink| {
                    let paused = sink.is_paused();
                    sink.play();
                    paused
                });
                if was_paused.is_none() {
                    tracing::debug!("play with nothing loaded; ignored");
                }
                if let Some(event) = resume_event(was_paused) {
                    self.emit(event);
                }
            }
            PlayerCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                    self.emit(PlayerEvent::Paused);
                }
            }
            PlayerCommand::Stop => {
                self.stop_internal();
                self.emit(PlayerEvent::Stopped);
            }
            PlayerCommand::Seek(ms) => {
                if let Some(sink) = &self.sink {
                    if let Err(e) = sink.try_seek(Duration::from_millis(ms)) {
                        tracing::debug!(ms, error = %e, "seek rejected");
                        self.emit(PlayerEvent::SeekRejected(
                            "This source does not support seeking".into(),
                        ));
                    }
                }
            }
            PlayerCommand::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(sink) = &self.sink {
                    sink.set_volume(self.volume);
                }
            }
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn tick(&mut self) {
        if let Some(sink) = &self.sink {
            if sink.is_paused() {
                return;
            }

            let position_ms = sink.get_pos().as_millis() as u64;
            self.emit(PlayerEvent::Position { position_ms });

            if sink.empty() && self.current_url.is_some() {
                self.emit(PlayerEvent::Ended);
                self.stop_internal();
            }
        }
    }

    /// Replace whatever is loaded. The new sink starts paused until `Play`.
    fn load(&mut self, source: MediaSource) -> Result<(), String> {
        self.stop_internal();
        tracing::info!(url = %source.url, mime = %source.mime, "loading source");

        let bytes = fetch_bytes(&source)?;
        let probed_ms = probe_duration_ms(&bytes, &source.url)?;

        let decoder = Decoder::new(Cursor::new(bytes)).map_err(|e| format!("Decode failed: {e}"))?;
        let duration_ms = probed_ms.or_else(|| decoder.total_duration().map(|d| d.as_millis() as u64));

        // rodio 0.21.x: Sink is created from the stream's mixer
        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(decoder);

        self.current_url = Some(source.url.clone());
        self.sink = Some(sink);

        self.emit(PlayerEvent::Loaded {
            url: source.url,
            duration_ms,
        });

        Ok(())
    }

    fn stop_internal(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.current_url = None;
    }
}

/// What Play/Resume reports, given whether a sink existed and was paused.
/// With no sink there is nothing to say: a failed load already reported why.
fn resume_event(was_paused: Option<bool>) -> Option<PlayerEvent> {
    match was_paused {
        Some(true) => Some(PlayerEvent::Resumed),
        Some(false) | None => None,
    }
}
