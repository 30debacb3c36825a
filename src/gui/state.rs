//! GUI state + messages.
//! Pure data definitions used by update + view.

use std::sync::mpsc::Receiver;

use iced::Task;
use iced::widget::image;

use crate::core::api::ApiClient;
use crate::core::config::Config;
use crate::core::detail::{DetailPage, RequestToken};
use crate::core::error::ApiError;
use crate::core::playback::{EngineReport, PlaybackController};
use crate::core::recent::RecentItems;
use crate::core::session::PlaybackIntent;
use crate::core::session::PlaybackSession;
use crate::core::types::{ContentRecord, RefreshedLink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Home,
    Detail,
}

/// App state
pub(crate) struct Cinelink {
    pub config: Config,
    pub api: ApiClient,
    pub status: String,
    pub screen: Screen,

    // Home
    pub id_input: String,
    pub recent: RecentItems,

    // Detail
    pub detail: DetailPage,
    /// (artwork url, decoded handle) for the record on screen.
    pub artwork: Option<(String, image::Handle)>,

    // Playback
    pub session: PlaybackSession,
    pub playback: Option<PlaybackController>,
    pub playback_events: Option<Receiver<EngineReport>>,
    /// Seek slider position while the user is dragging (seconds).
    pub seek_preview: Option<f64>,
}

impl Cinelink {
    pub(crate) fn new(config: Config) -> Self {
        let api = ApiClient::new(config.api_base.clone());

        Self {
            config,
            api,
            status: "Enter a title id to open it.".to_string(),
            screen: Screen::Home,

            id_input: String::new(),
            recent: RecentItems::default(),

            detail: DetailPage::default(),
            artwork: None,

            session: PlaybackSession::default(),
            playback: None,
            playback_events: None,
            seek_preview: None,
        }
    }

    /// Initial state, plus "open the id from the command line" if there was one.
    pub(crate) fn boot(config: Config) -> (Self, Task<Message>) {
        let initial = config.initial_content.clone();
        let state = Self::new(config);

        let task = match initial {
            Some(id) => Task::done(Message::OpenContent(id)),
            None => Task::none(),
        };

        (state, task)
    }

    pub(crate) fn artwork_handle(&self) -> Option<&image::Handle> {
        let wanted = self.detail.content.as_ref()?.artwork_url.as_deref()?;
        match &self.artwork {
            Some((url, handle)) if url == wanted => Some(handle),
            _ => None,
        }
    }
}

/// Message = “something happened”.
#[derive(Debug, Clone)]
pub(crate) enum Message {
    TickPlayback,

    // Home
    IdInputChanged(String),
    OpenPressed,
    OpenContent(String),
    OpenRecent(usize),
    RemoveRecent(usize),
    Back,

    // Detail
    ContentLoaded(RequestToken, Result<ContentRecord, ApiError>),
    ArtworkLoaded(String, Option<image::Handle>),
    ToggleQualityMenu,
    SelectQuality(String),
    PlaySelected,
    ClosePlayer,
    RefreshLink,
    RefreshFinished(RequestToken, Result<RefreshedLink, ApiError>),

    // Control bar
    TogglePlayPause,
    Next,
    Previous,
    Intent(PlaybackIntent),
    SeekPreview(f64),
    SeekCommit,
}
