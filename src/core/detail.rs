//! core/detail.rs
//! Detail page state machine: which record, which quality, is the player open,
//! did playback fail, is a link refresh in flight.
//!
//! No Iced imports. Handlers mutate state and hand back an `Effect` (a request the
//! caller must run); results come back through `content_loaded` / `refresh_finished`.
//!
//! Every request carries a token. Only the latest token per request kind may land,
//! and opening another id invalidates everything outstanding.

use super::error::ApiResult;
use super::playback::MediaPlayer;
use super::types::{ContentRecord, MediaSource, RefreshedLink};

pub type RequestToken = u64;

/// Requests the page wants run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchContent {
        id: String,
        force_refresh: bool,
        token: RequestToken,
    },
    RefreshLink {
        id: String,
        quality: String,
        token: RequestToken,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Error,
    Ready,
}

/// What to do once a fetch lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FollowUp {
    None,
    LoadSelected,
    FinishRefresh,
}

#[derive(Debug, Default)]
pub struct DetailPage {
    pub content_id: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub content: Option<ContentRecord>,

    pub selected_quality: Option<String>,
    pub quality_menu_open: bool,
    pub player_open: bool,
    pub refreshing: bool,
    pub playback_error: bool,

    /// One-line status for the user (refresh outcome, refetch trouble...).
    pub notice: Option<String>,

    last_token: RequestToken,
    pending_fetch: Option<(RequestToken, FollowUp)>,
    pending_refresh: Option<RequestToken>,
}

impl DetailPage {
    pub fn phase(&self) -> Phase {
        if self.content_id.is_none() {
            Phase::Idle
        } else if self.error.is_some() {
            Phase::Error
        } else if self.content.is_some() {
            Phase::Ready
        } else {
            Phase::Loading
        }
    }

    /// Navigate to `id`. Re-opening the id already shown is a no-op.
    pub fn open(&mut self, id: &str) -> Option<Effect> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        if self.content_id.as_deref() == Some(id) && self.error.is_none() {
            return None;
        }

        self.reset();
        self.content_id = Some(id.to_string());
        self.loading = true;

        tracing::info!(id, "opening content");
        Some(self.issue_fetch(false, FollowUp::None))
    }

    /// Leave the page. Outstanding results will be dropped when they land.
    pub fn close(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        *self = Self {
            last_token: self.last_token,
            ..Self::default()
        };
    }

    fn next_token(&mut self) -> RequestToken {
        self.last_token += 1;
        self.last_token
    }

    fn issue_fetch(&mut self, force_refresh: bool, follow_up: FollowUp) -> Effect {
        let token = self.next_token();
        self.pending_fetch = Some((token, follow_up));

        Effect::FetchContent {
            id: self.content_id.clone().unwrap_or_default(),
            force_refresh,
            token,
        }
    }

    pub fn content_loaded(
        &mut self,
        token: RequestToken,
        result: ApiResult<ContentRecord>,
        player: Option<&mut dyn MediaPlayer>,
    ) {
        let follow_up = match self.pending_fetch {
            Some((expected, follow_up)) if expected == token => follow_up,
            _ => {
                tracing::debug!(token, "dropping stale content response");
                return;
            }
        };

        self.pending_fetch = None;
        self.loading = false;

        match result {
            Ok(record) => {
                if self.selected_quality.is_none() {
                    self.selected_quality = record.qualities.first().map(|q| q.label.clone());
                }
                self.content = Some(record);

                match follow_up {
                    FollowUp::None => {}
                    FollowUp::LoadSelected => self.load_selected(player),
                    FollowUp::FinishRefresh => self.finish_refresh(player),
                }
            }
            Err(e) if self.content.is_none() => {
                tracing::warn!(error = %e, "content fetch failed");
                self.error = Some(e.user_message());
            }
            Err(e) => {
                // Keep showing what we have.
                tracing::warn!(error = %e, "content refetch failed");
                self.notice = Some(e.user_message());

                match follow_up {
                    FollowUp::None => {}
                    FollowUp::LoadSelected => self.load_selected(player),
                    FollowUp::FinishRefresh => {
                        self.refreshing = false;
                        self.playback_error = true;
                    }
                }
            }
        }
    }

    /// URL of `label` in the current record, `""` (and a warning) when absent.
    pub fn url_for_quality(&self, label: &str) -> String {
        match self.content.as_ref().and_then(|c| c.quality(label)) {
            Some(q) => q.url.clone(),
            None => {
                tracing::warn!(label, "selected quality missing from current record");
                String::new()
            }
        }
    }

    pub fn toggle_quality_menu(&mut self) {
        if self.content.is_some() {
            self.quality_menu_open = !self.quality_menu_open;
        }
    }

    /// Pick a quality. Labels not in the current record are ignored outright.
    pub fn select_quality(&mut self, label: &str) -> Option<Effect> {
        let present = self
            .content
            .as_ref()
            .map(|c| c.has_quality(label))
            .unwrap_or(false);
        if !present {
            return None;
        }

        tracing::info!(label, "quality selected");

        self.selected_quality = Some(label.to_string());
        self.playback_error = false;
        self.notice = None;
        self.quality_menu_open = false;
        self.player_open = true;

        // A pick fetches fresh links itself; an in-flight refresh is superseded.
        self.refreshing = false;
        self.pending_refresh = None;

        Some(self.issue_fetch(true, FollowUp::LoadSelected))
    }

    /// "Play" on the page: same path as re-picking the current quality.
    pub fn play_selected(&mut self) -> Option<Effect> {
        let label = self.selected_quality.clone()?;
        self.select_quality(&label)
    }

    pub fn close_player(&mut self) {
        self.player_open = false;
    }

    /// Player reported a decode/network failure. No automatic retry.
    pub fn playback_failed(&mut self, reason: &str) {
        if self.content.is_none() {
            return;
        }
        if self.refreshing {
            tracing::debug!(reason, "player error while refreshing; source is being replaced");
            return;
        }

        tracing::warn!(reason, "playback failed");
        self.playback_error = true;
        self.notice = Some(format!("Playback failed: {reason}"));
    }

    pub fn can_refresh(&self) -> bool {
        self.playback_error && !self.refreshing
    }

    /// Ask the server for a fresh link for the selected quality.
    pub fn request_refresh(&mut self) -> Option<Effect> {
        if !self.can_refresh() {
            return None;
        }
        let id = self.content_id.clone()?;
        let quality = self.selected_quality.clone()?;

        self.refreshing = true;
        self.playback_error = false;
        self.notice = Some("Refreshing link...".to_string());

        let token = self.next_token();
        self.pending_refresh = Some(token);

        Some(Effect::RefreshLink { id, quality, token })
    }

    pub fn refresh_finished(
        &mut self,
        token: RequestToken,
        result: ApiResult<RefreshedLink>,
    ) -> Option<Effect> {
        if self.pending_refresh != Some(token) {
            tracing::debug!(token, "dropping stale refresh response");
            return None;
        }
        self.pending_refresh = None;

        match result {
            Ok(link) => {
                tracing::info!(message = %link.message, quality = ?link.quality, "link refreshed on server");
                Some(self.issue_fetch(true, FollowUp::FinishRefresh))
            }
            Err(e) => {
                tracing::warn!(error = %e, "link refresh failed");
                self.refreshing = false;
                self.playback_error = true;
                self.notice = Some(e.user_message());
                None
            }
        }
    }

    fn load_selected(&mut self, player: Option<&mut dyn MediaPlayer>) {
        let Some(label) = self.selected_quality.clone() else {
            return;
        };

        let url = self.url_for_quality(&label);
        if url.is_empty() {
            self.notice = Some(format!("Quality {label} is no longer listed for this title."));
            return;
        }

        if let Some(player) = player {
            player.load_source(MediaSource::from_url(url));
            player.play();
        }
    }

    fn finish_refresh(&mut self, player: Option<&mut dyn MediaPlayer>) {
        self.refreshing = false;

        let label = self.selected_quality.clone().unwrap_or_default();
        let url = self
            .content
            .as_ref()
            .and_then(|c| c.quality(&label))
            .map(|q| q.url.clone());

        match url {
            Some(url) => {
                self.playback_error = false;
                self.notice = Some("Link refreshed.".to_string());
                if let Some(player) = player {
                    player.load_source(MediaSource::from_url(url));
                    player.play();
                }
            }
            None => {
                tracing::warn!(label = %label, "refreshed record lacks the selected quality");
                self.playback_error = true;
                self.notice = Some(format!("Quality {label} is not available for this title."));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiError;
    use crate::core::types::QualityVariant;

    #[derive(Default)]
    struct FakePlayer {
        loaded: Vec<MediaSource>,
        plays: usize,
    }

    impl MediaPlayer for FakePlayer {
        fn load_source(&mut self, source: MediaSource) {
            self.loaded.push(source);
        }

        fn play(&mut self) {
            self.plays += 1;
        }
    }

    fn record(qualities: &[(&str, &str)]) -> ContentRecord {
        ContentRecord {
            id: "tt7".into(),
            title: "Harbor Lights".into(),
            director: Some("M. Ilves".into()),
            artist: None,
            year: Some(2019),
            overview: None,
            runtime: None,
            artwork_url: None,
            qualities: qualities
                .iter()
                .map(|(label, url)| QualityVariant {
                    label: label.to_string(),
                    url: url.to_string(),
                })
                .collect(),
        }
    }

    fn fetch_token(effect: Option<Effect>) -> RequestToken {
        match effect {
            Some(Effect::FetchContent { token, .. }) => token,
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    /// Page opened on "tt7" with `[720p -> a, 1080p -> b]` loaded.
    fn ready_page() -> DetailPage {
        let mut page = DetailPage::default();
        let t = fetch_token(page.open("tt7"));
        page.content_loaded(t, Ok(record(&[("720p", "a"), ("1080p", "b")])), None);
        page
    }

    #[test]
    fn open_issues_one_unforced_fetch() {
        let mut page = DetailPage::default();
        assert_eq!(page.phase(), Phase::Idle);

        match page.open(" tt7 ") {
            Some(Effect::FetchContent {
                id, force_refresh, ..
            }) => {
                assert_eq!(id, "tt7");
                assert!(!force_refresh);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(page.loading);
        assert_eq!(page.phase(), Phase::Loading);

        assert_eq!(page.open("tt7"), None);
        assert_eq!(page.open("   "), None);
    }

    #[test]
    fn first_quality_is_the_default() {
        let page = ready_page();
        assert_eq!(page.phase(), Phase::Ready);
        assert!(!page.loading);
        assert_eq!(page.selected_quality.as_deref(), Some("720p"));
    }

    #[test]
    fn record_without_qualities_leaves_selection_empty() {
        let mut page = DetailPage::default();
        let t = fetch_token(page.open("tt7"));
        page.content_loaded(t, Ok(record(&[])), None);
        assert_eq!(page.phase(), Phase::Ready);
        assert_eq!(page.selected_quality, None);
        assert_eq!(page.play_selected(), None);
    }

    #[test]
    fn fetch_failure_is_terminal_until_another_open() {
        let mut page = DetailPage::default();
        let t = fetch_token(page.open("tt404"));
        page.content_loaded(t, Err(ApiError::NotFound("tt404".into())), None);

        assert_eq!(page.phase(), Phase::Error);
        assert_eq!(page.error.as_deref(), Some("This title could not be found."));

        // Same id may be retried from the error page.
        assert!(page.open("tt404").is_some());
        assert_eq!(page.phase(), Phase::Loading);
    }

    #[test]
    fn selecting_a_quality_issues_exactly_one_forced_fetch() {
        let mut page = ready_page();
        page.playback_error = true;

        let effect = page.select_quality("1080p");
        match effect {
            Some(Effect::FetchContent {
                ref id,
                force_refresh,
                ..
            }) => {
                assert_eq!(id, "tt7");
                assert!(force_refresh);
            }
            ref other => panic!("unexpected {other:?}"),
        }
        assert_eq!(page.selected_quality.as_deref(), Some("1080p"));
        assert!(!page.playback_error);
        assert!(page.player_open);

        // The fetch lands: fresh URL goes to the player.
        let mut player = FakePlayer::default();
        page.content_loaded(
            fetch_token(effect),
            Ok(record(&[("720p", "a"), ("1080p", "b2")])),
            Some(&mut player),
        );
        assert_eq!(player.loaded, vec![MediaSource::from_url("b2")]);
        assert_eq!(player.plays, 1);
    }

    #[test]
    fn selecting_an_absent_quality_is_a_no_op() {
        let mut page = ready_page();
        page.playback_error = true;

        assert_eq!(page.select_quality("4K"), None);
        assert_eq!(page.selected_quality.as_deref(), Some("720p"));
        assert!(page.playback_error);
        assert!(!page.player_open);
    }

    #[test]
    fn selection_is_ignored_before_anything_is_loaded() {
        let mut page = DetailPage::default();
        page.open("tt7");
        assert_eq!(page.select_quality("720p"), None);
    }

    #[test]
    fn missing_label_lookup_yields_empty_string() {
        let page = ready_page();
        assert_eq!(page.url_for_quality("1080p"), "b");
        assert_eq!(page.url_for_quality("480p"), "");
    }

    #[test]
    fn playback_error_enables_refresh_once() {
        let mut page = ready_page();
        assert!(!page.can_refresh());
        assert_eq!(page.request_refresh(), None);

        page.playback_failed("decode error");
        assert!(page.playback_error);
        assert!(page.can_refresh());

        match page.request_refresh() {
            Some(Effect::RefreshLink { id, quality, .. }) => {
                assert_eq!(id, "tt7");
                assert_eq!(quality, "720p");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(page.refreshing);
        assert!(!page.playback_error);

        // Already refreshing: a second request does nothing.
        page.playback_error = true;
        assert_eq!(page.request_refresh(), None);
    }

    #[test]
    fn refresh_end_to_end_loads_the_new_url() {
        let mut page = ready_page();
        let mut player = FakePlayer::default();

        let pick = page.select_quality("1080p");
        page.content_loaded(
            fetch_token(pick),
            Ok(record(&[("720p", "a"), ("1080p", "b")])),
            Some(&mut player),
        );
        page.playback_failed("403 from CDN");

        let token = match page.request_refresh() {
            Some(Effect::RefreshLink { token, .. }) => token,
            other => panic!("unexpected {other:?}"),
        };

        let refetch = page.refresh_finished(
            token,
            Ok(RefreshedLink {
                new_url: "x".into(),
                message: "Link refreshed".into(),
                quality: Some("1080p".into()),
            }),
        );
        match &refetch {
            Some(Effect::FetchContent { force_refresh, .. }) => assert!(*force_refresh),
            other => panic!("unexpected {other:?}"),
        }
        assert!(page.refreshing);

        page.content_loaded(
            fetch_token(refetch),
            Ok(record(&[("720p", "a"), ("1080p", "x")])),
            Some(&mut player),
        );

        assert_eq!(player.loaded.last().map(|s| s.url.as_str()), Some("x"));
        assert!(!page.playback_error);
        assert!(!page.refreshing);
    }

    #[test]
    fn refresh_failure_returns_to_playback_error() {
        let mut page = ready_page();
        page.playback_failed("network");

        let token = match page.request_refresh() {
            Some(Effect::RefreshLink { token, .. }) => token,
            other => panic!("unexpected {other:?}"),
        };
        let next = page.refresh_finished(token, Err(ApiError::QualityUnavailable("720p".into())));

        assert_eq!(next, None);
        assert!(!page.refreshing);
        assert!(page.playback_error);
        assert!(page.notice.as_deref().unwrap_or_default().contains("720p"));
        assert!(page.can_refresh());
    }

    #[test]
    fn refreshed_record_missing_the_quality_is_a_failure() {
        let mut page = ready_page();
        page.playback_failed("network");
        let token = match page.request_refresh() {
            Some(Effect::RefreshLink { token, .. }) => token,
            other => panic!("unexpected {other:?}"),
        };
        let refetch = page.refresh_finished(
            token,
            Ok(RefreshedLink {
                new_url: "y".into(),
                message: String::new(),
                quality: None,
            }),
        );

        let mut player = FakePlayer::default();
        page.content_loaded(
            fetch_token(refetch),
            Ok(record(&[("1080p", "y")])),
            Some(&mut player),
        );

        assert!(player.loaded.is_empty());
        assert!(!page.refreshing);
        assert!(page.playback_error);
    }

    #[test]
    fn failed_refetch_during_refresh_clears_refreshing() {
        let mut page = ready_page();
        page.playback_failed("network");
        let token = match page.request_refresh() {
            Some(Effect::RefreshLink { token, .. }) => token,
            other => panic!("unexpected {other:?}"),
        };
        let refetch = page.refresh_finished(
            token,
            Ok(RefreshedLink {
                new_url: "y".into(),
                message: String::new(),
                quality: None,
            }),
        );
        page.content_loaded(
            fetch_token(refetch),
            Err(ApiError::Network("reset".into())),
            None,
        );

        assert_eq!(page.phase(), Phase::Ready);
        assert!(!page.refreshing);
        assert!(page.playback_error);
    }

    #[test]
    fn only_the_latest_pick_lands() {
        let mut page = ready_page();
        let mut player = FakePlayer::default();

        let first = fetch_token(page.select_quality("1080p"));
        let second = fetch_token(page.select_quality("720p"));

        page.content_loaded(
            second,
            Ok(record(&[("720p", "a2"), ("1080p", "b2")])),
            Some(&mut player),
        );
        page.content_loaded(
            first,
            Ok(record(&[("720p", "stale"), ("1080p", "stale")])),
            Some(&mut player),
        );

        assert_eq!(player.loaded, vec![MediaSource::from_url("a2")]);
        assert_eq!(page.url_for_quality("720p"), "a2");
    }

    #[test]
    fn responses_for_a_previous_id_are_dropped() {
        let mut page = DetailPage::default();
        let old = fetch_token(page.open("tt1"));
        let new = fetch_token(page.open("tt2"));

        page.content_loaded(old, Ok(record(&[("720p", "old")])), None);
        assert_eq!(page.phase(), Phase::Loading);

        page.content_loaded(new, Ok(record(&[("480p", "new")])), None);
        assert_eq!(page.selected_quality.as_deref(), Some("480p"));
    }

    #[test]
    fn closing_the_player_keeps_in_flight_work() {
        let mut page = ready_page();
        let pick = page.select_quality("1080p");
        page.close_player();
        assert!(!page.player_open);

        let mut player = FakePlayer::default();
        page.content_loaded(fetch_token(pick), Ok(record(&[("1080p", "b")])), Some(&mut player));
        assert_eq!(player.loaded.len(), 1);
    }

    #[test]
    fn a_pick_supersedes_an_in_flight_refresh() {
        let mut page = ready_page();
        page.playback_failed("network");
        let refresh = match page.request_refresh() {
            Some(Effect::RefreshLink { token, .. }) => token,
            other => panic!("unexpected {other:?}"),
        };

        assert!(page.select_quality("1080p").is_some());
        assert!(!page.refreshing);

        let late = page.refresh_finished(
            refresh,
            Ok(RefreshedLink {
                new_url: "z".into(),
                message: String::new(),
                quality: None,
            }),
        );
        assert_eq!(late, None);
    }
}
