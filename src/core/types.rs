//! Core data types shared between core logic and the UI.
//!
//! Rule of thumb:
//! - These structs should be “boring bags of data”
//! - No GUI code
//! - No HTTP code
//!
//! `ContentRecord` is what the catalogue server returns for ONE playable item.

use serde::{Deserialize, Serialize};

/// One playable item as served by the catalogue.
///
/// Immutable once fetched: a refetch replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub director: Option<String>,

    #[serde(default)]
    pub artist: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub overview: Option<String>,

    /// Nominal length. Servers send either seconds or a display string.
    #[serde(default, alias = "duration")]
    pub runtime: Option<Runtime>,

    #[serde(default, alias = "poster_url", alias = "poster", alias = "artwork")]
    pub artwork_url: Option<String>,

    /// Server order is display order.
    #[serde(default, alias = "links", alias = "streams")]
    pub qualities: Vec<QualityVariant>,
}

impl ContentRecord {
    pub fn quality(&self, label: &str) -> Option<&QualityVariant> {
        self.qualities.iter().find(|q| q.label == label)
    }

    pub fn has_quality(&self, label: &str) -> bool {
        self.quality(label).is_some()
    }

    /// True when there is at least one source the player could load.
    pub fn is_playable(&self) -> bool {
        self.qualities.iter().any(|q| !q.url.is_empty())
    }

    /// Director first, then artist.
    pub fn subtitle(&self) -> Option<&str> {
        self.director.as_deref().or(self.artist.as_deref())
    }

    /// Nominal runtime in seconds, 0.0 when unknown.
    pub fn nominal_seconds(&self) -> f64 {
        self.runtime
            .as_ref()
            .and_then(Runtime::as_seconds)
            .unwrap_or(0.0)
    }
}

/// A named, independently addressable source for a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityVariant {
    pub label: String,
    #[serde(alias = "link")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Runtime {
    Seconds(f64),
    Display(String),
}

impl Runtime {
    /// Seconds, if this runtime can be expressed as a finite non-negative number.
    ///
    /// Display strings accept `SS`, `M:SS` and `H:MM:SS`.
    pub fn as_seconds(&self) -> Option<f64> {
        match self {
            Runtime::Seconds(s) if s.is_finite() && *s >= 0.0 => Some(*s),
            Runtime::Seconds(_) => None,
            Runtime::Display(s) => parse_clock(s),
        }
    }
}

fn parse_clock(s: &str) -> Option<f64> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    // Leading field is unbounded; the ones after it are minutes/seconds.
    let mut total: u64 = 0;
    for (i, part) in parts.into_iter().enumerate() {
        let n: u64 = part.trim().parse().ok()?;
        if i > 0 && n >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(n)?;
    }
    Some(total as f64)
}

/// Reply of the refresh-link endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshedLink {
    pub new_url: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub quality: Option<String>,
}

/// What the player actually gets handed: a URL plus a MIME type hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub url: String,
    pub mime: String,
}

impl MediaSource {
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let mime = mime_for_url(&url).to_string();
        Self { url, mime }
    }
}

/// Guess a MIME type from the URL path extension (query string ignored).
pub fn mime_for_url(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "m3u8" => "application/x-mpegURL",
        "mpd" => "application/dash+xml",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        _ => "video/mp4",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_record_with_aliases() {
        let json = r#"{
            "id": "tt01",
            "title": "Night Train",
            "director": "A. Lumen",
            "duration": "1:42:05",
            "poster_url": "https://img.example/p.jpg",
            "links": [
                {"label": "720p", "url": "https://cdn.example/a.mp4"},
                {"label": "1080p", "link": "https://cdn.example/b.mp4"}
            ]
        }"#;

        let r: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.subtitle(), Some("A. Lumen"));
        assert_eq!(r.nominal_seconds(), 6125.0);
        assert_eq!(r.artwork_url.as_deref(), Some("https://img.example/p.jpg"));
        assert_eq!(r.qualities.len(), 2);
        assert_eq!(r.quality("1080p").unwrap().url, "https://cdn.example/b.mp4");
        assert!(r.is_playable());
    }

    #[test]
    fn missing_qualities_means_not_playable() {
        let r: ContentRecord =
            serde_json::from_str(r#"{"id": "x", "title": "Still", "runtime": 95}"#).unwrap();
        assert!(r.qualities.is_empty());
        assert!(!r.is_playable());
        assert_eq!(r.nominal_seconds(), 95.0);
    }

    #[test]
    fn runtime_strings() {
        assert_eq!(Runtime::Display("59".into()).as_seconds(), Some(59.0));
        assert_eq!(Runtime::Display("2:05".into()).as_seconds(), Some(125.0));
        assert_eq!(Runtime::Display("1h 30m".into()).as_seconds(), None);
        assert_eq!(Runtime::Display("1:42:05".into()).as_seconds(), Some(6125.0));
        assert_eq!(Runtime::Display("1:75".into()).as_seconds(), None);
        assert_eq!(Runtime::Seconds(f64::NAN).as_seconds(), None);
        assert_eq!(Runtime::Seconds(-3.0).as_seconds(), None);
    }

    #[test]
    fn mime_guessing() {
        assert_eq!(mime_for_url("https://x/master.m3u8?sig=1"), "application/x-mpegURL");
        assert_eq!(mime_for_url("https://x/manifest.MPD"), "application/dash+xml");
        assert_eq!(mime_for_url("https://x/clip.webm"), "video/webm");
        assert_eq!(mime_for_url("https://x/song.mp3"), "audio/mpeg");
        assert_eq!(mime_for_url("https://x/stream"), "video/mp4");
        assert_eq!(MediaSource::from_url("a.mp4").mime, "video/mp4");
    }

    #[test]
    fn refresh_reply_quality_is_optional() {
        let r: RefreshedLink = serde_json::from_str(r#"{"new_url": "x"}"#).unwrap();
        assert_eq!(r.new_url, "x");
        assert_eq!(r.quality, None);
    }

    #[test]
    fn oversized_clock_strings_do_not_overflow() {
        let r: ContentRecord = serde_json::from_str(
            r#"{"id": "x", "title": "Long", "duration": "9999999999999999999:59"}"#,
        )
        .unwrap();
        assert_eq!(r.nominal_seconds(), 0.0);
        assert_eq!(
            Runtime::Display("18446744073709551615:00:00".into()).as_seconds(),
            None
        );
    }
}
