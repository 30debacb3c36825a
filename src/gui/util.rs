//! Small pure helper functions used by the GUI.
//! - no UI widgets or state mutation

use crate::core::types::{ContentRecord, Runtime};

/// `M:SS`: minutes unpadded, seconds zero-padded. Non-finite/negative -> `0:00`.
pub(crate) fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VolumeGlyph {
    Muted,
    Low,
    Full,
}

impl VolumeGlyph {
    /// `volume` is 0..=100.
    pub(crate) fn for_volume(volume: f32) -> Self {
        if volume <= 0.0 {
            VolumeGlyph::Muted
        } else if volume < 50.0 {
            VolumeGlyph::Low
        } else {
            VolumeGlyph::Full
        }
    }

    pub(crate) fn symbol(self) -> &'static str {
        match self {
            VolumeGlyph::Muted => "🔇",
            VolumeGlyph::Low => "🔉",
            VolumeGlyph::Full => "🔊",
        }
    }
}

/// A record the control bar can drive: present, with at least one quality.
pub(crate) fn has_playable_source(record: Option<&ContentRecord>) -> bool {
    record.is_some_and(ContentRecord::is_playable)
}

/// Message a bar control emits, or `None` (disabled) when there is nothing
/// playable or the caller offered no callback.
pub(crate) fn control_message<M>(playable: bool, callback: Option<M>) -> Option<M> {
    callback.filter(|_| playable)
}

/// Seek range upper bound: live duration if known, else the record's nominal runtime.
pub(crate) fn effective_duration(live_duration: f64, record: Option<&ContentRecord>) -> f64 {
    if live_duration.is_finite() && live_duration > 0.0 {
        return live_duration;
    }

    record.map(ContentRecord::nominal_seconds).unwrap_or(0.0)
}

pub(crate) fn seek_enabled(effective: f64) -> bool {
    effective > 0.0
}

/// Runtime for the detail page: display strings as sent, seconds formatted.
pub(crate) fn runtime_label(record: &ContentRecord) -> Option<String> {
    match record.runtime.as_ref()? {
        Runtime::Display(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Runtime::Display(_) => None,
        Runtime::Seconds(s) => Some(format_time(*s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::QualityVariant;

    fn record_with_runtime(runtime: Option<Runtime>) -> ContentRecord {
        ContentRecord {
            id: "x".into(),
            title: "X".into(),
            director: None,
            artist: None,
            year: None,
            overview: None,
            runtime,
            artwork_url: None,
            qualities: Vec::new(),
        }
    }

    #[test]
    fn controls_need_a_source_and_a_callback() {
        assert_eq!(control_message(true, Some("next")), Some("next"));
        assert_eq!(control_message(true, None::<&str>), None);
        assert_eq!(control_message(false, Some("next")), None);
        assert_eq!(control_message(false, None::<&str>), None);
    }

    #[test]
    fn playable_source_needs_a_record_with_qualities() {
        assert!(!has_playable_source(None));
        assert_eq!(control_message(has_playable_source(None), Some(1)), None);

        let bare = record_with_runtime(None);
        assert!(!has_playable_source(Some(&bare)));

        let mut streamable = record_with_runtime(None);
        streamable.qualities.push(QualityVariant {
            label: "720p".into(),
            url: "https://cdn.example/a.mp4".into(),
        });
        assert!(has_playable_source(Some(&streamable)));
        assert_eq!(control_message(has_playable_source(Some(&streamable)), Some(1)), Some(1));
    }

    #[test]
    fn time_formatting() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(-4.0), "0:00");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(599.0), "9:59");
        assert_eq!(format_time(59.9), "0:59");
        assert_eq!(format_time(3725.0), "62:05");
    }

    #[test]
    fn volume_glyph_thresholds() {
        assert_eq!(VolumeGlyph::for_volume(0.0), VolumeGlyph::Muted);
        assert_eq!(VolumeGlyph::for_volume(25.0), VolumeGlyph::Low);
        assert_eq!(VolumeGlyph::for_volume(49.9), VolumeGlyph::Low);
        assert_eq!(VolumeGlyph::for_volume(50.0), VolumeGlyph::Full);
        assert_eq!(VolumeGlyph::for_volume(75.0), VolumeGlyph::Full);
    }

    #[test]
    fn effective_duration_prefers_live_value() {
        let rec = record_with_runtime(Some(Runtime::Seconds(120.0)));
        assert_eq!(effective_duration(300.0, Some(&rec)), 300.0);
        assert_eq!(effective_duration(0.0, Some(&rec)), 120.0);
        assert_eq!(effective_duration(f64::NAN, Some(&rec)), 120.0);
    }

    #[test]
    fn seek_disabled_only_when_both_durations_are_missing() {
        let none = record_with_runtime(None);
        assert!(!seek_enabled(effective_duration(0.0, Some(&none))));
        assert!(!seek_enabled(effective_duration(0.0, None)));

        let zero = record_with_runtime(Some(Runtime::Seconds(0.0)));
        assert!(!seek_enabled(effective_duration(0.0, Some(&zero))));

        assert!(seek_enabled(effective_duration(12.0, None)));
        let display = record_with_runtime(Some(Runtime::Display("1:30".into())));
        assert!(seek_enabled(effective_duration(0.0, Some(&display))));
    }

    #[test]
    fn runtime_labels() {
        let secs = record_with_runtime(Some(Runtime::Seconds(95.0)));
        assert_eq!(runtime_label(&secs).as_deref(), Some("1:35"));

        let disp = record_with_runtime(Some(Runtime::Display(" 1h 42m ".into())));
        assert_eq!(runtime_label(&disp).as_deref(), Some("1h 42m"));

        assert_eq!(runtime_label(&record_with_runtime(None)), None);
    }
}
