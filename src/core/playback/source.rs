//! core/playback/source.rs
//! Fetch a media source into memory and probe it (Symphonia) before rodio decodes it.

use std::io::Cursor;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;

use crate::core::types::MediaSource;

/// Streaming manifests need a segment loader; the in-memory engine can't play them.
const UNSUPPORTED_MIMES: &[&str] = &["application/x-mpegURL", "application/dash+xml"];

/// Read the whole source: `file://` and bare paths from disk, everything else over HTTP.
pub fn fetch_bytes(source: &MediaSource) -> Result<Vec<u8>, String> {
    if UNSUPPORTED_MIMES.contains(&source.mime.as_str()) {
        return Err(format!("Unsupported stream type: {}", source.mime));
    }

    if let Some(path) = local_path(&source.url) {
        return std::fs::read(path).map_err(|e| format!("Open failed: {e}"));
    }

    let response = reqwest::blocking::get(&source.url)
        .map_err(|e| format!("Download failed: {e}"))?
        .error_for_status()
        .map_err(|e| format!("Source rejected: {e}"))?;

    response
        .bytes()
        .map(|b| b.to_vec())
        .map_err(|e| format!("Download interrupted: {e}"))
}

fn local_path(url: &str) -> Option<&str> {
    if let Some(rest) = url.strip_prefix("file://") {
        return Some(rest);
    }
    if url.contains("://") { None } else { Some(url) }
}

/// Probe container + default track, return the duration if the header knows it.
pub fn probe_duration_ms(bytes: &[u8], url: &str) -> Result<Option<u64>, String> {
    let mss = MediaSourceStream::new(
        Box::new(Cursor::new(bytes.to_vec())),
        MediaSourceStreamOptions::default(),
    );

    let mut hint = Hint::new();
    if let Some(ext) = extension(url) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| format!("Format probe failed: {e}"))?;

    let track = probed
        .format
        .default_track()
        .ok_or_else(|| "No supported audio track found.".to_string())?;

    Ok(duration_from_params(
        track.codec_params.time_base,
        track.codec_params.n_frames,
    ))
}

fn extension(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    let file = path.rsplit('/').next()?;
    file.rsplit_once('.').map(|(_, ext)| ext)
}

fn duration_from_params(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<u64> {
    let tb = time_base?;
    let frames = n_frames?;

    let t = tb.calc_time(frames);
    // Time is { seconds: u64, frac: f64 } in symphonia 0.5.x.
    let ms = (t.seconds as f64 * 1000.0) + (t.frac * 1000.0);
    Some(ms.round() as u64)
}
