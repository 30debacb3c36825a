//! Runtime configuration (command line, with env fallbacks).
//!
//! Everything has a default so the app starts with no setup:
//! - `--api-base` / `CINELINK_API_BASE`: catalogue host
//! - `--skip-seconds` / `CINELINK_SKIP_SECONDS`: skip button step
//! - positional `ID`: title to open on launch

use clap::Parser;

/// Catalogue host used when nothing else is given.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Seconds moved by the skip buttons.
pub const DEFAULT_SKIP_SECONDS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "cinelink")]
#[command(version)]
#[command(about = "Browse a movie catalogue and play its streams", long_about = None)]
pub struct Config {
    /// Catalogue base URL
    #[arg(
        long,
        env = "CINELINK_API_BASE",
        default_value = DEFAULT_API_BASE,
        value_parser = parse_api_base
    )]
    pub api_base: String,

    /// Seconds moved by the skip forward/back buttons
    #[arg(
        long,
        env = "CINELINK_SKIP_SECONDS",
        default_value_t = DEFAULT_SKIP_SECONDS,
        value_parser = parse_skip_seconds
    )]
    pub skip_seconds: f64,

    /// Title id to open on launch
    #[arg(value_name = "ID", value_parser = parse_content_id)]
    pub initial_content: Option<String>,
}

fn parse_api_base(s: &str) -> Result<String, String> {
    let base = s.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err("API base must not be empty".to_string());
    }
    Ok(base.to_string())
}

fn parse_skip_seconds(s: &str) -> Result<f64, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("not a number: {e}"))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err("skip step must be a positive number of seconds".to_string());
    }
    Ok(secs)
}

fn parse_content_id(s: &str) -> Result<String, String> {
    let id = s.trim();
    if id.is_empty() {
        return Err("title id must not be blank".to_string());
    }
    Ok(id.to_string())
}
