//! Cinelink GUI
//!
//! # What this program is
//! A small desktop client (built with the `iced` GUI library) for a remote movie
//! catalogue: open a title by id, read its metadata, pick a stream quality and play it.
//!
//! # How Iced works (super simple mental model)
//! - `Cinelink` = the *entire memory* of the app (all the state)
//! - `Message` = “something happened” (button clicked, fetch finished, engine tick)
//! - `update(state, message)` = handles that thing and updates state
//! - `view(state)` = draws UI based on the current state
//!
//! **Message happens -> update changes state -> view redraws**
//!
//! # Screens
//! - Home: type an id, or reopen something from the recent list.
//! - Detail: metadata + artwork, quality menu, player panel.
//!   When the player reports a failure, a "Refresh link" button asks the server
//!   for a freshly signed URL for the selected quality and retries.
//! - The control bar on top is a pure view over the playback session.
//!
//! # Architecture constraints (on purpose)
//! - `core::detail` owns the page state machine and never touches Iced.
//! - `core::playback` owns the engine thread; the GUI only sends commands.
//! - HTTP runs as Iced tasks; every response carries a token so late ones are ignored.
//!
//! # Configuration
//! - `--api-base` / `CINELINK_API_BASE`: catalogue host (default `http://127.0.0.1:8000`)
//! - `--skip-seconds` / `CINELINK_SKIP_SECONDS`: skip step (default 10)
//! - `RUST_LOG`: log filter (default `cinelink=info`)
//! - positional `ID`: title id to open on launch (`cinelink --help` for the rest)

mod core;
mod gui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::gui::Cinelink;

fn main() -> iced::Result {
    init_tracing();

    let config = Config::parse();
    tracing::info!(api_base = %config.api_base, "starting cinelink");

    iced::application(
        move || Cinelink::boot(config.clone()),
        gui::update,
        gui::view,
    )
    .title("Cinelink")
    .subscription(gui::subscription)
    .run()
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cinelink=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
