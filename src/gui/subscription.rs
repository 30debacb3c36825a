//! gui/subscription.rs
//! While an engine exists, poll its report channel at the engine's own tick rate.

use std::time::Duration;

use iced::{Subscription, time};

use super::state::{Cinelink, Message};
use crate::core::playback::TICK_MS;

pub(crate) fn subscription(state: &Cinelink) -> Subscription<Message> {
    match state.playback_events {
        Some(_) => time::every(Duration::from_millis(TICK_MS)).map(|_| Message::TickPlayback),
        None => Subscription::none(),
    }
}
