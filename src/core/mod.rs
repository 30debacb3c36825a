//! core/mod.rs
//!
//! Everything that is not drawing:
//! - talk to the catalogue (api, error)
//! - the detail page state machine (detail)
//! - the playback session the control bar reads (session)
//! - the engine thread behind the player capability (playback)
//!
//! No Iced imports in here. The GUI turns `detail::Effect`s into tasks and
//! feeds results back.

pub mod api;
pub mod config;
pub mod detail;
pub mod error;
pub mod playback;
pub mod recent;
pub mod session;
pub mod types;
