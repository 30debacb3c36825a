//! View constants (layout/sizing).

pub(crate) const CONTROL_BAR_H: f32 = 84.0;

pub(crate) const VOLUME_W: f32 = 140.0;

pub(crate) const RECENT_H: f32 = 320.0;

pub(crate) const ARTWORK: f32 = 240.0;
pub(crate) const DETAIL_TEXT_W: f32 = 520.0;
