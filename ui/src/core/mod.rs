//! Platform-agnostic building blocks: payload model, formatting, HTML fragments,
//! chart presets and the view state the dashboard renders from.

pub mod animation;
pub mod chart_presets;
pub mod config;
pub mod format;
pub mod fragments;
pub mod lookup;
pub mod payload;
pub mod record;
pub mod source;
pub mod state;
pub mod timing;
