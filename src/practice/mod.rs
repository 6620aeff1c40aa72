//! Strumming practice: patterns, timing and the beat scheduler.
//!
//! This module provides:
//! - [`Pattern`], [`Strum`] and [`Subdivision`] to describe what to play
//! - a built-in library in [`presets`]
//! - tick timing ([`tick_period_ms`], [`TickTimer`])
//! - per-step decisions ([`classify`], [`PlaybackOptions`])
//! - the [`BeatScheduler`] transport and the [`PracticeSession`] that pairs it
//!   with an audio engine

mod classify;
mod pattern;
pub mod presets;
mod scheduler;
mod session;
mod timer;

pub use classify::{
    Classification, PlaybackOptions, RandomMute, classify, is_accent_position,
};
pub use pattern::{Pattern, Strum, Subdivision};
pub use presets::Preset;
pub use scheduler::{
    BeatScheduler, MAX_CATCH_UP_TICKS, SubscriptionId, TickEvent, TransportSnapshot, TriggerSink,
};
pub use session::PracticeSession;
pub use timer::{
    DEFAULT_TEMPO, SUGGESTED_TEMPO_RANGE, TickTimer, tick_period, tick_period_ms, validate_tempo,
};
