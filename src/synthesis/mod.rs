//! Audio synthesis components.
//!
//! This module provides the building blocks the click sounds are made of:
//! - Noise generators (white noise, fixed-length bursts)
//! - Filters (biquad high-pass and band-pass)
//! - Oscillators (sine)
//! - Envelopes (attack / exponential decay)
//! - Click profiles and the voice that renders them

pub mod click;
pub mod envelopes;
pub mod filters;
pub mod noise;
pub mod oscillators;

pub use click::{ClickProfile, ClickProfiles, ClickVoice, FilterStage, SoundKind, ToneProfile};
pub use envelopes::{ClickEnvelope, DECAY_FLOOR, EnvelopeStage};
pub use filters::{BiquadFilter, FilterType};
pub use noise::{NoiseBurst, WhiteNoise};
pub use oscillators::SineOscillator;
