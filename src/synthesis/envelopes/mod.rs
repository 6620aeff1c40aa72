//! Amplitude envelopes for one-shot percussive sounds.

mod click;

pub use click::{ClickEnvelope, DECAY_FLOOR, EnvelopeStage};
