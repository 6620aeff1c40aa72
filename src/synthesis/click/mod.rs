//! Percussive click synthesis.
//!
//! A click is a short burst of white noise shaped by a high-pass filter, a
//! band-pass filter and an attack / exponential-decay envelope. Accented
//! clicks add a pitched sine layer on top. The parameters for each kind of
//! click live in a [`ClickProfiles`] table rather than in code.

mod profile;
mod voice;

pub use profile::{ClickProfile, ClickProfiles, FilterStage, SoundKind, ToneProfile};
pub use voice::ClickVoice;
