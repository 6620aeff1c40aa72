//! Noise sources for percussive synthesis.
//!
//! [`WhiteNoise`] is an endless uniform noise generator; [`NoiseBurst`] cuts it
//! down to a fixed length, which is what a click is built from.

mod burst;
mod white;

pub use burst::NoiseBurst;
pub(crate) use burst::ms_to_samples;
pub use white::WhiteNoise;
