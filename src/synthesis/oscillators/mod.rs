//! Tone generators.

mod sine;

pub use sine::SineOscillator;
