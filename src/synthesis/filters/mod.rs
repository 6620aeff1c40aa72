//! Filters used to shape click timbres.
//!
//! The click body is white noise sent through a high-pass stage (removes
//! rumble) and a band-pass stage (sets the brightness). Both are served by
//! [`BiquadFilter`].

mod biquad;

pub use self::biquad::{BiquadFilter, FilterType};
