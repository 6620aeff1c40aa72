//! Core signal processing traits.
//!
//! Everything that produces audio in this crate, from a noise source up to a
//! finished click voice, implements [`Signal`]. Sources that know their sample
//! rate also implement [`AudioSignal`], which unlocks the filter shortcuts in
//! [`AudioSignalExt`].

mod audio;
mod signal;

pub use audio::{AudioSignal, AudioSignalExt};
pub use signal::{Finite, Signal};
