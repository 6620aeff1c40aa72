//! Sample-rate-aware signals and their filter shortcuts.

use crate::Signal;
use crate::synthesis::BiquadFilter;

/// A signal that knows the sample rate it is generated at.
///
/// Unlike a bare [`Signal`], an audio signal can be filtered: the filter reads
/// the rate from its source instead of having it passed in again.
///
/// # Examples
///
/// ```
/// use strumbeat::{AudioSignal, SineOscillator};
///
/// let osc = SineOscillator::new(600.0, 48000.0);
/// assert_eq!(osc.sample_rate(), 48000.0);
/// ```
pub trait AudioSignal: Signal {
    /// Gets the sample rate at which this audio is being generated, in Hz.
    fn sample_rate(&self) -> f64;
}

/// Extension trait providing filter chaining for audio signals.
///
/// Automatically implemented for every [`AudioSignal`].
///
/// # Examples
///
/// ```
/// use strumbeat::{AudioSignalExt, WhiteNoise};
///
/// // The normal click body: noise through a high-pass then a wide band-pass
/// let body = WhiteNoise::new(44100.0)
///     .highpass_filter(200.0, 0.7)
///     .bandpass_filter(2000.0, 0.6);
/// ```
pub trait AudioSignalExt: AudioSignal + Sized {
    /// Applies a high-pass filter to this audio signal.
    ///
    /// # Arguments
    ///
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor/resonance, typically 0.5-10.0
    fn highpass_filter(self, cutoff: f64, q: f64) -> BiquadFilter<Self> {
        BiquadFilter::highpass(self, cutoff, q)
    }

    /// Applies a band-pass filter to this audio signal.
    ///
    /// # Arguments
    ///
    /// * `center` - Center frequency in Hz
    /// * `q` - Q factor/bandwidth. Lower = wider band.
    fn bandpass_filter(self, center: f64, q: f64) -> BiquadFilter<Self> {
        BiquadFilter::bandpass(self, center, q)
    }
}

impl<T: AudioSignal> AudioSignalExt for T {}
