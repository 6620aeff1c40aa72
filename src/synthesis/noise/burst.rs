//! Fixed-length noise burst.

use super::WhiteNoise;
use crate::{AudioSignal, Finite, Signal};
use rand::Rng;
use rand::rngs::StdRng;

/// White noise that stops after a fixed number of samples.
///
/// This plays the role of a short noise buffer that is started once and
/// stopped at its end: while running it yields fresh random samples, after
/// that it yields silence. Samples are drawn as they are pulled, so no buffer
/// is allocated on the audio thread.
///
/// # Examples
///
/// ```
/// use strumbeat::{Finite, NoiseBurst, Signal};
///
/// // 50ms of noise at 44.1kHz
/// let mut burst = NoiseBurst::new(50.0, 44100.0);
/// assert_eq!(burst.len(), 2205);
///
/// for _ in 0..burst.len() {
///     burst.next_sample();
/// }
/// assert!(burst.is_finished());
/// assert_eq!(burst.next_sample(), 0.0);
/// ```
pub struct NoiseBurst<R: Rng = StdRng> {
    noise: WhiteNoise<R>,
    length: usize,
    position: usize,
}

impl NoiseBurst<StdRng> {
    /// Creates a burst of `duration_ms` milliseconds with OS-seeded noise.
    pub fn new(duration_ms: f64, sample_rate: f64) -> Self {
        Self::with_noise(WhiteNoise::new(sample_rate), duration_ms)
    }
}

impl<R: Rng> NoiseBurst<R> {
    /// Creates a burst of `duration_ms` milliseconds from an existing noise source.
    ///
    /// Negative or non-finite durations produce an empty burst.
    pub fn with_noise(noise: WhiteNoise<R>, duration_ms: f64) -> Self {
        let length = ms_to_samples(duration_ms, noise.sample_rate());
        Self {
            noise,
            length,
            position: 0,
        }
    }

    /// Total length of the burst in samples.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the burst has zero length.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Samples left before the burst stops.
    pub fn remaining(&self) -> usize {
        self.length - self.position
    }
}

impl<R: Rng> Signal for NoiseBurst<R> {
    fn next_sample(&mut self) -> f64 {
        if self.position >= self.length {
            return 0.0;
        }
        self.position += 1;
        self.noise.next_sample()
    }
}

impl<R: Rng> AudioSignal for NoiseBurst<R> {
    fn sample_rate(&self) -> f64 {
        self.noise.sample_rate()
    }
}

impl<R: Rng> Finite for NoiseBurst<R> {
    fn is_finished(&self) -> bool {
        self.position >= self.length
    }
}

/// Converts a duration in milliseconds to a whole number of samples.
pub(crate) fn ms_to_samples(duration_ms: f64, sample_rate: f64) -> usize {
    let samples = duration_ms / 1000.0 * sample_rate;
    if samples.is_finite() && samples > 0.0 {
        samples.round() as usize
    } else {
        0
    }
}
