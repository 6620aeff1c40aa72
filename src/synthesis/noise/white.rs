//! White noise generator implementation.

use crate::{AudioSignal, Signal};
use rand::Rng;
use rand::rngs::StdRng;

/// A white noise generator.
///
/// Each sample is a random value uniformly distributed between -1.0 and 1.0,
/// so power is spread evenly across the spectrum and the filters of a click
/// profile decide what is actually heard.
pub struct WhiteNoise<R: Rng = StdRng> {
    /// Sample rate in Hz
    sample_rate: f64,
    /// Random number generator
    rng: R,
}

impl WhiteNoise<StdRng> {
    /// Creates a new white noise generator seeded from the operating system.
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Sample rate in Hz (e.g., 44100.0 for CD quality)
    ///
    /// # Examples
    ///
    /// ```
    /// use strumbeat::{Signal, WhiteNoise};
    ///
    /// let mut noise = WhiteNoise::new(44100.0);
    /// let sample = noise.next_sample();
    /// assert!((-1.0..=1.0).contains(&sample));
    /// ```
    pub fn new(sample_rate: f64) -> Self {
        use rand::SeedableRng;

        Self {
            sample_rate,
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> WhiteNoise<R> {
    /// Creates a new white noise generator with a custom RNG.
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Sample rate in Hz
    /// * `rng` - Random number generator to use
    ///
    /// # Examples
    ///
    /// ```
    /// use strumbeat::{Signal, WhiteNoise};
    /// use rand::SeedableRng;
    ///
    /// let rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let mut noise = WhiteNoise::with_rng(44100.0, rng);
    /// let sample = noise.next_sample();
    /// ```
    pub fn with_rng(sample_rate: f64, rng: R) -> Self {
        Self { sample_rate, rng }
    }
}

impl<R: Rng> Signal for WhiteNoise<R> {
    fn next_sample(&mut self) -> f64 {
        self.rng.gen_range(-1.0..=1.0)
    }
}

impl<R: Rng> AudioSignal for WhiteNoise<R> {
    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}
