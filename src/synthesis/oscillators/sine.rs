//! Sine wave oscillator implementation.

use crate::{AudioSignal, Signal};
use std::f64::consts::PI;

/// A simple sine wave oscillator.
///
/// Used for the pitched layer of an accented click. Phase starts at zero, so
/// the first sample is silent and the tone fades in cleanly under its envelope.
pub struct SineOscillator {
    /// Current phase of the oscillator (0.0 to 1.0)
    phase: f64,
    /// Phase increment per sample (frequency / sample_rate)
    phase_increment: f64,
    sample_rate: f64,
}

impl SineOscillator {
    /// Creates a new sine oscillator.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Frequency of the sine wave in Hz
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Examples
    ///
    /// ```
    /// use strumbeat::{Signal, SineOscillator};
    ///
    /// let mut osc = SineOscillator::new(600.0, 44100.0);
    /// assert_eq!(osc.next_sample(), 0.0);
    /// ```
    pub fn new(frequency: f64, sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            phase_increment: frequency / sample_rate,
            sample_rate,
        }
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.phase_increment * self.sample_rate
    }

    /// Resets the phase to zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

impl Signal for SineOscillator {
    fn next_sample(&mut self) -> f64 {
        let sample = (self.phase * 2.0 * PI).sin();

        // Wrap to [0.0, 1.0)
        self.phase += self.phase_increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }
}

impl AudioSignal for SineOscillator {
    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency() {
        let osc = SineOscillator::new(600.0, 44100.0);
        assert!((osc.frequency() - 600.0).abs() < 1e-9);
        assert_eq!(osc.sample_rate(), 44100.0);
    }

    #[test]
    fn test_sample_range() {
        let mut osc = SineOscillator::new(600.0, 44100.0);
        for _ in 0..44100 {
            assert!((-1.0..=1.0).contains(&osc.next_sample()));
        }
    }

    #[test]
    fn test_phase_wrapping() {
        let mut osc = SineOscillator::new(1000.0, 44100.0);
        for _ in 0..100000 {
            osc.next_sample();
        }
        assert!(osc.phase >= 0.0 && osc.phase < 1.0);
    }

    #[test]
    fn test_reset() {
        let mut osc = SineOscillator::new(600.0, 44100.0);
        for _ in 0..100 {
            osc.next_sample();
        }
        osc.reset();
        assert_eq!(osc.phase, 0.0);
        assert_eq!(osc.next_sample(), 0.0);
    }

    #[test]
    fn test_quarter_period_peak() {
        // 1 Hz at 4 Hz sample rate: the second sample sits on the crest
        let mut osc = SineOscillator::new(1.0, 4.0);
        osc.next_sample();
        assert!((osc.next_sample() - 1.0).abs() < 1e-12);
    }
}
