//! The sample-pulling `Signal` trait.

/// Common interface for all signal sources and processors.
///
/// A signal is pulled one sample at a time. Filters wrap another signal and
/// pull from it, so a whole processing chain is driven from its last stage.
pub trait Signal {
    /// Generates the next sample from the signal.
    ///
    /// # Returns
    ///
    /// A sample value, typically between -1.0 and 1.0 for audio signals
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// A signal with a definite end.
///
/// Percussive sources (a noise burst, a click voice) stop producing sound after
/// a fixed number of samples. Once `is_finished()` returns true the signal
/// only yields silence and can be dropped by whoever is mixing it.
pub trait Finite: Signal {
    /// Returns true once the signal has nothing left to play.
    fn is_finished(&self) -> bool;
}

/// Implementation of `Signal` for `f64` representing a constant signal value.
///
/// Handy for DC inputs in filter tests.
///
/// # Examples
///
/// ```
/// use strumbeat::Signal;
///
/// let mut constant = 0.5_f64;
/// assert_eq!(constant.next_sample(), 0.5);
///
/// let mut buffer = vec![0.0; 4];
/// constant.process(&mut buffer);
/// assert_eq!(buffer, vec![0.5, 0.5, 0.5, 0.5]);
/// ```
impl Signal for f64 {
    fn next_sample(&mut self) -> f64 {
        *self
    }

    fn process(&mut self, buffer: &mut [f64]) {
        buffer.fill(*self);
    }
}
