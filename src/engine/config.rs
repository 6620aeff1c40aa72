//! Audio engine configuration.

/// Sample rate used when none (or an unusable one) is given.
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Lowest sample rate the engine runs at.
pub const MIN_SAMPLE_RATE: f64 = 8000.0;

/// Maps any requested rate onto one the synthesis chain can run at.
pub(crate) fn sanitize_sample_rate(sample_rate: f64) -> f64 {
    if sample_rate.is_finite() {
        sample_rate.max(MIN_SAMPLE_RATE)
    } else {
        DEFAULT_SAMPLE_RATE
    }
}

/// Settings fixed for the lifetime of an [`AudioEngine`](super::AudioEngine).
///
/// Built in the usual `with_*` style:
///
/// ```
/// use strumbeat::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_sample_rate(48000.0)
///     .with_channels(1)
///     .with_initial_volume(0.8);
///
/// assert_eq!(config.sample_rate, 48000.0);
/// assert_eq!(config.max_voices, 16);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Output sample rate in Hz
    pub sample_rate: f64,
    /// Interleaved output channels; every channel carries the same signal
    pub channels: u16,
    /// Master gain applied before the first `set_volume`
    pub initial_volume: f32,
    /// Clicks allowed to sound at once; the oldest is cut when exceeded
    pub max_voices: usize,
    /// Pending triggers the control thread can queue ahead of the renderer
    pub command_capacity: usize,
    /// Seed for click noise; `None` seeds from the operating system
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: 2,
            initial_volume: 0.5,
            max_voices: 16,
            command_capacity: 256,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Sets the output sample rate.
    ///
    /// Rates below [`MIN_SAMPLE_RATE`] are raised to it; NaN and infinite
    /// rates fall back to [`DEFAULT_SAMPLE_RATE`].
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sanitize_sample_rate(sample_rate);
        self
    }

    /// Sets the channel count (at least 1).
    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels.max(1);
        self
    }

    pub fn with_initial_volume(mut self, volume: f32) -> Self {
        self.initial_volume = volume;
        self
    }

    /// Sets the polyphony limit (at least 1).
    pub fn with_max_voices(mut self, max_voices: usize) -> Self {
        self.max_voices = max_voices.max(1);
        self
    }

    /// Sets the trigger queue size (at least 1).
    pub fn with_command_capacity(mut self, capacity: usize) -> Self {
        self.command_capacity = capacity.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(config.channels, 2);
        assert_eq!(config.initial_volume, 0.5);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_sample_rate_sanitized() {
        assert_eq!(EngineConfig::default().with_sample_rate(48000.0).sample_rate, 48000.0);
        assert_eq!(EngineConfig::default().with_sample_rate(1.0).sample_rate, MIN_SAMPLE_RATE);
        assert_eq!(EngineConfig::default().with_sample_rate(-5.0).sample_rate, MIN_SAMPLE_RATE);
        assert_eq!(
            EngineConfig::default().with_sample_rate(f64::NAN).sample_rate,
            DEFAULT_SAMPLE_RATE
        );
        assert_eq!(
            EngineConfig::default().with_sample_rate(f64::INFINITY).sample_rate,
            DEFAULT_SAMPLE_RATE
        );
    }

    #[test]
    fn test_counts_at_least_one() {
        let config = EngineConfig::default()
            .with_channels(0)
            .with_max_voices(0)
            .with_command_capacity(0);
        assert_eq!(config.channels, 1);
        assert_eq!(config.max_voices, 1);
        assert_eq!(config.command_capacity, 1);
    }
}
