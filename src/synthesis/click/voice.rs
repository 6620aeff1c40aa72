//! ClickVoice - one sounding click.

use super::profile::{ClickProfile, ToneProfile};
use crate::synthesis::noise::ms_to_samples;
use crate::synthesis::{BiquadFilter, ClickEnvelope, NoiseBurst, SineOscillator, WhiteNoise};
use crate::{AudioSignal, AudioSignalExt, Finite, Signal};
use rand::Rng;
use rand::rngs::StdRng;

type NoiseBody<R> = BiquadFilter<BiquadFilter<NoiseBurst<R>>>;

/// Sine layer with its own envelope and a fixed lifetime.
struct ToneLayer {
    oscillator: SineOscillator,
    envelope: ClickEnvelope,
    remaining: usize,
}

impl ToneLayer {
    fn new(tone: &ToneProfile, sample_rate: f64) -> Self {
        let mut envelope = ClickEnvelope::new(tone.peak, tone.attack_ms, tone.decay_ms, sample_rate);
        envelope.trigger();
        Self {
            oscillator: SineOscillator::new(tone.freq, sample_rate),
            remaining: envelope.duration_samples(),
            envelope,
        }
    }

    fn next_sample(&mut self) -> f64 {
        if self.remaining == 0 {
            return 0.0;
        }
        self.remaining -= 1;
        self.oscillator.next_sample() * self.envelope.next_sample()
    }
}

/// A single triggered click.
///
/// The signal chain is `noise burst -> high-pass -> band-pass -> envelope`,
/// summed with an optional enveloped sine tone. The voice is started the
/// moment it is created and finishes once the burst and the tone have both
/// run out; after that it only produces silence.
///
/// Every voice draws fresh noise, so no two clicks are sample-identical
/// unless they are given identically seeded generators.
///
/// # Examples
///
/// ```
/// use strumbeat::{ClickProfiles, ClickVoice, Finite, Signal, SoundKind};
///
/// let profiles = ClickProfiles::default();
/// let mut voice = ClickVoice::new(profiles.get(SoundKind::Muted), 44100.0);
///
/// // Envelopes start from silence
/// assert_eq!(voice.next_sample(), 0.0);
///
/// while !voice.is_finished() {
///     voice.next_sample();
/// }
/// ```
pub struct ClickVoice<R: Rng = StdRng> {
    body: NoiseBody<R>,
    envelope: ClickEnvelope,
    tone: Option<ToneLayer>,
}

impl ClickVoice<StdRng> {
    /// Creates a voice with OS-seeded noise.
    pub fn new(profile: &ClickProfile, sample_rate: f64) -> Self {
        Self::with_noise(profile, WhiteNoise::new(sample_rate))
    }
}

impl<R: Rng> ClickVoice<R> {
    /// Creates a voice that draws its noise from `rng`.
    ///
    /// # Arguments
    ///
    /// * `profile` - Parameters of the click
    /// * `sample_rate` - Sample rate in Hz
    /// * `rng` - Source of the noise burst
    pub fn with_rng(profile: &ClickProfile, sample_rate: f64, rng: R) -> Self {
        Self::with_noise(profile, WhiteNoise::with_rng(sample_rate, rng))
    }

    fn with_noise(profile: &ClickProfile, noise: WhiteNoise<R>) -> Self {
        let sample_rate = noise.sample_rate();
        let body = NoiseBurst::with_noise(noise, profile.noise_ms)
            .highpass_filter(profile.highpass.freq, profile.highpass.q)
            .bandpass_filter(profile.bandpass.freq, profile.bandpass.q);

        let mut envelope =
            ClickEnvelope::new(profile.peak, profile.attack_ms, profile.decay_ms, sample_rate);
        envelope.trigger();

        Self {
            body,
            envelope,
            tone: profile.tone.as_ref().map(|t| ToneLayer::new(t, sample_rate)),
        }
    }

    /// Samples left until the voice finishes.
    pub fn remaining(&self) -> usize {
        let burst = self.body.source().source().remaining();
        let tone = self.tone.as_ref().map_or(0, |t| t.remaining);
        burst.max(tone)
    }

    /// Length of a voice built from `profile`, in samples.
    pub fn length_for(profile: &ClickProfile, sample_rate: f64) -> usize {
        let burst = ms_to_samples(profile.noise_ms, sample_rate);
        let tone = profile.tone.map_or(0, |t| {
            ms_to_samples(t.attack_ms, sample_rate) + ms_to_samples(t.decay_ms, sample_rate)
        });
        burst.max(tone)
    }
}

impl<R: Rng> Signal for ClickVoice<R> {
    fn next_sample(&mut self) -> f64 {
        if self.is_finished() {
            return 0.0;
        }
        let body = self.body.next_sample() * self.envelope.next_sample();
        let tone = self.tone.as_mut().map_or(0.0, ToneLayer::next_sample);
        body + tone
    }
}

impl<R: Rng> Finite for ClickVoice<R> {
    fn is_finished(&self) -> bool {
        let burst_done = self.body.source().source().is_finished();
        let tone_done = self.tone.as_ref().is_none_or(|t| t.remaining == 0);
        burst_done && tone_done
    }
}
