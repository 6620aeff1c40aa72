//! Attack / exponential-decay envelope for clicks.

use crate::Signal;
use crate::synthesis::noise::ms_to_samples;

/// Level the exponential decay ramps towards.
///
/// An exponential curve can never reach zero, so it aims for a level that is
/// inaudible (-60 dB) and then holds there until the sound source stops.
pub const DECAY_FLOOR: f64 = 0.001;

/// Stage the envelope is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    /// Not triggered yet; outputs silence
    Idle,
    /// Linear ramp from silence to the peak
    Attack,
    /// Exponential ramp from the peak towards `DECAY_FLOOR`
    Decay,
    /// Holding at the floor until the owning voice stops
    Floor,
}

/// A one-shot attack / exponential-decay envelope.
///
/// The shape follows the classic scheduled-ramp recipe for percussive clicks:
/// - set the level to 0 at the trigger instant,
/// - ramp linearly up to `peak` over `attack_ms`,
/// - ramp exponentially down to [`DECAY_FLOOR`] over `decay_ms`,
/// - stay at the floor afterwards.
///
/// Starting from silence and ending near silence keeps the click free of
/// pops at its boundaries.
///
/// # Examples
///
/// ```
/// use strumbeat::{ClickEnvelope, EnvelopeStage, Signal};
///
/// // 13ms attack to 0.45, then 135ms decay
/// let mut env = ClickEnvelope::new(0.45, 13.0, 135.0, 44100.0);
/// env.trigger();
///
/// assert_eq!(env.next_sample(), 0.0);
/// assert_eq!(env.stage(), EnvelopeStage::Attack);
/// ```
#[derive(Debug, Clone)]
pub struct ClickEnvelope {
    stage: EnvelopeStage,
    position: usize, // samples elapsed in current stage
    level: f64,

    peak: f64,
    floor: f64,
    attack_samples: usize,
    decay_samples: usize,
    decay_ratio: f64, // per-sample multiplier during decay
}

impl ClickEnvelope {
    /// Creates an idle envelope.
    ///
    /// # Arguments
    ///
    /// * `peak` - Level reached at the end of the attack (negative values are treated as 0)
    /// * `attack_ms` - Linear attack time in milliseconds
    /// * `decay_ms` - Exponential decay time in milliseconds
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(peak: f64, attack_ms: f64, decay_ms: f64, sample_rate: f64) -> Self {
        let peak = if peak.is_finite() { peak.max(0.0) } else { 0.0 };
        let floor = DECAY_FLOOR.min(peak);
        let attack_samples = ms_to_samples(attack_ms, sample_rate);
        let decay_samples = ms_to_samples(decay_ms, sample_rate);

        let decay_ratio = if peak > 0.0 && decay_samples > 0 {
            (floor / peak).powf(1.0 / decay_samples as f64)
        } else {
            1.0
        };

        Self {
            stage: EnvelopeStage::Idle,
            position: 0,
            level: 0.0,
            peak,
            floor,
            attack_samples,
            decay_samples,
            decay_ratio,
        }
    }

    /// Starts the envelope from silence.
    pub fn trigger(&mut self) {
        self.stage = EnvelopeStage::Attack;
        self.position = 0;
        self.level = 0.0;
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Level produced by the most recent sample.
    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Samples from trigger until the decay reaches the floor.
    pub fn duration_samples(&self) -> usize {
        self.attack_samples + self.decay_samples
    }

    fn enter_decay(&mut self) -> f64 {
        self.position = 0;
        if self.decay_samples == 0 {
            self.stage = EnvelopeStage::Floor;
            self.level = self.floor;
        } else {
            self.stage = EnvelopeStage::Decay;
            self.level = self.peak;
        }
        self.level
    }
}

impl Signal for ClickEnvelope {
    fn next_sample(&mut self) -> f64 {
        match self.stage {
            EnvelopeStage::Idle => 0.0,

            EnvelopeStage::Attack => {
                if self.position >= self.attack_samples {
                    return self.enter_decay();
                }
                let progress = self.position as f64 / self.attack_samples as f64;
                self.position += 1;
                self.level = self.peak * progress;
                self.level
            }

            EnvelopeStage::Decay => {
                if self.position >= self.decay_samples {
                    self.stage = EnvelopeStage::Floor;
                    self.level = self.floor;
                    return self.level;
                }
                self.position += 1;
                self.level *= self.decay_ratio;
                self.level
            }

            EnvelopeStage::Floor => self.floor,
        }
    }
}
