//! Biquad filter implementation.
//!
//! Coefficients follow Robert Bristow-Johnson's Audio EQ Cookbook. The
//! band-pass uses the constant 0 dB peak gain form, matching what browser
//! audio engines call "bandpass".

use crate::{AudioSignal, Signal};

/// The type of filter to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    /// High-pass filter - attenuates frequencies below the cutoff
    HighPass,
    /// Band-pass filter - passes frequencies near the center, attenuates others
    BandPass,
}

/// Normalized biquad coefficients (a0 divided out).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Coefficients {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Coefficients {
    /// Coefficients that pass the input through unchanged.
    const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    fn design(filter_type: FilterType, freq: f64, q: f64, sample_rate: f64) -> Self {
        use std::f64::consts::PI;

        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Self::IDENTITY;
        }

        let q = q.max(0.001); // Prevent division by zero
        let nyquist_cap = (sample_rate * 0.49).max(1.0);
        let freq = freq.clamp(1.0, nyquist_cap);

        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let (b0, b1, b2) = match filter_type {
            FilterType::HighPass => {
                let b0 = (1.0 + cos_omega) / 2.0;
                (b0, -(1.0 + cos_omega), b0)
            }
            FilterType::BandPass => (alpha, 0.0, -alpha),
        };
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

/// A second-order IIR filter that processes an input signal.
///
/// The cutoff and Q are fixed for the life of the filter: a click voice is
/// short enough that its filters never need to move, so coefficients are
/// designed once up front.
///
/// # Examples
///
/// ```
/// use strumbeat::{BiquadFilter, Signal, WhiteNoise};
///
/// let noise = WhiteNoise::new(44100.0);
/// let mut filter = BiquadFilter::highpass(noise, 300.0, 0.7);
/// let sample = filter.next_sample();
/// assert!(sample.is_finite());
/// ```
pub struct BiquadFilter<S: AudioSignal> {
    source: S,
    filter_type: FilterType,
    cutoff: f64,
    q: f64,
    coefficients: Coefficients,

    // Filter state (Direct Form I)
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl<S: AudioSignal> BiquadFilter<S> {
    /// Creates a filter of the given type.
    ///
    /// Frequencies are clamped to `[1 Hz, 0.49 * sample_rate]` and Q to at
    /// least 0.001. A source with a non-finite or non-positive sample rate
    /// gets a pass-through filter.
    pub fn new(source: S, cutoff: f64, q: f64, filter_type: FilterType) -> Self {
        let coefficients = Coefficients::design(filter_type, cutoff, q, source.sample_rate());
        Self {
            source,
            filter_type,
            cutoff,
            q,
            coefficients,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Creates a high-pass filter.
    ///
    /// # Arguments
    ///
    /// * `source` - Input signal
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor (resonance)
    pub fn highpass(source: S, cutoff: f64, q: f64) -> Self {
        Self::new(source, cutoff, q, FilterType::HighPass)
    }

    /// Creates a band-pass filter.
    ///
    /// # Arguments
    ///
    /// * `source` - Input signal
    /// * `center` - Center frequency in Hz
    /// * `q` - Q factor (bandwidth). Lower = wider band.
    pub fn bandpass(source: S, center: f64, q: f64) -> Self {
        Self::new(source, center, q, FilterType::BandPass)
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// The requested cutoff (or center) frequency in Hz, before clamping.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    /// Borrows the wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: AudioSignal> Signal for BiquadFilter<S> {
    fn next_sample(&mut self) -> f64 {
        let c = self.coefficients;
        let x0 = self.source.next_sample();

        // y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
        let y0 = c.b0 * x0 + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x0;
        self.y2 = self.y1;
        self.y1 = y0;

        y0
    }
}

impl<S: AudioSignal> AudioSignal for BiquadFilter<S> {
    fn sample_rate(&self) -> f64 {
        self.source.sample_rate()
    }
}
