//! Master gain shared between the control thread and the renderer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, warn};

/// Lock-free master volume.
///
/// The level is an `f32` stored as raw bits in an atomic, so the audio
/// callback can read it without locking. Writes are clamped to `[0, 1]`;
/// the last write wins.
///
/// # Examples
///
/// ```
/// use strumbeat::SharedGain;
///
/// let gain = SharedGain::new(0.5);
/// let reader = gain.clone();
///
/// gain.set(1.7);
/// assert_eq!(reader.get(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct SharedGain {
    bits: Arc<AtomicU32>,
}

impl SharedGain {
    /// Creates a gain stage at `level`, clamped to `[0, 1]` (NaN becomes 0).
    pub fn new(level: f32) -> Self {
        let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) };
        Self {
            bits: Arc::new(AtomicU32::new(level.to_bits())),
        }
    }

    /// Current level in `[0, 1]`.
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Stores a new level, clamped to `[0, 1]`.
    ///
    /// NaN is ignored and the previous level is kept. Returns the level that
    /// is in effect after the call.
    pub fn set(&self, level: f32) -> f32 {
        if level.is_nan() {
            warn!("ignoring NaN volume");
            return self.get();
        }
        let clamped = level.clamp(0.0, 1.0);
        self.bits.store(clamped.to_bits(), Ordering::Relaxed);
        debug!(volume = clamped, "master volume set");
        clamped
    }
}
