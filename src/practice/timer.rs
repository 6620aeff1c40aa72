//! Tick timing.
//!
//! Converts a tempo and a subdivision into the time between two pattern
//! steps, and keeps track of when the next step is due.

use super::pattern::Subdivision;
use crate::error::SchedulerError;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Tempo used when none has been chosen, in BPM.
pub const DEFAULT_TEMPO: f64 = 120.0;

/// Tempo range a practice UI typically offers. Not enforced: any positive,
/// finite tempo is accepted.
pub const SUGGESTED_TEMPO_RANGE: RangeInclusive<f64> = 60.0..=200.0;

/// Checks that `tempo` is a usable BPM value.
pub fn validate_tempo(tempo: f64) -> Result<f64, SchedulerError> {
    if tempo.is_finite() && tempo > 0.0 {
        Ok(tempo)
    } else {
        Err(SchedulerError::InvalidTempo(tempo))
    }
}

/// Milliseconds between two steps.
///
/// A quarter note lasts `60000 / tempo` ms; each subdivision splits it into
/// `steps_per_beat` steps. The tempo is not validated here.
///
/// # Examples
///
/// ```
/// use strumbeat::{Subdivision, tick_period_ms};
///
/// assert_eq!(tick_period_ms(120.0, Subdivision::Quarter), 500.0);
/// assert_eq!(tick_period_ms(120.0, Subdivision::Eighth), 250.0);
/// assert_eq!(tick_period_ms(120.0, Subdivision::Sixteenth), 125.0);
/// ```
pub fn tick_period_ms(tempo: f64, subdivision: Subdivision) -> f64 {
    let quarter_ms = 60_000.0 / tempo;
    quarter_ms / f64::from(subdivision.steps_per_beat())
}

/// Time between two steps as a [`Duration`].
///
/// # Errors
///
/// [`SchedulerError::InvalidTempo`] if `tempo` is not positive and finite.
pub fn tick_period(tempo: f64, subdivision: Subdivision) -> Result<Duration, SchedulerError> {
    let tempo = validate_tempo(tempo)?;
    let secs = tick_period_ms(tempo, subdivision) / 1000.0;
    Duration::try_from_secs_f64(secs).map_err(|_| SchedulerError::InvalidTempo(tempo))
}

/// A repeating timer driven by elapsed time.
///
/// The host reports how much time has passed with [`advance`](Self::advance),
/// which returns how many periods have completed. Leftover time carries over,
/// so irregular host updates never make the beat drift.
///
/// Each timer carries a generation number. The scheduler replaces its timer
/// (with the next generation) whenever the period changes, which discards
/// any time accumulated against the old period.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use strumbeat::TickTimer;
///
/// let mut timer = TickTimer::new(Duration::from_millis(250), 0);
///
/// assert_eq!(timer.advance(Duration::from_millis(100)), 0);
/// assert_eq!(timer.advance(Duration::from_millis(200)), 1);
/// assert_eq!(timer.time_until_next(), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone)]
pub struct TickTimer {
    period: Duration,
    accumulated: Duration,
    generation: u64,
}

impl TickTimer {
    /// Creates a timer whose first tick is one `period` away.
    ///
    /// A zero period is bumped to one nanosecond.
    pub fn new(period: Duration, generation: u64) -> Self {
        Self {
            period: period.max(Duration::from_nanos(1)),
            accumulated: Duration::ZERO,
            generation,
        }
    }

    /// Adds `elapsed` and returns the number of ticks that fell due.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated < self.period {
            return 0;
        }

        let period_ns = self.period.as_nanos();
        let accumulated_ns = self.accumulated.as_nanos();
        let ticks = accumulated_ns / period_ns;
        let remainder = accumulated_ns % period_ns;

        // remainder < period, which came from a Duration
        self.accumulated = Duration::from_nanos(remainder as u64);
        u64::try_from(ticks).unwrap_or(u64::MAX)
    }

    /// Time left until the next tick.
    pub fn time_until_next(&self) -> Duration {
        self.period.saturating_sub(self.accumulated)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
