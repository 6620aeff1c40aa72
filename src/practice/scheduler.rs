//! BeatScheduler - walks a pattern in time and triggers clicks.

use super::classify::{Classification, PlaybackOptions, classify};
use super::pattern::{Pattern, Strum};
use super::presets;
use super::timer::{DEFAULT_TEMPO, TickTimer, tick_period, validate_tempo};
use crate::engine::EngineHandle;
use crate::error::SchedulerError;
use crate::synthesis::SoundKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Most ticks fired by a single [`BeatScheduler::advance`] call.
///
/// If the host stalls for longer than this many periods, the extra ticks are
/// dropped instead of being played back in a burst.
pub const MAX_CATCH_UP_TICKS: u64 = 64;

/// Receiver of the clicks a scheduler decides to play.
///
/// Implemented for [`EngineHandle`] and for any `FnMut(SoundKind)` closure,
/// which is handy for recording triggers in tests.
pub trait TriggerSink {
    fn trigger(&mut self, kind: SoundKind);
}

impl TriggerSink for EngineHandle {
    fn trigger(&mut self, kind: SoundKind) {
        EngineHandle::trigger(self, kind);
    }
}

impl<F: FnMut(SoundKind)> TriggerSink for F {
    fn trigger(&mut self, kind: SoundKind) {
        self(kind);
    }
}

/// One fired step, as seen by subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    /// Index of the step in the pattern
    pub beat_index: usize,
    pub strum: Strum,
    pub classification: Classification,
}

/// Handle returned by [`BeatScheduler::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Read-only view of the transport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportSnapshot {
    pub tempo: f64,
    pub is_playing: bool,
    pub current_beat_index: usize,
    pub tick_period: Duration,
    /// Bumped every time the repeating timer is rebuilt
    pub timer_generation: u64,
}

type Listener = Box<dyn FnMut(&TickEvent)>;

/// The transport of a practice session.
///
/// The scheduler owns the loaded pattern, the tempo and the playback
/// options. While playing it advances through the pattern one step per tick
/// period, classifies each step and forwards every audible step to its
/// [`TriggerSink`].
///
/// Time is cooperative: the host calls [`advance`](Self::advance) with the
/// time that has passed, and every tick whose deadline was reached fires in
/// order. Tick zero fires immediately on [`play`](Self::play).
///
/// # Type Parameters
///
/// * `S` - Where triggers go
/// * `R` - Random source for random mute (seed it for reproducible runs)
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use strumbeat::{BeatScheduler, Pattern, PlaybackOptions, SoundKind, Subdivision};
///
/// let mut clicks = Vec::new();
/// let mut scheduler = BeatScheduler::new(|kind: SoundKind| clicks.push(kind));
///
/// let pattern = Pattern::parse("DUXU", Subdivision::Eighth).unwrap();
/// scheduler.start(pattern, 120.0, PlaybackOptions::default()).unwrap();
///
/// // 120 BPM eighths: one step every 250ms
/// scheduler.advance(Duration::from_millis(750));
/// assert_eq!(scheduler.current_beat_index(), 3);
///
/// drop(scheduler);
/// assert_eq!(
///     clicks,
///     [SoundKind::Accent, SoundKind::Normal, SoundKind::Muted, SoundKind::Normal]
/// );
/// ```
pub struct BeatScheduler<S: TriggerSink, R: Rng = StdRng> {
    sink: S,
    rng: R,
    pattern: Pattern,
    tempo: f64,
    options: PlaybackOptions,
    playing: bool,
    current_index: usize,
    timer: Option<TickTimer>,
    timer_generation: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: TriggerSink> BeatScheduler<S, StdRng> {
    /// Creates a stopped scheduler with the first library pattern at 120 BPM.
    pub fn new(sink: S) -> Self {
        Self::with_rng(sink, StdRng::from_entropy())
    }
}

impl<S: TriggerSink, R: Rng> BeatScheduler<S, R> {
    /// Creates a stopped scheduler that draws random mutes from `rng`.
    pub fn with_rng(sink: S, rng: R) -> Self {
        Self {
            sink,
            rng,
            pattern: presets::default_pattern(),
            tempo: DEFAULT_TEMPO,
            options: PlaybackOptions::default(),
            playing: false,
            current_index: 0,
            timer: None,
            timer_generation: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Loads a pattern, tempo and options, then starts playing.
    ///
    /// If already playing, nothing changes and the current snapshot is
    /// returned.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::InvalidTempo`] if `tempo` is not positive and finite.
    pub fn start(
        &mut self,
        pattern: Pattern,
        tempo: f64,
        options: PlaybackOptions,
    ) -> Result<TransportSnapshot, SchedulerError> {
        if self.playing {
            return Ok(self.snapshot());
        }
        self.tempo = validate_tempo(tempo)?;
        self.pattern = pattern;
        self.options = options;
        self.play()
    }

    /// Starts playing the loaded pattern from the current step.
    ///
    /// The current step sounds immediately; the next one follows a full
    /// tick period later. A no-op while already playing.
    pub fn play(&mut self) -> Result<TransportSnapshot, SchedulerError> {
        if self.playing {
            return Ok(self.snapshot());
        }
        let timer = self.build_timer()?;
        self.timer = Some(timer);
        self.playing = true;
        self.current_index %= self.pattern.len();

        info!(
            tempo = self.tempo,
            subdivision = %self.pattern.subdivision(),
            steps = self.pattern.len(),
            "transport started"
        );

        self.fire(self.current_index);
        Ok(self.snapshot())
    }

    /// Stops playing and rewinds to the first step.
    ///
    /// No tick fires after this returns, whatever time is still pending.
    pub fn stop(&mut self) {
        let was_playing = self.playing;
        self.playing = false;
        self.timer = None;
        self.current_index = 0;
        if was_playing {
            info!("transport stopped");
        }
    }

    /// Reports elapsed time and fires every tick that fell due.
    ///
    /// Returns the number of ticks fired. At most [`MAX_CATCH_UP_TICKS`] fire
    /// per call; any further backlog is dropped with a warning.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if !self.playing {
            return 0;
        }
        let due = match self.timer.as_mut() {
            Some(timer) => timer.advance(elapsed),
            None => return 0,
        };

        let fired = due.min(MAX_CATCH_UP_TICKS);
        if due > fired {
            warn!(
                due,
                dropped = due - fired,
                "scheduler fell behind, dropping ticks"
            );
        }

        for _ in 0..fired {
            self.current_index = (self.current_index + 1) % self.pattern.len();
            self.fire(self.current_index);
        }
        fired as usize
    }

    /// Changes the tempo. While playing, the tick timer restarts at the new
    /// period without firing.
    pub fn set_tempo(&mut self, tempo: f64) -> Result<(), SchedulerError> {
        let tempo = validate_tempo(tempo)?;
        self.tempo = tempo;
        debug!(tempo, "tempo changed");
        if self.playing {
            self.timer = Some(self.build_timer()?);
        }
        Ok(())
    }

    /// Loads a new pattern. Stops and rewinds first if playing.
    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.stop();
        debug!(
            name = pattern.name().unwrap_or("untitled"),
            steps = pattern.len(),
            subdivision = %pattern.subdivision(),
            "pattern loaded"
        );
        self.pattern = pattern;
    }

    /// Replaces the playback options. Applies from the next tick.
    pub fn set_options(&mut self, options: PlaybackOptions) {
        debug!(?options, "playback options changed");
        self.options = options;
    }

    /// Registers a listener called after every fired tick.
    pub fn subscribe(&mut self, listener: impl FnMut(&TickEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn snapshot(&self) -> TransportSnapshot {
        TransportSnapshot {
            tempo: self.tempo,
            is_playing: self.playing,
            current_beat_index: self.current_index,
            tick_period: self.tick_period(),
            timer_generation: self.timer_generation,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_beat_index(&self) -> usize {
        self.current_index
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    /// Time between steps at the current tempo and subdivision.
    pub fn tick_period(&self) -> Duration {
        // tempo is validated on every write
        tick_period(self.tempo, self.pattern.subdivision()).unwrap_or_default()
    }

    /// Time until the next tick fires, or `None` when stopped.
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        if !self.playing {
            return None;
        }
        self.timer.as_ref().map(TickTimer::time_until_next)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn build_timer(&mut self) -> Result<TickTimer, SchedulerError> {
        let period = tick_period(self.tempo, self.pattern.subdivision())?;
        self.timer_generation += 1;
        trace!(?period, generation = self.timer_generation, "tick timer rebuilt");
        Ok(TickTimer::new(period, self.timer_generation))
    }

    fn fire(&mut self, index: usize) {
        let strum = self.pattern.strum_at(index);
        let classification = classify(&self.pattern, index, &self.options, &mut self.rng);

        if let Classification::Sound(kind) = classification {
            self.sink.trigger(kind);
        }
        trace!(index, %strum, ?classification, "tick");

        let event = TickEvent {
            beat_index: index,
            strum,
            classification,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice::{RandomMute, Subdivision};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Recorded = Rc<RefCell<Vec<SoundKind>>>;

    fn scheduler() -> (BeatScheduler<impl TriggerSink, StdRng>, Recorded) {
        let recorded: Recorded = Rc::default();
        let sink = {
            let recorded = recorded.clone();
            move |kind: SoundKind| recorded.borrow_mut().push(kind)
        };
        (BeatScheduler::with_rng(sink, StdRng::seed_from_u64(7)), recorded)
    }

    fn eighths(notation: &str) -> Pattern {
        Pattern::parse(notation, Subdivision::Eighth).unwrap()
    }

    const STEP: Duration = Duration::from_millis(250);

    #[test]
    fn test_created_stopped() {
        let (scheduler, recorded) = scheduler();
        assert!(!scheduler.is_playing());
        assert_eq!(scheduler.current_beat_index(), 0);
        assert_eq!(scheduler.tempo(), 120.0);
        assert_eq!(scheduler.time_until_next_tick(), None);
        assert!(recorded.borrow().is_empty());
    }

    #[test]
    fn test_start_fires_immediately() {
        let (mut scheduler, recorded) = scheduler();
        let snapshot = scheduler
            .start(eighths("DUDU"), 120.0, PlaybackOptions::default())
            .unwrap();

        assert!(snapshot.is_playing);
        assert_eq!(snapshot.tick_period, STEP);
        assert_eq!(*recorded.borrow(), [SoundKind::Accent]);
        assert_eq!(scheduler.time_until_next_tick(), Some(STEP));
    }

    #[test]
    fn test_advance_fires_due_ticks() {
        let (mut scheduler, recorded) = scheduler();
        scheduler
            .start(eighths("DUDU"), 120.0, PlaybackOptions::default())
            .unwrap();

        assert_eq!(scheduler.advance(Duration::from_millis(249)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(scheduler.current_beat_index(), 1);
        assert_eq!(scheduler.advance(STEP * 3), 3);
        assert_eq!(scheduler.current_beat_index(), 0);
        assert_eq!(recorded.borrow().len(), 5);
    }

    #[test]
    fn test_start_while_playing_is_noop() {
        let (mut scheduler, recorded) = scheduler();
        scheduler
            .start(eighths("DUDU"), 120.0, PlaybackOptions::default())
            .unwrap();
        scheduler.advance(STEP);

        let snapshot = scheduler
            .start(eighths("XXXX"), 60.0, PlaybackOptions::default())
            .unwrap();
        assert_eq!(snapshot.tempo, 120.0);
        assert_eq!(snapshot.current_beat_index, 1);
        assert_eq!(recorded.borrow().len(), 2);
    }

    #[test]
    fn test_stop_rewinds_and_blocks_pending() {
        let (mut scheduler, recorded) = scheduler();
        scheduler
            .start(eighths("DUDU"), 120.0, PlaybackOptions::default())
            .unwrap();
        scheduler.advance(STEP * 2);
        scheduler.stop();

        assert!(!scheduler.is_playing());
        assert_eq!(scheduler.current_beat_index(), 0);
        assert_eq!(scheduler.advance(STEP * 10), 0);
        assert_eq!(recorded.borrow().len(), 3);

        // Restart plays step 0 again
        scheduler.play().unwrap();
        assert_eq!(recorded.borrow().last(), Some(&SoundKind::Accent));
    }

    #[test]
    fn test_restart_with_other_pattern_begins_at_first_step() {
        let (mut scheduler, recorded) = scheduler();
        scheduler
            .start(eighths("DUDU"), 120.0, PlaybackOptions::default())
            .unwrap();
        scheduler.advance(STEP * 2);
        scheduler.stop();

        let snapshot = scheduler
            .start(eighths("XUXU"), 120.0, PlaybackOptions::default())
            .unwrap();
        assert_eq!(snapshot.current_beat_index, 0);
        assert_eq!(recorded.borrow().last(), Some(&SoundKind::Muted));
    }

    #[test]
    fn test_catch_up_is_bounded() {
        let (mut scheduler, recorded) = scheduler();
        scheduler
            .start(eighths("DUDU"), 120.0, PlaybackOptions::default())
            .unwrap();

        let fired = scheduler.advance(STEP * 1000);
        assert_eq!(fired, MAX_CATCH_UP_TICKS as usize);
        assert_eq!(recorded.borrow().len(), 1 + MAX_CATCH_UP_TICKS as usize);
        assert_eq!(scheduler.current_beat_index(), 64 % 4);
    }

    #[test]
    fn test_set_tempo_rebuilds_timer() {
        let (mut scheduler, recorded) = scheduler();
        let first = scheduler
            .start(eighths("DUDU"), 120.0, PlaybackOptions::default())
            .unwrap();
        scheduler.advance(Duration::from_millis(200));

        scheduler.set_tempo(60.0).unwrap();
        let snapshot = scheduler.snapshot();
        assert_eq!(snapshot.tick_period, Duration::from_millis(500));
        assert!(snapshot.timer_generation > first.timer_generation);

        // No immediate tick, and the 200ms already accumulated is discarded
        assert_eq!(recorded.borrow().len(), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(300)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(200)), 1);
    }

    #[test]
    fn test_invalid_tempo_rejected() {
        let (mut scheduler, _recorded) = scheduler();
        assert_eq!(
            scheduler.set_tempo(0.0),
            Err(SchedulerError::InvalidTempo(0.0))
        );
        assert!(
            scheduler
                .start(eighths("D"), f64::NAN, PlaybackOptions::default())
                .is_err()
        );
        assert!(!scheduler.is_playing());
        assert_eq!(scheduler.tempo(), 120.0);
    }

    #[test]
    fn test_set_pattern_stops() {
        let (mut scheduler, _recorded) = scheduler();
        scheduler
            .start(eighths("DUDU"), 120.0, PlaybackOptions::default())
            .unwrap();
        scheduler.advance(STEP * 2);

        scheduler.set_pattern(eighths("XUXU"));
        assert!(!scheduler.is_playing());
        assert_eq!(scheduler.current_beat_index(), 0);
        assert_eq!(scheduler.pattern().strum_at(0), Strum::Muted);
    }

    #[test]
    fn test_subscribers() {
        let (mut scheduler, _recorded) = scheduler();
        let events: Rc<RefCell<Vec<TickEvent>>> = Rc::default();
        let id = {
            let events = events.clone();
            scheduler.subscribe(move |event| events.borrow_mut().push(*event))
        };

        scheduler
            .start(eighths("D-"), 120.0, PlaybackOptions::default().with_rest_sound(false))
            .unwrap();
        scheduler.advance(STEP);

        assert_eq!(
            *events.borrow(),
            [
                TickEvent {
                    beat_index: 0,
                    strum: Strum::Down,
                    classification: Classification::Sound(SoundKind::Accent),
                },
                TickEvent {
                    beat_index: 1,
                    strum: Strum::Rest,
                    classification: Classification::Suppressed,
                },
            ]
        );

        assert!(scheduler.unsubscribe(id));
        assert!(!scheduler.unsubscribe(id));
        scheduler.advance(STEP);
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_options_apply_next_tick() {
        let (mut scheduler, recorded) = scheduler();
        scheduler
            .start(eighths("DUDU"), 120.0, PlaybackOptions::default())
            .unwrap();
        scheduler.set_options(
            PlaybackOptions::default().with_random_mute(Some(RandomMute::new(100.0))),
        );
        scheduler.advance(STEP * 8);
        assert_eq!(recorded.borrow().len(), 1);
        assert!(scheduler.is_playing());
    }

    #[test]
    fn test_index_stays_in_range() {
        let (mut scheduler, _recorded) = scheduler();
        scheduler
            .start(eighths("DUX"), 120.0, PlaybackOptions::default())
            .unwrap();
        for _ in 0..50 {
            scheduler.advance(Duration::from_millis(97));
            assert!(scheduler.current_beat_index() < 3);
        }
    }
}
