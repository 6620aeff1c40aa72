//! PracticeSession - an engine and a scheduler wired together.

use super::classify::PlaybackOptions;
use super::pattern::Pattern;
use super::scheduler::{BeatScheduler, TransportSnapshot};
use crate::engine::{AudioEngine, EngineConfig, EngineHandle, EngineState, OutputBackend};
use crate::error::{EngineError, SchedulerError};
use rand::Rng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

/// One practice session: the audio engine plus the transport driving it.
///
/// The session owns the engine for its whole lifetime and closes it when
/// dropped. The host loop calls [`pump`](Self::pump) regularly (a UI frame
/// or a short sleep is plenty); [`time_until_next_tick`](Self::time_until_next_tick)
/// tells it how long it may sleep.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use strumbeat::{ManualOutput, PlaybackOptions, PracticeSession, presets};
///
/// let mut session = PracticeSession::new(Default::default());
/// let output = ManualOutput::new();
///
/// // Audio is allowed once the user has interacted
/// session.gesture(output.clone()).unwrap();
///
/// let pattern = presets::by_id("folk-strum").unwrap().pattern();
/// session.start(pattern, 100.0, PlaybackOptions::default()).unwrap();
/// session.advance(Duration::from_millis(300));
///
/// let mut block = vec![0.0f32; 2048];
/// output.render(&mut block);
/// assert!(block.iter().any(|s| *s != 0.0));
/// ```
pub struct PracticeSession<R: Rng = StdRng> {
    scheduler: BeatScheduler<EngineHandle, R>,
    engine: AudioEngine,
    last_pump: Option<Instant>,
}

impl PracticeSession<StdRng> {
    pub fn new(config: EngineConfig) -> Self {
        let engine = AudioEngine::new(config);
        let scheduler = BeatScheduler::new(engine.handle());
        Self::from_parts(engine, scheduler)
    }
}

impl<R: Rng> PracticeSession<R> {
    /// Builds a session with a seeded random-mute source.
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        let engine = AudioEngine::new(config);
        let scheduler = BeatScheduler::with_rng(engine.handle(), rng);
        Self::from_parts(engine, scheduler)
    }

    fn from_parts(engine: AudioEngine, scheduler: BeatScheduler<EngineHandle, R>) -> Self {
        Self {
            scheduler,
            engine,
            last_pump: None,
        }
    }

    /// Opens audio output on the first user gesture. Later calls do nothing.
    pub fn gesture(&mut self, backend: impl OutputBackend + 'static) -> Result<(), EngineError> {
        self.engine.activate(backend)
    }

    /// Loads `pattern` and starts playing.
    pub fn start(
        &mut self,
        pattern: Pattern,
        tempo: f64,
        options: PlaybackOptions,
    ) -> Result<TransportSnapshot, SchedulerError> {
        let was_playing = self.scheduler.is_playing();
        let snapshot = self.scheduler.start(pattern, tempo, options)?;
        if !was_playing {
            self.last_pump = Some(Instant::now());
        }
        Ok(snapshot)
    }

    /// Stops playing, rewinds and cuts any click still ringing.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        self.engine.handle().silence();
        self.last_pump = None;
    }

    /// Fires every tick that fell due since the last pump.
    pub fn pump(&mut self) -> usize {
        self.pump_at(Instant::now())
    }

    /// Like [`pump`](Self::pump) with an explicit clock reading.
    pub fn pump_at(&mut self, now: Instant) -> usize {
        if !self.scheduler.is_playing() {
            self.last_pump = None;
            return 0;
        }
        let elapsed = match self.last_pump {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last_pump = Some(now);
        self.scheduler.advance(elapsed)
    }

    /// Advances the transport by a fixed amount, ignoring the wall clock.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.scheduler.advance(elapsed)
    }

    /// How long the host may wait before the next pump, or `None` when stopped.
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.scheduler.time_until_next_tick()
    }

    /// Sets the master volume; see [`EngineHandle::set_volume`].
    pub fn set_volume(&self, level: f32) -> f32 {
        self.engine.set_volume(level)
    }

    pub fn volume(&self) -> f32 {
        self.engine.volume()
    }

    pub fn engine_state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn scheduler(&self) -> &BeatScheduler<EngineHandle, R> {
        &self.scheduler
    }

    /// Mutable access for tempo, pattern, option changes and subscriptions.
    pub fn scheduler_mut(&mut self) -> &mut BeatScheduler<EngineHandle, R> {
        &mut self.scheduler
    }

    pub fn engine(&self) -> &AudioEngine {
        &self.engine
    }

    /// Stops the transport and releases the audio output.
    pub fn close(&mut self) {
        self.scheduler.stop();
        self.engine.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ManualOutput;
    use crate::practice::Subdivision;
    use rand::SeedableRng;

    fn session() -> (PracticeSession, ManualOutput) {
        let config = EngineConfig::default().with_seed(1).with_channels(1);
        let session = PracticeSession::with_rng(config, StdRng::seed_from_u64(1));
        (session, ManualOutput::new())
    }

    fn rendered_peak(output: &ManualOutput) -> f32 {
        let mut block = vec![0.0f32; 2048];
        output.render(&mut block);
        block.iter().fold(0.0, |acc, s| acc.max(s.abs()))
    }

    #[test]
    fn test_no_audio_before_gesture() {
        let (mut session, output) = session();
        let pattern = Pattern::parse("DUDU", Subdivision::Eighth).unwrap();
        session.start(pattern, 120.0, PlaybackOptions::default()).unwrap();
        assert_eq!(session.engine_state(), EngineState::Dormant);

        session.gesture(output.clone()).unwrap();
        assert_eq!(rendered_peak(&output), 0.0);

        session.advance(Duration::from_millis(250));
        assert!(rendered_peak(&output) > 0.0);
    }

    #[test]
    fn test_pump_uses_clock() {
        let (mut session, output) = session();
        session.gesture(output).unwrap();
        let pattern = Pattern::parse("DUDU", Subdivision::Eighth).unwrap();
        session.start(pattern, 120.0, PlaybackOptions::default()).unwrap();

        let later = Instant::now() + Duration::from_millis(260);
        assert_eq!(session.pump_at(later), 1);
        assert_eq!(session.scheduler().current_beat_index(), 1);
        assert!(session.time_until_next_tick().is_some());
    }

    #[test]
    fn test_stop_silences() {
        let (mut session, output) = session();
        session.gesture(output.clone()).unwrap();
        let pattern = Pattern::parse("DUDU", Subdivision::Eighth).unwrap();
        session.start(pattern, 120.0, PlaybackOptions::default()).unwrap();

        session.stop();
        assert_eq!(rendered_peak(&output), 0.0);
        assert_eq!(session.pump(), 0);
        assert_eq!(session.time_until_next_tick(), None);
    }

    #[test]
    fn test_close_releases_output() {
        let (mut session, output) = session();
        session.gesture(output.clone()).unwrap();
        session.close();
        assert!(!output.is_open());
        assert_eq!(session.engine_state(), EngineState::Closed);
    }
}
