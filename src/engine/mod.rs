//! The audio engine: lifecycle, trigger queue and master volume.
//!
//! An [`AudioEngine`] starts dormant. Audio is only allowed to start after a
//! user gesture, so the first call to [`AudioEngine::activate`] opens the
//! output; until then (and after [`AudioEngine::close`]) triggers are dropped.
//!
//! Triggers travel to the renderer over a bounded channel and the master
//! volume is a [`SharedGain`], so the control side never blocks on the audio
//! callback.

mod config;
#[cfg(feature = "device")]
mod device;
mod gain;
mod mixer;
mod output;

pub use config::{DEFAULT_SAMPLE_RATE, EngineConfig, MIN_SAMPLE_RATE};
#[cfg(feature = "device")]
pub use device::DeviceOutput;
pub use gain::SharedGain;
pub use mixer::{Mixer, MixerCommand};
pub use output::{ManualOutput, OutputBackend};

use crate::error::EngineError;
use crate::synthesis::{ClickProfiles, SoundKind};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::{info, trace, warn};

/// Where an engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Created, output not opened yet
    Dormant,
    /// Output open; triggers are rendered
    Running,
    /// Output released; the engine cannot be reopened
    Closed,
}

impl EngineState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => EngineState::Dormant,
            1 => EngineState::Running,
            _ => EngineState::Closed,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            EngineState::Dormant => 0,
            EngineState::Running => 1,
            EngineState::Closed => 2,
        }
    }
}

#[derive(Debug, Clone)]
struct SharedState(Arc<AtomicU8>);

impl SharedState {
    fn get(&self) -> EngineState {
        EngineState::from_u8(self.0.load(Ordering::Acquire))
    }

    fn set(&self, state: EngineState) {
        self.0.store(state.as_u8(), Ordering::Release);
    }
}

/// Cheap, cloneable access to a running engine.
///
/// Handles are what the scheduler and UI code hold on to. They can trigger
/// clicks and change the volume, but only the owning [`AudioEngine`] can
/// activate or close the output.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: Sender<MixerCommand>,
    gain: SharedGain,
    state: SharedState,
}

impl EngineHandle {
    /// Queues a click.
    ///
    /// Silently dropped unless the engine is running. If the renderer has
    /// fallen so far behind that the queue is full, the click is dropped with
    /// a warning.
    pub fn trigger(&self, kind: SoundKind) {
        let state = self.state.get();
        if state != EngineState::Running {
            trace!(?kind, ?state, "engine not running, dropping trigger");
            return;
        }

        match self.commands.try_send(MixerCommand::Trigger(kind)) {
            Ok(()) => trace!(?kind, "trigger queued"),
            Err(TrySendError::Full(_)) => warn!(?kind, "trigger queue full, dropping click"),
            Err(TrySendError::Disconnected(_)) => trace!(?kind, "renderer gone, dropping trigger"),
        }
    }

    /// Cuts every sounding click.
    ///
    /// Returns false if the command was not queued: the engine is not
    /// running, or the queue is full (logged as a warning).
    pub fn silence(&self) -> bool {
        if self.state.get() != EngineState::Running {
            return false;
        }
        match self.commands.try_send(MixerCommand::Silence) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("trigger queue full, silence dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                trace!("renderer gone, dropping silence");
                false
            }
        }
    }

    /// Sets the master volume, clamped to `[0, 1]`. NaN is ignored.
    ///
    /// Takes effect from the next rendered block and is kept across
    /// activation.
    pub fn set_volume(&self, level: f32) -> f32 {
        self.gain.set(level)
    }

    pub fn volume(&self) -> f32 {
        self.gain.get()
    }

    pub fn state(&self) -> EngineState {
        self.state.get()
    }
}

/// Owner of the audio output for one practice session.
///
/// # Examples
///
/// ```
/// use strumbeat::{AudioEngine, EngineConfig, EngineState, ManualOutput, SoundKind};
///
/// let mut engine = AudioEngine::new(EngineConfig::default());
/// assert_eq!(engine.state(), EngineState::Dormant);
///
/// // Dropped: nothing has been activated yet
/// engine.trigger(SoundKind::Normal);
///
/// engine.activate(ManualOutput::new()).unwrap();
/// assert_eq!(engine.state(), EngineState::Running);
///
/// engine.close();
/// assert_eq!(engine.state(), EngineState::Closed);
/// ```
pub struct AudioEngine {
    config: EngineConfig,
    profiles: ClickProfiles,
    handle: EngineHandle,
    receiver: Receiver<MixerCommand>,
    backend: Option<Box<dyn OutputBackend>>,
}

impl AudioEngine {
    /// Creates a dormant engine with the stock click sounds.
    pub fn new(config: EngineConfig) -> Self {
        let (commands, receiver) = crossbeam_channel::bounded(config.command_capacity.max(1));
        let handle = EngineHandle {
            commands,
            gain: SharedGain::new(config.initial_volume),
            state: SharedState(Arc::new(AtomicU8::new(EngineState::Dormant.as_u8()))),
        };

        Self {
            config,
            profiles: ClickProfiles::default(),
            handle,
            receiver,
            backend: None,
        }
    }

    /// Creates a dormant engine with custom click sounds.
    ///
    /// The table is checked with [`ClickProfiles::validate`] first.
    pub fn with_profiles(config: EngineConfig, profiles: ClickProfiles) -> Result<Self, EngineError> {
        profiles.validate()?;
        let mut engine = Self::new(config);
        engine.profiles = profiles;
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn profiles(&self) -> &ClickProfiles {
        &self.profiles
    }

    /// Returns a handle for triggering clicks and changing the volume.
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> EngineState {
        self.handle.state()
    }

    /// Opens the output. Call this from the first user gesture.
    ///
    /// Only the first call does anything; once running, later calls return
    /// `Ok(())` and drop the backend they were given. Fails with
    /// [`EngineError::Closed`] after [`close`](Self::close).
    pub fn activate(&mut self, backend: impl OutputBackend + 'static) -> Result<(), EngineError> {
        match self.state() {
            EngineState::Running => return Ok(()),
            EngineState::Closed => return Err(EngineError::Closed),
            EngineState::Dormant => {}
        }

        let mut backend: Box<dyn OutputBackend> = Box::new(backend);
        let mixer = Mixer::new(
            &self.config,
            self.profiles.clone(),
            self.receiver.clone(),
            self.handle.gain.clone(),
        );
        backend.open(mixer)?;

        // Triggers sent while dormant were dropped, but clear anything stale
        while self.receiver.try_recv().is_ok() {}

        self.backend = Some(backend);
        self.handle.state.set(EngineState::Running);
        info!(
            sample_rate = self.config.sample_rate,
            channels = self.config.channels,
            volume = self.handle.volume(),
            "audio engine activated"
        );
        Ok(())
    }

    /// See [`EngineHandle::trigger`].
    pub fn trigger(&self, kind: SoundKind) {
        self.handle.trigger(kind);
    }

    /// See [`EngineHandle::set_volume`].
    pub fn set_volume(&self, level: f32) -> f32 {
        self.handle.set_volume(level)
    }

    pub fn volume(&self) -> f32 {
        self.handle.volume()
    }

    /// Releases the output. Final: the engine cannot be activated again.
    pub fn close(&mut self) {
        if self.state() == EngineState::Closed {
            return;
        }
        self.handle.state.set(EngineState::Closed);
        if let Some(mut backend) = self.backend.take() {
            backend.close();
        }
        info!("audio engine closed");
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.close();
    }
}
