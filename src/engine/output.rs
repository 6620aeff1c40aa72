//! Output backends - where rendered frames go.

use super::Mixer;
use crate::error::EngineError;
use std::sync::{Arc, Mutex, MutexGuard};

/// A destination for the mixer's output.
///
/// The engine hands its [`Mixer`] to the backend once, on activation. The
/// backend is then responsible for calling [`Mixer::render`] whenever it
/// needs more frames, until [`close`](Self::close) is called.
pub trait OutputBackend {
    /// Takes ownership of the mixer and starts pulling audio from it.
    fn open(&mut self, mixer: Mixer) -> Result<(), EngineError>;

    /// Stops pulling audio and releases the mixer.
    fn close(&mut self);
}

/// A backend driven by the caller instead of a sound card.
///
/// Cloning shares the same slot, so one clone can be passed to the engine
/// while another is kept to pull blocks with [`render`](Self::render). Used
/// for offline rendering and tests.
///
/// # Examples
///
/// ```
/// use strumbeat::{AudioEngine, EngineConfig, ManualOutput, SoundKind};
///
/// let output = ManualOutput::new();
/// let mut engine = AudioEngine::new(EngineConfig::default().with_channels(1));
/// engine.activate(output.clone()).unwrap();
///
/// engine.trigger(SoundKind::Accent);
///
/// let mut block = vec![0.0f32; 1024];
/// assert_eq!(output.render(&mut block), 1024);
/// assert!(block.iter().any(|s| *s != 0.0));
/// ```
#[derive(Clone, Default)]
pub struct ManualOutput {
    mixer: Arc<Mutex<Option<Mixer>>>,
}

impl ManualOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Mixer>> {
        self.mixer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns true while a mixer is attached.
    pub fn is_open(&self) -> bool {
        self.slot().is_some()
    }

    /// Renders one block of interleaved frames into `out`.
    ///
    /// Returns the number of frames written. When no mixer is attached the
    /// block is filled with silence and 0 is returned.
    pub fn render(&self, out: &mut [f32]) -> usize {
        match self.slot().as_mut() {
            Some(mixer) => {
                mixer.render(out);
                out.len() / mixer.channels()
            }
            None => {
                out.fill(0.0);
                0
            }
        }
    }

    /// Number of clicks currently sounding in the attached mixer.
    pub fn active_voices(&self) -> usize {
        self.slot().as_ref().map_or(0, Mixer::active_voices)
    }
}

impl OutputBackend for ManualOutput {
    fn open(&mut self, mixer: Mixer) -> Result<(), EngineError> {
        *self.slot() = Some(mixer);
        Ok(())
    }

    fn close(&mut self) {
        *self.slot() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineConfig, MixerCommand, SharedGain};
    use crate::synthesis::{ClickProfiles, SoundKind};

    #[test]
    fn test_silent_until_opened() {
        let output = ManualOutput::new();
        let mut block = vec![1.0f32; 64];
        assert_eq!(output.render(&mut block), 0);
        assert!(block.iter().all(|&s| s == 0.0));
        assert!(!output.is_open());
    }

    #[test]
    fn test_open_and_close() {
        let config = EngineConfig::default().with_seed(1);
        let (tx, rx) = crossbeam_channel::bounded(8);
        let mixer = Mixer::new(&config, ClickProfiles::default(), rx, SharedGain::new(1.0));

        let output = ManualOutput::new();
        let mut backend = output.clone();
        backend.open(mixer).unwrap();
        assert!(output.is_open());

        tx.send(MixerCommand::Trigger(SoundKind::Normal)).unwrap();
        let mut block = vec![0.0f32; 128];
        assert_eq!(output.render(&mut block), 64);
        assert_eq!(output.active_voices(), 1);

        backend.close();
        assert!(!output.is_open());
        assert_eq!(output.active_voices(), 0);
    }
}
