//! Mixer - turns trigger commands into interleaved output frames.

use super::config::sanitize_sample_rate;
use super::{EngineConfig, SharedGain};
use crate::synthesis::{ClickProfiles, ClickVoice, SoundKind};
use crate::{Finite, Signal};
use crossbeam_channel::Receiver;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Message from the control thread to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixerCommand {
    /// Start a new click of the given kind
    Trigger(SoundKind),
    /// Cut every sounding click
    Silence,
}

/// The render side of the engine.
///
/// A mixer lives inside the output callback. Each call to
/// [`render`](Self::render) first drains the pending commands, then sums all
/// sounding clicks, scales them by the master gain and writes the result to
/// every channel of each frame.
///
/// Voices are kept in trigger order. When a new click would exceed
/// `max_voices`, the oldest one is cut to make room.
pub struct Mixer {
    sample_rate: f64,
    channels: usize,
    max_voices: usize,
    profiles: ClickProfiles,
    commands: Receiver<MixerCommand>,
    gain: SharedGain,
    voices: Vec<ClickVoice>,
    rng: StdRng,
}

impl Mixer {
    pub fn new(
        config: &EngineConfig,
        profiles: ClickProfiles,
        commands: Receiver<MixerCommand>,
        gain: SharedGain,
    ) -> Self {
        let max_voices = config.max_voices.max(1);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            sample_rate: sanitize_sample_rate(config.sample_rate),
            channels: usize::from(config.channels.max(1)),
            max_voices,
            profiles,
            commands,
            gain,
            voices: Vec::with_capacity(max_voices),
            rng,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of clicks currently sounding.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    fn handle_command(&mut self, command: MixerCommand) {
        match command {
            MixerCommand::Trigger(kind) => {
                if self.voices.len() >= self.max_voices {
                    self.voices.remove(0);
                }
                let rng = StdRng::seed_from_u64(self.rng.r#gen());
                let voice = ClickVoice::with_rng(self.profiles.get(kind), self.sample_rate, rng);
                self.voices.push(voice);
            }
            MixerCommand::Silence => self.voices.clear(),
        }
    }

    /// Fills `out` with interleaved frames.
    ///
    /// A trailing partial frame (fewer samples than channels) is zeroed.
    pub fn render(&mut self, out: &mut [f32]) {
        while let Ok(command) = self.commands.try_recv() {
            self.handle_command(command);
        }

        let gain = f64::from(self.gain.get());
        let channels = self.channels;

        let mut frames = out.chunks_exact_mut(channels);
        for frame in &mut frames {
            let mut sum = 0.0;
            for voice in self.voices.iter_mut() {
                sum += voice.next_sample();
            }
            let value = (sum * gain).clamp(-1.0, 1.0) as f32;
            frame.fill(value);
        }
        frames.into_remainder().fill(0.0);

        self.voices.retain(|voice| !voice.is_finished());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{Sender, bounded};

    fn mixer(config: EngineConfig) -> (Mixer, Sender<MixerCommand>, SharedGain) {
        let (tx, rx) = bounded(64);
        let gain = SharedGain::new(config.initial_volume);
        let mixer = Mixer::new(&config, ClickProfiles::default(), rx, gain.clone());
        (mixer, tx, gain)
    }

    fn peak(buffer: &[f32]) -> f32 {
        buffer.iter().fold(0.0, |acc, s| acc.max(s.abs()))
    }

    #[test]
    fn test_silence_without_triggers() {
        let (mut mixer, _tx, _gain) = mixer(EngineConfig::default().with_seed(1));
        let mut buffer = vec![1.0; 512];
        mixer.render(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_trigger_sounds_on_every_channel() {
        let (mut mixer, tx, _gain) = mixer(EngineConfig::default().with_seed(2));
        tx.send(MixerCommand::Trigger(SoundKind::Normal)).unwrap();

        let mut buffer = vec![0.0; 2048];
        mixer.render(&mut buffer);

        assert_eq!(mixer.active_voices(), 1);
        assert!(peak(&buffer) > 0.0);
        for frame in buffer.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn test_voices_end() {
        let (mut mixer, tx, _gain) = mixer(EngineConfig::default().with_seed(3));
        tx.send(MixerCommand::Trigger(SoundKind::Muted)).unwrap();

        // 50ms at 44.1kHz is 2205 frames
        let mut buffer = vec![0.0; 2 * 2205];
        mixer.render(&mut buffer);
        assert_eq!(mixer.active_voices(), 0);

        mixer.render(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_oldest_voice_stolen() {
        let config = EngineConfig::default().with_seed(4).with_max_voices(3);
        let (mut mixer, tx, _gain) = mixer(config);
        for _ in 0..5 {
            tx.send(MixerCommand::Trigger(SoundKind::Normal)).unwrap();
        }
        let mut buffer = vec![0.0; 64];
        mixer.render(&mut buffer);
        assert_eq!(mixer.active_voices(), 3);
    }

    #[test]
    fn test_silence_command() {
        let (mut mixer, tx, _gain) = mixer(EngineConfig::default().with_seed(5));
        tx.send(MixerCommand::Trigger(SoundKind::Accent)).unwrap();
        let mut buffer = vec![0.0; 256];
        mixer.render(&mut buffer);
        assert_eq!(mixer.active_voices(), 1);

        tx.send(MixerCommand::Silence).unwrap();
        mixer.render(&mut buffer);
        assert_eq!(mixer.active_voices(), 0);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_gain_scales_output() {
        let render_at = |volume: f32| {
            let config = EngineConfig::default().with_seed(6).with_initial_volume(volume);
            let (mut mixer, tx, _gain) = mixer(config);
            tx.send(MixerCommand::Trigger(SoundKind::Normal)).unwrap();
            let mut buffer = vec![0.0; 4096];
            mixer.render(&mut buffer);
            peak(&buffer)
        };

        let full = render_at(1.0);
        let half = render_at(0.5);
        assert!(full > 0.0);
        assert!((half - full * 0.5).abs() < 1e-4);
        assert_eq!(render_at(0.0), 0.0);
    }

    #[test]
    fn test_gain_change_applies_to_next_block() {
        let (mut mixer, tx, gain) = mixer(EngineConfig::default().with_seed(7));
        tx.send(MixerCommand::Trigger(SoundKind::Normal)).unwrap();
        let mut buffer = vec![0.0; 1024];
        mixer.render(&mut buffer);
        assert!(peak(&buffer) > 0.0);

        gain.set(0.0);
        mixer.render(&mut buffer);
        assert_eq!(peak(&buffer), 0.0);
    }

    #[test]
    fn test_partial_frame_zeroed() {
        let (mut mixer, tx, _gain) = mixer(EngineConfig::default().with_seed(8));
        tx.send(MixerCommand::Trigger(SoundKind::Normal)).unwrap();
        let mut buffer = vec![1.0; 1001];
        mixer.render(&mut buffer);
        assert_eq!(buffer[1000], 0.0);
    }
}
