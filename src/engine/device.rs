//! Sound card output through cpal.

use super::{EngineConfig, Mixer, OutputBackend};
use crate::error::EngineError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info};

/// Plays the mixer through an output device.
///
/// The stream is built for the engine's sample rate and channel count, with
/// `f32` samples. Use [`preferred_config`](Self::preferred_config) to match
/// the engine to what the device runs at natively.
///
/// # Examples
///
/// ```no_run
/// use strumbeat::{AudioEngine, DeviceOutput};
///
/// let output = DeviceOutput::default_device()?;
/// let mut engine = AudioEngine::new(output.preferred_config()?);
/// engine.activate(output)?;
/// # Ok::<(), strumbeat::EngineError>(())
/// ```
pub struct DeviceOutput {
    device: cpal::Device,
    stream: Option<cpal::Stream>,
}

impl DeviceOutput {
    /// Uses the default output device of the default host.
    pub fn default_device() -> Result<Self, EngineError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(EngineError::NoOutputDevice)?;
        Ok(Self::new(device))
    }

    pub fn new(device: cpal::Device) -> Self {
        Self {
            device,
            stream: None,
        }
    }

    /// Engine settings matching the device's default sample rate and channels.
    pub fn preferred_config(&self) -> Result<EngineConfig, EngineError> {
        let supported = self
            .device
            .default_output_config()
            .map_err(|e| EngineError::Device(e.to_string()))?;

        Ok(EngineConfig::default()
            .with_sample_rate(f64::from(supported.sample_rate().0))
            .with_channels(supported.channels()))
    }
}

impl OutputBackend for DeviceOutput {
    fn open(&mut self, mut mixer: Mixer) -> Result<(), EngineError> {
        let config = cpal::StreamConfig {
            channels: mixer.channels() as u16,
            sample_rate: cpal::SampleRate(mixer.sample_rate().round() as u32),
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = self
            .device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| mixer.render(data),
                |err| error!(%err, "audio output stream error"),
                None,
            )
            .map_err(|e| EngineError::Device(e.to_string()))?;

        stream
            .play()
            .map_err(|e| EngineError::Device(e.to_string()))?;

        let name = self.device.name().unwrap_or_else(|_| "unknown".to_string());
        info!(
            device = %name,
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            "output stream started"
        );

        self.stream = Some(stream);
        Ok(())
    }

    fn close(&mut self) {
        if self.stream.take().is_some() {
            info!("output stream stopped");
        }
    }
}
