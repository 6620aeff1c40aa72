//! Renders each click kind offline and prints its level statistics.
//!
//! Run with: cargo run --example render_clicks

use anyhow::Result;
use strumbeat::{
    AudioEngine, ClickProfiles, ClickVoice, EngineConfig, Finite, ManualOutput, Signal, SoundKind,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const SAMPLE_RATE: f64 = 44100.0;

fn stats(samples: &[f64]) -> (f64, f64) {
    let peak = samples.iter().fold(0.0f64, |acc, s| acc.max(s.abs()));
    let rms = (samples.iter().map(|s| s * s).sum::<f64>() / samples.len().max(1) as f64).sqrt();
    (peak, rms)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("strumbeat=debug")))
        .init();

    let profiles = ClickProfiles::default();
    profiles.validate()?;

    println!("{:<8} {:>8} {:>10} {:>10}", "kind", "samples", "peak", "rms");
    for kind in SoundKind::ALL {
        let mut voice = ClickVoice::new(profiles.get(kind), SAMPLE_RATE);
        let mut samples = Vec::new();
        while !voice.is_finished() {
            samples.push(voice.next_sample());
        }
        let (peak, rms) = stats(&samples);
        println!("{:<8} {:>8} {:>10.4} {:>10.4}", kind, samples.len(), peak, rms);
    }

    // The same clicks through the engine: accent then normal, 250ms apart
    let output = ManualOutput::new();
    let config = EngineConfig::default()
        .with_sample_rate(SAMPLE_RATE)
        .with_channels(1)
        .with_seed(7);
    let mut engine = AudioEngine::new(config);
    engine.activate(output.clone())?;

    let step = (SAMPLE_RATE * 0.25) as usize;
    let mut block = vec![0.0f32; step];
    for kind in [SoundKind::Accent, SoundKind::Normal, SoundKind::Muted] {
        engine.trigger(kind);
        output.render(&mut block);
        let samples: Vec<f64> = block.iter().map(|s| f64::from(*s)).collect();
        let (peak, rms) = stats(&samples);
        println!("engine {:<8} peak {:.4} rms {:.4}", kind, peak, rms);
    }

    engine.close();
    Ok(())
}
