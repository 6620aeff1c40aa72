//! Strumbeat - a strumming-pattern metronome for Rust
//!
//! This library walks guitar strumming patterns in time and plays percussive
//! metronome clicks synthesized from filtered noise.
//!
//! - [`practice`]: patterns, presets, tick timing and the [`BeatScheduler`]
//! - [`engine`]: the [`AudioEngine`] lifecycle, mixer and output backends
//! - [`synthesis`]: noise, filters, envelopes and the click voices
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use strumbeat::{ManualOutput, PlaybackOptions, PracticeSession, presets};
//!
//! let mut session = PracticeSession::new(Default::default());
//! let output = ManualOutput::new();
//! session.gesture(output.clone()).unwrap();
//!
//! let pattern = presets::by_id("rock-rhythm").unwrap().pattern();
//! session.start(pattern, 96.0, PlaybackOptions::default()).unwrap();
//!
//! // Host loop: advance time, let the output pull audio
//! for _ in 0..10 {
//!     session.advance(Duration::from_millis(50));
//!     let mut block = [0.0f32; 512];
//!     output.render(&mut block);
//! }
//! ```

// Lets the `strums!` macro expansion name `::strumbeat` from inside this crate
extern crate self as strumbeat;

mod core;
pub mod engine;
pub mod error;
pub mod practice;
pub mod synthesis;

// Re-export commonly used types at the crate root
pub use self::core::{AudioSignal, AudioSignalExt, Finite, Signal};
#[cfg(feature = "device")]
pub use engine::DeviceOutput;
pub use engine::{
    AudioEngine, EngineConfig, EngineHandle, EngineState, ManualOutput, Mixer, MixerCommand,
    OutputBackend, SharedGain,
};
pub use error::{EngineError, Error, PatternError, ProfileError, Result, SchedulerError};
pub use practice::{
    BeatScheduler, Classification, DEFAULT_TEMPO, MAX_CATCH_UP_TICKS, Pattern, PlaybackOptions,
    PracticeSession, Preset, RandomMute, SUGGESTED_TEMPO_RANGE, Strum, Subdivision,
    SubscriptionId, TickEvent, TickTimer, TransportSnapshot, TriggerSink, classify,
    is_accent_position, presets, tick_period, tick_period_ms, validate_tempo,
};
pub use synthesis::{
    BiquadFilter, ClickEnvelope, ClickProfile, ClickProfiles, ClickVoice, DECAY_FLOOR,
    EnvelopeStage, FilterStage, FilterType, NoiseBurst, SineOscillator, SoundKind, ToneProfile,
    WhiteNoise,
};

#[cfg(feature = "macros")]
pub use strumbeat_macros::strums;
