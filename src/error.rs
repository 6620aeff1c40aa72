//! Error types for strumbeat

use crate::synthesis::SoundKind;
use thiserror::Error;

/// Problems building a [`Pattern`](crate::Pattern) or parsing its notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern has no strums")]
    Empty,
    #[error("beats per measure must be at least 1")]
    ZeroBeatsPerMeasure,
    #[error("unknown strum symbol '{symbol}' at position {position}")]
    UnknownSymbol { symbol: char, position: usize },
    #[error("unknown subdivision: {0}")]
    UnknownSubdivision(String),
}

/// Problems with transport input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    #[error("tempo must be a positive, finite BPM value (got {0})")]
    InvalidTempo(f64),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Click profile tables that would make the sounds indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("{0} profile has a negative or non-finite parameter")]
    InvalidValue(SoundKind),
    #[error("accent peak must be above normal peak")]
    AccentNotLouder,
    #[error("accent filters must sit at or above normal filters")]
    AccentNotBrighter,
    #[error("muted peak must be the highest of all profiles")]
    MutedNotLoudest,
    #[error("muted noise and decay must be the shortest of all profiles")]
    MutedNotShortest,
}

/// Audio engine failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("audio engine is closed")]
    Closed,
    #[error("no output device available")]
    NoOutputDevice,
    #[error("output device error: {0}")]
    Device(String),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, Error>;
