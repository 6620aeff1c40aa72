//! Per-step trigger decisions.

use super::pattern::{Pattern, Strum, Subdivision};
use crate::synthesis::SoundKind;
use rand::Rng;

/// Randomly silences strums so the player has to keep time alone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomMute {
    /// Chance, in percent, that a step is silenced.
    ///
    /// Callers keep this within [`MIN_PERCENTAGE`](Self::MIN_PERCENTAGE) and
    /// [`MAX_PERCENTAGE`](Self::MAX_PERCENTAGE). Values of 100 or more
    /// silence everything; 0 or less silence nothing.
    pub percentage: f64,
}

impl RandomMute {
    pub const MIN_PERCENTAGE: f64 = 5.0;
    pub const MAX_PERCENTAGE: f64 = 80.0;

    pub fn new(percentage: f64) -> Self {
        Self { percentage }
    }

    /// Creates a random mute with `percentage` pulled into the usual range.
    pub fn clamped(percentage: f64) -> Self {
        let percentage = if percentage.is_nan() {
            Self::MIN_PERCENTAGE
        } else {
            percentage.clamp(Self::MIN_PERCENTAGE, Self::MAX_PERCENTAGE)
        };
        Self { percentage }
    }

    fn silences<R: Rng>(&self, rng: &mut R) -> bool {
        rng.gen_range(0.0..100.0) < self.percentage
    }
}

/// Toggles that shape what the scheduler plays.
///
/// # Examples
///
/// ```
/// use strumbeat::{PlaybackOptions, RandomMute};
///
/// let options = PlaybackOptions::default()
///     .with_rest_sound(false)
///     .with_random_mute(Some(RandomMute::new(25.0)));
///
/// assert!(options.accent_enabled);
/// assert!(options.sound_enabled);
/// assert!(!options.rest_sound_enabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PlaybackOptions {
    /// Master click switch; when off every step is silent
    pub sound_enabled: bool,
    /// Accent the first strum of each measure
    pub accent_enabled: bool,
    /// Play a normal click on rests (on by default, so the pulse never drops out)
    pub rest_sound_enabled: bool,
    pub random_mute: Option<RandomMute>,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            accent_enabled: true,
            rest_sound_enabled: true,
            random_mute: None,
        }
    }
}

impl PlaybackOptions {
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    pub fn with_accent(mut self, enabled: bool) -> Self {
        self.accent_enabled = enabled;
        self
    }

    pub fn with_rest_sound(mut self, enabled: bool) -> Self {
        self.rest_sound_enabled = enabled;
        self
    }

    pub fn with_random_mute(mut self, random_mute: Option<RandomMute>) -> Self {
        self.random_mute = random_mute;
        self
    }
}

/// What a step should sound like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Nothing is played
    Suppressed,
    Sound(SoundKind),
}

impl Classification {
    pub fn sound_kind(self) -> Option<SoundKind> {
        match self {
            Classification::Sound(kind) => Some(kind),
            Classification::Suppressed => None,
        }
    }

    pub fn is_suppressed(self) -> bool {
        self == Classification::Suppressed
    }
}

/// Returns true if step `index` falls on the first beat of a measure.
///
/// Always false when accenting is disabled.
///
/// # Examples
///
/// ```
/// use strumbeat::{Subdivision, is_accent_position};
///
/// // Eighth notes in 4/4: steps 0, 8, 16, ...
/// assert!(is_accent_position(8, Subdivision::Eighth, 4, true));
/// assert!(!is_accent_position(4, Subdivision::Eighth, 4, true));
/// assert!(!is_accent_position(0, Subdivision::Eighth, 4, false));
/// ```
pub fn is_accent_position(
    index: usize,
    subdivision: Subdivision,
    beats_per_measure: u32,
    accent_enabled: bool,
) -> bool {
    if !accent_enabled {
        return false;
    }
    let bpm = beats_per_measure.max(1) as usize;
    match subdivision {
        Subdivision::Quarter => index % bpm == 0,
        Subdivision::Eighth => index % 2 == 0 && index % bpm.saturating_mul(2) == 0,
        Subdivision::Sixteenth => index % 4 == 0 && index % bpm.saturating_mul(4) == 0,
    }
}

/// Decides what step `index` of `pattern` plays.
///
/// Rules, first match wins:
/// 1. sound switched off: suppressed
/// 2. random mute hits: suppressed
/// 3. rest: normal click if rest sound is on, otherwise suppressed
/// 4. muted strum: muted click
/// 5. down or up: accent on the first beat of a measure, otherwise normal
///
/// The random mute draws from `rng` once per call while it is enabled and
/// sound is on.
pub fn classify<R: Rng>(
    pattern: &Pattern,
    index: usize,
    options: &PlaybackOptions,
    rng: &mut R,
) -> Classification {
    if !options.sound_enabled {
        return Classification::Suppressed;
    }

    if let Some(mute) = &options.random_mute
        && mute.silences(rng)
    {
        return Classification::Suppressed;
    }

    match pattern.strum_at(index) {
        Strum::Rest if options.rest_sound_enabled => Classification::Sound(SoundKind::Normal),
        Strum::Rest => Classification::Suppressed,
        Strum::Muted => Classification::Sound(SoundKind::Muted),
        Strum::Down | Strum::Up => {
            let accent = is_accent_position(
                index,
                pattern.subdivision(),
                pattern.beats_per_measure(),
                options.accent_enabled,
            );
            if accent {
                Classification::Sound(SoundKind::Accent)
            } else {
                Classification::Sound(SoundKind::Normal)
            }
        }
    }
}
