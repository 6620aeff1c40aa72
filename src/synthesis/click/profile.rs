//! Declarative parameter table for click sounds.

use crate::error::ProfileError;
use std::fmt;

/// The kind of click a trigger asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SoundKind {
    /// Regular strum
    Normal,
    /// Strum on a downbeat; louder and brighter
    Accent,
    /// Palm-muted strum; fuller and shorter
    Muted,
}

impl SoundKind {
    /// All kinds, in table order.
    pub const ALL: [SoundKind; 3] = [SoundKind::Normal, SoundKind::Accent, SoundKind::Muted];
}

impl fmt::Display for SoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SoundKind::Normal => "normal",
            SoundKind::Accent => "accent",
            SoundKind::Muted => "muted",
        };
        f.pad(name)
    }
}

/// Frequency and Q of one filter in the chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterStage {
    /// Cutoff (high-pass) or center (band-pass) in Hz
    pub freq: f64,
    pub q: f64,
}

impl FilterStage {
    pub const fn new(freq: f64, q: f64) -> Self {
        Self { freq, q }
    }
}

/// Pitched layer added on top of the noise body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneProfile {
    /// Sine frequency in Hz
    pub freq: f64,
    pub peak: f64,
    pub attack_ms: f64,
    pub decay_ms: f64,
}

/// Everything needed to synthesize one kind of click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickProfile {
    /// Length of the noise burst in milliseconds
    pub noise_ms: f64,
    pub highpass: FilterStage,
    pub bandpass: FilterStage,
    /// Envelope peak level
    pub peak: f64,
    pub attack_ms: f64,
    pub decay_ms: f64,
    pub tone: Option<ToneProfile>,
}

impl ClickProfile {
    /// The regular click: a soft, warm tick.
    pub const NORMAL: ClickProfile = ClickProfile {
        noise_ms: 100.0,
        highpass: FilterStage::new(200.0, 0.7),
        bandpass: FilterStage::new(2000.0, 0.6),
        peak: 0.45,
        attack_ms: 13.0,
        decay_ms: 135.0,
        tone: None,
    };

    /// The downbeat click: brighter filters, a higher peak and a 600 Hz ping.
    pub const ACCENT: ClickProfile = ClickProfile {
        noise_ms: 100.0,
        highpass: FilterStage::new(300.0, 0.7),
        bandpass: FilterStage::new(2500.0, 0.6),
        peak: 0.65,
        attack_ms: 13.0,
        decay_ms: 135.0,
        tone: Some(ToneProfile {
            freq: 600.0,
            peak: 0.3,
            attack_ms: 2.0,
            decay_ms: 60.0,
        }),
    };

    /// The muted click: a short, loud, wide-band thump.
    pub const MUTED: ClickProfile = ClickProfile {
        noise_ms: 50.0,
        highpass: FilterStage::new(400.0, 0.5),
        bandpass: FilterStage::new(3500.0, 0.3),
        peak: 0.85,
        attack_ms: 2.0,
        decay_ms: 25.0,
        tone: None,
    };
}

/// Lookup table from [`SoundKind`] to [`ClickProfile`].
///
/// The defaults reproduce the stock practice-metronome sound. A custom table
/// can be built with [`with_profile`](Self::with_profile) and checked with
/// [`validate`](Self::validate) before handing it to an engine.
///
/// # Examples
///
/// ```
/// use strumbeat::{ClickProfiles, SoundKind};
///
/// let profiles = ClickProfiles::default();
/// assert!(profiles.get(SoundKind::Accent).tone.is_some());
/// assert!(profiles.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClickProfiles {
    normal: ClickProfile,
    accent: ClickProfile,
    muted: ClickProfile,
}

impl Default for ClickProfiles {
    fn default() -> Self {
        Self {
            normal: ClickProfile::NORMAL,
            accent: ClickProfile::ACCENT,
            muted: ClickProfile::MUTED,
        }
    }
}

impl ClickProfiles {
    pub fn get(&self, kind: SoundKind) -> &ClickProfile {
        match kind {
            SoundKind::Normal => &self.normal,
            SoundKind::Accent => &self.accent,
            SoundKind::Muted => &self.muted,
        }
    }

    /// Replaces the profile for one kind.
    pub fn with_profile(mut self, kind: SoundKind, profile: ClickProfile) -> Self {
        match kind {
            SoundKind::Normal => self.normal = profile,
            SoundKind::Accent => self.accent = profile,
            SoundKind::Muted => self.muted = profile,
        }
        self
    }

    /// Checks the relationships that keep the three sounds distinguishable.
    ///
    /// - accent peaks above normal,
    /// - accent filters sit at or above normal filters,
    /// - muted has the highest peak,
    /// - muted has the shortest noise burst and decay.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let (normal, accent, muted) = (&self.normal, &self.accent, &self.muted);

        for kind in SoundKind::ALL {
            let p = self.get(kind);
            let values = [
                p.noise_ms,
                p.peak,
                p.attack_ms,
                p.decay_ms,
                p.highpass.freq,
                p.bandpass.freq,
            ];
            if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(ProfileError::InvalidValue(kind));
            }
        }

        if accent.peak <= normal.peak {
            return Err(ProfileError::AccentNotLouder);
        }
        if accent.highpass.freq < normal.highpass.freq
            || accent.bandpass.freq < normal.bandpass.freq
        {
            return Err(ProfileError::AccentNotBrighter);
        }
        if muted.peak <= normal.peak || muted.peak <= accent.peak {
            return Err(ProfileError::MutedNotLoudest);
        }
        let shortest_noise = normal.noise_ms.min(accent.noise_ms);
        let shortest_decay = normal.decay_ms.min(accent.decay_ms);
        if muted.noise_ms > shortest_noise || muted.decay_ms > shortest_decay {
            return Err(ProfileError::MutedNotShortest);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let profiles = ClickProfiles::default();

        let normal = profiles.get(SoundKind::Normal);
        assert_eq!(normal.noise_ms, 100.0);
        assert_eq!(normal.highpass, FilterStage::new(200.0, 0.7));
        assert_eq!(normal.bandpass, FilterStage::new(2000.0, 0.6));
        assert!(normal.tone.is_none());

        let accent = profiles.get(SoundKind::Accent);
        let tone = accent.tone.expect("accent has a tone layer");
        assert_eq!(tone.freq, 600.0);

        let muted = profiles.get(SoundKind::Muted);
        assert_eq!(muted.noise_ms, 50.0);
        assert_eq!(muted.attack_ms, 2.0);
        assert_eq!(muted.decay_ms, 25.0);
    }

    #[test]
    fn test_default_table_is_valid() {
        assert_eq!(ClickProfiles::default().validate(), Ok(()));
    }

    #[test]
    fn test_quiet_accent_rejected() {
        let profiles = ClickProfiles::default().with_profile(
            SoundKind::Accent,
            ClickProfile {
                peak: 0.4,
                ..ClickProfile::ACCENT
            },
        );
        assert_eq!(profiles.validate(), Err(ProfileError::AccentNotLouder));
    }

    #[test]
    fn test_dull_accent_rejected() {
        let profiles = ClickProfiles::default().with_profile(
            SoundKind::Accent,
            ClickProfile {
                bandpass: FilterStage::new(1500.0, 0.6),
                ..ClickProfile::ACCENT
            },
        );
        assert_eq!(profiles.validate(), Err(ProfileError::AccentNotBrighter));
    }

    #[test]
    fn test_muted_must_be_loudest_and_shortest() {
        let quiet = ClickProfiles::default().with_profile(
            SoundKind::Muted,
            ClickProfile {
                peak: 0.5,
                ..ClickProfile::MUTED
            },
        );
        assert_eq!(quiet.validate(), Err(ProfileError::MutedNotLoudest));

        let long = ClickProfiles::default().with_profile(
            SoundKind::Muted,
            ClickProfile {
                decay_ms: 200.0,
                ..ClickProfile::MUTED
            },
        );
        assert_eq!(long.validate(), Err(ProfileError::MutedNotShortest));
    }

    #[test]
    fn test_non_finite_rejected() {
        let profiles = ClickProfiles::default().with_profile(
            SoundKind::Normal,
            ClickProfile {
                decay_ms: f64::NAN,
                ..ClickProfile::NORMAL
            },
        );
        assert_eq!(
            profiles.validate(),
            Err(ProfileError::InvalidValue(SoundKind::Normal))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SoundKind::Accent.to_string(), "accent");
    }
}
