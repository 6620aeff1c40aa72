//! Built-in pattern library.

use super::pattern::{Pattern, Strum, Subdivision};

use Strum::{Down as D, Muted as X, Rest as R, Up as U};

/// A library pattern with a stable identifier.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub genre: &'static str,
    pub strums: &'static [Strum],
    pub subdivision: Subdivision,
    pub beats_per_measure: u32,
}

impl Preset {
    /// Builds an owned [`Pattern`] carrying this preset's metadata.
    pub fn pattern(&self) -> Pattern {
        Pattern::from_table(self.strums, self.subdivision, self.beats_per_measure)
            .with_name(self.name)
            .with_description(self.description)
            .with_genre(self.genre)
    }
}

const PRESETS: &[Preset] = &[
    Preset {
        id: "basic-down",
        name: "Basic Down Strums",
        description: "Simple downward strums on every beat",
        genre: "Beginner",
        strums: &[D, D, D, D],
        subdivision: Subdivision::Quarter,
        beats_per_measure: 4,
    },
    Preset {
        id: "down-up-eighth",
        name: "Down-Up Eighths",
        description: "Alternating down and up strums on eighth notes",
        genre: "Beginner",
        strums: &[D, U, D, U, D, U, D, U],
        subdivision: Subdivision::Eighth,
        beats_per_measure: 4,
    },
    Preset {
        id: "folk-strum",
        name: "Folk Strum",
        description: "Classic folk pattern: D-D-U-D-U-D-U-D",
        genre: "Folk",
        strums: &[D, R, U, D, U, D, U, R],
        subdivision: Subdivision::Eighth,
        beats_per_measure: 4,
    },
    Preset {
        id: "common-time",
        name: "Common Time",
        description: "Popular pop strumming pattern: D-rest-D-U-rest-U-D-U",
        genre: "Pop",
        strums: &[D, R, D, U, R, U, D, U],
        subdivision: Subdivision::Eighth,
        beats_per_measure: 4,
    },
    Preset {
        id: "rock-rhythm",
        name: "Rock Rhythm",
        description: "Rock pattern with muted strums",
        genre: "Rock",
        strums: &[D, X, D, U, D, U, D, U],
        subdivision: Subdivision::Eighth,
        beats_per_measure: 4,
    },
    Preset {
        id: "country-shuffle",
        name: "Country Shuffle",
        description: "Country pattern with muted strums and swing feel in 3/4 time",
        genre: "Country",
        strums: &[D, X, U, D, X, U],
        subdivision: Subdivision::Eighth,
        beats_per_measure: 3,
    },
    Preset {
        id: "waltz",
        name: "3/4 Waltz",
        description: "Traditional waltz in 3/4 time",
        genre: "Folk",
        strums: &[D, D, D],
        subdivision: Subdivision::Quarter,
        beats_per_measure: 3,
    },
    Preset {
        id: "reggae-skank",
        name: "Reggae Skank",
        description: "Classic reggae upstroke on off-beats",
        genre: "Reggae",
        strums: &[R, U, R, U, R, U, R, U],
        subdivision: Subdivision::Eighth,
        beats_per_measure: 4,
    },
    Preset {
        id: "sixteenth-groove",
        name: "Sixteenth Note Groove",
        description: "Funky sixteenth note pattern with muted strums",
        genre: "Funk",
        strums: &[D, U, D, U, X, U, D, U, D, U, D, U, X, U, D, U],
        subdivision: Subdivision::Sixteenth,
        beats_per_measure: 4,
    },
    Preset {
        id: "ballad-pattern",
        name: "Ballad Pattern",
        description: "Gentle ballad strumming",
        genre: "Ballad",
        strums: &[D, R, R, U, R, U, R, U],
        subdivision: Subdivision::Eighth,
        beats_per_measure: 4,
    },
    Preset {
        id: "palm-mute-rock",
        name: "Palm Mute Rock",
        description: "Heavy rock pattern with palm muted strums",
        genre: "Rock",
        strums: &[D, X, X, U, X, X, D, U],
        subdivision: Subdivision::Eighth,
        beats_per_measure: 4,
    },
];

/// Every built-in preset, in library order.
///
/// # Examples
///
/// ```
/// use strumbeat::presets;
///
/// let first = &presets::all()[0];
/// assert_eq!(first.id, "basic-down");
/// assert_eq!(first.pattern().len(), 4);
/// ```
pub fn all() -> &'static [Preset] {
    PRESETS
}

/// Looks up a preset by id.
pub fn by_id(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.id == id)
}

/// The pattern loaded when nothing else has been chosen.
pub fn default_pattern() -> Pattern {
    PRESETS[0].pattern()
}
