//! Strumming patterns.
//!
//! A [`Pattern`] is a looped sequence of [`Strum`]s together with the note
//! value each step lasts ([`Subdivision`]) and the time signature. Patterns
//! can be written in a compact notation:
//!
//! | symbol | strum |
//! |--------|-------|
//! | `D` | down |
//! | `U` | up |
//! | `-` `.` `R` | rest |
//! | `X` `M` | muted |
//!
//! Letters are case-insensitive. Whitespace and `|` bar lines are ignored.

use crate::error::PatternError;
use std::fmt;
use std::str::FromStr;

/// One step of a strumming pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strum {
    Down,
    Up,
    /// No strum; the hand keeps moving
    Rest,
    /// Palm-muted strum
    Muted,
}

impl Strum {
    /// Looks up a notation symbol. Returns `None` for anything that is not a strum.
    ///
    /// # Examples
    ///
    /// ```
    /// use strumbeat::Strum;
    ///
    /// assert_eq!(Strum::from_symbol('d'), Some(Strum::Down));
    /// assert_eq!(Strum::from_symbol('x'), Some(Strum::Muted));
    /// assert_eq!(Strum::from_symbol('?'), None);
    /// ```
    pub fn from_symbol(symbol: char) -> Option<Strum> {
        match symbol.to_ascii_uppercase() {
            'D' => Some(Strum::Down),
            'U' => Some(Strum::Up),
            '-' | '.' | 'R' => Some(Strum::Rest),
            'X' | 'M' => Some(Strum::Muted),
            _ => None,
        }
    }

    /// Canonical notation symbol.
    pub fn symbol(self) -> char {
        match self {
            Strum::Down => 'D',
            Strum::Up => 'U',
            Strum::Rest => '-',
            Strum::Muted => 'X',
        }
    }

    /// Parses a whole notation string into strums.
    ///
    /// Positions in errors count characters of the original input, starting at 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use strumbeat::Strum;
    ///
    /// let strums = Strum::parse_sequence("D-DU | -UDU").unwrap();
    /// assert_eq!(strums.len(), 8);
    /// assert_eq!(strums[1], Strum::Rest);
    /// ```
    pub fn parse_sequence(notation: &str) -> Result<Vec<Strum>, PatternError> {
        let mut strums = Vec::with_capacity(notation.len());
        for (position, symbol) in notation.chars().enumerate() {
            if symbol.is_whitespace() || symbol == '|' {
                continue;
            }
            match Strum::from_symbol(symbol) {
                Some(strum) => strums.push(strum),
                None => return Err(PatternError::UnknownSymbol { symbol, position }),
            }
        }
        if strums.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(strums)
    }

    /// Returns true for strums that produce a chord (down, up, muted).
    pub fn is_played(self) -> bool {
        !matches!(self, Strum::Rest)
    }
}

impl fmt::Display for Strum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strum::Down => "down",
            Strum::Up => "up",
            Strum::Rest => "rest",
            Strum::Muted => "muted",
        };
        f.write_str(name)
    }
}

impl FromStr for Strum {
    type Err = PatternError;

    /// Accepts a full name (`"down"`) or a single notation symbol (`"D"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "down" => return Ok(Strum::Down),
            "up" => return Ok(Strum::Up),
            "rest" => return Ok(Strum::Rest),
            "muted" | "mute" => return Ok(Strum::Muted),
            _ => {}
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => {
                Strum::from_symbol(symbol).ok_or(PatternError::UnknownSymbol { symbol, position: 0 })
            }
            (None, _) => Err(PatternError::Empty),
            (Some(symbol), Some(_)) => Err(PatternError::UnknownSymbol { symbol, position: 0 }),
        }
    }
}

/// Note value of one pattern step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Subdivision {
    Quarter,
    #[default]
    Eighth,
    Sixteenth,
}

impl Subdivision {
    /// Number of pattern steps in one beat.
    pub fn steps_per_beat(self) -> u32 {
        match self {
            Subdivision::Quarter => 1,
            Subdivision::Eighth => 2,
            Subdivision::Sixteenth => 4,
        }
    }
}

impl fmt::Display for Subdivision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Subdivision::Quarter => "quarter",
            Subdivision::Eighth => "eighth",
            Subdivision::Sixteenth => "sixteenth",
        };
        f.write_str(name)
    }
}

impl FromStr for Subdivision {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quarter" | "1/4" => Ok(Subdivision::Quarter),
            "eighth" | "1/8" => Ok(Subdivision::Eighth),
            "sixteenth" | "1/16" => Ok(Subdivision::Sixteenth),
            _ => Err(PatternError::UnknownSubdivision(s.to_string())),
        }
    }
}

/// A looped strumming pattern.
///
/// Patterns always hold at least one strum and at least one beat per
/// measure; both are checked on construction. Step indices wrap, so any
/// index can be looked up.
///
/// # Examples
///
/// ```
/// use strumbeat::{Pattern, Strum, Subdivision};
///
/// let pattern = Pattern::parse("D-DU-UDU", Subdivision::Eighth)
///     .unwrap()
///     .with_name("Common Time");
///
/// assert_eq!(pattern.len(), 8);
/// assert_eq!(pattern.strum_at(9), Strum::Rest);
/// assert_eq!(pattern.beat_label(3), "&");
/// assert_eq!(pattern.measure_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", try_from = "serde_record::PatternRecord")
)]
pub struct Pattern {
    #[cfg_attr(feature = "serde", serde(rename = "pattern"))]
    strums: Vec<Strum>,
    subdivision: Subdivision,
    beats_per_measure: u32,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    name: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    description: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    genre: Option<String>,
}

impl Pattern {
    /// Default time signature numerator.
    pub const DEFAULT_BEATS_PER_MEASURE: u32 = 4;

    /// Creates a pattern in 4/4.
    ///
    /// # Errors
    ///
    /// [`PatternError::Empty`] if `strums` is empty.
    pub fn new(strums: impl Into<Vec<Strum>>, subdivision: Subdivision) -> Result<Self, PatternError> {
        let strums = strums.into();
        if strums.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(Self {
            strums,
            subdivision,
            beats_per_measure: Self::DEFAULT_BEATS_PER_MEASURE,
            name: None,
            description: None,
            genre: None,
        })
    }

    /// Builds a pattern from a static table entry.
    pub(crate) fn from_table(strums: &[Strum], subdivision: Subdivision, beats_per_measure: u32) -> Self {
        debug_assert!(!strums.is_empty(), "table patterns must not be empty");
        Self {
            strums: strums.to_vec(),
            subdivision,
            beats_per_measure: beats_per_measure.max(1),
            name: None,
            description: None,
            genre: None,
        }
    }

    /// Creates a pattern from notation such as `"D-DU -UDU"`.
    pub fn parse(notation: &str, subdivision: Subdivision) -> Result<Self, PatternError> {
        Self::new(Strum::parse_sequence(notation)?, subdivision)
    }

    /// Sets the time signature numerator.
    ///
    /// # Errors
    ///
    /// [`PatternError::ZeroBeatsPerMeasure`] if `beats` is 0.
    pub fn with_beats_per_measure(mut self, beats: u32) -> Result<Self, PatternError> {
        if beats == 0 {
            return Err(PatternError::ZeroBeatsPerMeasure);
        }
        self.beats_per_measure = beats;
        Ok(self)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn strums(&self) -> &[Strum] {
        &self.strums
    }

    /// Number of steps before the pattern loops.
    pub fn len(&self) -> usize {
        self.strums.len()
    }

    /// Always false; patterns cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.strums.is_empty()
    }

    /// The strum at `index`, wrapping around the end of the pattern.
    pub fn strum_at(&self, index: usize) -> Strum {
        self.strums[index % self.strums.len()]
    }

    pub fn subdivision(&self) -> Subdivision {
        self.subdivision
    }

    pub fn beats_per_measure(&self) -> u32 {
        self.beats_per_measure
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    /// Steps in one measure, saturating at `usize::MAX`.
    pub fn steps_per_measure(&self) -> usize {
        (self.beats_per_measure.max(1) as usize)
            .saturating_mul(self.subdivision.steps_per_beat() as usize)
    }

    /// Number of measures the pattern spans, counting a partial last measure.
    pub fn measure_count(&self) -> usize {
        self.len().div_ceil(self.steps_per_measure())
    }

    /// Counting label for a step, as a player would count it aloud.
    ///
    /// - quarter notes count the beat within the measure: `1 2 3 4`
    /// - eighth notes count beats on even steps and `&` between: `1 & 2 &`
    /// - sixteenth notes count `1 e & a 2 e & a`
    ///
    /// Eighth and sixteenth beat numbers keep counting across measures.
    ///
    /// # Examples
    ///
    /// ```
    /// use strumbeat::{Pattern, Subdivision};
    ///
    /// let pattern = Pattern::parse("DUDUDUDU", Subdivision::Sixteenth).unwrap();
    /// let labels: Vec<String> = (0..8).map(|i| pattern.beat_label(i)).collect();
    /// assert_eq!(labels, ["1", "e", "&", "a", "2", "e", "&", "a"]);
    /// ```
    pub fn beat_label(&self, index: usize) -> String {
        match self.subdivision {
            Subdivision::Quarter => ((index % self.beats_per_measure as usize) + 1).to_string(),
            Subdivision::Eighth => {
                if index % 2 == 1 {
                    "&".to_string()
                } else {
                    (index / 2 + 1).to_string()
                }
            }
            Subdivision::Sixteenth => match index % 4 {
                1 => "e".to_string(),
                2 => "&".to_string(),
                3 => "a".to_string(),
                _ => (index / 4 + 1).to_string(),
            },
        }
    }

    /// Direction the strumming hand travels on a step, whether or not it hits
    /// the strings.
    ///
    /// The hand moves down on beats and up on off-beats; in sixteenths it
    /// moves down on `1` and `&` and up on `e` and `a`.
    pub fn hand_motion(&self, index: usize) -> Strum {
        let up = match self.subdivision {
            Subdivision::Quarter => false,
            Subdivision::Eighth => index % 2 == 1,
            Subdivision::Sixteenth => matches!(index % 4, 1 | 3),
        };
        if up { Strum::Up } else { Strum::Down }
    }
}

impl fmt::Display for Pattern {
    /// Writes the pattern in notation form, one bar line per measure.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_measure = self.steps_per_measure();
        for (i, strum) in self.strums.iter().enumerate() {
            if i > 0 && i % per_measure == 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", strum.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    /// Parses `"[subdivision:] notation"`, e.g. `"sixteenth: DUDU XUDU"`.
    /// Without a prefix the pattern is in eighth notes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((subdivision, notation)) => Pattern::parse(notation, subdivision.parse()?),
            None => Pattern::parse(s, Subdivision::default()),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_record {
    use super::{Pattern, Strum, Subdivision};
    use crate::error::PatternError;

    fn default_beats() -> u32 {
        Pattern::DEFAULT_BEATS_PER_MEASURE
    }

    /// Unchecked wire form of a pattern.
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct PatternRecord {
        pattern: Vec<Strum>,
        subdivision: Subdivision,
        #[serde(default = "default_beats")]
        beats_per_measure: u32,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        genre: Option<String>,
    }

    impl TryFrom<PatternRecord> for Pattern {
        type Error = PatternError;

        fn try_from(record: PatternRecord) -> Result<Self, Self::Error> {
            let mut pattern = Pattern::new(record.pattern, record.subdivision)?
                .with_beats_per_measure(record.beats_per_measure)?;
            pattern.name = record.name;
            pattern.description = record.description;
            pattern.genre = record.genre;
            Ok(pattern)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notation() {
        let pattern = Pattern::parse("d-du .UXm", Subdivision::Eighth).unwrap();
        assert_eq!(
            pattern.strums(),
            &[
                Strum::Down,
                Strum::Rest,
                Strum::Down,
                Strum::Up,
                Strum::Rest,
                Strum::Up,
                Strum::Muted,
                Strum::Muted,
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Pattern::parse("DUQ", Subdivision::Eighth),
            Err(PatternError::UnknownSymbol {
                symbol: 'Q',
                position: 2
            })
        );
        assert_eq!(Pattern::parse(" | ", Subdivision::Eighth), Err(PatternError::Empty));
        assert_eq!(Pattern::new(Vec::new(), Subdivision::Quarter), Err(PatternError::Empty));
    }

    #[test]
    fn test_zero_beats_rejected() {
        let pattern = Pattern::parse("DDD", Subdivision::Quarter).unwrap();
        assert_eq!(
            pattern.with_beats_per_measure(0),
            Err(PatternError::ZeroBeatsPerMeasure)
        );
    }

    #[test]
    fn test_strum_at_wraps() {
        let pattern = Pattern::parse("DUX", Subdivision::Eighth).unwrap();
        assert_eq!(pattern.strum_at(0), Strum::Down);
        assert_eq!(pattern.strum_at(3), Strum::Down);
        assert_eq!(pattern.strum_at(5), Strum::Muted);
    }

    #[test]
    fn test_quarter_labels_wrap_per_measure() {
        let pattern = Pattern::parse("DDD DDD", Subdivision::Quarter)
            .unwrap()
            .with_beats_per_measure(3)
            .unwrap();
        let labels: Vec<String> = (0..6).map(|i| pattern.beat_label(i)).collect();
        assert_eq!(labels, ["1", "2", "3", "1", "2", "3"]);
    }

    #[test]
    fn test_eighth_labels() {
        let pattern = Pattern::parse("DUDUDUDU", Subdivision::Eighth).unwrap();
        let labels: Vec<String> = (0..8).map(|i| pattern.beat_label(i)).collect();
        assert_eq!(labels, ["1", "&", "2", "&", "3", "&", "4", "&"]);
    }

    #[test]
    fn test_measure_count() {
        let eighths = Pattern::parse("DUDUDUDU DU", Subdivision::Eighth).unwrap();
        assert_eq!(eighths.steps_per_measure(), 8);
        assert_eq!(eighths.measure_count(), 2);

        let waltz = Pattern::parse("DDD", Subdivision::Quarter)
            .unwrap()
            .with_beats_per_measure(3)
            .unwrap();
        assert_eq!(waltz.measure_count(), 1);
    }

    #[test]
    fn test_huge_measure() {
        let pattern = Pattern::parse("DUDU", Subdivision::Sixteenth)
            .unwrap()
            .with_beats_per_measure(u32::MAX)
            .unwrap();
        assert!(pattern.steps_per_measure() >= u32::MAX as usize);
        assert_eq!(pattern.measure_count(), 1);
        assert_eq!(pattern.to_string(), "DUDU");
        assert_eq!(pattern.beat_label(5), "2");
    }

    #[test]
    fn test_hand_motion() {
        let sixteenths = Pattern::parse("XXXX", Subdivision::Sixteenth).unwrap();
        let motion: Vec<Strum> = (0..4).map(|i| sixteenths.hand_motion(i)).collect();
        assert_eq!(motion, [Strum::Down, Strum::Up, Strum::Down, Strum::Up]);

        let quarters = Pattern::parse("DD", Subdivision::Quarter).unwrap();
        assert_eq!(quarters.hand_motion(1), Strum::Down);
    }

    #[test]
    fn test_display_round_trip() {
        let pattern = Pattern::parse("D-DU-UDU DUXU", Subdivision::Eighth).unwrap();
        let text = pattern.to_string();
        assert_eq!(text, "D-DU-UDU | DUXU");
        assert_eq!(Pattern::parse(&text, Subdivision::Eighth).unwrap(), pattern);
    }

    #[test]
    fn test_from_str_with_subdivision() {
        let pattern: Pattern = "sixteenth: DUDU XUDU".parse().unwrap();
        assert_eq!(pattern.subdivision(), Subdivision::Sixteenth);
        assert_eq!(pattern.len(), 8);

        let pattern: Pattern = "D-DU".parse().unwrap();
        assert_eq!(pattern.subdivision(), Subdivision::Eighth);

        assert_eq!(
            "triplet: DDD".parse::<Pattern>(),
            Err(PatternError::UnknownSubdivision("triplet".to_string()))
        );
    }

    #[test]
    fn test_strum_from_str() {
        assert_eq!("down".parse::<Strum>(), Ok(Strum::Down));
        assert_eq!("Muted".parse::<Strum>(), Ok(Strum::Muted));
        assert_eq!("u".parse::<Strum>(), Ok(Strum::Up));
        assert!("sideways".parse::<Strum>().is_err());
        assert_eq!("".parse::<Strum>(), Err(PatternError::Empty));
    }

    #[test]
    fn test_subdivision_from_str() {
        assert_eq!("Quarter".parse::<Subdivision>(), Ok(Subdivision::Quarter));
        assert_eq!("SIXTEENTH".parse::<Subdivision>(), Ok(Subdivision::Sixteenth));
        assert_eq!(Subdivision::Eighth.steps_per_beat(), 2);
        assert!("half".parse::<Subdivision>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_record() {
        let json = r#"{
            "pattern": ["down", "muted", "up", "down", "muted", "up"],
            "subdivision": "eighth",
            "beatsPerMeasure": 3,
            "name": "Country Shuffle",
            "genre": "Country"
        }"#;
        let pattern: Pattern = serde_json::from_str(json).unwrap();
        assert_eq!(pattern.beats_per_measure(), 3);
        assert_eq!(pattern.name(), Some("Country Shuffle"));
        assert_eq!(pattern.strum_at(1), Strum::Muted);

        let back = serde_json::to_string(&pattern).unwrap();
        assert!(back.contains("\"beatsPerMeasure\":3"));
        assert!(!back.contains("description"));

        let empty = r#"{"pattern": [], "subdivision": "quarter"}"#;
        assert!(serde_json::from_str::<Pattern>(empty).is_err());
    }
}
