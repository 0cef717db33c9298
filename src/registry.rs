//! # Note Registry
//!
//! The fixed catalogue of the 17 kalimba tines and their three spellings.
//!
//! ## Notations
//! ```text
//! Pitch   Standard  Numeric  Lettered
//! C4      C4        1        C
//! B4      B4        7        B
//! C5      C5        1°       C°
//! C6      C6        1°°      C°°
//! E6      E6        3°°      E°°
//! ```
//!
//! The middle octave (4) has no marks. Each octave above it adds one `°`.
//! Every spelling maps to exactly one pitch per notation and every pitch has
//! exactly one spelling per notation.
//!
//! ## Related Modules
//! - `encoder` - maps pitches to spellings
//! - `decoder` - maps spellings back to pitches through [`NoteRegistry::lookup`]

use crate::error::KalimbaError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One of the 17 tines of a C-major kalimba, C4 through E6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pitch {
    C4,
    D4,
    E4,
    F4,
    G4,
    A4,
    B4,
    C5,
    D5,
    E5,
    F5,
    G5,
    A5,
    B5,
    C6,
    D6,
    E6,
}

/// Spellings indexed by `Pitch as usize`: (standard, numeric, lettered)
const SPELLINGS: [(&str, &str, &str); 17] = [
    ("C4", "1", "C"),
    ("D4", "2", "D"),
    ("E4", "3", "E"),
    ("F4", "4", "F"),
    ("G4", "5", "G"),
    ("A4", "6", "A"),
    ("B4", "7", "B"),
    ("C5", "1°", "C°"),
    ("D5", "2°", "D°"),
    ("E5", "3°", "E°"),
    ("F5", "4°", "F°"),
    ("G5", "5°", "G°"),
    ("A5", "6°", "A°"),
    ("B5", "7°", "B°"),
    ("C6", "1°°", "C°°"),
    ("D6", "2°°", "D°°"),
    ("E6", "3°°", "E°°"),
];

impl Pitch {
    /// All pitches, lowest first.
    pub const ALL: [Pitch; 17] = [
        Pitch::C4,
        Pitch::D4,
        Pitch::E4,
        Pitch::F4,
        Pitch::G4,
        Pitch::A4,
        Pitch::B4,
        Pitch::C5,
        Pitch::D5,
        Pitch::E5,
        Pitch::F5,
        Pitch::G5,
        Pitch::A5,
        Pitch::B5,
        Pitch::C6,
        Pitch::D6,
        Pitch::E6,
    ];

    /// Physical tine order, left to right. The lowest tine sits in the middle and
    /// pitches alternate outwards.
    pub const TINE_LAYOUT: [Pitch; 17] = [
        Pitch::D6,
        Pitch::B5,
        Pitch::G5,
        Pitch::E5,
        Pitch::C5,
        Pitch::A4,
        Pitch::F4,
        Pitch::D4,
        Pitch::C4,
        Pitch::E4,
        Pitch::G4,
        Pitch::B4,
        Pitch::D5,
        Pitch::F5,
        Pitch::A5,
        Pitch::C6,
        Pitch::E6,
    ];

    /// The spelling of this pitch in the given notation.
    pub fn spelling(self, notation: Notation) -> &'static str {
        let (standard, numeric, lettered) = SPELLINGS[self as usize];
        match notation {
            Notation::Standard => standard,
            Notation::Numeric => numeric,
            Notation::Lettered => lettered,
        }
    }

    /// Pitch letter, e.g. `'C'` for C5
    pub fn letter(self) -> char {
        match self {
            Pitch::C4 | Pitch::C5 | Pitch::C6 => 'C',
            Pitch::D4 | Pitch::D5 | Pitch::D6 => 'D',
            Pitch::E4 | Pitch::E5 | Pitch::E6 => 'E',
            Pitch::F4 | Pitch::F5 => 'F',
            Pitch::G4 | Pitch::G5 => 'G',
            Pitch::A4 | Pitch::A5 => 'A',
            Pitch::B4 | Pitch::B5 => 'B',
        }
    }

    /// Scientific octave number (4, 5 or 6)
    pub fn octave(self) -> u8 {
        match self as usize {
            0..=6 => 4,
            7..=13 => 5,
            _ => 6,
        }
    }

    /// Find the pitch for a letter/octave pair as reported by the conversion service.
    ///
    /// ```
    /// use kalimba_tab::Pitch;
    ///
    /// assert_eq!(Pitch::from_letter_octave("D", 6), Some(Pitch::D6));
    /// assert_eq!(Pitch::from_letter_octave("F", 6), None);
    /// ```
    pub fn from_letter_octave(letter: &str, octave: i64) -> Option<Pitch> {
        let standard = format!("{}{}", letter, octave);
        Pitch::ALL
            .iter()
            .copied()
            .find(|p| p.spelling(Notation::Standard) == standard)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling(Notation::Standard))
    }
}

impl FromStr for Pitch {
    type Err = KalimbaError;

    /// Parses the standard spelling ("C4" .. "E6").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pitch::ALL
            .iter()
            .copied()
            .find(|p| p.spelling(Notation::Standard) == s)
            .ok_or_else(|| KalimbaError::UnknownSpelling(s.to_string()))
    }
}

/// Textual spelling scheme for pitches.
///
/// Serializes as the selector the export service expects
/// (`STANDARD`, `NUMERIC`, `LETTER`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Notation {
    #[default]
    #[serde(rename = "STANDARD", alias = "standard")]
    Standard,
    #[serde(rename = "NUMERIC", alias = "numeric")]
    Numeric,
    #[serde(rename = "LETTER", alias = "letter", alias = "lettered")]
    Lettered,
}

impl Notation {
    pub const ALL: [Notation; 3] = [Notation::Standard, Notation::Numeric, Notation::Lettered];

    /// Selector string used in export service queries
    pub fn as_str(self) -> &'static str {
        match self {
            Notation::Standard => "STANDARD",
            Notation::Numeric => "NUMERIC",
            Notation::Lettered => "LETTER",
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Notation {
    type Err = KalimbaError;

    /// Accepts the service selectors case-insensitively, plus `lettered`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("standard") {
            Ok(Notation::Standard)
        } else if trimmed.eq_ignore_ascii_case("numeric") {
            Ok(Notation::Numeric)
        } else if trimmed.eq_ignore_ascii_case("letter") || trimmed.eq_ignore_ascii_case("lettered") {
            Ok(Notation::Lettered)
        } else {
            Err(KalimbaError::UnknownNotation(s.to_string()))
        }
    }
}

/// Lookup table from spellings to pitches, one map per notation.
///
/// Built once and handed to the encoder and decoder. Immutable after
/// construction, so a single registry can be shared between threads.
#[derive(Debug, Clone)]
pub struct NoteRegistry {
    by_spelling: HashMap<Notation, HashMap<&'static str, Pitch>>,
}

impl NoteRegistry {
    pub fn new() -> Self {
        let by_spelling: HashMap<Notation, HashMap<&'static str, Pitch>> = Notation::ALL
            .iter()
            .map(|&notation| {
                let table: HashMap<&'static str, Pitch> = Pitch::ALL
                    .iter()
                    .map(|&pitch| (pitch.spelling(notation), pitch))
                    .collect();
                (notation, table)
            })
            .collect();
        Self { by_spelling }
    }

    /// Exact-match lookup of a spelling. No case folding, no trimming.
    ///
    /// ```
    /// use kalimba_tab::{Notation, NoteRegistry, Pitch};
    ///
    /// let registry = NoteRegistry::new();
    /// assert_eq!(registry.lookup("3°", Notation::Numeric), Some(Pitch::E5));
    /// assert_eq!(registry.lookup("c4", Notation::Standard), None);
    /// ```
    pub fn lookup(&self, representation: &str, notation: Notation) -> Option<Pitch> {
        self.by_spelling
            .get(&notation)
            .and_then(|table| table.get(representation))
            .copied()
    }

    pub fn spelling(&self, pitch: Pitch, notation: Notation) -> &'static str {
        pitch.spelling(notation)
    }
}

impl Default for NoteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
