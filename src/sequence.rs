//! # Sequence Types
//!
//! ```text
//! Sequence
//!   └── Vec<Event>
//!         ├── notes: Vec<Pitch>   (played together; one pitch = single note, more = chord)
//!         └── line_break: bool    (start a new line after this event)
//! ```
//!
//! Event order is playback order. A sequence carries no notation: the same
//! sequence can be written out in any [`crate::Notation`].
//!
//! An event with no pitches is allowed while editing (a freshly inserted event)
//! but cannot survive an encode/decode round trip. If such an event carries a
//! line break, the break moves onto the event before it: `[C4, []+br, D4]`
//! decodes back as `[C4+br, D4]`.

use crate::registry::Pitch;
use serde::{Deserialize, Serialize};

/// A single played moment: one or more simultaneous pitches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Event {
    pub notes: Vec<Pitch>,
    #[serde(rename = "br", default)]
    pub line_break: bool,
}

impl Event {
    pub fn new(notes: Vec<Pitch>, line_break: bool) -> Self {
        Self { notes, line_break }
    }

    pub fn single(pitch: Pitch) -> Self {
        Self::new(vec![pitch], false)
    }

    pub fn chord(notes: &[Pitch]) -> Self {
        Self::new(notes.to_vec(), false)
    }

    /// Same event, followed by a line break.
    pub fn with_line_break(mut self) -> Self {
        self.line_break = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        self.notes.contains(&pitch)
    }
}

/// An ordered list of events making up a piece.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sequence {
    pub items: Vec<Event>,
}

impl Sequence {
    pub fn new(items: Vec<Event>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.items.iter()
    }

    /// Copy of this sequence without events that have no pitches.
    pub fn without_empty_events(&self) -> Sequence {
        Sequence::new(self.items.iter().filter(|e| !e.is_empty()).cloned().collect())
    }

    /// Number of lines the sequence spans when written out
    pub fn line_count(&self) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        let breaks = self.items[..self.items.len() - 1]
            .iter()
            .filter(|e| e.line_break)
            .count();
        breaks + 1
    }
}

impl From<Vec<Event>> for Sequence {
    fn from(items: Vec<Event>) -> Self {
        Self::new(items)
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
