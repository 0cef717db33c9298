//! # Encoder
//!
//! Writes a [`Sequence`] out as editable tab text.
//!
//! ## Text Format
//! - Events are separated by a single space
//! - A chord is wrapped in parentheses: `(C4 E4 G4)`
//! - An event with a line break is followed by `\n` instead of the separator
//! - An event with no pitches writes an empty token. Its line break, if any,
//!   lands right after the previous token and belongs to that event on decode
//!
//! ```text
//! [C4] [C4 E4]+br [D4]   →   "C4 (C4 E4)\nD4"
//! ```

use crate::registry::{Notation, NoteRegistry};
use crate::sequence::{Event, Sequence};

pub struct Encoder<'a> {
    registry: &'a NoteRegistry,
}

impl<'a> Encoder<'a> {
    pub fn new(registry: &'a NoteRegistry) -> Self {
        Self { registry }
    }

    /// Encode a sequence as tab text in the given notation.
    ///
    /// ```
    /// use kalimba_tab::{Encoder, Event, Notation, NoteRegistry, Pitch, Sequence};
    ///
    /// let registry = NoteRegistry::new();
    /// let seq = Sequence::new(vec![
    ///     Event::single(Pitch::C4).with_line_break(),
    ///     Event::chord(&[Pitch::D4, Pitch::F4]),
    /// ]);
    /// assert_eq!(Encoder::new(&registry).encode(&seq, Notation::Numeric), "1\n(2 4)");
    /// ```
    pub fn encode(&self, sequence: &Sequence, notation: Notation) -> String {
        let tokens: Vec<String> = sequence
            .iter()
            .map(|event| self.encode_event(event, notation))
            .collect();

        // Joining puts a separator after every line break; drop it
        tokens.join(" ").replace("\n ", "\n")
    }

    fn encode_event(&self, event: &Event, notation: Notation) -> String {
        let spellings: Vec<&str> = event
            .notes
            .iter()
            .map(|&pitch| self.registry.spelling(pitch, notation))
            .collect();

        let mut token = match spellings.as_slice() {
            [] => String::new(),
            [single] => single.to_string(),
            chord => format!("({})", chord.join(" ")),
        };
        if event.line_break {
            token.push('\n');
        }
        token
    }
}
