//! # Editor
//!
//! Keeps a sequence and its text view in sync while a user corrects a
//! transcription.
//!
//! The structured sequence is the source of truth:
//! - structural edits (toggling a tine, adding a line break, ...) change the
//!   sequence and re-encode the text
//! - text edits re-decode the sequence from the text, and the decoded sequence
//!   replaces the old one
//!
//! After a text edit the text is kept exactly as typed, so the caret does not
//! jump while the user is still typing. It is only rewritten on the next
//! structural edit or notation change.

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::KalimbaError;
use crate::registry::{Notation, NoteRegistry, Pitch};
use crate::sequence::{Event, Sequence};
use log::debug;

pub struct Editor {
    registry: NoteRegistry,
    notation: Notation,
    sequence: Sequence,
    text: String,
}

impl Editor {
    pub fn new(sequence: Sequence, notation: Notation) -> Self {
        let registry = NoteRegistry::new();
        let text = Encoder::new(&registry).encode(&sequence, notation);
        Self {
            registry,
            notation,
            sequence,
            text,
        }
    }

    /// Start from tab text instead of a sequence.
    pub fn from_text(text: &str, notation: Notation) -> Self {
        let mut editor = Self::new(Sequence::default(), notation);
        editor.set_text(text);
        editor
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn into_sequence(self) -> Sequence {
        self.sequence
    }

    /// Replace the text view and re-decode the sequence from it.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.sequence = Decoder::new(&self.registry).decode(text, self.notation);
        debug!("text edit decoded into {} events", self.sequence.len());
    }

    /// Switch notation; the text is rewritten, the sequence is untouched.
    pub fn set_notation(&mut self, notation: Notation) {
        self.notation = notation;
        self.refresh_text();
    }

    /// Insert an empty event before `index`. Indices past the end append.
    pub fn insert_event(&mut self, index: usize) {
        let index = index.min(self.sequence.items.len());
        self.sequence.items.insert(index, Event::default());
        self.refresh_text();
    }

    /// Add the pitch to the event, or remove it if already present.
    pub fn toggle_pitch(&mut self, index: usize, pitch: Pitch) -> Result<(), KalimbaError> {
        let event = self.event_mut(index)?;
        if event.contains(pitch) {
            event.notes.retain(|&p| p != pitch);
        } else {
            event.notes.push(pitch);
        }
        self.refresh_text();
        Ok(())
    }

    pub fn toggle_line_break(&mut self, index: usize) -> Result<(), KalimbaError> {
        let event = self.event_mut(index)?;
        event.line_break = !event.line_break;
        self.refresh_text();
        Ok(())
    }

    pub fn remove_event(&mut self, index: usize) -> Result<Event, KalimbaError> {
        self.event_mut(index)?;
        let removed = self.sequence.items.remove(index);
        self.refresh_text();
        Ok(removed)
    }

    /// Close editing of an event. An event left without pitches is removed.
    ///
    /// Returns whether the event was removed.
    pub fn finish_event(&mut self, index: usize) -> Result<bool, KalimbaError> {
        if self.event_mut(index)?.is_empty() {
            self.remove_event(index)?;
            return Ok(true);
        }
        Ok(false)
    }

    fn event_mut(&mut self, index: usize) -> Result<&mut Event, KalimbaError> {
        let len = self.sequence.items.len();
        self.sequence
            .items
            .get_mut(index)
            .ok_or_else(|| KalimbaError::EditError {
                index,
                message: format!("sequence has {} events", len),
            })
    }

    fn refresh_text(&mut self) {
        self.text = Encoder::new(&self.registry).encode(&self.sequence, self.notation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> Editor {
        Editor::new(
            Sequence::new(vec![Event::single(Pitch::C4), Event::single(Pitch::D4)]),
            Notation::Standard,
        )
    }

    #[test]
    fn test_new_encodes_text() {
        assert_eq!(editor().text(), "C4 D4");
    }

    #[test]
    fn test_toggle_pitch_adds_then_removes() {
        let mut ed = editor();
        ed.toggle_pitch(0, Pitch::E4).unwrap();
        assert_eq!(ed.text(), "(C4 E4) D4");
        ed.toggle_pitch(0, Pitch::C4).unwrap();
        assert_eq!(ed.text(), "E4 D4");
    }

    #[test]
    fn test_toggle_line_break() {
        let mut ed = editor();
        ed.toggle_line_break(0).unwrap();
        assert_eq!(ed.text(), "C4\nD4");
        ed.toggle_line_break(0).unwrap();
        assert_eq!(ed.text(), "C4 D4");
    }

    #[test]
    fn test_set_text_keeps_raw_text() {
        let mut ed = editor();
        ed.set_text("C4  (E4 G4) zz");
        assert_eq!(ed.text(), "C4  (E4 G4) zz");
        assert_eq!(
            ed.sequence().items,
            vec![Event::single(Pitch::C4), Event::chord(&[Pitch::E4, Pitch::G4])]
        );
    }

    #[test]
    fn test_structural_edit_after_text_edit_rewrites_text() {
        let mut ed = editor();
        ed.set_text("C4  zz D4");
        ed.toggle_line_break(1).unwrap();
        assert_eq!(ed.text(), "C4 D4\n");
    }

    #[test]
    fn test_set_notation() {
        let mut ed = editor();
        ed.set_notation(Notation::Numeric);
        assert_eq!(ed.text(), "1 2");
        assert_eq!(ed.sequence().len(), 2);
    }

    #[test]
    fn test_insert_and_finish_empty_event() {
        let mut ed = editor();
        ed.insert_event(1);
        assert_eq!(ed.sequence().len(), 3);
        assert_eq!(ed.text(), "C4  D4");
        assert!(ed.finish_event(1).unwrap());
        assert_eq!(ed.sequence().len(), 2);
        assert!(!ed.finish_event(0).unwrap());
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut ed = editor();
        ed.insert_event(99);
        ed.toggle_pitch(2, Pitch::E6).unwrap();
        assert_eq!(ed.text(), "C4 D4 E6");
    }

    #[test]
    fn test_remove_event() {
        let mut ed = editor();
        let removed = ed.remove_event(0).unwrap();
        assert_eq!(removed, Event::single(Pitch::C4));
        assert_eq!(ed.text(), "D4");
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut ed = editor();
        let err = ed.toggle_pitch(5, Pitch::C4).unwrap_err();
        assert_eq!(
            err,
            KalimbaError::EditError {
                index: 5,
                message: "sequence has 2 events".to_string()
            }
        );
        assert!(ed.remove_event(2).is_err());
    }

    #[test]
    fn test_from_text() {
        let ed = Editor::from_text("C° (E° G°)", Notation::Lettered);
        assert_eq!(ed.into_sequence().len(), 2);
    }
}
