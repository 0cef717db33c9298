//! # Decoder
//!
//! Parses tab text back into a [`Sequence`]. Decoding never fails: anything that
//! is not a pitch spelling in the active notation is dropped.
//!
//! ## Pipeline
//! 1. **Normalize** - whitespace before a newline collapses into the newline
//! 2. **Scan** - split the text into raw tokens, keeping `( ... )` groups whole
//! 3. **Resolve** - strip the parentheses, split on whitespace and look each word
//!    up in the [`NoteRegistry`]
//!
//! ## Scanner States
//! The scanner tracks `depth` (open parentheses) and `current` (pending text).
//! A token closes on:
//! - a space at depth 0
//! - a newline at any depth (the event gets a line break)
//! - end of input
//!
//! Parentheses stay in the token text. `depth` never drops below zero, so a
//! stray `)` does not swallow the following separators.
//!
//! ## Leniency
//! Parentheses are stripped by position only: a token is a chord when its first
//! character is `(` and its last is `)`. Unbalanced input such as `(C4 D4` is not
//! rejected; its words are resolved as written and `(C4` simply fails to resolve.

use crate::registry::{Notation, NoteRegistry, Pitch};
use crate::sequence::{Event, Sequence};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+\n").expect("valid trailing whitespace regex"));

/// Text between two terminators, before pitch resolution
#[derive(Debug, Clone, PartialEq)]
struct RawToken {
    text: String,
    line_break: bool,
}

/// Collapse every whitespace run that ends in a newline into that newline.
///
/// Blank lines collapse too, since the run `"\n\n"` ends in a newline.
pub fn normalize_line_endings(text: &str) -> String {
    TRAILING_WHITESPACE_RE.replace_all(text, "\n").into_owned()
}

fn scan(text: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut depth: usize = 0;
    let mut current = String::new();

    let mut close = |current: &mut String, line_break: bool| {
        tokens.push(RawToken {
            text: std::mem::take(current),
            line_break,
        });
    };

    for c in text.chars() {
        match c {
            '\n' => close(&mut current, true),
            ' ' if depth == 0 => close(&mut current, false),
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            _ => current.push(c),
        }
    }
    // End of input closes the last token
    close(&mut current, false);

    tokens
}

pub struct Decoder<'a> {
    registry: &'a NoteRegistry,
}

impl<'a> Decoder<'a> {
    pub fn new(registry: &'a NoteRegistry) -> Self {
        Self { registry }
    }

    /// Decode tab text written in the given notation.
    ///
    /// ```
    /// use kalimba_tab::{Decoder, Notation, NoteRegistry, Pitch};
    ///
    /// let registry = NoteRegistry::new();
    /// let seq = Decoder::new(&registry).decode("C4 XX (D4 E4)", Notation::Standard);
    ///
    /// assert_eq!(seq.len(), 2);
    /// assert_eq!(seq.items[0].notes, vec![Pitch::C4]);
    /// assert_eq!(seq.items[1].notes, vec![Pitch::D4, Pitch::E4]);
    /// ```
    pub fn decode(&self, text: &str, notation: Notation) -> Sequence {
        let normalized = normalize_line_endings(text);
        let items = scan(&normalized)
            .into_iter()
            .filter_map(|token| self.resolve(&token, notation))
            .collect();
        Sequence::new(items)
    }

    fn resolve(&self, token: &RawToken, notation: Notation) -> Option<Event> {
        let trimmed = token.text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);

        let notes: Vec<Pitch> = inner
            .split_whitespace()
            .filter_map(|word| {
                let pitch = self.registry.lookup(word, notation);
                if pitch.is_none() {
                    debug!("dropping unrecognized token '{}' ({})", word, notation);
                }
                pitch
            })
            .collect();

        if notes.is_empty() {
            None
        } else {
            Some(Event::new(notes, token.line_break))
        }
    }
}
