//! # kalimba-tab
//!
//! Text codec and editing model for 17-tine kalimba tablature.
//!
//! ## Modules
//! - `registry` - the 17 tines and their standard/numeric/lettered spellings
//! - `sequence` - Event and Sequence types
//! - `encoder` / `decoder` - sequence to tab text and back
//! - `editor` - keeps a sequence and its text view in sync
//! - `document` - tab files with YAML front matter
//! - `service` - conversion and export service payloads
//!
//! ## Example
//! ```rust
//! use kalimba_tab::{decode, encode, Notation};
//!
//! let seq = decode("C4 (E4 G4)\nC5", Notation::Standard);
//! assert_eq!(encode(&seq, Notation::Numeric), "1 (3 5)\n1°");
//! ```

pub mod decoder;
pub mod document;
pub mod editor;
pub mod encoder;
pub mod error;
pub mod registry;
pub mod sequence;
pub mod service;

pub use decoder::{normalize_line_endings, Decoder};
pub use document::{parse_document, parse_document_as, render_document, Metadata, TabDocument};
pub use editor::Editor;
pub use encoder::Encoder;
pub use error::*;
pub use registry::{Notation, NoteRegistry, Pitch};
pub use sequence::{Event, Sequence};
pub use service::{
    conversion_path, export_path, sequence_from_conversion, Correction, ExportFormat,
    SequencePayload,
};

/// Encode a sequence as tab text.
pub fn encode(sequence: &Sequence, notation: Notation) -> String {
    Encoder::new(&NoteRegistry::new()).encode(sequence, notation)
}

/// Decode tab text. Unrecognized tokens are dropped; this never fails.
pub fn decode(text: &str, notation: Notation) -> Sequence {
    Decoder::new(&NoteRegistry::new()).decode(text, notation)
}

/// Rewrite tab text from one notation into another.
///
/// ```rust
/// use kalimba_tab::{transcribe, Notation};
///
/// assert_eq!(transcribe("1 (3° 5°)", Notation::Numeric, Notation::Lettered), "C (E° G°)");
/// ```
pub fn transcribe(text: &str, from: Notation, to: Notation) -> String {
    let registry = NoteRegistry::new();
    let sequence = Decoder::new(&registry).decode(text, from);
    Encoder::new(&registry).encode(&sequence, to)
}
