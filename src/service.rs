//! # Service Payloads
//!
//! Wire formats of the two external services the editor talks to. Neither
//! service is called from here; this module only builds requests and reads
//! responses.
//!
//! ## Conversion
//! `POST /convert?corrNoteCount=N&corrSequenceLength=M` with the recording.
//! Responds with
//! ```json
//! {"items": [{"notes": [{"pitch": "C", "octave": 4}]}]}
//! ```
//!
//! ## Export
//! `POST /export/img?notation=NUMERIC` (or `/export/pdf`) with
//! ```json
//! {"items": [{"br": false, "notes": [{"pitch": "C", "octave": 4}]}]}
//! ```
//! Responds with the rendered document as a binary blob.

use crate::error::KalimbaError;
use crate::registry::{Notation, Pitch};
use crate::sequence::{Event, Sequence};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Bounds of a correction hint
pub const CORRECTION_RANGE: std::ops::RangeInclusive<i32> = -2..=2;

/// Hints that nudge the conversion towards more/fewer notes per event and
/// more/fewer events overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Correction {
    note_count: i8,
    sequence_length: i8,
}

impl Correction {
    /// # Errors
    /// Returns [`KalimbaError::CorrectionOutOfRange`] if either hint is outside -2..=2.
    pub fn new(note_count: i32, sequence_length: i32) -> Result<Self, KalimbaError> {
        Ok(Self {
            note_count: Self::check("noteCount", note_count)?,
            sequence_length: Self::check("sequenceLength", sequence_length)?,
        })
    }

    fn check(name: &'static str, value: i32) -> Result<i8, KalimbaError> {
        if CORRECTION_RANGE.contains(&value) {
            Ok(value as i8)
        } else {
            Err(KalimbaError::CorrectionOutOfRange { name, value })
        }
    }

    pub fn note_count(&self) -> i8 {
        self.note_count
    }

    pub fn sequence_length(&self) -> i8 {
        self.sequence_length
    }

    /// Query parameters for the conversion request
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("corrNoteCount", self.note_count.to_string()),
            ("corrSequenceLength", self.sequence_length.to_string()),
        ]
    }
}

/// Path and query of a conversion request.
///
/// ```
/// use kalimba_tab::{conversion_path, Correction};
///
/// let correction = Correction::new(-1, 2)?;
/// assert_eq!(conversion_path(&correction), "/convert?corrNoteCount=-1&corrSequenceLength=2");
/// # Ok::<(), kalimba_tab::KalimbaError>(())
/// ```
pub fn conversion_path(correction: &Correction) -> String {
    let query: Vec<String> = correction
        .query_pairs()
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    format!("/convert?{}", query.join("&"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotePayload {
    pub pitch: String,
    pub octave: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    #[serde(default)]
    pub br: bool,
    pub notes: Vec<NotePayload>,
}

/// Sequence as both services exchange it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SequencePayload {
    pub items: Vec<ItemPayload>,
}

impl SequencePayload {
    pub fn from_sequence(sequence: &Sequence) -> Self {
        let items = sequence
            .iter()
            .map(|event| ItemPayload {
                br: event.line_break,
                notes: event
                    .notes
                    .iter()
                    .map(|&pitch| NotePayload {
                        pitch: pitch.letter().to_string(),
                        octave: i64::from(pitch.octave()),
                    })
                    .collect(),
            })
            .collect();
        Self { items }
    }

    pub fn to_json(&self) -> Result<String, KalimbaError> {
        serde_json::to_string(self).map_err(|e| KalimbaError::PayloadError(e.to_string()))
    }
}

/// Build a sequence from a conversion service response.
///
/// Every event starts without a line break; line layout is left to the user.
/// Events the service reports without notes are skipped.
///
/// # Errors
/// - [`KalimbaError::PayloadError`] if the body is not the expected JSON shape
/// - [`KalimbaError::UnknownPitch`] if a note is not one of the 17 tines
pub fn sequence_from_conversion(json: &str) -> Result<Sequence, KalimbaError> {
    let payload: SequencePayload =
        serde_json::from_str(json).map_err(|e| KalimbaError::PayloadError(e.to_string()))?;

    let mut items = Vec::with_capacity(payload.items.len());
    for (i, item) in payload.items.iter().enumerate() {
        if item.notes.is_empty() {
            warn!("conversion item {} has no notes, skipping", i);
            continue;
        }
        let notes = item
            .notes
            .iter()
            .map(|note| {
                Pitch::from_letter_octave(&note.pitch, note.octave).ok_or_else(|| {
                    KalimbaError::UnknownPitch {
                        pitch: note.pitch.clone(),
                        octave: note.octave,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        items.push(Event::new(notes, false));
    }

    debug!("conversion response translated into {} events", items.len());
    Ok(Sequence::new(items))
}

/// Document types the export service renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Image,
    Pdf,
}

impl ExportFormat {
    pub fn endpoint(self) -> &'static str {
        match self {
            ExportFormat::Image => "/export/img",
            ExportFormat::Pdf => "/export/pdf",
        }
    }

    /// Name offered for the downloaded document
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Image => "kalimba_notes.png",
            ExportFormat::Pdf => "kalimba_notes.pdf",
        }
    }
}

/// Path and query of an export request.
pub fn export_path(format: ExportFormat, notation: Notation) -> String {
    format!("{}?notation={}", format.endpoint(), notation.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correction_bounds() {
        assert!(Correction::new(-2, 2).is_ok());
        assert_eq!(
            Correction::new(3, 0),
            Err(KalimbaError::CorrectionOutOfRange {
                name: "noteCount",
                value: 3
            })
        );
        assert_eq!(
            Correction::new(0, -3),
            Err(KalimbaError::CorrectionOutOfRange {
                name: "sequenceLength",
                value: -3
            })
        );
    }

    #[test]
    fn test_conversion_path_default() {
        assert_eq!(
            conversion_path(&Correction::default()),
            "/convert?corrNoteCount=0&corrSequenceLength=0"
        );
    }

    #[test]
    fn test_sequence_from_conversion() {
        let json = r#"{"items": [
            {"notes": [{"pitch": "C", "octave": 4}]},
            {"notes": [{"pitch": "E", "octave": 5}, {"pitch": "G", "octave": 5}]}
        ]}"#;
        let seq = sequence_from_conversion(json).unwrap();
        assert_eq!(
            seq.items,
            vec![Event::single(Pitch::C4), Event::chord(&[Pitch::E5, Pitch::G5])]
        );
    }

    #[test]
    fn test_conversion_ignores_line_breaks_and_empty_items() {
        let json = r#"{"items": [
            {"br": true, "notes": [{"pitch": "D", "octave": 6}]},
            {"notes": []}
        ]}"#;
        let seq = sequence_from_conversion(json).unwrap();
        assert_eq!(seq.items, vec![Event::single(Pitch::D6)]);
    }

    #[test]
    fn test_conversion_unknown_pitch() {
        let json = r#"{"items": [{"notes": [{"pitch": "F", "octave": 6}]}]}"#;
        assert_eq!(
            sequence_from_conversion(json),
            Err(KalimbaError::UnknownPitch {
                pitch: "F".to_string(),
                octave: 6
            })
        );
    }

    #[test]
    fn test_conversion_malformed() {
        assert!(matches!(
            sequence_from_conversion("{\"notes\": []}"),
            Err(KalimbaError::PayloadError(_))
        ));
    }

    #[test]
    fn test_export_payload() {
        let seq = Sequence::new(vec![
            Event::chord(&[Pitch::C4, Pitch::E6]).with_line_break(),
            Event::single(Pitch::B5),
        ]);
        let json = SequencePayload::from_sequence(&seq).to_json().unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"items":[{"br":true,"notes":[{"pitch":"C","octave":4},{"pitch":"E","octave":6}]},"#,
                r#"{"br":false,"notes":[{"pitch":"B","octave":5}]}]}"#
            )
        );
    }

    #[test]
    fn test_export_path() {
        assert_eq!(
            export_path(ExportFormat::Pdf, Notation::Numeric),
            "/export/pdf?notation=NUMERIC"
        );
        assert_eq!(
            export_path(ExportFormat::Image, Notation::Lettered),
            "/export/img?notation=LETTER"
        );
        assert_eq!(ExportFormat::Image.file_name(), "kalimba_notes.png");
    }
}
