//! # Tab Documents
//!
//! A tab file is plain tab text, optionally preceded or followed by a YAML
//! front matter block:
//!
//! ```text
//! ---
//! title: Twinkle Twinkle
//! notation: numeric
//! ---
//! 1 1 5 5 6 6 5
//! 4 4 3 3 2 2 1
//! ```
//!
//! The block selects the notation the tab text is decoded with. Without a
//! block the text is read as standard notation.

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::KalimbaError;
use crate::registry::{Notation, NoteRegistry};
use crate::sequence::Sequence;
use serde::{Deserialize, Serialize};

/// Front matter of a tab document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub notation: Notation,
}

/// Raw metadata for YAML (de)serialization
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabDocument {
    pub metadata: Metadata,
    pub sequence: Sequence,
}

/// Split the front matter block from the tab text.
/// Returns (metadata_content, remaining_source)
fn extract_metadata(source: &str) -> (Option<String>, String) {
    let lines: Vec<&str> = source.lines().collect();

    let mut markers = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim() == "---")
        .map(|(i, _)| i);

    match (markers.next(), markers.next()) {
        (Some(start), Some(end)) => {
            let metadata_content = lines[start + 1..end].join("\n");
            let remaining: Vec<&str> = lines[..start]
                .iter()
                .chain(lines[end + 1..].iter())
                .copied()
                .collect();
            let mut remaining = remaining.join("\n");
            // lines() drops the final newline, which marks a line break on the last event
            if source.ends_with('\n') && end + 1 < lines.len() {
                remaining.push('\n');
            }
            (Some(metadata_content), remaining)
        }
        _ => (None, source.to_string()),
    }
}

fn parse_metadata(content: &str) -> Result<Metadata, KalimbaError> {
    // An empty block deserializes as null
    if content.trim().is_empty() {
        return Ok(Metadata::default());
    }

    let raw: RawMetadata =
        serde_yaml::from_str(content).map_err(|e| KalimbaError::MetadataError(e.to_string()))?;

    let notation = match &raw.notation {
        Some(n) => n
            .parse()
            .map_err(|_| KalimbaError::MetadataError(format!("Invalid notation: {}", n)))?,
        None => Notation::default(),
    };

    Ok(Metadata {
        title: raw.title,
        notation,
    })
}

/// Parse a tab document.
///
/// ```
/// use kalimba_tab::{parse_document, Notation, Pitch};
///
/// let doc = parse_document("---\nnotation: LETTER\n---\nC (E G)")?;
/// assert_eq!(doc.metadata.notation, Notation::Lettered);
/// assert_eq!(doc.sequence.items[1].notes, vec![Pitch::E4, Pitch::G4]);
/// # Ok::<(), kalimba_tab::KalimbaError>(())
/// ```
///
/// # Errors
/// Returns [`KalimbaError::MetadataError`] if the front matter is not valid YAML,
/// has unknown keys, or names an unknown notation. The tab text itself never
/// produces an error.
pub fn parse_document(source: &str) -> Result<TabDocument, KalimbaError> {
    parse_document_as(source, None)
}

/// Parse a tab document, decoding with `notation` instead of the notation
/// named in the front matter when one is given.
pub fn parse_document_as(
    source: &str,
    notation: Option<Notation>,
) -> Result<TabDocument, KalimbaError> {
    let (metadata_content, tab) = extract_metadata(source);
    let mut metadata = match metadata_content {
        Some(content) => parse_metadata(&content)?,
        None => Metadata::default(),
    };
    if let Some(notation) = notation {
        metadata.notation = notation;
    }

    let registry = NoteRegistry::new();
    let sequence = Decoder::new(&registry).decode(&tab, metadata.notation);
    Ok(TabDocument { metadata, sequence })
}

/// Write a tab document back out.
///
/// Front matter is only written when it carries something: a title or a
/// notation other than standard.
pub fn render_document(doc: &TabDocument) -> Result<String, KalimbaError> {
    let registry = NoteRegistry::new();
    let tab = Encoder::new(&registry).encode(&doc.sequence, doc.metadata.notation);

    if doc.metadata.title.is_none() && doc.metadata.notation == Notation::Standard {
        return Ok(tab);
    }

    let raw = RawMetadata {
        title: doc.metadata.title.clone(),
        notation: Some(doc.metadata.notation.as_str().to_string()),
    };
    let yaml =
        serde_yaml::to_string(&raw).map_err(|e| KalimbaError::MetadataError(e.to_string()))?;
    Ok(format!("---\n{}---\n{}", yaml, tab))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Pitch;
    use crate::sequence::Event;

    #[test]
    fn test_without_metadata() {
        let doc = parse_document("C4 D4").unwrap();
        assert_eq!(doc.metadata, Metadata::default());
        assert_eq!(doc.sequence.len(), 2);
    }

    #[test]
    fn test_with_metadata() {
        let source = r#"---
title: Test Song
notation: numeric
---
1 2 (3 5)"#;
        let doc = parse_document(source).unwrap();
        assert_eq!(doc.metadata.title, Some("Test Song".to_string()));
        assert_eq!(doc.metadata.notation, Notation::Numeric);
        assert_eq!(doc.sequence.items[2].notes, vec![Pitch::E4, Pitch::G4]);
    }

    #[test]
    fn test_with_metadata_at_bottom() {
        let source = "C D E\n---\nnotation: letter\n---";
        let doc = parse_document(source).unwrap();
        assert_eq!(doc.metadata.notation, Notation::Lettered);
        assert_eq!(doc.sequence.len(), 3);
    }

    #[test]
    fn test_empty_metadata_block() {
        let doc = parse_document("---\n---\nC4").unwrap();
        assert_eq!(doc.metadata.notation, Notation::Standard);
        assert_eq!(doc.sequence.len(), 1);
    }

    #[test]
    fn test_invalid_notation() {
        let err = parse_document("---\nnotation: solfege\n---\nC4").unwrap_err();
        assert_eq!(
            err,
            KalimbaError::MetadataError("Invalid notation: solfege".to_string())
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = parse_document("---\ntempo: 120\n---\nC4");
        assert!(matches!(result, Err(KalimbaError::MetadataError(_))));
    }

    #[test]
    fn test_notation_override() {
        let doc = parse_document_as("---\ntitle: X\nnotation: numeric\n---\nC D", Some(Notation::Lettered)).unwrap();
        assert_eq!(doc.metadata.notation, Notation::Lettered);
        assert_eq!(doc.metadata.title, Some("X".to_string()));
        assert_eq!(doc.sequence.len(), 2);
    }

    #[test]
    fn test_trailing_line_break_survives_front_matter() {
        let doc = parse_document("---\ntitle: X\n---\nC4 D4\n").unwrap();
        assert!(doc.sequence.items[1].line_break);
    }

    #[test]
    fn test_render_plain_standard() {
        let doc = TabDocument {
            metadata: Metadata::default(),
            sequence: Sequence::new(vec![Event::single(Pitch::C4)]),
        };
        assert_eq!(render_document(&doc).unwrap(), "C4");
    }

    #[test]
    fn test_render_then_parse() {
        let doc = TabDocument {
            metadata: Metadata {
                title: Some("Lullaby".to_string()),
                notation: Notation::Lettered,
            },
            sequence: Sequence::new(vec![
                Event::single(Pitch::G5).with_line_break(),
                Event::chord(&[Pitch::C4, Pitch::E4]),
            ]),
        };
        let text = render_document(&doc).unwrap();
        assert!(text.starts_with("---\ntitle: Lullaby\nnotation: LETTER\n---\n"));
        assert!(text.ends_with("G°\n(C E)"));
        assert_eq!(parse_document(&text).unwrap(), doc);
    }
}
