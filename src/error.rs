//! # Error Types
//!
//! Errors for the parts of the crate that can fail. The text codec itself never
//! fails: unknown tokens are dropped by the decoder, so [`crate::decode`] has no
//! error path. Errors come from the surfaces around it:
//! - `MetadataError` - invalid YAML front matter in a tab document
//! - `UnknownNotation` - a notation selector string that names no notation
//! - `UnknownPitch` - a conversion-service note outside the 17-tine range
//! - `UnknownSpelling` - a pitch string that is not a standard spelling
//! - `CorrectionOutOfRange` - a correction hint outside -2..=2
//! - `PayloadError` - malformed JSON from or for a service
//! - `EditError` - a structural edit addressed an event that does not exist

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum KalimbaError {
    /// Invalid front matter in a tab document.
    ///
    /// # Example
    /// ```
    /// # use kalimba_tab::KalimbaError;
    /// let err = KalimbaError::MetadataError("unknown field `tempo`".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: unknown field `tempo`");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),

    #[error("Unknown notation: '{0}'. Expected STANDARD, NUMERIC or LETTER")]
    UnknownNotation(String),

    /// A note reported by the conversion service that has no tine.
    ///
    /// # Example
    /// ```
    /// # use kalimba_tab::KalimbaError;
    /// let err = KalimbaError::UnknownPitch { pitch: "F".to_string(), octave: 6 };
    /// assert_eq!(err.to_string(), "Unknown pitch F6: not one of the 17 kalimba tines");
    /// ```
    #[error("Unknown pitch {pitch}{octave}: not one of the 17 kalimba tines")]
    UnknownPitch { pitch: String, octave: i64 },

    /// A string that is not the standard spelling of a tine, e.g. `"H4"`.
    #[error("Unknown pitch '{0}': expected a standard spelling C4 through E6")]
    UnknownSpelling(String),

    #[error("Correction '{name}' out of range: {value} (expected -2..=2)")]
    CorrectionOutOfRange { name: &'static str, value: i32 },

    #[error("Invalid payload: {0}")]
    PayloadError(String),

    #[error("Edit error at event {index}: {message}")]
    EditError { index: usize, message: String },
}
