use kalimba_tab::{KalimbaError, Notation, Sequence, SequencePayload};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct BindingError {
    message: String,
}

impl From<KalimbaError> for BindingError {
    fn from(e: KalimbaError) -> Self {
        BindingError {
            message: e.to_string(),
        }
    }
}

fn to_js_error(e: KalimbaError) -> JsValue {
    let error = BindingError::from(e);
    let json = serde_json::to_string(&error)
        .unwrap_or_else(|_| format!("{{\"message\":{:?}}}", error.message));
    JsValue::from_str(&json)
}

fn parse_notation(notation: &str) -> Result<Notation, JsValue> {
    notation.parse().map_err(to_js_error)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| to_js_error(KalimbaError::PayloadError(e.to_string())))
}

/// Encode a sequence (as `{"items": [{"notes": ["C4"], "br": false}]}`) to tab text
#[wasm_bindgen]
pub fn encode(sequence_json: &str, notation: &str) -> Result<String, JsValue> {
    let notation = parse_notation(notation)?;
    let sequence: Sequence = serde_json::from_str(sequence_json)
        .map_err(|e| to_js_error(KalimbaError::PayloadError(e.to_string())))?;
    Ok(kalimba_tab::encode(&sequence, notation))
}

/// Decode tab text to a sequence JSON. Unknown tokens are dropped.
#[wasm_bindgen]
pub fn decode(text: &str, notation: &str) -> Result<String, JsValue> {
    let notation = parse_notation(notation)?;
    to_json(&kalimba_tab::decode(text, notation))
}

/// Rewrite tab text from one notation into another
#[wasm_bindgen]
pub fn transcribe(text: &str, from: &str, to: &str) -> Result<String, JsValue> {
    Ok(kalimba_tab::transcribe(
        text,
        parse_notation(from)?,
        parse_notation(to)?,
    ))
}

/// Body of an export request for the given tab text
#[wasm_bindgen]
pub fn export_request(text: &str, notation: &str) -> Result<String, JsValue> {
    let notation = parse_notation(notation)?;
    let sequence = kalimba_tab::decode(text, notation);
    SequencePayload::from_sequence(&sequence)
        .to_json()
        .map_err(to_js_error)
}

/// Tab text for a conversion service response
#[wasm_bindgen]
pub fn from_conversion(response_json: &str, notation: &str) -> Result<String, JsValue> {
    let notation = parse_notation(notation)?;
    let sequence = kalimba_tab::sequence_from_conversion(response_json).map_err(to_js_error)?;
    Ok(kalimba_tab::encode(&sequence, notation))
}
