//! Handwriting-to-text conversion for drawing notes.
//!
//! Recognition itself is delegated to an external service behind
//! [`TextRecognizer`]. With the `ocr` feature, [`OcrSpaceClient`] talks to an
//! OCR.space-compatible HTTP endpoint with a single request per call.

use crate::core::drawing;
use crate::{Note, NoteDraft, NoteStore, Result, SlotStore, StickyNotesError};
use serde::{Deserialize, Serialize};

/// Turns a drawing payload into recognised text.
pub trait TextRecognizer {
    /// `drawing` is the note's `drawing_paths`, with or without a data-URL prefix.
    fn recognize(&self, drawing: &str) -> Result<String>;
}

/// Connection settings for the OCR service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrConfig {
    pub endpoint: String,
    pub api_key: String,
    pub language: String,
    pub engine: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.ocr.space/parse/image".to_string(),
            api_key: String::new(),
            language: "eng".to_string(),
            engine: 2,
        }
    }
}

/// Outcome of [`NoteStore::convert_drawing_to_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// The recognised text was saved as the note's content.
    Converted(Note),
    /// The note was left as it was; `advisory` is meant for the user.
    Unchanged { advisory: String },
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    #[serde(rename = "IsErroredOnProcessing", default)]
    is_errored: bool,
    #[serde(rename = "ErrorMessage", default)]
    error_message: Option<serde_json::Value>,
    #[serde(rename = "ParsedResults", default)]
    parsed_results: Option<Vec<ParsedResult>>,
}

#[derive(Debug, Deserialize)]
struct ParsedResult {
    #[serde(rename = "ParsedText", default)]
    parsed_text: String,
}

/// Extracts the first parsed text from an OCR.space response body.
///
/// # Errors
///
/// Returns [`StickyNotesError::ExternalService`] if the body is not a
/// response document or reports a processing error.
pub fn parse_ocr_response(body: &str) -> Result<String> {
    let response: OcrResponse = serde_json::from_str(body)
        .map_err(|e| StickyNotesError::ExternalService(format!("Unexpected OCR response: {e}")))?;

    if response.is_errored {
        let reason = match response.error_message {
            Some(serde_json::Value::Array(messages)) => messages
                .first()
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error")
                .to_string(),
            Some(serde_json::Value::String(message)) => message,
            _ => "unknown error".to_string(),
        };
        return Err(StickyNotesError::ExternalService(format!("OCR failed: {reason}")));
    }

    Ok(response
        .parsed_results
        .and_then(|results| results.into_iter().next())
        .map(|result| result.parsed_text)
        .unwrap_or_default())
}

/// OCR.space HTTP client.
#[cfg(feature = "ocr")]
pub struct OcrSpaceClient {
    http: reqwest::blocking::Client,
    config: OcrConfig,
}

#[cfg(feature = "ocr")]
impl OcrSpaceClient {
    pub fn new(config: OcrConfig) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            config,
        }
    }
}

#[cfg(feature = "ocr")]
impl TextRecognizer for OcrSpaceClient {
    fn recognize(&self, drawing: &str) -> Result<String> {
        let image = drawing::to_png_data_url(drawing);
        let engine = self.config.engine.to_string();
        let form = [
            ("base64Image", image.as_str()),
            ("language", self.config.language.as_str()),
            ("scale", "true"),
            ("OCREngine", engine.as_str()),
        ];

        let body = self
            .http
            .post(&self.config.endpoint)
            .header("apikey", &self.config.api_key)
            .form(&form)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(|e| StickyNotesError::ExternalService(format!("OCR request failed: {e}")))?;

        parse_ocr_response(&body)
    }
}

impl<S: SlotStore> NoteStore<S> {
    /// Recognises the handwriting of note `id` and saves it as the note's content.
    ///
    /// Makes one recognition attempt. When the note has no drawing, the
    /// recognizer fails, or it finds no text, nothing is saved and an
    /// advisory is returned instead; recognizer failures are logged.
    ///
    /// # Errors
    ///
    /// Returns [`StickyNotesError::NoteNotFound`] if no note has `id`, or a
    /// persistence error if saving the text fails.
    pub fn convert_drawing_to_text(
        &self,
        id: &str,
        recognizer: &dyn TextRecognizer,
    ) -> Result<Conversion> {
        let note = self
            .get_note(id)
            .ok_or_else(|| StickyNotesError::NoteNotFound(id.to_string()))?;

        let Some(drawing) = note
            .drawing_paths
            .as_deref()
            .filter(|d| !drawing::strip_data_url_prefix(d).is_empty())
        else {
            return Ok(Conversion::Unchanged {
                advisory: "Please write something before converting.".to_string(),
            });
        };

        match recognizer.recognize(drawing) {
            Ok(text) if !text.trim().is_empty() => {
                let saved = self.save_note(NoteDraft::for_note(id).content(text))?;
                Ok(Conversion::Converted(saved))
            }
            Ok(_) => Ok(Conversion::Unchanged {
                advisory: "No text was found in your handwriting.".to_string(),
            }),
            Err(e) => {
                log::warn!("handwriting conversion for note {id} failed: {e}");
                Ok(Conversion::Unchanged {
                    advisory: "Could not convert your handwriting to text. Please try again."
                        .to_string(),
                })
            }
        }
    }
}
