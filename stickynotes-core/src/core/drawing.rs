//! Helpers for the opaque drawing payload stored in `drawing_paths`.
//!
//! Drawing surfaces hand back a base64 PNG, sometimes wrapped in a
//! `data:image/...;base64,` URL. The store never looks inside; only the
//! share and text-recognition paths do.

use crate::{Result, StickyNotesError};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// PNG files start with these eight bytes.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Returns the bare base64 payload, dropping a leading `data:image...,` prefix.
pub fn strip_data_url_prefix(drawing: &str) -> &str {
    if drawing.starts_with("data:image") {
        drawing.split_once(',').map_or("", |(_, payload)| payload)
    } else {
        drawing
    }
}

/// Wraps a bare base64 PNG payload in a data URL.
pub fn to_png_data_url(drawing: &str) -> String {
    format!("data:image/png;base64,{}", strip_data_url_prefix(drawing))
}

/// Decodes the drawing into PNG bytes.
///
/// # Errors
///
/// Returns [`StickyNotesError::InvalidDrawing`] if the payload is empty, is
/// not valid base64, or does not decode to a PNG image.
pub fn decode_png(drawing: &str) -> Result<Vec<u8>> {
    let payload = strip_data_url_prefix(drawing).trim();
    if payload.is_empty() {
        return Err(StickyNotesError::InvalidDrawing("drawing is empty".to_string()));
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| StickyNotesError::InvalidDrawing(e.to_string()))?;

    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(StickyNotesError::InvalidDrawing(
            "drawing is not a PNG image".to_string(),
        ));
    }
    Ok(bytes)
}

#[cfg(test)]
pub(crate) fn tiny_png_base64() -> String {
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend_from_slice(b"\0\0\0\rIHDR");
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_url_prefix("QUJD"), "QUJD");
        assert_eq!(strip_data_url_prefix("data:image/png"), "");
    }

    #[test]
    fn test_to_png_data_url_does_not_double_wrap() {
        assert_eq!(to_png_data_url("QUJD"), "data:image/png;base64,QUJD");
        assert_eq!(
            to_png_data_url("data:image/jpeg;base64,QUJD"),
            "data:image/png;base64,QUJD"
        );
    }

    #[test]
    fn test_decode_png_accepts_both_forms() {
        let payload = tiny_png_base64();
        let bare = decode_png(&payload).unwrap();
        let wrapped = decode_png(&format!("data:image/png;base64,{payload}")).unwrap();
        assert_eq!(bare, wrapped);
        assert!(bare.starts_with(&PNG_SIGNATURE));
    }

    #[test]
    fn test_decode_png_rejects_bad_payloads() {
        assert!(matches!(decode_png(""), Err(StickyNotesError::InvalidDrawing(_))));
        assert!(matches!(decode_png("%%%"), Err(StickyNotesError::InvalidDrawing(_))));
        // Valid base64 ("ABC"), but not a PNG.
        assert!(matches!(decode_png("QUJD"), Err(StickyNotesError::InvalidDrawing(_))));
    }
}
