//! Plain text rendering for HWP documents.

use unicode_normalization::UnicodeNormalization;

use crate::model::Document;

/// Convert a document to plain text, one line per paragraph.
pub fn to_text(doc: &Document, normalize_unicode: bool) -> String {
    finish_text(&doc.plain_text(), normalize_unicode)
}

/// Trim extracted text and optionally apply NFC normalization.
///
/// Older documents sometimes store Hangul as decomposed jamo sequences; NFC
/// composes them into syllables.
pub fn finish_text(text: &str, normalize_unicode: bool) -> String {
    let text = text.trim();
    if normalize_unicode {
        text.nfc().collect()
    } else {
        text.to_string()
    }
}
