//! Section stream text extraction.

use crate::model::Section;

use super::para_text::decode_paragraph;
use super::record::RecordIter;

/// Parse the (already decompressed) bytes of one body-text section.
///
/// Only `PARA_TEXT` records are decoded; every other record is counted and
/// skipped. A malformed tail ends parsing and marks the section truncated.
pub fn parse_section(index: u32, data: &[u8]) -> Section {
    let mut section = Section::new(index);
    let mut records = RecordIter::new(data);

    for record in records.by_ref() {
        section.record_count += 1;
        if !record.is_para_text() {
            continue;
        }

        let text = decode_paragraph(record.payload);
        let text = text.trim();
        if !text.is_empty() {
            section.paragraphs.push(text.to_string());
        }
    }

    if let Some(err) = records.truncation() {
        log::debug!("Section{}: {}", index, err);
        section.truncated = true;
    }

    section
}
