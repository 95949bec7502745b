//! Paragraph text decoding.
//!
//! `PARA_TEXT` payloads are UTF-16LE code units. Codes below 32 are control
//! characters; some of them introduce an inline object (field, drawing,
//! footnote anchor, ...) whose parameters occupy a fixed number of bytes right
//! after the code.

/// Control codes followed by an inline object parameter block.
///
/// Collected from sample documents rather than a format reference, so the
/// table may be incomplete. Codes outside it are logged at debug level.
pub const INLINE_CONTROL_CODES: [u16; 14] = [1, 2, 3, 4, 11, 12, 14, 15, 16, 17, 18, 21, 22, 23];

/// Bytes of inline object parameters after an inline control code.
pub const INLINE_CONTROL_EXTRA: usize = 12;

const NUL: u16 = 0;
const TAB: u16 = 9;
const LINE_FEED: u16 = 10;
const CARRIAGE_RETURN: u16 = 13;
const FIRST_PRINTABLE: u16 = 32;

/// Whether `code` is followed by an inline object parameter block.
pub fn is_inline_control(code: u16) -> bool {
    INLINE_CONTROL_CODES.contains(&code)
}

/// Decode a `PARA_TEXT` payload.
///
/// Never fails: unknown control codes and lone surrogates are dropped, a
/// trailing odd byte is ignored. The result is not trimmed.
pub fn decode_paragraph(payload: &[u8]) -> String {
    let mut text = String::with_capacity(payload.len() / 2);
    let mut pos = 0;

    while pos + 2 <= payload.len() {
        let code = u16::from_le_bytes([payload[pos], payload[pos + 1]]);
        pos += 2;

        match code {
            NUL | CARRIAGE_RETURN => {}
            LINE_FEED => text.push('\n'),
            TAB => text.push('\t'),
            c if is_inline_control(c) => pos += INLINE_CONTROL_EXTRA,
            c if c < FIRST_PRINTABLE => {
                log::debug!("Unrecognized control code {} at byte {}", c, pos - 2);
            }
            c => {
                if let Some(ch) = char::from_u32(c as u32) {
                    text.push(ch);
                }
            }
        }
    }

    text
}
