//! Record stream parsing.
//!
//! A section stream is a flat sequence of records, each introduced by a packed
//! little-endian 32-bit header:
//!
//! ```text
//!  31          20 19        10 9          0
//! +--------------+------------+------------+
//! |     size     |   level    |   tag id   |
//! +--------------+------------+------------+
//! ```
//!
//! A size field of `0xFFF` means the real size follows as another 32-bit word.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Size field value announcing an extended 32-bit size.
pub const EXTENDED_SIZE: u32 = 0xFFF;

const TAG_MASK: u32 = 0x3FF;
const LEVEL_MASK: u32 = 0x3FF;
const SIZE_MASK: u32 = 0xFFF;
const LEVEL_SHIFT: u32 = 10;
const SIZE_SHIFT: u32 = 20;

/// Record tag ids.
pub mod tags {
    /// First tag id of the document record range.
    pub const BEGIN: u16 = 0x010;

    pub const PARA_HEADER: u16 = BEGIN + 50;
    pub const PARA_TEXT: u16 = BEGIN + 51;
    pub const PARA_CHAR_SHAPE: u16 = BEGIN + 52;
    pub const PARA_LINE_SEG: u16 = BEGIN + 53;
    pub const PARA_RANGE_TAG: u16 = BEGIN + 54;
    pub const CTRL_HEADER: u16 = BEGIN + 55;
    pub const LIST_HEADER: u16 = BEGIN + 56;
    pub const PAGE_DEF: u16 = BEGIN + 57;
    pub const FOOTNOTE_SHAPE: u16 = BEGIN + 58;
    pub const PAGE_BORDER_FILL: u16 = BEGIN + 59;
    pub const SHAPE_COMPONENT: u16 = BEGIN + 60;
    pub const TABLE: u16 = BEGIN + 61;
    pub const CTRL_DATA: u16 = BEGIN + 71;

    /// Human-readable tag name for diagnostics.
    pub fn name(tag: u16) -> &'static str {
        match tag {
            PARA_HEADER => "PARA_HEADER",
            PARA_TEXT => "PARA_TEXT",
            PARA_CHAR_SHAPE => "PARA_CHAR_SHAPE",
            PARA_LINE_SEG => "PARA_LINE_SEG",
            PARA_RANGE_TAG => "PARA_RANGE_TAG",
            CTRL_HEADER => "CTRL_HEADER",
            LIST_HEADER => "LIST_HEADER",
            PAGE_DEF => "PAGE_DEF",
            FOOTNOTE_SHAPE => "FOOTNOTE_SHAPE",
            PAGE_BORDER_FILL => "PAGE_BORDER_FILL",
            SHAPE_COMPONENT => "SHAPE_COMPONENT",
            TABLE => "TABLE",
            CTRL_DATA => "CTRL_DATA",
            _ => "UNKNOWN",
        }
    }
}

/// Decoded record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    /// 10-bit tag id
    pub tag_id: u16,
    /// 10-bit nesting level
    pub level: u16,
    /// Payload size in bytes
    pub size: u32,
    /// Bytes the header itself occupies (4, or 8 with an extended size)
    pub header_len: u8,
}

impl RecordHeader {
    /// Split a packed header word into tag, level and the 12-bit size field.
    pub fn unpack(word: u32) -> (u16, u16, u32) {
        let tag_id = (word & TAG_MASK) as u16;
        let level = ((word >> LEVEL_SHIFT) & LEVEL_MASK) as u16;
        let size = (word >> SIZE_SHIFT) & SIZE_MASK;
        (tag_id, level, size)
    }

    /// Decode the header at the start of `data`.
    ///
    /// Returns `None` when `data` is too short for the header, including the
    /// extended size word when the size field is `0xFFF`.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let word = read_u32_le(data, 0)?;
        let (tag_id, level, size_field) = Self::unpack(word);

        let (size, header_len) = if size_field == EXTENDED_SIZE {
            (read_u32_le(data, 4)?, 8)
        } else {
            (size_field, 4)
        };

        Some(Self {
            tag_id,
            level,
            size,
            header_len,
        })
    }
}

/// A record borrowing its payload from the section stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub header: RecordHeader,
    /// Offset of the record header within the stream
    pub offset: usize,
    pub payload: &'a [u8],
}

impl Record<'_> {
    pub fn tag_id(&self) -> u16 {
        self.header.tag_id
    }

    pub fn is_para_text(&self) -> bool {
        self.header.tag_id == tags::PARA_TEXT
    }
}

/// Iterator over the records of a section stream.
///
/// Iteration stops at the first header that does not fit or whose payload runs
/// past the end of the stream. Everything yielded before that point stays valid.
pub struct RecordIter<'a> {
    data: &'a [u8],
    pos: usize,
    truncation: Option<Error>,
}

impl<'a> RecordIter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            truncation: None,
        }
    }

    /// Why iteration stopped early, if it did.
    pub fn truncation(&self) -> Option<&Error> {
        self.truncation.as_ref()
    }

    /// Current byte offset into the stream.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn stop(&mut self, size: usize) {
        self.truncation = Some(Error::RecordBounds {
            offset: self.pos,
            size,
            remaining: self.data.len() - self.pos,
        });
        self.pos = self.data.len();
    }
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Record<'a>> {
        let data: &'a [u8] = self.data;
        let rest = &data[self.pos..];
        if rest.len() < 4 {
            return None;
        }

        let header = match RecordHeader::parse(rest) {
            Some(header) => header,
            None => {
                // Extended size word missing
                self.stop(8);
                return None;
            }
        };

        let start = header.header_len as usize;
        let size = header.size as usize;
        let end = match start.checked_add(size) {
            Some(end) if end <= rest.len() => end,
            _ => {
                self.stop(start.saturating_add(size));
                return None;
            }
        };

        let record = Record {
            header,
            offset: self.pos,
            payload: &rest[start..end],
        };
        self.pos += end;
        Some(record)
    }
}

/// Parse every record of a section stream.
pub fn parse_records(data: &[u8]) -> Vec<Record<'_>> {
    RecordIter::new(data).collect()
}

fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
