//! `FileHeader` stream interpretation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::detect::HWP_SIGNATURE;

/// Byte offset of the property flag word.
pub const FLAGS_OFFSET: usize = 36;

const VERSION_OFFSET: usize = 32;
const SIGNATURE_LEN: usize = 32;

/// Property bits of the `FileHeader` flag word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderFlags(u32);

impl HeaderFlags {
    /// Body sections are raw-deflate compressed.
    pub const COMPRESSED: u32 = 1;
    /// Document is password protected.
    pub const PASSWORD: u32 = 1 << 1;
    /// Distribution document (body stored encrypted under `ViewText`).
    pub const DISTRIBUTION: u32 = 1 << 2;

    /// Wrap a raw flag word.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw flag word.
    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn compressed(&self) -> bool {
        self.0 & Self::COMPRESSED != 0
    }

    pub fn password_protected(&self) -> bool {
        self.0 & Self::PASSWORD != 0
    }

    pub fn distribution(&self) -> bool {
        self.0 & Self::DISTRIBUTION != 0
    }
}

/// Document format version, stored as `0xMMnnPPrr`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HwpVersion {
    pub major: u8,
    pub minor: u8,
    pub build: u8,
    pub revision: u8,
}

impl HwpVersion {
    fn from_word(word: u32) -> Self {
        let [revision, build, minor, major] = word.to_le_bytes();
        Self {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl fmt::Display for HwpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// Parsed `FileHeader` stream.
///
/// Parsing never fails: fields that the stream is too short to hold keep their
/// defaults, so a truncated header reads as an uncompressed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHeader {
    /// Whether the stream starts with the `HWP Document File` signature.
    pub signature_valid: bool,
    pub version: HwpVersion,
    pub flags: HeaderFlags,
}

impl FileHeader {
    pub fn parse(data: &[u8]) -> Self {
        let signature_valid = data.len() >= SIGNATURE_LEN && data.starts_with(HWP_SIGNATURE);
        let version = read_u32_le(data, VERSION_OFFSET)
            .map(HwpVersion::from_word)
            .unwrap_or_default();
        let flags = read_u32_le(data, FLAGS_OFFSET)
            .map(HeaderFlags::from_bits)
            .unwrap_or_default();

        Self {
            signature_valid,
            version,
            flags,
        }
    }
}

/// Whether the body sections described by this header are compressed.
///
/// A header shorter than `FLAGS_OFFSET + 4` bytes is treated as uncompressed.
pub fn is_compressed(header: &[u8]) -> bool {
    read_u32_le(header, FLAGS_OFFSET)
        .map(|bits| HeaderFlags::from_bits(bits).compressed())
        .unwrap_or(false)
}

fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
