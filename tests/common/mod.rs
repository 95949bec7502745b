//! Shared fixtures: builds real compound-file HWP documents in memory.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use cfb::CompoundFile;
use flate2::write::DeflateEncoder;
use flate2::Compression;

pub const PARA_HEADER: u16 = 66;
pub const PARA_TEXT: u16 = 67;
pub const PARA_CHAR_SHAPE: u16 = 68;

/// Little-endian UTF-16 bytes of `text`.
pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// One record: packed header (extended when the payload needs it) plus payload.
pub fn record(tag: u16, level: u16, payload: &[u8]) -> Vec<u8> {
    let tag = (tag as u32) & 0x3FF;
    let level = ((level as u32) & 0x3FF) << 10;
    let mut out = Vec::with_capacity(payload.len() + 8);
    if payload.len() >= 0xFFF {
        out.extend_from_slice(&(tag | level | (0xFFF << 20)).to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    } else {
        out.extend_from_slice(&(tag | level | ((payload.len() as u32) << 20)).to_le_bytes());
    }
    out.extend_from_slice(payload);
    out
}

/// A paragraph: header record followed by its text record.
pub fn paragraph(text: &str) -> Vec<u8> {
    let mut out = record(PARA_HEADER, 0, &[0u8; 22]);
    out.extend(record(PARA_TEXT, 1, &utf16(text)));
    out
}

/// Raw-deflate `data` (no zlib framing).
pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// A 256-byte `FileHeader` stream with version 5.0.3.4 and the given flags.
pub fn file_header(flags: u32) -> Vec<u8> {
    let mut data = vec![0u8; 256];
    data[..17].copy_from_slice(b"HWP Document File");
    data[32..36].copy_from_slice(&0x0500_0304u32.to_le_bytes());
    data[36..40].copy_from_slice(&flags.to_le_bytes());
    data
}

/// Builder for test documents.
#[derive(Default)]
pub struct HwpBuilder {
    header: Option<Vec<u8>>,
    compressed: bool,
    sections: Vec<(String, Vec<u8>)>,
    extra: Vec<(String, Vec<u8>)>,
}

impl HwpBuilder {
    pub fn new() -> Self {
        Self {
            header: Some(file_header(0)),
            ..Self::default()
        }
    }

    /// Set the compression flag; section bodies added afterwards are deflated.
    pub fn compressed(mut self) -> Self {
        self.compressed = true;
        self.header = Some(file_header(1));
        self
    }

    pub fn header(mut self, header: Vec<u8>) -> Self {
        self.header = Some(header);
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header = None;
        self
    }

    /// Add `BodyText/Section{index}` with an already encoded record stream.
    pub fn section(mut self, index: u32, records: Vec<u8>) -> Self {
        let body = if self.compressed {
            deflate(&records)
        } else {
            records
        };
        self.sections.push((format!("/BodyText/Section{}", index), body));
        self
    }

    /// Add `BodyText/Section{index}` stored exactly as given.
    pub fn raw_section(mut self, index: u32, body: Vec<u8>) -> Self {
        self.sections.push((format!("/BodyText/Section{}", index), body));
        self
    }

    /// Add an arbitrary stream (absolute path).
    pub fn stream(mut self, path: &str, data: Vec<u8>) -> Self {
        self.extra.push((path.to_string(), data));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut comp = CompoundFile::create(Cursor::new(Vec::new())).unwrap();
        comp.create_storage("/BodyText").unwrap();

        let header = self.header.map(|h| ("/FileHeader".to_string(), h));
        for (path, data) in header.into_iter().chain(self.sections).chain(self.extra) {
            let mut stream = comp.create_stream(&path).unwrap();
            stream.write_all(&data).unwrap();
            stream.flush().unwrap();
        }

        comp.flush().unwrap();
        comp.into_inner().into_inner()
    }
}
