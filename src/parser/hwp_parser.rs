//! HWP document parser.

use std::borrow::Cow;
use std::path::Path;

use crate::container::{
    list_content_streams, read_file_header, read_stream, Container, ContainerCapability,
    FileHeader, StreamId,
};
use crate::error::Result;
use crate::model::{Document, Metadata, Section};

use super::inflate::decompress;
use super::options::{ErrorMode, ParseOptions};
use super::section::parse_section;

/// Structured HWP parser: container, header, then every body-text section.
#[derive(Debug, Clone)]
pub struct HwpParser {
    capability: ContainerCapability,
    options: ParseOptions,
}

impl HwpParser {
    /// Create a parser using this build's container reader.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self::with_capability(ContainerCapability::detect(), options)
    }

    /// Create a parser with an explicit container capability.
    pub fn with_capability(capability: ContainerCapability, options: ParseOptions) -> Self {
        Self {
            capability,
            options,
        }
    }

    /// The container capability this parser uses.
    pub fn capability(&self) -> &ContainerCapability {
        &self.capability
    }

    /// The parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse an HWP file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let data = std::fs::read(path)?;
        self.parse(&data)
    }

    /// Parse an HWP document held in memory.
    ///
    /// Fails only when the container cannot be opened or lacks `FileHeader`
    /// (and, in strict mode, when a section cannot be read). The container is
    /// dropped before this returns, whichever way it returns.
    pub fn parse(&self, data: &[u8]) -> Result<Document> {
        let mut container = self.capability.open(data)?;

        let header = FileHeader::parse(&read_file_header(container.as_mut())?);
        if !header.signature_valid {
            log::debug!("FileHeader has no HWP signature; parsing anyway");
        }
        if header.flags.distribution() {
            log::warn!("Distribution document: body text may be unreadable");
        }

        let mut document = Document::new();
        document.metadata = Metadata::from_header(&header);

        let streams = list_content_streams(container.as_ref());
        document.metadata.section_count = streams.len() as u32;
        log::debug!(
            "HWP {} with {} section(s), compressed: {}",
            document.metadata.version,
            streams.len(),
            header.flags.compressed()
        );

        for id in &streams {
            match self.parse_stream(container.as_mut(), id, header.flags.compressed()) {
                Ok(section) => document.add_section(section),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Skipping {}: {}", id, e);
                    document.stats.skipped_sections += 1;
                }
            }
        }

        Ok(document)
    }

    fn parse_stream(
        &self,
        container: &mut dyn Container,
        id: &StreamId,
        compressed: bool,
    ) -> Result<Section> {
        let raw = read_stream(container, id)?;
        let data = decompress(id.path(), &raw, compressed, self.options.max_stream_size)?;

        let mut section = parse_section(id.index(), &data);
        section.inflate_failed = compressed && matches!(data, Cow::Borrowed(_));
        if section.truncated {
            log::warn!("{}: record stream truncated", id);
        }
        Ok(section)
    }
}

impl Default for HwpParser {
    fn default() -> Self {
        Self::new()
    }
}
