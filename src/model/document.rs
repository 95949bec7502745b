//! Document-level types.

use serde::{Deserialize, Serialize};

use crate::container::FileHeader;

/// A parsed HWP document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (version, header flags)
    pub metadata: Metadata,

    /// Body-text sections in reading order
    pub sections: Vec<Section>,

    /// Counters collected while parsing
    pub stats: ExtractionStats,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of sections in the document.
    pub fn section_count(&self) -> u32 {
        self.sections.len() as u32
    }

    /// Add a section to the document.
    pub fn add_section(&mut self, section: Section) {
        self.stats.record(&section);
        self.sections.push(section);
    }

    /// Check if the document has any text.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Section::is_empty)
    }

    /// Plain text of the whole document, one line per paragraph.
    ///
    /// Sections without text are skipped so no blank separator lines appear.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .filter(|s| !s.is_empty())
            .map(Section::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Format version (e.g., "5.0.3.4")
    pub version: String,

    /// Whether `FileHeader` carries the HWP signature
    pub signature_valid: bool,

    /// Whether body sections are compressed
    pub compressed: bool,

    /// Whether the document is password protected
    pub password_protected: bool,

    /// Whether this is a distribution document
    pub distribution: bool,

    /// Number of body-text section streams in the container
    pub section_count: u32,
}

impl Metadata {
    /// Build metadata from a parsed `FileHeader`.
    pub fn from_header(header: &FileHeader) -> Self {
        Self {
            version: header.version.to_string(),
            signature_valid: header.signature_valid,
            compressed: header.flags.compressed(),
            password_protected: header.flags.password_protected(),
            distribution: header.flags.distribution(),
            section_count: 0,
        }
    }
}

/// One body-text section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section index (`BodyText/Section{index}`)
    pub index: u32,

    /// Trimmed, non-empty paragraph texts
    pub paragraphs: Vec<String>,

    /// Number of records decoded from the stream
    pub record_count: u32,

    /// Whether record parsing stopped early on a malformed record
    pub truncated: bool,

    /// Whether the stream was flagged compressed but stored raw
    pub inflate_failed: bool,
}

impl Section {
    /// Create an empty section.
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Paragraphs joined with newlines.
    pub fn plain_text(&self) -> String {
        self.paragraphs.join("\n")
    }
}

/// Statistics collected during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Sections parsed
    pub section_count: u32,

    /// Sections skipped (unreadable or over the size cap)
    pub skipped_sections: u32,

    /// Records decoded across all sections
    pub record_count: u32,

    /// Non-empty paragraphs extracted
    pub paragraph_count: u32,

    /// Characters extracted (excluding whitespace)
    pub char_count: u32,

    /// Sections whose record stream was cut short
    pub truncated_sections: u32,

    /// Sections whose inflation failed and were parsed raw
    pub inflate_fallbacks: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, section: &Section) {
        self.section_count += 1;
        self.record_count += section.record_count;
        self.paragraph_count += section.paragraphs.len() as u32;
        self.char_count += section
            .paragraphs
            .iter()
            .map(|p| p.chars().filter(|c| !c.is_whitespace()).count() as u32)
            .sum::<u32>();
        if section.truncated {
            self.truncated_sections += 1;
        }
        if section.inflate_failed {
            self.inflate_fallbacks += 1;
        }
    }
}
