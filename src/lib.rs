//! # unhwp
//!
//! Plain-text extraction for HWP 5.x word-processor documents.
//!
//! HWP files are compound-file containers whose `BodyText/SectionN` streams hold
//! a packed record stream, optionally raw-deflate compressed. This library walks
//! that structure down to the UTF-16 paragraph text, and falls back to a
//! heuristic Hangul line scan when the structure cannot be read.
//!
//! ## Quick Start
//!
//! ```no_run
//! let data = std::fs::read("notice.hwp").unwrap();
//!
//! // Structured parse first, heuristic scan second; never fails
//! if let Some(text) = unhwp::extract_text(&data) {
//!     println!("{}", text);
//! }
//!
//! // Typed access to the parsed document
//! let doc = unhwp::parse_bytes(&data)?;
//! println!("{} sections, {} paragraphs", doc.section_count(), doc.stats.paragraph_count);
//! # Ok::<(), unhwp::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Compressed and uncompressed sections**: raw-deflate streams are inflated
//!   with a size cap; mislabelled streams are parsed raw
//! - **Tolerant record parsing**: truncated streams keep every record before the cut
//! - **Fallback scanning**: Korean text is recovered from damaged or non-container files
//! - **Parallel batches**: [`extract_many`] uses Rayon across documents

pub mod container;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use container::{ContainerCapability, ContainerReader, FileHeader, HeaderFlags, StreamId};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_hwp, is_hwp_bytes};
pub use error::{Error, Result};
pub use extract::{
    Extraction, ExtractionStrategy, FallbackExtractor, FallbackOptions, StrategyChain,
    StructuredStrategy,
};
pub use model::{Document, ExtractionStats, Metadata, Section};
pub use parser::{ErrorMode, HwpParser, ParseOptions};
pub use render::JsonFormat;

use std::path::Path;
use std::sync::{Arc, OnceLock};

use rayon::prelude::*;

/// Builder holding the container capability and options for extraction.
///
/// The capability is decided when the extractor is created; if no container
/// reader exists, a warning is logged once and every call goes straight to the
/// fallback scanner.
///
/// # Example
///
/// ```no_run
/// use unhwp::{FallbackOptions, HwpExtractor, ParseOptions};
///
/// let extractor = HwpExtractor::new()
///     .with_options(ParseOptions::new().with_unicode_normalization(true))
///     .with_fallback_options(FallbackOptions::new().with_min_line_chars(8));
///
/// let text = extractor.extract_file("notice.hwp");
/// ```
#[derive(Debug, Clone)]
pub struct HwpExtractor {
    capability: ContainerCapability,
    parse_options: ParseOptions,
    fallback_options: FallbackOptions,
    fallback: Arc<FallbackExtractor>,
    chain: StrategyChain,
}

impl HwpExtractor {
    /// Create an extractor using this build's container reader.
    pub fn new() -> Self {
        Self::with_capability(ContainerCapability::detect())
    }

    /// Create an extractor with an explicit container capability.
    pub fn with_capability(capability: ContainerCapability) -> Self {
        if let ContainerCapability::Unavailable(reason) = &capability {
            log::warn!(
                "{}; using fallback extraction only",
                Error::DependencyUnavailable(reason.clone())
            );
        }
        let fallback_options = FallbackOptions::default();
        let mut extractor = Self {
            capability,
            parse_options: ParseOptions::default(),
            fallback: Arc::new(FallbackExtractor::new(fallback_options.clone())),
            fallback_options,
            chain: StrategyChain::new(),
        };
        extractor.rebuild_chain();
        extractor
    }

    /// Set parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self.rebuild_chain();
        self
    }

    /// Set fallback scanner options.
    pub fn with_fallback_options(mut self, options: FallbackOptions) -> Self {
        self.fallback = Arc::new(FallbackExtractor::new(options.clone()));
        self.fallback_options = options;
        self.rebuild_chain();
        self
    }

    /// Enable strict parsing mode.
    pub fn strict(self) -> Self {
        let options = self.parse_options.clone().strict();
        self.with_options(options)
    }

    pub fn capability(&self) -> &ContainerCapability {
        &self.capability
    }

    pub fn options(&self) -> &ParseOptions {
        &self.parse_options
    }

    pub fn fallback_options(&self) -> &FallbackOptions {
        &self.fallback_options
    }

    /// The fallback scanner shared with the chain.
    pub fn fallback(&self) -> &FallbackExtractor {
        &self.fallback
    }

    /// The strategies tried by [`extract_text`](Self::extract_text), in order.
    pub fn chain(&self) -> &StrategyChain {
        &self.chain
    }

    fn parser(&self) -> HwpParser {
        HwpParser::with_capability(self.capability.clone(), self.parse_options.clone())
    }

    fn rebuild_chain(&mut self) {
        let mut chain = StrategyChain::new();
        if self.capability.is_available() {
            chain.push(Arc::new(StructuredStrategy::new(self.parser())));
        }
        chain.push(self.fallback.clone());
        self.chain = chain;
    }

    /// Extract text, reporting which strategy produced it.
    pub fn extract(&self, data: &[u8]) -> Option<Extraction> {
        let mut found = self.chain.run(data)?;
        found.text = render::finish_text(&found.text, self.parse_options.normalize_unicode);
        if found.text.is_empty() {
            None
        } else {
            Some(found)
        }
    }

    /// Extract text: structured parse first, fallback scan second.
    ///
    /// Never fails; `None` means neither strategy found any text.
    pub fn extract_text(&self, data: &[u8]) -> Option<String> {
        self.extract(data).map(|found| found.text)
    }

    /// Read a file and extract its text. A read failure is logged and yields `None`.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        let path = path.as_ref();
        match std::fs::read(path) {
            Ok(data) => self.extract_text(&data),
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), Error::Io(e));
                None
            }
        }
    }

    /// Run only the fallback scanner.
    pub fn extract_fallback(&self, data: &[u8]) -> Option<String> {
        self.fallback
            .extract(data)
            .map(|text| render::finish_text(&text, self.parse_options.normalize_unicode))
            .filter(|text| !text.is_empty())
    }

    /// Parse the document structure without falling back.
    pub fn parse(&self, data: &[u8]) -> Result<Document> {
        self.parser().parse(data)
    }

    /// Parse a file's document structure without falling back.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        self.parser().parse_file(path)
    }

    /// Extract many documents in parallel. Results keep the input order.
    pub fn extract_many(&self, inputs: &[&[u8]]) -> Vec<Option<String>> {
        inputs
            .par_iter()
            .map(|data| self.extract_text(data))
            .collect()
    }
}

impl Default for HwpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn default_extractor() -> &'static HwpExtractor {
    static EXTRACTOR: OnceLock<HwpExtractor> = OnceLock::new();
    EXTRACTOR.get_or_init(HwpExtractor::new)
}

/// Extract plain text from HWP bytes.
///
/// # Example
///
/// ```no_run
/// use unhwp::extract_text;
///
/// let data = std::fs::read("notice.hwp").unwrap();
/// match extract_text(&data) {
///     Some(text) => println!("{}", text),
///     None => eprintln!("no text found"),
/// }
/// ```
pub fn extract_text(data: &[u8]) -> Option<String> {
    default_extractor().extract_text(data)
}

/// Extract plain text from an HWP file.
pub fn extract_file<P: AsRef<Path>>(path: P) -> Option<String> {
    default_extractor().extract_file(path)
}

/// Scan raw bytes for Korean text lines without parsing the container.
pub fn extract_fallback(data: &[u8]) -> Option<String> {
    default_extractor().extract_fallback(data)
}

/// Parse HWP bytes into a structured document.
///
/// # Example
///
/// ```no_run
/// use unhwp::parse_bytes;
///
/// let data = std::fs::read("notice.hwp").unwrap();
/// let doc = parse_bytes(&data).unwrap();
/// println!("HWP {}", doc.metadata.version);
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    default_extractor().parse(data)
}

/// Parse HWP bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    HwpParser::with_options(options).parse(data)
}

/// Parse an HWP file into a structured document.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    default_extractor().parse_file(path)
}

/// Extract text from many documents in parallel.
pub fn extract_many(inputs: &[&[u8]]) -> Vec<Option<String>> {
    default_extractor().extract_many(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::testing::MemoryReader;
    use crate::parser::record::tags;
    use crate::parser::record::testing::{encode, utf16};

    fn memory_extractor() -> HwpExtractor {
        let reader = MemoryReader::default()
            .with_stream("FileHeader", vec![0; 256])
            .with_stream(
                "BodyText/Section0",
                encode(tags::PARA_TEXT, 0, &utf16("  구민체육센터 수영장\n")),
            );
        HwpExtractor::with_capability(ContainerCapability::with_reader(Arc::new(reader)))
    }

    #[test]
    fn test_structured_path() {
        let extractor = memory_extractor();
        let found = extractor.extract(b"MEM").unwrap();
        assert_eq!(found.strategy, "structured");
        assert_eq!(found.text, "구민체육센터 수영장");
    }

    #[test]
    fn test_idempotent() {
        let extractor = memory_extractor();
        let first = extractor.extract_text(b"MEM");
        let second = extractor.extract_text(b"MEM");
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_container_goes_to_fallback() {
        let data = utf16("수영장 휴관 안내 말씀\n");
        let found = memory_extractor().extract(&data).unwrap();
        assert_eq!(found.strategy, "fallback");
        assert_eq!(found.text, "수영장 휴관 안내 말씀");
    }

    #[test]
    fn test_unavailable_capability_uses_fallback_only() {
        let extractor =
            HwpExtractor::with_capability(ContainerCapability::Unavailable("disabled".into()));
        assert_eq!(extractor.chain().names(), vec!["fallback"]);

        let data = utf16("강습 접수 일정 안내\n");
        assert_eq!(
            extractor.extract_text(&data).as_deref(),
            Some("강습 접수 일정 안내")
        );
        assert!(extractor.extract_text(b"MEM").is_none());
        assert!(matches!(
            extractor.parse(b"MEM"),
            Err(Error::DependencyUnavailable(_))
        ));
    }

    #[test]
    fn test_nothing_found() {
        assert!(memory_extractor().extract_text(&[]).is_none());
        assert!(memory_extractor().extract_text(b"plain ascii").is_none());
    }

    #[test]
    fn test_extract_many_keeps_order() {
        let extractor = memory_extractor();
        let korean = utf16("자유수영 시간표 변경\n");
        let inputs = vec![&b"MEM"[..], &b"junk"[..], &korean[..]];
        let results = extractor.extract_many(&inputs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_deref(), Some("구민체육센터 수영장"));
        assert!(results[1].is_none());
        assert_eq!(results[2].as_deref(), Some("자유수영 시간표 변경"));
    }

    #[test]
    fn test_fallback_follows_options() {
        let data = utf16("휴관 안내\n");
        let extractor = memory_extractor();
        assert!(extractor.extract_fallback(&data).is_none());

        let extractor =
            extractor.with_fallback_options(FallbackOptions::new().with_min_line_chars(3));
        assert_eq!(extractor.fallback().options().min_line_chars, 3);
        assert_eq!(extractor.extract_fallback(&data).as_deref(), Some("휴관 안내"));
        assert_eq!(extractor.extract_text(&data).as_deref(), Some("휴관 안내"));
    }

    #[test]
    fn test_missing_file_is_none() {
        assert!(memory_extractor()
            .extract_file("/nonexistent/notice.hwp")
            .is_none());
    }
}
