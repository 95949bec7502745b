//! Structured extraction through the record parser.

use crate::parser::HwpParser;

use super::ExtractionStrategy;

/// Extracts text by parsing the container and its body-text records.
#[derive(Debug, Clone, Default)]
pub struct StructuredStrategy {
    parser: HwpParser,
}

impl StructuredStrategy {
    pub fn new(parser: HwpParser) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &HwpParser {
        &self.parser
    }
}

impl ExtractionStrategy for StructuredStrategy {
    fn name(&self) -> &str {
        "structured"
    }

    fn extract(&self, data: &[u8]) -> Option<String> {
        match self.parser.parse(data) {
            Ok(doc) => {
                let text = doc.plain_text();
                if text.trim().is_empty() {
                    log::debug!("Structured parse found no text");
                    None
                } else {
                    Some(text)
                }
            }
            Err(e) if e.is_format_error() => {
                log::debug!("Not a readable HWP container: {}", e);
                None
            }
            Err(e) => {
                log::warn!("Structured extraction failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::testing::MemoryReader;
    use crate::container::ContainerCapability;
    use crate::parser::record::tags;
    use crate::parser::record::testing::{encode, utf16};
    use crate::parser::ParseOptions;
    use std::sync::Arc;

    fn strategy(reader: MemoryReader) -> StructuredStrategy {
        let capability = ContainerCapability::with_reader(Arc::new(reader));
        StructuredStrategy::new(HwpParser::with_capability(capability, ParseOptions::default()))
    }

    #[test]
    fn test_returns_document_text() {
        let reader = MemoryReader::default()
            .with_stream("FileHeader", vec![0; 256])
            .with_stream(
                "BodyText/Section0",
                encode(tags::PARA_TEXT, 0, &utf16("수영장 공지\n")),
            );
        assert_eq!(strategy(reader).extract(b"MEM").as_deref(), Some("수영장 공지"));
    }

    #[test]
    fn test_empty_document_is_none() {
        let reader = MemoryReader::default()
            .with_stream("FileHeader", vec![0; 256])
            .with_stream("BodyText/Section0", encode(tags::PARA_HEADER, 0, &[0; 22]));
        assert!(strategy(reader).extract(b"MEM").is_none());
    }

    #[test]
    fn test_unreadable_container_is_none() {
        assert!(strategy(MemoryReader::default()).extract(b"nope").is_none());
    }
}
