//! JSON rendering for HWP documents.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    to_json_value(doc, format)
}

/// Serialize any model value (e.g. [`crate::ExtractionStats`]) to JSON.
pub fn to_json_value<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.metadata.version = "5.0.3.4".to_string();
        let mut section = Section::new(0);
        section.paragraphs.push("자유수영 안내".to_string());
        doc.add_section(section);
        doc
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"version\": \"5.0.3.4\""));
        assert!(json.contains("자유수영 안내"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.stats.paragraph_count, 1);
    }

    #[test]
    fn test_stats_only() {
        let json = to_json_value(&sample().stats, JsonFormat::Compact).unwrap();
        assert!(json.starts_with("{\"section_count\":1"));
    }
}
