//! Heuristic Hangul line scanner for documents the structured parser cannot read.

use std::sync::OnceLock;

use regex::Regex;

use super::ExtractionStrategy;

/// Options for the fallback scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackOptions {
    /// A kept line must be longer than this many characters
    pub min_line_chars: usize,

    /// Minimum share of Hangul syllables among a line's non-ASCII, non-whitespace
    /// characters. Digits and punctuation do not count against a line.
    pub min_script_ratio: f32,
}

impl FallbackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum line length.
    pub fn with_min_line_chars(mut self, chars: usize) -> Self {
        self.min_line_chars = chars;
        self
    }

    /// Set the minimum Hangul ratio (0.0 accepts any line with one syllable).
    pub fn with_min_script_ratio(mut self, ratio: f32) -> Self {
        self.min_script_ratio = ratio;
        self
    }
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            min_line_chars: 5,
            min_script_ratio: 0.2,
        }
    }
}

/// Scans a whole file decoded as UTF-16LE for lines of Korean text.
///
/// Uncompressed body text is stored as UTF-16LE inside the container, so even
/// when the container itself is unreadable its paragraphs usually survive as
/// runs of decodable text.
#[derive(Debug)]
pub struct FallbackExtractor {
    options: FallbackOptions,
    hangul_regex: Regex,
    control_regex: Regex,
}

impl FallbackExtractor {
    /// Create a new scanner with the given options.
    pub fn new(options: FallbackOptions) -> Self {
        Self {
            options,
            hangul_regex: Regex::new(r"[\x{AC00}-\x{D7A3}]").unwrap(),
            control_regex: Regex::new(r"[\x00-\x1F\x7F]").unwrap(),
        }
    }

    pub fn options(&self) -> &FallbackOptions {
        &self.options
    }

    /// Extract qualifying lines, or `None` if no line qualifies.
    pub fn extract(&self, data: &[u8]) -> Option<String> {
        let decoded = decode_utf16le_lossy(data);

        let lines: Vec<String> = decoded
            .split('\n')
            .filter_map(|line| self.clean_line(line))
            .collect();

        if lines.is_empty() {
            None
        } else {
            log::debug!("Fallback scan kept {} line(s)", lines.len());
            Some(lines.join("\n"))
        }
    }

    fn clean_line(&self, line: &str) -> Option<String> {
        let stripped = self.control_regex.replace_all(line, " ");
        let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

        if cleaned.chars().count() <= self.options.min_line_chars {
            return None;
        }
        if !self.hangul_regex.is_match(&cleaned) {
            return None;
        }
        if self.hangul_ratio(&cleaned) < self.options.min_script_ratio {
            return None;
        }
        Some(cleaned)
    }

    fn hangul_ratio(&self, line: &str) -> f32 {
        let wide = line
            .chars()
            .filter(|c| !c.is_ascii() && !c.is_whitespace())
            .count();
        if wide == 0 {
            return 0.0;
        }
        let hangul = self.hangul_regex.find_iter(line).count();
        hangul as f32 / wide as f32
    }
}

impl Default for FallbackExtractor {
    fn default() -> Self {
        Self::new(FallbackOptions::default())
    }
}

impl ExtractionStrategy for FallbackExtractor {
    fn name(&self) -> &str {
        "fallback"
    }

    fn extract(&self, data: &[u8]) -> Option<String> {
        FallbackExtractor::extract(self, data)
    }
}

/// Decode bytes as UTF-16LE, replacing unpaired surrogates and ignoring an odd
/// trailing byte.
pub fn decode_utf16le_lossy(data: &[u8]) -> String {
    let units = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Run the fallback scanner with default options.
pub fn extract_fallback(data: &[u8]) -> Option<String> {
    static SCANNER: OnceLock<FallbackExtractor> = OnceLock::new();
    SCANNER.get_or_init(FallbackExtractor::default).extract(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

    /// Deterministic pseudo-random bytes (xorshift64).
    fn noise(len: usize, mut state: u64) -> Vec<u8> {
        let mut out = Vec::with_capacity(len);
        while out.len() < len {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            out.extend_from_slice(&state.to_le_bytes());
        }
        out.truncate(len);
        out
    }

    #[test]
    fn test_extracts_korean_lines() {
        // U+0001 and U+001F: control codes ahead of the first line
        let mut data = vec![0x01, 0x00, 0x1F, 0x00];
        data.extend(utf16("▣ 자유수영 일일발권 안내\n"));
        data.extend(utf16("abc\n"));
        data.extend(utf16("평일 아침 08:00~08:50 30명\n"));

        let text = extract_fallback(&data).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["▣ 자유수영 일일발권 안내", "평일 아침 08:00~08:50 30명"]
        );
    }

    #[test]
    fn test_control_characters_and_whitespace_collapse() {
        let data = utf16("  토요일\t\u{1}\u{1F} 동절기   운영시간  \n");
        assert_eq!(extract_fallback(&data).unwrap(), "토요일 동절기 운영시간");
    }

    #[test]
    fn test_short_lines_are_dropped() {
        // Exactly five characters after cleanup is not enough
        let data = utf16("수영 안내\n");
        assert!(extract_fallback(&data).is_none());
    }

    #[test]
    fn test_lines_without_hangul_are_dropped() {
        let data = utf16("Opening hours 06:00-22:00\n");
        assert!(extract_fallback(&data).is_none());
    }

    #[test]
    fn test_random_bytes_yield_nothing() {
        for seed in [0x9E37_79B9_7F4A_7C15u64, 42, 0xDEAD_BEEF] {
            assert!(extract_fallback(&noise(64 * 1024, seed)).is_none());
        }
    }

    #[test]
    fn test_schedule_lines_are_kept() {
        let mut data = utf16("자유수영 06:00~07:00, 19:00~20:00\n");
        data.extend(utf16("월~금 06:00-21:50 (50분)\n"));
        data.extend(utf16("성인 3,000원 / 청소년 2,000원\n"));

        let text = extract_fallback(&data).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "자유수영 06:00~07:00, 19:00~20:00",
                "월~금 06:00-21:50 (50분)",
                "성인 3,000원 / 청소년 2,000원",
            ]
        );
    }

    #[test]
    fn test_ratio_can_be_disabled() {
        // One syllable among ten non-ASCII characters
        let data = utf16("가 ĀĀĀĀĀ ĀĀĀĀ 0123\n");
        assert!(extract_fallback(&data).is_none());

        let lenient = FallbackExtractor::new(FallbackOptions::new().with_min_script_ratio(0.0));
        assert!(lenient.extract(&data).is_some());
    }

    #[test]
    fn test_decode_lossy() {
        let mut data = utf16("가");
        data.extend_from_slice(&0xDC00u16.to_le_bytes());
        data.push(0x41);
        assert_eq!(decode_utf16le_lossy(&data), "가\u{FFFD}");
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_fallback(&[]).is_none());
    }
}
