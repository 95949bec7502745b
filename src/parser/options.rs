//! Parsing options and configuration.

/// Default cap on the inflated size of a single section stream (50 MiB).
pub const DEFAULT_MAX_STREAM_SIZE: usize = 50 * 1024 * 1024;

/// Options for parsing HWP documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Maximum inflated size of one section stream, in bytes
    pub max_stream_size: usize,

    /// Whether to NFC-normalize extracted text
    pub normalize_unicode: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable sections).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable strict mode (abort on the first unreadable section).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the inflated stream size cap in bytes.
    pub fn with_max_stream_size(mut self, bytes: usize) -> Self {
        self.max_stream_size = bytes;
        self
    }

    /// Enable or disable Unicode NFC normalization of the output.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            max_stream_size: DEFAULT_MAX_STREAM_SIZE,
            normalize_unicode: false,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first section that cannot be read
    Strict,
    /// Skip unreadable sections and continue
    #[default]
    Lenient,
}
