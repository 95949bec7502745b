//! Error types for unhwp library.

use std::io;
use thiserror::Error;

/// Result type alias for unhwp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during HWP processing.
///
/// None of these escape [`crate::extract_text`]; they surface only through the
/// typed structured API ([`crate::parse_bytes`], [`crate::HwpParser`]).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The data is not a compound-file container.
    #[error("Unknown file format: not a compound-file document")]
    UnknownFormat,

    /// The container could not be read.
    #[error("Invalid container: {0}")]
    Format(String),

    /// A required stream is missing from the container.
    #[error("Missing stream: {0}")]
    MissingStream(String),

    /// A stream marked as compressed could not be inflated.
    #[error("Decompression error in {stream}: {reason}")]
    Decompression { stream: String, reason: String },

    /// An inflated stream exceeded the configured size cap.
    #[error("Stream {stream} exceeds the {limit} byte limit")]
    StreamTooLarge { stream: String, limit: usize },

    /// A record declared more payload than the stream holds.
    #[error("Record at offset {offset} declares {size} bytes but only {remaining} remain")]
    RecordBounds {
        offset: usize,
        size: usize,
        remaining: usize,
    },

    /// The compound-file reader is not available in this build.
    #[error("Container reader unavailable: {0}")]
    DependencyUnavailable(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error means the input is not a readable container at all.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownFormat | Error::Format(_) | Error::MissingStream(_)
        )
    }
}
