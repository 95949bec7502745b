//! Document model types.

mod document;

pub use document::{Document, ExtractionStats, Metadata, Section};
