//! Rendering module for converting documents to output formats.

mod json;
mod text;

pub use json::{to_json, to_json_value, JsonFormat};
pub use text::{finish_text, to_text};
