//! HWP body-text parsing module.

mod hwp_parser;
mod inflate;
mod options;
mod para_text;
pub mod record;
mod section;

pub use hwp_parser::HwpParser;
pub use inflate::{decompress, inflate};
pub use options::{ErrorMode, ParseOptions, DEFAULT_MAX_STREAM_SIZE};
pub use para_text::{decode_paragraph, is_inline_control, INLINE_CONTROL_CODES, INLINE_CONTROL_EXTRA};
pub use record::{parse_records, tags, Record, RecordHeader, RecordIter};
pub use section::parse_section;
