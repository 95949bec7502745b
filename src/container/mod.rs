//! Compound-file container abstraction layer.
//!
//! Provides a trait-based interface for reading the named streams of a
//! compound-file document, isolating the concrete reader (`cfb`) from the
//! record parsing logic. Whether a reader exists at all is decided once, when
//! a [`ContainerCapability`] is constructed.

mod header;

#[cfg(feature = "ole")]
mod cfb_reader;

#[cfg(feature = "ole")]
pub use cfb_reader::CfbReader;
pub use header::{is_compressed, FileHeader, HeaderFlags, HwpVersion, FLAGS_OFFSET};

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Name of the metadata stream every HWP document carries.
pub const FILE_HEADER_STREAM: &str = "FileHeader";

/// Storage holding the body-text section streams.
pub const BODY_TEXT_STORAGE: &str = "BodyText";

const SECTION_PREFIX: &str = "Section";

/// Identifier of one body-text section stream.
///
/// Ordering is by section index, so sorting a list of ids yields reading order
/// (`Section2` sorts before `Section10`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId {
    index: u32,
    path: String,
}

impl StreamId {
    /// Id of the body-text section with the given index.
    pub fn section(index: u32) -> Self {
        Self {
            index,
            path: format!("{}/{}{}", BODY_TEXT_STORAGE, SECTION_PREFIX, index),
        }
    }

    /// Parse a stream name such as `Section3`. Returns `None` for unrelated streams.
    ///
    /// The path keeps the name as stored, so `Section01` is read from
    /// `BodyText/Section01`.
    pub fn from_name(name: &str) -> Option<Self> {
        let digits = name.strip_prefix(SECTION_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index = digits.parse().ok()?;
        Some(Self {
            index,
            path: format!("{}/{}", BODY_TEXT_STORAGE, name),
        })
    }

    /// Section index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Path of the stream inside the container (e.g. `BodyText/Section0`).
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// An opened compound-file container.
///
/// The container borrows the input buffer; dropping it releases the reader on
/// every exit path.
pub trait Container {
    /// Whether a stream exists at `path` (slash-separated, relative to the root).
    fn has_stream(&self, path: &str) -> bool;

    /// Names of the streams stored directly under `storage`. Empty if the
    /// storage does not exist.
    fn stream_names(&self, storage: &str) -> Vec<String>;

    /// Read the full contents of the stream at `path`.
    fn read_stream(&mut self, path: &str) -> Result<Vec<u8>>;
}

/// Something that can open a byte buffer as a [`Container`].
pub trait ContainerReader: Send + Sync {
    /// Short name of the reader, used in log messages.
    fn name(&self) -> &str;

    /// Open `data` as a container without validating its contents.
    fn open<'a>(&self, data: &'a [u8]) -> Result<Box<dyn Container + 'a>>;
}

/// Whether compound files can be read in this process.
#[derive(Clone)]
pub enum ContainerCapability {
    /// A reader is available.
    Available(Arc<dyn ContainerReader>),
    /// No reader; the reason is reported once when the capability is created.
    Unavailable(String),
}

impl ContainerCapability {
    /// The capability this build provides.
    pub fn detect() -> Self {
        #[cfg(feature = "ole")]
        {
            ContainerCapability::Available(Arc::new(CfbReader::new()))
        }
        #[cfg(not(feature = "ole"))]
        {
            ContainerCapability::Unavailable(
                "unhwp was built without the `ole` feature".to_string(),
            )
        }
    }

    /// Wrap an explicit reader.
    pub fn with_reader(reader: Arc<dyn ContainerReader>) -> Self {
        ContainerCapability::Available(reader)
    }

    /// Check if a reader is available.
    pub fn is_available(&self) -> bool {
        matches!(self, ContainerCapability::Available(_))
    }

    /// Open `data` and check that it holds an HWP metadata stream.
    pub fn open<'a>(&self, data: &'a [u8]) -> Result<Box<dyn Container + 'a>> {
        match self {
            ContainerCapability::Available(reader) => {
                let container = reader.open(data)?;
                if !container.has_stream(FILE_HEADER_STREAM) {
                    return Err(Error::MissingStream(FILE_HEADER_STREAM.to_string()));
                }
                Ok(container)
            }
            ContainerCapability::Unavailable(reason) => {
                Err(Error::DependencyUnavailable(reason.clone()))
            }
        }
    }
}

impl fmt::Debug for ContainerCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerCapability::Available(reader) => {
                f.debug_tuple("Available").field(&reader.name()).finish()
            }
            ContainerCapability::Unavailable(reason) => {
                f.debug_tuple("Unavailable").field(reason).finish()
            }
        }
    }
}

impl Default for ContainerCapability {
    fn default() -> Self {
        Self::detect()
    }
}

/// List body-text section streams in reading order.
pub fn list_content_streams(container: &dyn Container) -> Vec<StreamId> {
    let mut ids: Vec<StreamId> = container
        .stream_names(BODY_TEXT_STORAGE)
        .iter()
        .filter_map(|name| StreamId::from_name(name))
        .collect();
    ids.sort();
    ids
}

/// Read a section stream.
pub fn read_stream(container: &mut dyn Container, id: &StreamId) -> Result<Vec<u8>> {
    if !container.has_stream(id.path()) {
        return Err(Error::MissingStream(id.path().to_string()));
    }
    container.read_stream(id.path())
}

/// Read the raw `FileHeader` stream.
pub fn read_file_header(container: &mut dyn Container) -> Result<Vec<u8>> {
    container.read_stream(FILE_HEADER_STREAM)
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryReader;
    use super::*;

    #[test]
    fn test_stream_id_from_name() {
        let id = StreamId::from_name("Section12").unwrap();
        assert_eq!(id.index(), 12);
        assert_eq!(id.path(), "BodyText/Section12");

        assert!(StreamId::from_name("Section").is_none());
        assert!(StreamId::from_name("SectionX").is_none());
        assert!(StreamId::from_name("Section+1").is_none());
        assert!(StreamId::from_name("PrvText").is_none());

        let padded = StreamId::from_name("Section01").unwrap();
        assert_eq!(padded.index(), 1);
        assert_eq!(padded.path(), "BodyText/Section01");
    }

    #[test]
    fn test_zero_padded_section_is_read_by_its_own_name() {
        let reader = MemoryReader::default()
            .with_stream("FileHeader", vec![0; 256])
            .with_stream("BodyText/Section01", vec![1, 2, 3]);
        let capability = ContainerCapability::with_reader(Arc::new(reader));
        let mut container = capability.open(b"MEM").unwrap();

        let ids = list_content_streams(container.as_ref());
        assert_eq!(ids.len(), 1);
        assert_eq!(read_stream(container.as_mut(), &ids[0]).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_list_content_streams_numeric_order() {
        let reader = MemoryReader::default()
            .with_stream("FileHeader", vec![0; 256])
            .with_stream("BodyText/Section10", vec![])
            .with_stream("BodyText/Section2", vec![])
            .with_stream("BodyText/Section0", vec![])
            .with_stream("BodyText/Other", vec![])
            .with_stream("DocInfo", vec![]);
        let capability = ContainerCapability::with_reader(Arc::new(reader));
        let container = capability.open(b"MEM").unwrap();

        let indices: Vec<u32> = list_content_streams(container.as_ref())
            .iter()
            .map(StreamId::index)
            .collect();
        assert_eq!(indices, vec![0, 2, 10]);
    }

    #[test]
    fn test_open_requires_file_header() {
        let reader = MemoryReader::default().with_stream("BodyText/Section0", vec![]);
        let capability = ContainerCapability::with_reader(Arc::new(reader));
        let result = capability.open(b"MEM");
        assert!(matches!(result, Err(Error::MissingStream(_))));
    }

    #[test]
    fn test_read_unknown_stream() {
        let reader = MemoryReader::default().with_stream("FileHeader", vec![]);
        let capability = ContainerCapability::with_reader(Arc::new(reader));
        let mut container = capability.open(b"MEM").unwrap();
        let result = read_stream(container.as_mut(), &StreamId::section(4));
        assert!(matches!(result, Err(Error::MissingStream(_))));
    }

    #[test]
    fn test_unavailable_capability() {
        let capability = ContainerCapability::Unavailable("not compiled in".into());
        assert!(!capability.is_available());
        assert!(matches!(
            capability.open(b"MEM"),
            Err(Error::DependencyUnavailable(_))
        ));
    }
}
