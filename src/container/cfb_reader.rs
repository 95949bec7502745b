//! Container reader backed by the `cfb` crate.

use std::io::{Cursor, Read};

use cfb::CompoundFile;

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};

use super::{Container, ContainerReader};

/// Concrete [`ContainerReader`] backed by `cfb::CompoundFile`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CfbReader {
    _private: (),
}

impl CfbReader {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl ContainerReader for CfbReader {
    fn name(&self) -> &str {
        "cfb"
    }

    fn open<'a>(&self, data: &'a [u8]) -> Result<Box<dyn Container + 'a>> {
        detect_format_from_bytes(data)?;
        let inner =
            CompoundFile::open(Cursor::new(data)).map_err(|e| Error::Format(e.to_string()))?;
        Ok(Box::new(CfbContainer { inner }))
    }
}

struct CfbContainer<'a> {
    inner: CompoundFile<Cursor<&'a [u8]>>,
}

/// `cfb` addresses entries by absolute path.
fn absolute(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

impl Container for CfbContainer<'_> {
    fn has_stream(&self, path: &str) -> bool {
        self.inner.is_stream(absolute(path))
    }

    fn stream_names(&self, storage: &str) -> Vec<String> {
        match self.inner.read_storage(absolute(storage)) {
            Ok(entries) => entries
                .filter(|entry| entry.is_stream())
                .map(|entry| entry.name().to_string())
                .collect(),
            Err(e) => {
                log::debug!("Storage {} not readable: {}", storage, e);
                Vec::new()
            }
        }
    }

    fn read_stream(&mut self, path: &str) -> Result<Vec<u8>> {
        let full_path = absolute(path);
        if !self.inner.is_stream(&full_path) {
            return Err(Error::MissingStream(path.to_string()));
        }

        let mut stream = self
            .inner
            .open_stream(&full_path)
            .map_err(|e| Error::Format(format!("{}: {}", path, e)))?;
        let mut data = Vec::with_capacity(stream.len() as usize);
        stream.read_to_end(&mut data)?;
        Ok(data)
    }
}
