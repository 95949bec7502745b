//! Compound-file format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Compound-file (OLE2) magic bytes.
pub const CFB_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Signature at the start of the `FileHeader` stream of an HWP 5.x document.
pub const HWP_SIGNATURE: &[u8] = b"HWP Document File";

/// Container format information derived from the leading sector header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerFormat {
    /// Compound-file major version (3 = 512-byte sectors, 4 = 4096-byte sectors)
    pub major_version: u16,
    /// Sector size in bytes
    pub sector_size: u32,
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Compound File v{} ({}-byte sectors)",
            self.major_version, self.sector_size
        )
    }
}

/// Size of the compound-file header sector prefix we inspect.
const HEADER_PROBE_LEN: usize = 32;

/// Detect the container format from a file path.
///
/// # Example
/// ```no_run
/// use unhwp::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("notice.hwp").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ContainerFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; HEADER_PROBE_LEN];
    reader
        .read_exact(&mut header)
        .map_err(|_| Error::UnknownFormat)?;
    detect_format_from_bytes(&header)
}

/// Detect the container format from bytes.
///
/// Only the compound-file header is checked here; whether the container holds
/// an HWP document is decided once its `FileHeader` stream is read.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ContainerFormat> {
    if data.len() < HEADER_PROBE_LEN || !data.starts_with(&CFB_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    // Major version at offset 26, sector shift at offset 30
    let major_version = u16::from_le_bytes([data[26], data[27]]);
    let sector_shift = u16::from_le_bytes([data[30], data[31]]);

    let sector_size = match (major_version, sector_shift) {
        (3, 9) => 512,
        (4, 12) => 4096,
        _ => {
            return Err(Error::Format(format!(
                "unsupported compound-file version {} (sector shift {})",
                major_version, sector_shift
            )))
        }
    };

    Ok(ContainerFormat {
        major_version,
        sector_size,
    })
}

/// Check if a file looks like a compound-file document.
pub fn is_hwp<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes look like a compound-file document.
pub fn is_hwp_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
