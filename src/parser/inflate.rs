//! Raw-deflate decompression of section streams.

use std::borrow::Cow;
use std::io::Read;

use flate2::read::DeflateDecoder;

use crate::error::{Error, Result};

/// Inflate a headerless deflate stream, refusing output larger than `limit`.
pub fn inflate(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
    let decoder = DeflateDecoder::new(raw);
    let mut out = Vec::with_capacity(raw.len().saturating_mul(4).min(limit));
    let read_cap = (limit as u64).saturating_add(1);
    decoder
        .take(read_cap)
        .read_to_end(&mut out)
        .map_err(|e| Error::Decompression {
            stream: String::new(),
            reason: e.to_string(),
        })?;

    if out.len() > limit {
        return Err(Error::StreamTooLarge {
            stream: String::new(),
            limit,
        });
    }
    Ok(out)
}

/// Undo section compression.
///
/// Returns `raw` untouched when `compressed` is false. When inflation fails the
/// raw bytes are passed through as well: some documents set the compression
/// flag on streams that are stored plain. Only an inflated stream exceeding
/// `limit` is reported as an error.
pub fn decompress<'a>(
    stream: &str,
    raw: &'a [u8],
    compressed: bool,
    limit: usize,
) -> Result<Cow<'a, [u8]>> {
    if !compressed {
        return Ok(Cow::Borrowed(raw));
    }

    match inflate(raw, limit) {
        Ok(data) => {
            log::trace!("{}: inflated {} -> {} bytes", stream, raw.len(), data.len());
            Ok(Cow::Owned(data))
        }
        Err(Error::StreamTooLarge { limit, .. }) => Err(Error::StreamTooLarge {
            stream: stream.to_string(),
            limit,
        }),
        Err(Error::Decompression { reason, .. }) => {
            log::warn!("{}: inflate failed ({}); using raw bytes", stream, reason);
            Ok(Cow::Borrowed(raw))
        }
        Err(e) => Err(e),
    }
}
