//! Bytes8/16/32 text payloads: raw byte runs rendered as base64.
//!
//! The wire carries a fixed-width little-endian byte length (1, 2 or 4
//! bytes) and the raw bytes; the XML side sees standard base64 with
//! padding. Classification only accepts text whose decoded bytes re-encode
//! to the identical string, so non-canonical base64 stays a Chars record.

use std::io::Read;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::bytestream::ByteReader;
use crate::Result;

/// Reads `len` raw bytes and renders them as padded standard base64.
pub fn read_base64<R: Read>(reader: &mut ByteReader<R>, len: usize) -> Result<String> {
    let bytes = reader.read_bytes(len)?;
    Ok(STANDARD.encode(bytes))
}

/// Decodes base64 text, but only if it is the canonical encoding of its
/// bytes (strict alphabet, required padding, re-encode identity).
pub(crate) fn decode_canonical(text: &str) -> Option<Vec<u8>> {
    let bytes = STANDARD.decode(text).ok()?;
    (STANDARD.encode(&bytes) == text).then_some(bytes)
}
