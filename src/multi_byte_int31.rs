//! MultiByteInt31 encoding ([MC-NBFX] variable-length integers).
//!
//! Unsigned 31-bit integers in 1–5 bytes, base-128 little-endian: each byte
//! carries 7 payload bits, the high bit is a continuation flag. The encoder
//! emits the canonical form only (no trailing zero continuation bytes); the
//! decoder also accepts non-canonical forms but rejects values outside the
//! 31-bit range.

use std::io::Read;

use crate::bytestream::{ByteReader, ByteWriter};
use crate::{Error, Result};

/// Continuation flag.
const MASK: u32 = 0x80;

/// Largest encodable value: 2^31 - 1.
pub const MAX: u32 = 0x7FFF_FFFF;

/// Writes `value` in canonical base-128 little-endian form.
///
/// Returns [`Error::MultiByteInt31Overflow`] for values above [`MAX`].
pub fn write(writer: &mut ByteWriter, value: u32) -> Result<()> {
    if value > MAX {
        return Err(Error::MultiByteInt31Overflow(u64::from(value)));
    }
    let mut v = value;
    while v >= MASK {
        writer.write_u8((v & 0x7F) as u8 | 0x80);
        v >>= 7;
    }
    writer.write_u8(v as u8);
    Ok(())
}

/// Reads a MultiByteInt31.
///
/// Liest Bytes bis zum ersten ohne Continuation-Flag. Werte ≥ 2^31 (auch
/// durch überlange Encodings erreichbar) sind ein Fehler.
pub fn read<R: Read>(reader: &mut ByteReader<R>) -> Result<u32> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    loop {
        let b = reader.read_u8()?;
        value |= u64::from(b & 0x7F) << shift;
        if value > u64::from(MAX) {
            return Err(Error::MultiByteInt31Overflow(value));
        }
        if b & 0x80 == 0 {
            return Ok(value as u32);
        }
        shift += 7;
        if shift > 35 {
            // Mehr als 5 Continuation-Bytes kann kein 31-Bit-Wert brauchen.
            return Err(Error::MultiByteInt31Overflow(value));
        }
    }
}
