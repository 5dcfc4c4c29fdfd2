//! String payloads: length-prefixed UTF-8 and UTF-16LE runs.
//!
//! Record strings (names, prefixes, comments, xmlns values) carry a
//! MultiByteInt31 byte length. Chars8/16/32 text records carry a fixed-width
//! little-endian byte length (1, 2 or 4 bytes). UnicodeChars8/16/32 count
//! BYTES of UTF-16LE payload, not code units, so the length must be even.
//!
//! Malformed UTF-8/UTF-16 is an error; lossy replacement would change the
//! text and break re-encoding.

use std::io::Read;

use crate::bytestream::{ByteReader, ByteWriter};
use crate::multi_byte_int31;
use crate::{Error, Result};

/// Reads a MultiByteInt31-length-prefixed UTF-8 string (record string).
pub fn read_string<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    let len = multi_byte_int31::read(reader)?;
    read_utf8(reader, len as usize)
}

/// Writes a MultiByteInt31-length-prefixed UTF-8 string (record string).
pub fn write_string(writer: &mut ByteWriter, text: &str) -> Result<()> {
    let len = u32::try_from(text.len()).map_err(|_| Error::TextTooLong(text.len()))?;
    multi_byte_int31::write(writer, len)?;
    writer.write_bytes(text.as_bytes());
    Ok(())
}

/// Reads a fixed-length UTF-8 run (Chars payloads after their length field).
pub fn read_utf8<R: Read>(reader: &mut ByteReader<R>, len: usize) -> Result<String> {
    let bytes = reader.read_bytes(len)?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
}

/// Reads a UTF-16LE run of `byte_len` bytes (UnicodeChars payloads).
pub fn read_utf16<R: Read>(reader: &mut ByteReader<R>, byte_len: u64) -> Result<String> {
    if byte_len % 2 != 0 {
        return Err(Error::InvalidUnicodeLength(byte_len));
    }
    let bytes = reader.read_bytes(byte_len as usize)?;
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| Error::InvalidUtf16)
}
