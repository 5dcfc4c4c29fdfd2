//! UuidText (0xB0) and UniqueIdText (0xAC) payloads.
//!
//! Sixteen bytes on the wire; the first three groups (4, 2, 2 bytes) are
//! little-endian, the trailing eight bytes big-endian — the classic GUID
//! byte swap. The rendered form is the canonical lowercase 8-4-4-4-12 hex
//! string, wrapped in `urn:uuid:` for UniqueIdText.

use std::io::Read;

use crate::bytestream::{ByteReader, ByteWriter};
use crate::{Error, Result};

/// URN wrapper of UniqueIdText values.
pub const URN_PREFIX: &str = "urn:uuid:";

/// Positions of the dashes in the canonical form.
const DASHES: [usize; 4] = [8, 13, 18, 23];

/// True for canonical lowercase `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
///
/// Großbuchstaben zählen nicht: nur die kanonische Form überlebt den
/// Encode/Decode-Round-Trip byte-identisch.
pub fn is_uuid(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, &b)| {
        if DASHES.contains(&i) {
            b == b'-'
        } else {
            b.is_ascii_digit() || (b'a'..=b'f').contains(&b)
        }
    })
}

/// True for `urn:uuid:` followed by a canonical UUID.
pub fn is_unique_id(text: &str) -> bool {
    text.strip_prefix(URN_PREFIX).is_some_and(is_uuid)
}

/// Swaps the first three groups between wire order and textual order.
/// Self-inverse.
fn flip_group_order(bytes: &mut [u8; 16]) {
    bytes[0..4].reverse();
    bytes[4..6].reverse();
    bytes[6..8].reverse();
}

/// Reads a UuidText payload.
pub fn read<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    let mut bytes = [0u8; 16];
    reader.read_exact(&mut bytes)?;
    flip_group_order(&mut bytes);
    Ok(format_uuid(&bytes))
}

/// Reads a UniqueIdText payload.
pub fn read_unique_id<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    Ok(format!("{URN_PREFIX}{}", read(reader)?))
}

/// Writes a UuidText payload from canonical text.
pub fn write(writer: &mut ByteWriter, text: &str) -> Result<()> {
    let mut bytes = parse_uuid(text)?;
    flip_group_order(&mut bytes);
    writer.write_bytes(&bytes);
    Ok(())
}

/// Writes a UniqueIdText payload from `urn:uuid:` text.
pub fn write_unique_id(writer: &mut ByteWriter, text: &str) -> Result<()> {
    let uuid = text
        .strip_prefix(URN_PREFIX)
        .ok_or_else(|| Error::InvalidUuid(text.to_string()))?;
    write(writer, uuid)
}

fn format_uuid(bytes: &[u8; 16]) -> String {
    let mut out = String::with_capacity(36);
    for (i, b) in bytes.iter().enumerate() {
        if [4, 6, 8, 10].contains(&i) {
            out.push('-');
        }
        out.push_str(&format!("{b:02x}"));
    }
    out
}

fn parse_uuid(text: &str) -> Result<[u8; 16]> {
    if !is_uuid(text) {
        return Err(Error::InvalidUuid(text.to_string()));
    }
    let hex = text.as_bytes();
    let mut bytes = [0u8; 16];
    let mut pos = 0;
    for byte in &mut bytes {
        if hex[pos] == b'-' {
            pos += 1;
        }
        *byte = (hex_nibble(hex[pos]) << 4) | hex_nibble(hex[pos + 1]);
        pos += 2;
    }
    Ok(bytes)
}

fn hex_nibble(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        _ => b - b'a' + 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIRE: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE,
        0xFF,
    ];
    const TEXT: &str = "33221100-5544-7766-8899-aabbccddeeff";

    #[test]
    fn read_swaps_leading_groups() {
        let mut r = ByteReader::new(&WIRE[..]);
        assert_eq!(read(&mut r).unwrap(), TEXT);
    }

    #[test]
    fn write_inverts_read() {
        let mut w = ByteWriter::new();
        write(&mut w, TEXT).unwrap();
        assert_eq!(w.as_slice(), &WIRE);
    }

    #[test]
    fn unique_id_wraps_urn() {
        let mut r = ByteReader::new(&WIRE[..]);
        assert_eq!(
            read_unique_id(&mut r).unwrap(),
            "urn:uuid:33221100-5544-7766-8899-aabbccddeeff"
        );
        let mut w = ByteWriter::new();
        write_unique_id(&mut w, "urn:uuid:33221100-5544-7766-8899-aabbccddeeff").unwrap();
        assert_eq!(w.as_slice(), &WIRE);
    }

    #[test]
    fn identity_bytes() {
        let mut r = ByteReader::new(
            &[
                0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,
                0x0D, 0x0E, 0x0F,
            ][..],
        );
        assert_eq!(read(&mut r).unwrap(), "03020100-0504-0706-0809-0a0b0c0d0e0f");
    }

    #[test]
    fn recognizer_is_strict() {
        assert!(is_uuid(TEXT));
        assert!(!is_uuid("33221100-5544-7766-8899-AABBCCDDEEFF"));
        assert!(!is_uuid("33221100-5544-7766-8899-aabbccddeef"));
        assert!(!is_uuid("332211005544-7766-8899-aabbccddeeffx"));
        assert!(!is_uuid(""));
        assert!(is_unique_id("urn:uuid:33221100-5544-7766-8899-aabbccddeeff"));
        assert!(!is_unique_id("urn:uuid:"));
        assert!(!is_unique_id(TEXT));
    }

    #[test]
    fn write_rejects_non_canonical() {
        let mut w = ByteWriter::new();
        assert!(matches!(
            write(&mut w, "not-a-uuid"),
            Err(Error::InvalidUuid(_))
        ));
    }
}
