//! Integer text payloads (Int8/16/32/64 and UInt64 records).
//!
//! All widths are two's-complement little-endian on the wire and render as
//! plain decimal. The encoder picks the smallest signed width that holds the
//! value; unsigned 64-bit covers the range above `i64::MAX`.

use std::io::Read;

use crate::bytestream::{ByteReader, ByteWriter};
use crate::records::TextKind;
use crate::{Error, Result};

/// Reads an Int8Text payload.
pub fn read_i8<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    Ok((reader.read_u8()? as i8).to_string())
}

/// Reads an Int16Text payload.
pub fn read_i16<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    Ok((reader.read_u16_le()? as i16).to_string())
}

/// Reads an Int32Text payload.
pub fn read_i32<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    Ok((reader.read_u32_le()? as i32).to_string())
}

/// Reads an Int64Text payload.
pub fn read_i64<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    Ok((reader.read_u64_le()? as i64).to_string())
}

/// Reads a UInt64Text payload.
pub fn read_u64<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    Ok(reader.read_u64_le()?.to_string())
}

fn parse<T: std::str::FromStr>(text: &str, width: &str) -> Result<T> {
    text.parse()
        .map_err(|_| Error::InvalidValue(format!("'{text}' is not an {width}")))
}

/// Writes a signed payload of the given width.
pub fn write_signed(writer: &mut ByteWriter, kind: TextKind, text: &str) -> Result<()> {
    match kind {
        TextKind::Int8 => writer.write_u8(parse::<i8>(text, "Int8")? as u8),
        TextKind::Int16 => writer.write_u16_le(parse::<i16>(text, "Int16")? as u16),
        TextKind::Int32 => writer.write_u32_le(parse::<i32>(text, "Int32")? as u32),
        TextKind::Int64 => writer.write_u64_le(parse::<i64>(text, "Int64")? as u64),
        _ => return Err(Error::InvalidValue(format!("{} is not a signed width", kind.name()))),
    }
    Ok(())
}

/// Writes a UInt64Text payload.
pub fn write_u64(writer: &mut ByteWriter, text: &str) -> Result<()> {
    writer.write_u64_le(parse::<u64>(text, "UInt64")?);
    Ok(())
}

/// Classifies canonically rendered signed decimal text into the smallest
/// fitting width. Non-canonical spellings (`"007"`, `"+5"`, `"-0"`) return
/// `None` so they re-render byte-identically through a Chars record instead.
pub(crate) fn classify_signed(text: &str) -> Option<TextKind> {
    let value: i64 = text.parse().ok()?;
    if value.to_string() != text {
        return None;
    }
    Some(if i8::try_from(value).is_ok() {
        TextKind::Int8
    } else if i16::try_from(value).is_ok() {
        TextKind::Int16
    } else if i32::try_from(value).is_ok() {
        TextKind::Int32
    } else {
        TextKind::Int64
    })
}

/// Classifies canonically rendered unsigned decimal text above `i64::MAX`.
pub(crate) fn classify_unsigned(text: &str) -> Option<TextKind> {
    let value: u64 = text.parse().ok()?;
    (value.to_string() == text).then_some(TextKind::UInt64)
}
