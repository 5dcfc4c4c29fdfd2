//! Float text payloads (FloatText 0x90, DoubleText 0x92).
//!
//! IEEE 754 single/double precision, little-endian. Infinities render as the
//! XML Schema spellings `INF`/`-INF`. The encoder prefers the 4-byte record
//! when the text is exactly the single-precision rendering of itself,
//! otherwise the 8-byte record; text that neither precision reproduces
//! exactly is not classified as a float at all.

use std::io::Read;

use crate::bytestream::{ByteReader, ByteWriter};
use crate::{Error, Result};

/// Renders an f32 the way the decoder does: shortest round-trip decimal,
/// `INF`/`-INF` for infinities.
pub fn render_f32(value: f32) -> String {
    if value == f32::INFINITY {
        "INF".to_string()
    } else if value == f32::NEG_INFINITY {
        "-INF".to_string()
    } else {
        value.to_string()
    }
}

/// Renders an f64, same conventions as [`render_f32`].
pub fn render_f64(value: f64) -> String {
    if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        value.to_string()
    }
}

/// Reads a FloatText payload.
pub fn read_f32<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    Ok(render_f32(f32::from_bits(reader.read_u32_le()?)))
}

/// Reads a DoubleText payload.
pub fn read_f64<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    Ok(render_f64(f64::from_bits(reader.read_u64_le()?)))
}

fn parse_f32(text: &str) -> Result<f32> {
    text.parse()
        .map_err(|_| Error::InvalidValue(format!("'{text}' is not a Float")))
}

fn parse_f64(text: &str) -> Result<f64> {
    text.parse()
        .map_err(|_| Error::InvalidValue(format!("'{text}' is not a Double")))
}

/// Writes a FloatText payload.
pub fn write_f32(writer: &mut ByteWriter, text: &str) -> Result<()> {
    writer.write_u32_le(parse_f32(text)?.to_bits());
    Ok(())
}

/// Writes a DoubleText payload.
pub fn write_f64(writer: &mut ByteWriter, text: &str) -> Result<()> {
    writer.write_u64_le(parse_f64(text)?.to_bits());
    Ok(())
}

/// True if the text survives a parse/render round trip at single precision.
pub(crate) fn is_exact_f32(text: &str) -> bool {
    text.parse::<f32>().is_ok_and(|v| render_f32(v) == text)
}

/// True if the text survives a parse/render round trip at double precision.
pub(crate) fn is_exact_f64(text: &str) -> bool {
    text.parse::<f64>().is_ok_and(|v| render_f64(v) == text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(bytes: &[u8]) -> ByteReader<&[u8]> {
        ByteReader::new(bytes)
    }

    #[test]
    fn float_read() {
        // 1.1f32 = 0x3F8CCCCD
        assert_eq!(read_f32(&mut reader(&[0xCD, 0xCC, 0x8C, 0x3F])).unwrap(), "1.1");
        // 32.45f32 = 0x4201CCCD
        assert_eq!(read_f32(&mut reader(&[0xCD, 0xCC, 0x01, 0x42])).unwrap(), "32.45");
    }

    #[test]
    fn double_read() {
        // 0x400921FB54442D11: a truncated pi; shortest round-trip rendering
        // restores exactly the 14 digits that produced it.
        assert_eq!(
            read_f64(&mut reader(&[0x11, 0x2D, 0x44, 0x54, 0xFB, 0x21, 0x09, 0x40])).unwrap(),
            "3.14159265358979"
        );
    }

    #[test]
    fn infinities_render_as_xsd_spellings() {
        assert_eq!(render_f32(f32::INFINITY), "INF");
        assert_eq!(render_f32(f32::NEG_INFINITY), "-INF");
        assert_eq!(render_f64(f64::NEG_INFINITY), "-INF");
        assert_eq!(
            read_f32(&mut reader(&0x7F80_0000u32.to_le_bytes())).unwrap(),
            "INF"
        );
        assert_eq!(
            read_f64(&mut reader(&0xFFF0_0000_0000_0000u64.to_le_bytes())).unwrap(),
            "-INF"
        );
    }

    #[test]
    fn nan_renders() {
        assert_eq!(read_f32(&mut reader(&0x7FC0_0000u32.to_le_bytes())).unwrap(), "NaN");
    }

    #[test]
    fn precision_probes() {
        assert!(is_exact_f32("1.1"));
        assert!(is_exact_f32("32.45"));
        assert!(is_exact_f32("INF"));
        assert!(is_exact_f32("-INF"));
        assert!(is_exact_f32("NaN"));
        // f32 rendert diesen Wert als "2.7182817"
        assert!(!is_exact_f32("2.71828182845905"));
        assert!(is_exact_f64("2.71828182845905"));
        // Exponentenschreibweise rendert nie identisch zurück
        assert!(!is_exact_f32("1e5"));
        assert!(!is_exact_f64("1e5"));
    }

    #[test]
    fn write_round_trip() {
        let mut w = ByteWriter::new();
        write_f32(&mut w, "1.1").unwrap();
        assert_eq!(w.as_slice(), &[0xCD, 0xCC, 0x8C, 0x3F]);

        let mut w = ByteWriter::new();
        write_f64(&mut w, "2.71828182845905").unwrap();
        assert_eq!(w.as_slice(), &[0x74, 0x57, 0x14, 0x8B, 0x0A, 0xBF, 0x05, 0x40]);

        let mut w = ByteWriter::new();
        write_f32(&mut w, "INF").unwrap();
        assert_eq!(w.as_slice(), &0x7F80_0000u32.to_le_bytes());
    }

    #[test]
    fn negative_zero_is_canonical() {
        assert!(is_exact_f32("-0"));
        let mut w = ByteWriter::new();
        write_f32(&mut w, "-0").unwrap();
        assert_eq!(read_f32(&mut reader(w.as_slice())).unwrap(), "-0");
    }
}
