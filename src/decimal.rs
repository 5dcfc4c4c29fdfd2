//! DecimalText payloads (0x94): the .NET `System.Decimal` wire layout.
//!
//! Sixteen bytes: two reserved bytes, one scale byte (0..=28), one sign byte
//! (0x00 or 0x80), then the 96-bit magnitude as a little-endian high 32-bit
//! word followed by a little-endian low 64-bit word. The rendered value is
//! the magnitude with a decimal point inserted `scale` digits from the
//! right; the wire scale is preserved, so trailing zeros survive.
//!
//! Decode-only: the text classifier never selects this record.

use std::io::Read;

use crate::bytestream::ByteReader;
use crate::{Error, Result};

const SIGN_NEGATIVE: u8 = 0x80;
const MAX_SCALE: u8 = 28;

/// Reads a DecimalText payload.
pub fn read<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    let mut buf = [0u8; 16];
    reader.read_exact(&mut buf)?;

    let scale = buf[2];
    if scale > MAX_SCALE {
        return Err(Error::InvalidDecimalScale(scale));
    }
    let sign = buf[3];
    if sign != 0 && sign != SIGN_NEGATIVE {
        return Err(Error::InvalidDecimalSign(sign));
    }

    let hi32 = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let lo64 = u64::from_le_bytes([
        buf[8], buf[9], buf[10], buf[11], buf[12], buf[13], buf[14], buf[15],
    ]);
    let magnitude = (u128::from(hi32) << 64) | u128::from(lo64);

    Ok(render(sign == SIGN_NEGATIVE, magnitude, scale))
}

fn render(negative: bool, magnitude: u128, scale: u8) -> String {
    let digits = magnitude.to_string();
    let scale = scale as usize;

    let mut out = String::with_capacity(digits.len() + 3);
    if negative && magnitude != 0 {
        out.push('-');
    }
    if scale == 0 {
        out.push_str(&digits);
        return out;
    }
    if digits.len() > scale {
        let split = digits.len() - scale;
        out.push_str(&digits[..split]);
        out.push('.');
        out.push_str(&digits[split..]);
    } else {
        // Betrag kleiner als 1: mit Nullen auf scale Stellen auffüllen.
        out.push_str("0.");
        for _ in 0..(scale - digits.len()) {
            out.push('0');
        }
        out.push_str(&digits);
    }
    out
}
