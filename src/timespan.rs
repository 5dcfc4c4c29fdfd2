//! TimeSpanText payloads (0xAE): signed 100-nanosecond tick counts.
//!
//! Eight bytes little-endian, two's complement. Rendered as an ISO-8601
//! duration `[-]P[dD][T[hH][mM][s[.fffffff]S]]`; components that are zero
//! are omitted, a zero duration renders `PT0S`, fractional seconds trim
//! trailing zeros.
//!
//! Decode-only: the text classifier never selects this record.

use std::io::Read;

use crate::bytestream::ByteReader;
use crate::Result;

const TICKS_PER_SECOND: u64 = 10_000_000;
const TICKS_PER_DAY: u64 = 86_400 * TICKS_PER_SECOND;

/// Reads a TimeSpanText payload.
pub fn read<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    let ticks = reader.read_u64_le()? as i64;
    Ok(render(ticks))
}

fn render(ticks: i64) -> String {
    let magnitude = ticks.unsigned_abs();
    let days = magnitude / TICKS_PER_DAY;
    let mut rest = magnitude % TICKS_PER_DAY;
    let hours = rest / (3600 * TICKS_PER_SECOND);
    rest %= 3600 * TICKS_PER_SECOND;
    let minutes = rest / (60 * TICKS_PER_SECOND);
    rest %= 60 * TICKS_PER_SECOND;
    let seconds = rest / TICKS_PER_SECOND;
    let fraction = rest % TICKS_PER_SECOND;

    let mut out = String::new();
    if ticks < 0 {
        out.push('-');
    }
    out.push('P');
    if days > 0 {
        out.push_str(&days.to_string());
        out.push('D');
    }
    let has_time = hours > 0 || minutes > 0 || seconds > 0 || fraction > 0;
    if has_time || magnitude == 0 {
        out.push('T');
    }
    if hours > 0 {
        out.push_str(&hours.to_string());
        out.push('H');
    }
    if minutes > 0 {
        out.push_str(&minutes.to_string());
        out.push('M');
    }
    if seconds > 0 || fraction > 0 || magnitude == 0 {
        out.push_str(&seconds.to_string());
        if fraction > 0 {
            let digits = format!("{fraction:07}");
            out.push('.');
            out.push_str(digits.trim_end_matches('0'));
        }
        out.push('S');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(ticks: i64) -> String {
        let bytes = (ticks as u64).to_le_bytes();
        let mut r = ByteReader::new(&bytes[..]);
        read(&mut r).unwrap()
    }

    #[test]
    fn zero_duration() {
        assert_eq!(decode(0), "PT0S");
    }

    /// −344 seconds.
    #[test]
    fn negative_minutes_seconds() {
        assert_eq!(decode(-3_440_000_000), "-PT5M44S");
    }

    /// 3 hours 20 minutes, seconds omitted.
    #[test]
    fn hours_minutes() {
        assert_eq!(decode(120_000_000_000), "PT3H20M");
    }

    #[test]
    fn whole_days_have_no_time_section() {
        assert_eq!(decode(2 * 864_000_000_000), "P2D");
    }

    #[test]
    fn days_and_time_mix() {
        let ticks = 864_000_000_000 + 2 * 36_000_000_000 + 30 * 10_000_000;
        assert_eq!(decode(ticks), "P1DT2H30S");
    }

    #[test]
    fn fractional_seconds_trim() {
        assert_eq!(decode(15_000_000), "PT1.5S");
        assert_eq!(decode(1), "PT0.0000001S");
        assert_eq!(decode(-1), "-PT0.0000001S");
    }

    #[test]
    fn extreme_values_render() {
        // i64::MIN braucht unsigned_abs; reiner Smoke-Check der Komponenten.
        let s = decode(i64::MIN);
        assert!(s.starts_with("-P"), "{s}");
        assert!(s.ends_with('S'), "{s}");
    }
}
