//! DateTimeText payloads (0x96): the .NET tick timestamp.
//!
//! Eight bytes little-endian. The low 62 bits count 100-nanosecond ticks
//! since 0001-01-01T00:00:00 in the proleptic Gregorian calendar; the top
//! two bits carry the timezone flag (0 = unspecified, 1 = UTC, 2 = local,
//! 3 = reserved). Rendered as ISO-8601 with up to seven fractional digits,
//! trailing zeros trimmed; flag 1 appends `Z`, flags 0 and 2 append nothing
//! (the wire carries no offset for "local").
//!
//! Decode-only: the text classifier never selects this record.

use std::io::Read;

use crate::bytestream::ByteReader;
use crate::{Error, Result};

/// 100-ns ticks per second.
const TICKS_PER_SECOND: u64 = 10_000_000;
const SECONDS_PER_DAY: u64 = 86_400;
const TICK_MASK: u64 = (1 << 62) - 1;

/// Timezone flag values of the top two bits: 0 = unspecified, 1 = UTC,
/// 2 = local, 3 = reserved.
const TZ_UTC: u8 = 1;
const TZ_LOCAL: u8 = 2;

/// Reads a DateTimeText payload.
pub fn read<R: Read>(reader: &mut ByteReader<R>) -> Result<String> {
    let raw = reader.read_u64_le()?;
    let tz = (raw >> 62) as u8;
    let ticks = raw & TICK_MASK;
    if tz > TZ_LOCAL {
        return Err(Error::InvalidTimezone(tz));
    }
    Ok(render(ticks, tz))
}

fn render(ticks: u64, tz: u8) -> String {
    let seconds = ticks / TICKS_PER_SECOND;
    let fraction = ticks % TICKS_PER_SECOND;

    let days = seconds / SECONDS_PER_DAY;
    let time_of_day = seconds % SECONDS_PER_DAY;
    let (year, month, day) = civil_from_day_number(days as i64);
    let hour = time_of_day / 3600;
    let minute = time_of_day % 3600 / 60;
    let second = time_of_day % 60;

    let mut out = format!(
        "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}"
    );
    if fraction > 0 {
        let digits = format!("{fraction:07}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    // Unspecified und Local bleiben ohne Suffix: der Wire-Wert trägt keinen
    // Offset.
    if tz == TZ_UTC {
        out.push('Z');
    }
    out
}

/// Proleptic Gregorian date from a day number where day 0 is 0001-01-01.
///
/// Era-basierte Umrechnung über 400-Jahres-Zyklen (146097 Tage); die
/// Zwischenrechnung läuft in März-basierten Jahren, damit der Schalttag am
/// Zyklusende liegt.
fn civil_from_day_number(days: i64) -> (i64, u8, u8) {
    // Tag 0 hier = 0001-01-01; die März-basierte Rechnung zählt ab
    // 0000-03-01, was 306 Tage früher liegt.
    let z = days + 306;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097); // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365; // [0, 399]
    let year_march = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11], 0 = März
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = year_march + i64::from(month <= 2);
    (year, month as u8, day as u8)
}
