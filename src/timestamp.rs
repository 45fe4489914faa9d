//! ISO 8601 timestamp parsing for detection records.
//!
//! Every `Z` in the input is first rewritten to `+00:00`. The remainder must
//! then match the ISO 8601 grammar accepted for detection timestamps:
//!
//! - a calendar date (`2024-01-31`, `20240131`) or a week date
//!   (`2024-W05-3`, `2024W053`, `2024-W05`), optionally followed by
//! - any single separator character and a time (`10`, `10:30`, `1030`,
//!   `10:30:15`, `103015`) with an optional `.`/`,` fraction of which the
//!   first six digits count, optionally followed by
//! - a UTC offset (`+05`, `+05:30`, `-0530`, `+05:30:15.5`), which may be
//!   preceded by a single space.
//!
//! Values without an offset are taken as UTC. Leap seconds, hour `24`, bracketed
//! zone annotations, lowercase `z`, signed or extended years and non-ASCII
//! digits are rejected.

use jiff::civil::{Date, DateTime, ISOWeekDate, Time, Weekday};
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp};

/// Parse an ISO 8601 string into an absolute instant.
///
/// Returns `None` when the string is not a recognizable timestamp; callers
/// fall back to ordering such values as plain text.
pub fn parse_instant(s: &str) -> Option<Timestamp> {
    let normalized = normalize_zulu(s);
    let s = normalized.as_str();

    let sep = find_separator(s.as_bytes())?;
    let date = parse_date(s.get(..sep)?.as_bytes())?;

    let (time, offset) = if sep < s.len() {
        let rest = s.get(sep..)?;
        let sep_len = rest.chars().next()?.len_utf8();
        let time_str = rest.get(sep_len..)?;
        if time_str.is_empty() {
            return None;
        }
        parse_time(time_str.as_bytes())?
    } else {
        (Time::midnight(), SignedDuration::ZERO)
    };

    let local = DateTime::from_parts(date, time)
        .to_zoned(TimeZone::UTC)
        .ok()?
        .timestamp();
    local.checked_sub(offset).ok()
}

/// Rewrite every `Z` as `+00:00`.
fn normalize_zulu(s: &str) -> String {
    s.replace('Z', "+00:00")
}

/// Byte position where the date part ends.
///
/// Week dates make this ambiguous: `2024W0110` is week 1 at 10:00, while
/// `2024W011` is day 1 of week 1.
fn find_separator(b: &[u8]) -> Option<usize> {
    let len = b.len();
    if len < 7 {
        return None;
    }
    if len == 7 {
        return Some(7);
    }

    match b[4] {
        b'-' if b[5] == b'W' => {
            if len > 8 && b[8] == b'-' {
                if len == 9 {
                    return None;
                }
                if len > 10 && b[10].is_ascii_digit() {
                    return Some(8);
                }
                return Some(10);
            }
            Some(8)
        }
        b'-' => Some(10),
        b'W' => {
            let digits = b[7..].iter().take_while(|c| c.is_ascii_digit()).count();
            let end = 7 + digits;
            if end < 9 {
                Some(end)
            } else if end % 2 == 0 {
                Some(7)
            } else {
                Some(8)
            }
        }
        _ => Some(8),
    }
}

/// Parse `YYYY-MM-DD`, `YYYYMMDD`, `YYYY-Www[-D]` or `YYYYWww[D]`.
fn parse_date(b: &[u8]) -> Option<Date> {
    if !matches!(b.len(), 7 | 8 | 10) {
        return None;
    }
    let year = digits(b, 0, 4)?;
    if year < 1 {
        return None;
    }
    let year = i16::try_from(year).ok()?;

    let dashed = b[4] == b'-';
    let mut pos = 4 + usize::from(dashed);

    if b.get(pos) == Some(&b'W') {
        pos += 1;
        let week = i8::try_from(digits(b, pos, 2)?).ok()?;
        pos += 2;
        let mut day = 1;
        if pos < b.len() {
            if (b[pos] == b'-') != dashed {
                return None;
            }
            pos += usize::from(dashed);
            day = i8::try_from(digits(b, pos, 1)?).ok()?;
            pos += 1;
        }
        if pos != b.len() {
            return None;
        }
        let weekday = Weekday::from_monday_one_offset(day).ok()?;
        return ISOWeekDate::new(year, week, weekday).ok().map(|d| d.date());
    }

    let month = i8::try_from(digits(b, pos, 2)?).ok()?;
    pos += 2;
    if (b.get(pos) == Some(&b'-')) != dashed {
        return None;
    }
    pos += usize::from(dashed);
    let day = i8::try_from(digits(b, pos, 2)?).ok()?;
    if pos + 2 != b.len() {
        return None;
    }
    Date::new(year, month, day).ok()
}

/// Parse the time part and its optional UTC offset.
fn parse_time(b: &[u8]) -> Option<(Time, SignedDuration)> {
    if b.len() < 2 {
        return None;
    }

    let offset_at = b
        .iter()
        .position(|&c| c == b'-')
        .or_else(|| b.iter().position(|&c| c == b'+'));

    let (clock, offset) = match offset_at {
        Some(at) => {
            let clock = &b[..at];
            let clock = clock.strip_suffix(b" ").unwrap_or(clock);
            let offset_str = &b[at + 1..];
            if matches!(offset_str.len(), 0 | 1 | 3) {
                return None;
            }
            let (h, m, s, us) = parse_clock(offset_str)?;
            let magnitude = SignedDuration::from_hours(h)
                + SignedDuration::from_mins(m)
                + SignedDuration::from_secs(s)
                + SignedDuration::from_micros(us);
            if magnitude >= SignedDuration::from_hours(24) {
                return None;
            }
            let offset = if b[at] == b'-' { -magnitude } else { magnitude };
            (clock, offset)
        }
        None => (b, SignedDuration::ZERO),
    };

    let (h, m, s, us) = parse_clock(clock)?;
    let time = Time::new(
        i8::try_from(h).ok()?,
        i8::try_from(m).ok()?,
        i8::try_from(s).ok()?,
        i32::try_from(us * 1000).ok()?,
    )
    .ok()?;
    Some((time, offset))
}

/// Parse `hh[:mm[:ss[.ffffff]]]` or `hh[mm[ss[.ffffff]]]`.
///
/// The colon style is fixed by the first separator. Fractions need all three
/// components; digits past the sixth are checked but ignored.
fn parse_clock(b: &[u8]) -> Option<(i64, i64, i64, i64)> {
    let mut comps = [0_i64; 3];
    let mut pos = 0;
    let mut colons = false;

    for (i, comp) in comps.iter_mut().enumerate() {
        *comp = digits(b, pos, 2)?;
        pos += 2;
        let next = b.get(pos).copied();
        if i == 0 {
            colons = next == Some(b':');
        }
        if next.is_none() || i == 2 {
            break;
        }
        if colons {
            if next != Some(b':') {
                return None;
            }
            pos += 1;
        }
    }

    let mut micros = 0;
    if pos < b.len() {
        if !matches!(b[pos], b'.' | b',') {
            return None;
        }
        let fraction = &b[pos + 1..];
        if fraction.is_empty() || !fraction.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let taken = fraction.len().min(6);
        micros = digits(fraction, 0, taken)?;
        for _ in taken..6 {
            micros *= 10;
        }
    }

    Some((comps[0], comps[1], comps[2], micros))
}

/// Decimal value of `count` ASCII digits starting at `start`.
fn digits(b: &[u8], start: usize, count: usize) -> Option<i64> {
    let slice = b.get(start..start + count)?;
    slice.iter().try_fold(0_i64, |acc, &c| {
        c.is_ascii_digit().then(|| acc * 10 + i64::from(c - b'0'))
    })
}
