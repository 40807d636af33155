//! Conversions used by the ordering operators (`<`, `<=`, `>`, `>=`).
//!
//! Every resolved operand collapses to an `i64`, trying in order: a duration literal
//! (converted to milliseconds), an integer with an optional `0x`/`0o`/`0b`/`0` prefix, a
//! float (truncated), and finally `0`.

use std::convert::TryFrom;

const NANOS_PER_MILLI: i128 = 1_000_000;

const UNITS: [(&str, i128); 8] = [
    ("ns", 1),
    ("us", 1_000),
    ("\u{b5}s", 1_000),
    ("\u{3bc}s", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

pub(crate) fn to_number(value: &str) -> i64 {
    if let Some(millis) = parse_duration_millis(value) {
        if millis != 0 {
            return millis;
        }
    }
    if let Some(number) = parse_integer(value) {
        return number;
    }
    match value.parse::<f64>() {
        // saturating cast; NaN becomes 0
        Ok(float) => float as i64,
        Err(_) => 0,
    }
}

/// Parses an integer, detecting the base from a `0x`, `0o` or `0b` prefix, or a bare
/// leading `0` for octal. Underscores may separate digits, as in `1_000` or `0x_ff`.
pub(crate) fn parse_integer(value: &str) -> Option<i64> {
    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        Some("0o") | Some("0O") => (8, &unsigned[2..]),
        Some("0b") | Some("0B") => (2, &unsigned[2..]),
        Some(_) if unsigned.starts_with('0') => (8, &unsigned[1..]),
        _ => (10, unsigned),
    };
    if digits.contains('_') {
        let prefixed = radix != 10;
        if digits.ends_with('_') || digits.contains("__") || (!prefixed && digits.starts_with('_')) {
            return None;
        }
    }
    let digits = digits.replace('_', "");
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = u64::from_str_radix(&digits, radix).ok()?;
    if negative {
        if magnitude == i64::MIN.unsigned_abs() {
            Some(i64::MIN)
        } else {
            i64::try_from(magnitude).ok().map(|m| -m)
        }
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// Parses a duration literal such as `500ms`, `1.5s` or `1h30m` into milliseconds,
/// truncating toward zero. Every number needs a unit.
pub(crate) fn parse_duration_millis(value: &str) -> Option<i64> {
    parse_duration_nanos(value).map(|nanos| (nanos / NANOS_PER_MILLI) as i64)
}

fn parse_duration_nanos(value: &str) -> Option<i128> {
    let (negative, mut rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    if rest.is_empty() {
        return None;
    }
    let mut total: i128 = 0;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        if number.is_empty() || number == "." || number.matches('.').count() > 1 {
            return None;
        }
        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)?;

        let (whole, fraction) = match number.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (number, ""),
        };
        let whole = if whole.is_empty() {
            0
        } else {
            whole.parse::<i128>().ok()?
        };
        let mut component = whole.checked_mul(scale)?;
        let mut divisor: i128 = 1;
        for digit in fraction.chars().take(18) {
            divisor *= 10;
            component += i128::from(digit.to_digit(10)?) * scale / divisor;
        }
        total = total.checked_add(component)?;
        if total > i128::from(i64::MAX) {
            return None;
        }
        rest = tail;
    }
    Some(if negative { -total } else { total })
}

/// Renders milliseconds as a compact duration: `336h`, `1h30m`, `1h0m15s`, `45s`, `500ms`.
/// Anything of a second or more is truncated to whole seconds; sub-second values keep
/// millisecond precision.
pub(crate) fn format_duration(millis: i64) -> String {
    let sign = if millis < 0 { "-" } else { "" };
    let millis = millis.unsigned_abs();
    if millis == 0 {
        return "0s".to_string();
    }
    if millis < 1_000 {
        return format!("{}{}ms", sign, millis);
    }
    let seconds = millis / 1_000;
    let (hours, minutes, seconds) = (seconds / 3_600, (seconds % 3_600) / 60, seconds % 60);
    let formatted = match (hours, minutes, seconds) {
        (0, 0, s) => format!("{}s", s),
        (0, m, 0) => format!("{}m", m),
        (0, m, s) => format!("{}m{}s", m, s),
        (h, 0, 0) => format!("{}h", h),
        (h, m, 0) => format!("{}h{}m", h, m),
        (h, m, s) => format!("{}h{}m{}s", h, m, s),
    };
    format!("{}{}", sign, formatted)
}

#[cfg(test)]
#[path = "numeric_tests.rs"]
mod numeric_tests;
