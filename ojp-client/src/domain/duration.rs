//! `xs:duration` handling.
//!
//! OJP expresses trip, leg and transfer durations as ISO 8601 durations
//! (`PT1H23M`, `P1DT2H`, `PT45S`). Calendar components (years, months) are
//! never used by journey planners and are rejected because they have no
//! fixed length.

use chrono::Duration;
use serde::Serializer;

/// Parse an `xs:duration` string restricted to days, hours, minutes and
/// seconds.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use ojp_client::domain::parse_xs_duration;
///
/// assert_eq!(parse_xs_duration("PT1H23M"), Some(Duration::minutes(83)));
/// assert_eq!(parse_xs_duration("P1DT2H"), Some(Duration::hours(26)));
/// assert_eq!(parse_xs_duration("-PT5M"), Some(Duration::minutes(-5)));
/// assert_eq!(parse_xs_duration("1H"), None);
/// ```
pub fn parse_xs_duration(s: &str) -> Option<Duration> {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let rest = rest.strip_prefix('P')?;

    let (date_part, time_part) = match rest.split_once('T') {
        Some((d, t)) => {
            if t.is_empty() {
                return None;
            }
            (d, Some(t))
        }
        None => (rest, None),
    };

    if date_part.is_empty() && time_part.is_none() {
        return None;
    }

    let mut millis: i64 = 0;

    for (value, unit) in components(date_part)? {
        match unit {
            'D' => millis = millis.checked_add(whole(value)?.checked_mul(86_400_000)?)?,
            _ => return None,
        }
    }

    if let Some(time_part) = time_part {
        for (value, unit) in components(time_part)? {
            let add = match unit {
                'H' => whole(value)?.checked_mul(3_600_000)?,
                'M' => whole(value)?.checked_mul(60_000)?,
                'S' => seconds_to_millis(value)?,
                _ => return None,
            };
            millis = millis.checked_add(add)?;
        }
    }

    Duration::try_milliseconds(sign * millis)
}

/// Format a duration as `xs:duration`, e.g. `PT1H23M`.
///
/// Zero is written as `PT0S`.
pub fn format_xs_duration(duration: &Duration) -> String {
    let negative = *duration < Duration::zero();
    let total = duration.num_seconds().unsigned_abs();

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str("PT");
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if seconds > 0 || (hours == 0 && minutes == 0) {
        out.push_str(&format!("{seconds}S"));
    }
    out
}

/// Split `12H5M` into `[("12", 'H'), ("5", 'M')]`.
fn components(s: &str) -> Option<Vec<(&str, char)>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (idx, c) in s.char_indices() {
        if c.is_ascii_digit() || c == '.' {
            continue;
        }
        let value = &s[start..idx];
        if value.is_empty() {
            return None;
        }
        out.push((value, c));
        start = idx + c.len_utf8();
    }
    if start != s.len() {
        // Trailing number without a unit.
        return None;
    }
    Some(out)
}

fn whole(value: &str) -> Option<i64> {
    if value.contains('.') {
        return None;
    }
    value.parse().ok()
}

fn seconds_to_millis(value: &str) -> Option<i64> {
    match value.split_once('.') {
        None => whole(value)?.checked_mul(1000),
        Some((secs, frac)) => {
            let secs = if secs.is_empty() { 0 } else { whole(secs)? };
            if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let padded = format!("{frac:0<3}");
            let millis: i64 = padded[..3].parse().ok()?;
            secs.checked_mul(1000)?.checked_add(millis)
        }
    }
}

/// Serialize a `Duration` as an `xs:duration` string.
pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_xs_duration(duration))
}

/// Serialize an optional `Duration` as an `xs:duration` string or null.
pub fn serialize_opt<S: Serializer>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match duration {
        Some(d) => serializer.serialize_some(&format_xs_duration(d)),
        None => serializer.serialize_none(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn whole_seconds_survive_format_and_parse(secs in -400_000i64..400_000) {
            let d = Duration::seconds(secs);
            prop_assert_eq!(parse_xs_duration(&format_xs_duration(&d)), Some(d));
        }

        #[test]
        fn hours_and_minutes_add_up(h in 0i64..48, m in 0i64..60) {
            let s = format!("PT{h}H{m}M");
            prop_assert_eq!(parse_xs_duration(&s), Some(Duration::minutes(h * 60 + m)));
        }
    }
}
