use chrono::FixedOffset;
use chrono_tz::Tz;
use std::fmt;

use crate::values::Timestamp;

/// Largest offset any real zone uses (Line Islands, UTC+14)
const MAX_OFFSET_HOURS: u32 = 14;

/// Interpreted form of a record's timezone identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZoneSpec {
    /// IANA zone such as `Europe/London`, with its daylight-saving rules
    Named(Tz),
    /// Fixed offset from UTC, parsed from descriptors like `UTC+10` or `-03:30`
    Fixed(FixedOffset),
}

impl TimeZoneSpec {
    /// Interpret a timezone identifier
    ///
    /// Offset descriptors are tried first, then IANA names. Returns `None`
    /// for anything else.
    pub fn parse(id: &str) -> Option<Self> {
        if let Some(offset) = parse_offset(id) {
            return Some(TimeZoneSpec::Fixed(offset));
        }
        id.trim().parse::<Tz>().ok().map(TimeZoneSpec::Named)
    }

    /// Offset from UTC when it never changes
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        match self {
            TimeZoneSpec::Named(_) => None,
            TimeZoneSpec::Fixed(offset) => Some(*offset),
        }
    }

    /// Render `instant` as wall time in this zone
    pub fn format(&self, instant: Timestamp, pattern: &str) -> String {
        match self {
            TimeZoneSpec::Named(tz) => instant.with_timezone(tz).format(pattern).to_string(),
            TimeZoneSpec::Fixed(offset) => instant.with_timezone(offset).format(pattern).to_string(),
        }
    }
}

impl fmt::Display for TimeZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneSpec::Named(tz) => write!(f, "{}", tz.name()),
            TimeZoneSpec::Fixed(offset) => write!(f, "UTC{}", offset),
        }
    }
}

fn parse_offset(descriptor: &str) -> Option<FixedOffset> {
    let upper = descriptor.trim().to_ascii_uppercase();
    if matches!(upper.as_str(), "Z" | "UTC" | "GMT") {
        return FixedOffset::east_opt(0);
    }

    let rest = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper);

    let (sign, digits) = if let Some(digits) = rest.strip_prefix('+') {
        (1, digits)
    } else if let Some(digits) = rest.strip_prefix('-') {
        (-1, digits)
    } else {
        return None;
    };

    let (hours, minutes) = match digits.split_once(':') {
        Some(parts) => parts,
        None if digits.len() == 4 => digits.split_at(2),
        None => (digits, "0"),
    };

    let hours = parse_component(hours)?;
    let minutes = parse_component(minutes)?;
    if hours > MAX_OFFSET_HOURS || minutes >= 60 {
        return None;
    }

    let seconds = i32::try_from(hours * 3600 + minutes * 60).ok()?;
    FixedOffset::east_opt(sign * seconds)
}

fn parse_component(text: &str) -> Option<u32> {
    if text.is_empty() || text.len() > 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
