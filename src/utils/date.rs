//! Timestamps of the export documents (`jcr:lastModified`).
//!
//! The export writes local times as `YYYY-MM-DDTHH:MM:SS`, sometimes followed
//! by fractional seconds and a zone designator. Only the leading date and
//! time are kept; the suffix is accepted and dropped.
//!
//! ```ignore
//! let ts = Timestamp::parse("2017-06-13T09:39:15").unwrap();
//! assert_eq!(ts.to_string(), "2017-06-13T09:39:15");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Naive date and time, as written in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Why a timestamp could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("expected `YYYY-MM-DDTHH:MM:SS`, got `{0}`")]
    Format(String),
    #[error("{field} is out of range: {value}")]
    Range { field: &'static str, value: u16 },
}

impl Timestamp {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Parse `YYYY-MM-DDTHH:MM:SS[.fff][Z|±HH:MM]`.
    pub fn parse(s: &str) -> Result<Self, TimestampError> {
        let bad = || TimestampError::Format(s.to_string());
        let bytes = s.as_bytes();

        if bytes.len() < 19
            || bytes[4] != b'-'
            || bytes[7] != b'-'
            || bytes[10] != b'T'
            || bytes[13] != b':'
            || bytes[16] != b':'
        {
            return Err(bad());
        }

        let ts = Self::new(
            parse_u16(&bytes[0..4]).ok_or_else(bad)?,
            parse_u8(&bytes[5..7]).ok_or_else(bad)?,
            parse_u8(&bytes[8..10]).ok_or_else(bad)?,
            parse_u8(&bytes[11..13]).ok_or_else(bad)?,
            parse_u8(&bytes[14..16]).ok_or_else(bad)?,
            parse_u8(&bytes[17..19]).ok_or_else(bad)?,
        );

        if !is_valid_suffix(&bytes[19..]) {
            return Err(bad());
        }

        ts.validate()?;
        Ok(ts)
    }

    pub fn validate(&self) -> Result<(), TimestampError> {
        let range = |field, value: u8| TimestampError::Range {
            field,
            value: u16::from(value),
        };

        if !(1..=12).contains(&self.month) {
            return Err(range("month", self.month));
        }
        if self.day == 0 || self.day > Self::days_in_month(self.year, self.month) {
            return Err(range("day", self.day));
        }
        if self.hour > 23 {
            return Err(range("hour", self.hour));
        }
        if self.minute > 59 {
            return Err(range("minute", self.minute));
        }
        if self.second > 59 {
            return Err(range("second", self.second));
        }
        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }
}

/// Accepts nothing, `.digits`, a zone (`Z`, `+HH:MM`, `-HHMM`), or both.
fn is_valid_suffix(mut rest: &[u8]) -> bool {
    if let Some(frac) = rest.strip_prefix(b".") {
        let digits = frac.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return false;
        }
        rest = &frac[digits..];
    }

    match rest {
        [] | [b'Z'] => true,
        [b'+' | b'-', zone @ ..] => {
            let zone: Vec<u8> = zone.iter().copied().filter(|b| *b != b':').collect();
            zone.len() == 4 && zone.iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let ts = Timestamp::parse("2017-06-13T09:39:15").unwrap();
        assert_eq!(ts, Timestamp::new(2017, 6, 13, 9, 39, 15));
        assert_eq!(ts.to_string(), "2017-06-13T09:39:15");
    }

    #[test]
    fn test_parse_drops_fraction_and_zone() {
        let expected = Timestamp::new(2017, 6, 13, 9, 39, 15);
        assert_eq!(Timestamp::parse("2017-06-13T09:39:15.503").unwrap(), expected);
        assert_eq!(Timestamp::parse("2017-06-13T09:39:15Z").unwrap(), expected);
        assert_eq!(
            Timestamp::parse("2017-06-13T09:39:15.503+02:00").unwrap(),
            expected
        );
        assert_eq!(Timestamp::parse("2017-06-13T09:39:15-0100").unwrap(), expected);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(Timestamp::parse("").is_err());
        assert!(Timestamp::parse("2017-06-13").is_err());
        assert!(Timestamp::parse("13/06/2017 09:39:15").is_err());
        assert!(Timestamp::parse("2017-06-13 09:39:15").is_err());
        assert!(Timestamp::parse("2017-06-13T09:39:15garbage").is_err());
        assert!(Timestamp::parse("2017-06-13T09:39:15.").is_err());
        assert!(Timestamp::parse("2017-06-13T09:39:15+2").is_err());
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!(
            Timestamp::parse("2017-13-01T00:00:00"),
            Err(TimestampError::Range { field: "month", .. })
        ));
        assert!(matches!(
            Timestamp::parse("2023-02-29T00:00:00"),
            Err(TimestampError::Range { field: "day", .. })
        ));
        assert!(Timestamp::parse("2024-02-29T00:00:00").is_ok());
        assert!(Timestamp::parse("2017-06-13T24:00:00").is_err());
        assert!(Timestamp::parse("2017-06-13T23:60:00").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let ts = Timestamp::new(2017, 1, 2, 3, 4, 5);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2017-01-02T03:04:05\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
