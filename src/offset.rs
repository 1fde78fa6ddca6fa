use crate::consts::{MAX_OFFSET_SECONDS, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, TIME_SEPARATOR};
use crate::field::Field;
use crate::types::ValueRange;
use crate::Error;
use std::fmt;
use std::str::FromStr;

/// A fixed UTC offset in whole seconds, bounded to +/-18 hours. Prints as
/// `+HH:MM`, with seconds only when present, and as `Z` when zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Offset {
    seconds: i32,
}

impl Offset {
    pub const UTC: Self = Self { seconds: 0 };
    pub const MIN: Self = Self {
        seconds: -MAX_OFFSET_SECONDS,
    };
    pub const MAX: Self = Self {
        seconds: MAX_OFFSET_SECONDS,
    };

    /// # Errors
    /// Returns `Error::InvalidFieldValue` beyond +/-18 hours.
    pub fn from_seconds(seconds: i32) -> Result<Self, Error> {
        Self::range().check(Field::OffsetSeconds, i64::from(seconds))?;
        Ok(Self { seconds })
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` beyond +/-18 hours.
    pub fn from_hours(hours: i8) -> Result<Self, Error> {
        Self::from_hms(hours, 0, 0)
    }

    /// Builds an offset from components that must share the sign of the
    /// total (for example `-5, -30, 0`).
    ///
    /// # Errors
    /// Returns `Error::InvalidFieldValue` for mixed signs, minutes or seconds
    /// outside `-59..=59`, or a total beyond +/-18 hours.
    pub fn from_hms(hours: i8, minutes: i8, seconds: i8) -> Result<Self, Error> {
        let within_minute = ValueRange::of(-59, 59);
        within_minute.check(Field::MinuteOfHour, i64::from(minutes))?;
        within_minute.check(Field::SecondOfMinute, i64::from(seconds))?;
        let signs = [hours.signum(), minutes.signum(), seconds.signum()];
        if signs.contains(&1) && signs.contains(&-1) {
            return Err(Error::InvalidFieldValue {
                field: Field::OffsetSeconds,
                value: i64::from(hours) * SECONDS_PER_HOUR + i64::from(minutes) * SECONDS_PER_MINUTE + i64::from(seconds),
                range: Self::range(),
            });
        }
        let total = i32::from(hours) * 3_600 + i32::from(minutes) * 60 + i32::from(seconds);
        Self::from_seconds(total)
    }

    pub const fn seconds(&self) -> i32 {
        self.seconds
    }

    pub const fn is_utc(&self) -> bool {
        self.seconds == 0
    }

    fn range() -> ValueRange {
        ValueRange::of(-i64::from(MAX_OFFSET_SECONDS), i64::from(MAX_OFFSET_SECONDS))
    }

    pub(crate) fn to_jiff(self) -> jiff::tz::Offset {
        // bounded by +/-18h, well inside jiff's range
        jiff::tz::Offset::from_seconds(self.seconds).unwrap_or(jiff::tz::Offset::UTC)
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` for an offset beyond +/-18 hours.
    pub(crate) fn from_jiff(offset: jiff::tz::Offset) -> Result<Self, Error> {
        Self::from_seconds(offset.seconds())
    }

    /// Parses `Z`, `±HH`, `±HH:MM`, `±HH:MM:SS` or the colon-free `±HHMM`
    /// and `±HHMMSS`.
    ///
    /// # Errors
    /// Returns `Error::ParseFailure` for malformed text and
    /// `Error::InvalidFieldValue` beyond +/-18 hours.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let failure = |position: usize, message: &str| Error::ParseFailure {
            text: text.to_string(),
            position,
            message: message.to_string(),
        };
        if text.eq_ignore_ascii_case("z") {
            return Ok(Self::UTC);
        }
        let sign = match text.as_bytes().first() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return Err(failure(0, "expected '+', '-' or 'Z'")),
        };
        let body = &text[1..];
        let digits: String = body.chars().filter(|c| *c != TIME_SEPARATOR).collect();
        let colon_form = body.contains(TIME_SEPARATOR);
        let well_formed = match digits.len() {
            2 => !colon_form,
            4 => !colon_form || body.len() == 5,
            6 => !colon_form || body.len() == 8,
            _ => false,
        };
        if !well_formed || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(failure(1, "expected an offset of the form ±HH:MM[:SS]"));
        }
        if colon_form && body.chars().enumerate().any(|(i, c)| (c == TIME_SEPARATOR) != (i % 3 == 2)) {
            return Err(failure(1, "misplaced ':' in offset"));
        }
        let part = |i: usize| digits.get(i..i + 2).and_then(|p| p.parse::<i32>().ok()).unwrap_or(0);
        let (hours, minutes, seconds) = (part(0), part(2), part(4));
        ValueRange::of(0, 59).check(Field::MinuteOfHour, i64::from(minutes))?;
        ValueRange::of(0, 59).check(Field::SecondOfMinute, i64::from(seconds))?;
        Self::from_seconds(sign * (hours * 3_600 + minutes * 60 + seconds))
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds == 0 {
            return f.write_str("Z");
        }
        let sign = if self.seconds < 0 { '-' } else { '+' };
        let total = self.seconds.unsigned_abs();
        write!(f, "{sign}{:02}:{:02}", total / 3_600, total / 60 % 60)?;
        if total % 60 != 0 {
            write!(f, ":{:02}", total % 60)?;
        }
        Ok(())
    }
}

impl FromStr for Offset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<jiff::tz::Offset> for Offset {
    type Error = Error;

    fn try_from(offset: jiff::tz::Offset) -> Result<Self, Self::Error> {
        Self::from_jiff(offset)
    }
}

impl From<Offset> for jiff::tz::Offset {
    fn from(offset: Offset) -> Self {
        offset.to_jiff()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(Offset::from_hours(18).unwrap(), Offset::MAX);
        assert_eq!(Offset::from_hours(-18).unwrap(), Offset::MIN);
        assert!(matches!(
            Offset::from_seconds(64_801),
            Err(Error::InvalidFieldValue { field: Field::OffsetSeconds, .. })
        ));
        assert!(Offset::from_hours(19).is_err());
    }

    #[test]
    fn test_from_hms() {
        assert_eq!(Offset::from_hms(5, 30, 0).unwrap().seconds(), 19_800);
        assert_eq!(Offset::from_hms(-3, -30, 0).unwrap().seconds(), -12_600);
        assert!(Offset::from_hms(-3, 30, 0).is_err());
        assert!(Offset::from_hms(1, 60, 0).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Offset::UTC.to_string(), "Z");
        assert_eq!(Offset::from_seconds(0).unwrap().to_string(), "Z");
        assert_eq!(Offset::from_hours(3).unwrap().to_string(), "+03:00");
        assert_eq!(Offset::from_hms(-9, -30, 0).unwrap().to_string(), "-09:30");
        assert_eq!(Offset::from_seconds(3_661).unwrap().to_string(), "+01:01:01");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Z".parse::<Offset>().unwrap(), Offset::UTC);
        assert_eq!("+03:00".parse::<Offset>().unwrap().seconds(), 10_800);
        assert_eq!("+03".parse::<Offset>().unwrap().seconds(), 10_800);
        assert_eq!("-0930".parse::<Offset>().unwrap().seconds(), -34_200);
        assert_eq!("+01:01:01".parse::<Offset>().unwrap().seconds(), 3_661);
        assert!(matches!("03:00".parse::<Offset>(), Err(Error::ParseFailure { position: 0, .. })));
        assert!(matches!("+0:300".parse::<Offset>(), Err(Error::ParseFailure { .. })));
        assert!(matches!("+03:60".parse::<Offset>(), Err(Error::InvalidFieldValue { .. })));
        assert!(matches!("+19:00".parse::<Offset>(), Err(Error::InvalidFieldValue { .. })));
    }

    #[test]
    fn test_jiff_conversion() {
        let offset = Offset::from_hours(-5).unwrap();
        let jiff_offset = jiff::tz::Offset::from(offset);
        assert_eq!(jiff_offset.seconds(), -18_000);
        assert_eq!(Offset::try_from(jiff_offset).unwrap(), offset);
    }
}
