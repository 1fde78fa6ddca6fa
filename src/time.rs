use crate::consts::{NANOS_PER_DAY, NANOS_PER_SECOND, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::field::{Field, Unit};
use crate::fmt::{FieldAccess, Formatter, FromAccessor, TemporalKind, formats};
use crate::types::ValueRange;
use crate::Error;
use std::fmt;
use std::str::FromStr;

/// A time of day with nanosecond precision, independent of any calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time {
    hour:       u8,
    minute:     u8,
    second:     u8,
    nanosecond: u32,
}

impl Time {
    pub const MIDNIGHT: Self = Self {
        hour:       0,
        minute:     0,
        second:     0,
        nanosecond: 0,
    };
    pub const NOON: Self = Self {
        hour:       12,
        minute:     0,
        second:     0,
        nanosecond: 0,
    };
    pub const MIN: Self = Self::MIDNIGHT;
    pub const MAX: Self = Self {
        hour:       23,
        minute:     59,
        second:     59,
        nanosecond: 999_999_999,
    };

    /// Creates a time, validating every field.
    ///
    /// # Errors
    /// Returns `Error::InvalidFieldValue` naming the first invalid field.
    pub fn new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Result<Self, Error> {
        check(Field::HourOfDay, i64::from(hour))?;
        check(Field::MinuteOfHour, i64::from(minute))?;
        check(Field::SecondOfMinute, i64::from(second))?;
        check(Field::NanoOfSecond, i64::from(nanosecond))?;
        Ok(Self {
            hour,
            minute,
            second,
            nanosecond,
        })
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` if `nano_of_day` is not within a day.
    pub fn of_nano_of_day(nano_of_day: i64) -> Result<Self, Error> {
        check(Field::NanoOfDay, nano_of_day)?;
        let seconds = nano_of_day / NANOS_PER_SECOND;
        // bounded by the check above
        Ok(Self {
            hour:       (seconds / SECONDS_PER_HOUR) as u8,
            minute:     (seconds / SECONDS_PER_MINUTE % 60) as u8,
            second:     (seconds % SECONDS_PER_MINUTE) as u8,
            nanosecond: (nano_of_day % NANOS_PER_SECOND) as u32,
        })
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` if `second_of_day` is not within a day.
    pub fn of_second_of_day(second_of_day: i64) -> Result<Self, Error> {
        check(Field::SecondOfDay, second_of_day)?;
        Self::of_nano_of_day(second_of_day * NANOS_PER_SECOND)
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    pub const fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    pub const fn second_of_day(&self) -> i64 {
        self.hour as i64 * SECONDS_PER_HOUR + self.minute as i64 * SECONDS_PER_MINUTE + self.second as i64
    }

    pub const fn nano_of_day(&self) -> i64 {
        self.second_of_day() * NANOS_PER_SECOND + self.nanosecond as i64
    }

    /// # Errors
    /// Returns `Error::UnsupportedField` for a non-time field.
    pub fn get(&self, field: Field) -> Result<i64, Error> {
        match field {
            Field::HourOfDay => Ok(i64::from(self.hour)),
            Field::MinuteOfHour => Ok(i64::from(self.minute)),
            Field::SecondOfMinute => Ok(i64::from(self.second)),
            Field::NanoOfSecond => Ok(i64::from(self.nanosecond)),
            Field::SecondOfDay => Ok(self.second_of_day()),
            Field::NanoOfDay => Ok(self.nano_of_day()),
            _ => Err(Error::UnsupportedField(field)),
        }
    }

    /// # Errors
    /// Returns `Error::UnsupportedField` for a non-time field and
    /// `Error::InvalidFieldValue` for an out-of-range value.
    pub fn with(&self, field: Field, value: i64) -> Result<Self, Error> {
        if !field.is_time_based() {
            return Err(Error::UnsupportedField(field));
        }
        check(field, value)?;
        // every branch is range-checked above
        match field {
            Field::HourOfDay => Ok(Self { hour: value as u8, ..*self }),
            Field::MinuteOfHour => Ok(Self { minute: value as u8, ..*self }),
            Field::SecondOfMinute => Ok(Self { second: value as u8, ..*self }),
            Field::NanoOfSecond => Ok(Self { nanosecond: value as u32, ..*self }),
            Field::SecondOfDay => Ok(Self {
                nanosecond: self.nanosecond,
                ..Self::of_second_of_day(value)?
            }),
            _ => Self::of_nano_of_day(value),
        }
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` for an hour outside `0..=23`.
    pub fn with_hour(&self, hour: u8) -> Result<Self, Error> {
        self.with(Field::HourOfDay, i64::from(hour))
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` for a minute outside `0..=59`.
    pub fn with_minute(&self, minute: u8) -> Result<Self, Error> {
        self.with(Field::MinuteOfHour, i64::from(minute))
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` for a second outside `0..=59`.
    pub fn with_second(&self, second: u8) -> Result<Self, Error> {
        self.with(Field::SecondOfMinute, i64::from(second))
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` for a value of a second or more.
    pub fn with_nanosecond(&self, nanosecond: u32) -> Result<Self, Error> {
        self.with(Field::NanoOfSecond, i64::from(nanosecond))
    }

    /// Zeroes every field finer than `unit`.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedUnit` for units longer than a day.
    pub fn truncated_to(&self, unit: Unit) -> Result<Self, Error> {
        let unit_nanos = unit.nanos().ok_or(Error::UnsupportedUnit(unit))?;
        let nod = self.nano_of_day();
        Self::of_nano_of_day(nod - nod % unit_nanos)
    }

    /// Adds nanoseconds, returning the wrapped time and the whole days
    /// carried (negative when wrapping backwards).
    pub(crate) fn overflowing_add_nanos(&self, nanos: i128) -> (Self, i128) {
        let total = i128::from(self.nano_of_day()) + nanos;
        let per_day = i128::from(NANOS_PER_DAY);
        let time = Self::from_nano_of_day_unchecked(total.rem_euclid(per_day) as i64);
        (time, total.div_euclid(per_day))
    }

    fn from_nano_of_day_unchecked(nano_of_day: i64) -> Self {
        Self::of_nano_of_day(nano_of_day.rem_euclid(NANOS_PER_DAY)).unwrap_or(Self::MIDNIGHT)
    }

    /// Formats with `formats::LOCAL_TIME`: `HH:mm:ss[.fraction]`.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// # Errors
    /// Returns an error if the formatter needs a field a time lacks.
    pub fn format_with(&self, formatter: &Formatter) -> Result<String, Error> {
        formatter.format(self)
    }

    /// Parses `HH:mm[:ss[.fraction]]`.
    ///
    /// # Errors
    /// Returns `Error::ParseFailure` or `Error::InvalidFieldValue`.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, &formats::LOCAL_TIME)
    }

    /// # Errors
    /// Returns the formatter's parse error, or an error if the text holds no
    /// time.
    pub fn parse_with(text: &str, formatter: &Formatter) -> Result<Self, Error> {
        formatter.parse_into(text)
    }
}

fn check(field: Field, value: i64) -> Result<i64, Error> {
    field
        .fixed_range()
        .unwrap_or(ValueRange::of(0, 0))
        .check(field, value)
}

impl FieldAccess for Time {
    fn kind(&self) -> TemporalKind {
        TemporalKind::Time
    }

    fn field(&self, field: Field) -> Option<i64> {
        self.get(field).ok()
    }
}

impl FromAccessor for Time {
    fn from_accessor(accessor: &dyn FieldAccess) -> Result<Self, Error> {
        let nano_of_day = accessor
            .field(Field::NanoOfDay)
            .ok_or_else(|| Error::UnsupportedTemporalType(format!("unable to obtain a time from {}", accessor.kind())))?;
        Self::of_nano_of_day(nano_of_day)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        formats::LOCAL_TIME.display(self, f)
    }
}

impl FromStr for Time {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Time> for jiff::civil::Time {
    fn from(time: Time) -> Self {
        // every component is in jiff's range
        Self::constant(
            time.hour as i8,
            time.minute as i8,
            time.second as i8,
            time.nanosecond as i32,
        )
    }
}

impl From<jiff::civil::Time> for Time {
    fn from(time: jiff::civil::Time) -> Self {
        // jiff guarantees the same ranges
        Self {
            hour:       time.hour() as u8,
            minute:     time.minute() as u8,
            second:     time.second() as u8,
            nanosecond: time.subsec_nanosecond() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(Time::new(23, 59, 59, 999_999_999).is_ok());
        assert!(matches!(
            Time::new(24, 0, 0, 0),
            Err(Error::InvalidFieldValue { field: Field::HourOfDay, value: 24, .. })
        ));
        assert!(matches!(
            Time::new(0, 60, 0, 0),
            Err(Error::InvalidFieldValue { field: Field::MinuteOfHour, .. })
        ));
        assert!(Time::new(0, 0, 0, 1_000_000_000).is_err());
    }

    #[test]
    fn test_nano_of_day_round_trip() {
        let t = Time::new(12, 43, 18, 5).unwrap();
        assert_eq!(t.second_of_day(), 45_798);
        assert_eq!(Time::of_nano_of_day(t.nano_of_day()).unwrap(), t);
        assert!(Time::of_nano_of_day(NANOS_PER_DAY).is_err());
        assert_eq!(Time::of_second_of_day(3_661).unwrap(), Time::new(1, 1, 1, 0).unwrap());
    }

    #[test]
    fn test_overflowing_add() {
        let t = Time::new(23, 0, 0, 0).unwrap();
        let (wrapped, days) = t.overflowing_add_nanos(2 * 3_600 * i128::from(NANOS_PER_SECOND));
        assert_eq!(wrapped, Time::new(1, 0, 0, 0).unwrap());
        assert_eq!(days, 1);
        let (wrapped, days) = Time::MIDNIGHT.overflowing_add_nanos(-1);
        assert_eq!(wrapped, Time::MAX);
        assert_eq!(days, -1);
    }

    #[test]
    fn test_truncation() {
        let t = Time::new(12, 43, 18, 123_456_789).unwrap();
        assert_eq!(t.truncated_to(Unit::Seconds).unwrap(), Time::new(12, 43, 18, 0).unwrap());
        assert_eq!(t.truncated_to(Unit::Millis).unwrap(), Time::new(12, 43, 18, 123_000_000).unwrap());
        assert_eq!(t.truncated_to(Unit::Hours).unwrap(), Time::NOON);
        assert_eq!(t.truncated_to(Unit::Days).unwrap(), Time::MIDNIGHT);
        assert!(matches!(t.truncated_to(Unit::Weeks), Err(Error::UnsupportedUnit(Unit::Weeks))));
    }

    #[test]
    fn test_with_fields() {
        let t = Time::new(12, 43, 18, 5).unwrap();
        assert_eq!(t.with_hour(1).unwrap().hour(), 1);
        assert_eq!(t.with(Field::SecondOfDay, 60).unwrap(), Time::new(0, 1, 0, 5).unwrap());
        assert!(t.with(Field::DayOfMonth, 1).is_err());
        assert!(t.with_minute(61).is_err());
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Time::new(12, 43, 18, 0).unwrap().to_string(), "12:43:18");
        assert_eq!(Time::new(7, 5, 0, 500_000_000).unwrap().to_string(), "07:05:00.5");
        assert_eq!("12:43".parse::<Time>().unwrap(), Time::new(12, 43, 0, 0).unwrap());
        assert_eq!(
            "12:43:18.000000001".parse::<Time>().unwrap(),
            Time::new(12, 43, 18, 1).unwrap()
        );
        assert!("24:00".parse::<Time>().is_err());
        assert!("12:3".parse::<Time>().is_err());
    }

    #[test]
    fn test_jiff_conversion() {
        let t = Time::new(12, 43, 18, 7).unwrap();
        let civil = jiff::civil::Time::from(t);
        assert_eq!(civil.hour(), 12);
        assert_eq!(Time::from(civil), t);
    }
}
