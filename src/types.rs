use crate::Error;
use crate::consts::{DAYS_PER_WEEK, MONTHS_PER_YEAR};
use crate::field::Field;
use crate::prelude::*;
use std::fmt;

/// The valid values of a field: `min..=max`, where the maximum may vary
/// between `smallest_max` and `max` (e.g. day-of-month is `1..=29/30`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    min:          i64,
    smallest_max: i64,
    max:          i64,
}

impl ValueRange {
    /// Creates a fixed range `min..=max`
    pub const fn of(min: i64, max: i64) -> Self {
        Self {
            min,
            smallest_max: max,
            max,
        }
    }

    /// Creates a range whose maximum is between `smallest_max` and `max`
    pub const fn variable(min: i64, smallest_max: i64, max: i64) -> Self {
        Self {
            min,
            smallest_max,
            max,
        }
    }

    pub const fn min(&self) -> i64 {
        self.min
    }

    pub const fn max(&self) -> i64 {
        self.max
    }

    pub const fn smallest_max(&self) -> i64 {
        self.smallest_max
    }

    pub const fn is_fixed(&self) -> bool {
        self.smallest_max == self.max
    }

    pub const fn is_valid(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Returns `value` if it lies in the range.
    ///
    /// # Errors
    /// Returns `Error::InvalidFieldValue` naming `field` otherwise.
    pub fn check(&self, field: Field, value: i64) -> Result<i64, Error> {
        if self.is_valid(value) {
            Ok(value)
        } else {
            Err(Error::InvalidFieldValue {
                field,
                value,
                range: *self,
            })
        }
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fixed() {
            write!(f, "{}..={}", self.min, self.max)
        } else {
            write!(f, "{}..={}/{}", self.min, self.smallest_max, self.max)
        }
    }
}

/// A month of the Hijrah year.
///
/// A month is also an adjuster: `date.with_adjuster(&Month::Ramadan)` moves
/// the date into that month of the same year, clamping the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[repr(u8)]
pub enum Month {
    #[display(fmt = "Muharram")]
    Muharram = 1,
    #[display(fmt = "Safar")]
    Safar,
    #[display(fmt = "Rabi al-Awwal")]
    RabiAlAwwal,
    #[display(fmt = "Rabi al-Thani")]
    RabiAlThani,
    #[display(fmt = "Jumada al-Awwal")]
    JumadaAlAwwal,
    #[display(fmt = "Jumada al-Thani")]
    JumadaAlThani,
    #[display(fmt = "Rajab")]
    Rajab,
    #[display(fmt = "Shaaban")]
    Shaaban,
    #[display(fmt = "Ramadan")]
    Ramadan,
    #[display(fmt = "Shawwal")]
    Shawwal,
    #[display(fmt = "Dhu al-Qidah")]
    DhuAlQidah,
    #[display(fmt = "Dhu al-Hijjah")]
    DhuAlHijjah,
}

impl Month {
    pub const ALL: [Self; 12] = [
        Self::Muharram,
        Self::Safar,
        Self::RabiAlAwwal,
        Self::RabiAlThani,
        Self::JumadaAlAwwal,
        Self::JumadaAlThani,
        Self::Rajab,
        Self::Shaaban,
        Self::Ramadan,
        Self::Shawwal,
        Self::DhuAlQidah,
        Self::DhuAlHijjah,
    ];

    pub const RANGE: ValueRange = ValueRange::of(1, MONTHS_PER_YEAR as i64);

    /// Returns the month with the given number (1 = Muharram).
    ///
    /// # Errors
    /// Returns `Error::InvalidFieldValue` if `value` is not in `1..=12`.
    pub fn of(value: i64) -> Result<Self, Error> {
        Self::RANGE.check(Field::MonthOfYear, value)?;
        // check() guarantees 1..=12
        Ok(Self::ALL[(value - 1) as usize])
    }

    /// Returns the month number, 1 through 12
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Returns the month `months` after this one, wrapping around the year
    pub const fn plus(self, months: i64) -> Self {
        let index = (self as i64 - 1 + months % 12).rem_euclid(12);
        Self::ALL[index as usize]
    }

    pub const fn minus(self, months: i64) -> Self {
        self.plus(-(months % 12))
    }
}

impl TryFrom<u8> for Month {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::of(i64::from(value))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.number()
    }
}

/// ISO day of the week. Every chronology shares the seven-day week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[repr(u8)]
pub enum Weekday {
    Monday = 1,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Returns the weekday with the given ISO number (Monday = 1).
    ///
    /// # Errors
    /// Returns `Error::InvalidFieldValue` if `value` is not in `1..=7`.
    pub fn of(value: i64) -> Result<Self, Error> {
        ValueRange::of(1, DAYS_PER_WEEK).check(Field::DayOfWeek, value)?;
        Ok(Self::ALL[(value - 1) as usize])
    }

    /// Weekday of an epoch day. Epoch day 0 was a Thursday.
    pub const fn from_epoch_day(epoch_day: i64) -> Self {
        Self::ALL[(epoch_day + 3).rem_euclid(DAYS_PER_WEEK) as usize]
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn plus(self, days: i64) -> Self {
        Self::ALL[(self as i64 - 1 + days % DAYS_PER_WEEK).rem_euclid(DAYS_PER_WEEK) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_display() {
        assert_eq!(ValueRange::of(1, 12).to_string(), "1..=12");
        assert_eq!(ValueRange::variable(1, 29, 30).to_string(), "1..=29/30");
    }

    #[test]
    fn test_value_range_check() {
        let range = ValueRange::of(1, 12);
        assert_eq!(range.check(Field::MonthOfYear, 12).unwrap(), 12);
        assert!(matches!(
            range.check(Field::MonthOfYear, 13),
            Err(Error::InvalidFieldValue { field: Field::MonthOfYear, value: 13, .. })
        ));
    }

    #[test]
    fn test_month_of() {
        assert_eq!(Month::of(1).unwrap(), Month::Muharram);
        assert_eq!(Month::of(9).unwrap(), Month::Ramadan);
        assert_eq!(Month::of(12).unwrap(), Month::DhuAlHijjah);
        assert!(Month::of(0).is_err());
        assert!(Month::of(13).is_err());
    }

    #[test]
    fn test_month_plus_wraps() {
        assert_eq!(Month::DhuAlHijjah.plus(1), Month::Muharram);
        assert_eq!(Month::Muharram.plus(-1), Month::DhuAlHijjah);
        assert_eq!(Month::Ramadan.plus(25), Month::Shawwal);
        assert_eq!(Month::Safar.minus(3), Month::DhuAlQidah);
        assert_eq!(Month::Rajab.plus(i64::MIN), Month::Rajab.plus(i64::MIN % 12));
    }

    #[test]
    fn test_month_display_and_number() {
        assert_eq!(Month::RabiAlAwwal.to_string(), "Rabi al-Awwal");
        assert_eq!(Month::DhuAlHijjah.number(), 12);
        assert_eq!(u8::from(Month::Shaaban), 8);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_month_serde() {
        let json = serde_json::to_string(&Month::Ramadan).unwrap();
        assert_eq!(json, "9");
        let month: Month = serde_json::from_str("10").unwrap();
        assert_eq!(month, Month::Shawwal);
        assert!(serde_json::from_str::<Month>("13").is_err());
    }

    #[test]
    fn test_weekday_from_epoch_day() {
        assert_eq!(Weekday::from_epoch_day(0), Weekday::Thursday);
        assert_eq!(Weekday::from_epoch_day(-1), Weekday::Wednesday);
        // 1446-02-05 is 2024-08-09, a Friday
        assert_eq!(Weekday::from_epoch_day(19_944), Weekday::Friday);
        assert_eq!(Weekday::Sunday.plus(1), Weekday::Monday);
        assert_eq!(Weekday::of(7).unwrap(), Weekday::Sunday);
        assert!(Weekday::of(8).is_err());
    }
}
