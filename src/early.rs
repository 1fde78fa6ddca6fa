use crate::consts::{EARLY_MAX_YEAR, EARLY_MIN_YEAR, LONG_MONTH_DAYS};
use crate::field::Field;
use crate::fmt::{FieldAccess, FromAccessor, TemporalKind, formats};
use crate::types::{Month, ValueRange};
use crate::Error;
use std::fmt;
use std::str::FromStr;

/// A Hijrah date before the supported calendar window.
///
/// Month lengths are not known for these years, so any day up to 30 is
/// accepted. An early date can be read, compared and have its fields
/// replaced; it has no arithmetic and no epoch day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EarlyDate {
    year:  i32,
    month: Month,
    day:   u8,
}

impl EarlyDate {
    /// # Errors
    /// Returns `Error::InvalidFieldValue` naming the first field out of range.
    pub fn of(year: i32, month: u8, day: u8) -> Result<Self, Error> {
        Self::year_range().check(Field::Year, i64::from(year))?;
        let month = Month::of(i64::from(month))?;
        Self::day_range().check(Field::DayOfMonth, i64::from(day))?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn is_supported_field(field: Field) -> bool {
        matches!(field, Field::Year | Field::MonthOfYear | Field::DayOfMonth)
    }

    /// # Errors
    /// Returns `Error::UnsupportedField` for anything but year, month and day.
    pub fn get(&self, field: Field) -> Result<i64, Error> {
        match field {
            Field::Year => Ok(i64::from(self.year)),
            Field::MonthOfYear => Ok(i64::from(self.month.number())),
            Field::DayOfMonth => Ok(i64::from(self.day)),
            _ => Err(Error::UnsupportedField(field)),
        }
    }

    /// # Errors
    /// Returns `Error::UnsupportedField` for anything but year, month and day.
    pub fn range(&self, field: Field) -> Result<ValueRange, Error> {
        match field {
            Field::Year => Ok(Self::year_range()),
            Field::MonthOfYear => Ok(Month::RANGE),
            Field::DayOfMonth => Ok(Self::day_range()),
            _ => Err(Error::UnsupportedField(field)),
        }
    }

    /// # Errors
    /// Returns `Error::UnsupportedField` or `Error::InvalidFieldValue`.
    pub fn with(&self, field: Field, value: i64) -> Result<Self, Error> {
        self.range(field)?.check(field, value)?;
        // checked against the field's range above
        match field {
            Field::Year => Ok(Self { year: value as i32, ..*self }),
            Field::MonthOfYear => Ok(Self {
                month: Month::of(value)?,
                ..*self
            }),
            _ => Ok(Self { day: value as u8, ..*self }),
        }
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` outside `1..=1299`.
    pub fn with_year(&self, year: i32) -> Result<Self, Error> {
        self.with(Field::Year, i64::from(year))
    }

    pub const fn with_month(&self, month: Month) -> Self {
        Self { month, ..*self }
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` outside `1..=30`.
    pub fn with_day_of_month(&self, day: u8) -> Result<Self, Error> {
        self.with(Field::DayOfMonth, i64::from(day))
    }

    /// Parses `yyyy-MM-dd`.
    ///
    /// # Errors
    /// Returns `Error::ParseFailure` or `Error::InvalidFieldValue`.
    pub fn parse(text: &str) -> Result<Self, Error> {
        formats::DATE.without_chronology().parse_into(text)
    }

    const fn year_range() -> ValueRange {
        ValueRange::of(EARLY_MIN_YEAR as i64, EARLY_MAX_YEAR as i64)
    }

    const fn day_range() -> ValueRange {
        ValueRange::of(1, LONG_MONTH_DAYS as i64)
    }
}

impl FieldAccess for EarlyDate {
    fn kind(&self) -> TemporalKind {
        TemporalKind::EarlyDate
    }

    fn field(&self, field: Field) -> Option<i64> {
        self.get(field).ok()
    }
}

impl FromAccessor for EarlyDate {
    fn from_accessor(accessor: &dyn FieldAccess) -> Result<Self, Error> {
        let field = |field: Field| {
            accessor.field(field).ok_or_else(|| {
                Error::UnsupportedTemporalType(format!("unable to obtain an early date from {}", accessor.kind()))
            })
        };
        let (year, month, day) = (field(Field::Year)?, field(Field::MonthOfYear)?, field(Field::DayOfMonth)?);
        Self::year_range().check(Field::Year, year)?;
        Month::RANGE.check(Field::MonthOfYear, month)?;
        Self::day_range().check(Field::DayOfMonth, day)?;
        // every field was range-checked above
        Self::of(year as i32, month as u8, day as u8)
    }
}

impl fmt::Display for EarlyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        formats::DATE.display(self, f)
    }
}

impl FromStr for EarlyDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
