//! Arithmetic, field adjustment and comparison shared by every temporal type.
//!
//! Each type names the local value it wraps (`Date` or `DateTime`) and how to
//! rebuild itself around a new local value. Unit arithmetic, field changes,
//! truncation and adjusters are written once here against that pair.

use crate::consts::DAYS_PER_WEEK;
use crate::field::{Field, Unit};
use crate::types::{Month, ValueRange, Weekday};
use crate::{Date, Error};
use jiff::SignedDuration;
use std::fmt;

/// A local (offset-free) date or date-time that carries the field and unit
/// arithmetic for the types built around it.
pub trait LocalValue: Copy + PartialEq + fmt::Debug {
    fn date(&self) -> Date;

    fn with_date(self, date: Date) -> Self;

    /// Position on the local timeline: seconds since 1970-01-01T00:00 local,
    /// and the nanosecond within that second.
    fn local_key(&self) -> (i64, i32);

    fn is_supported_field(&self, field: Field) -> bool;

    fn is_supported_unit(&self, unit: Unit) -> bool;

    /// # Errors
    /// Returns `Error::UnsupportedField` for a field this value lacks.
    fn get_field(&self, field: Field) -> Result<i64, Error>;

    /// Range of `field` for this particular value (e.g. the length of this
    /// month for day-of-month).
    ///
    /// # Errors
    /// Returns `Error::UnsupportedField` for a field this value lacks.
    fn field_range(&self, field: Field) -> Result<ValueRange, Error>;

    /// # Errors
    /// Returns an error if the field is unsupported or the result is invalid.
    fn with_field(self, field: Field, value: i64) -> Result<Self, Error>;

    /// # Errors
    /// Returns `Error::UnsupportedUnit`, `Error::ArithmeticOverflow` or
    /// `Error::DateOutOfRange`.
    fn checked_add(self, amount: i64, unit: Unit) -> Result<Self, Error>;

    /// # Errors
    /// Returns `Error::UnsupportedUnit` for units longer than a day.
    fn truncate(self, unit: Unit) -> Result<Self, Error>;
}

/// Operations shared by `Date`, `DateTime`, `OffsetDate`, `OffsetDateTime`
/// and `ZonedDateTime`.
///
/// Every operation returns a new value of the implementing type; the
/// receiver is never changed.
pub trait Temporal: Sized {
    type Local: LocalValue;

    fn local(&self) -> Self::Local;

    /// Rebuilds this value around a new local value, keeping its offset or
    /// zone.
    ///
    /// # Errors
    /// Returns an error when the local value cannot be placed (zone rules).
    fn construct(&self, local: Self::Local) -> Result<Self, Error>;

    /// Position used by `is_before`, `is_after`, `is_equal` and `until`.
    /// Offset-bearing types override this with the instant.
    fn timeline_key(&self) -> (i64, i32) {
        self.local().local_key()
    }

    fn offset_seconds(&self) -> Option<i32> {
        None
    }

    /// Replaces the offset. Only offset-bearing types support this.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedField` unless overridden.
    fn with_offset_seconds(&self, _seconds: i32) -> Result<Self, Error> {
        Err(Error::UnsupportedField(Field::OffsetSeconds))
    }

    fn is_supported_field(&self, field: Field) -> bool {
        if field == Field::OffsetSeconds {
            self.offset_seconds().is_some()
        } else {
            self.local().is_supported_field(field)
        }
    }

    fn is_supported_unit(&self, unit: Unit) -> bool {
        self.local().is_supported_unit(unit)
    }

    /// # Errors
    /// Returns `Error::UnsupportedField` for a field this value lacks.
    fn get(&self, field: Field) -> Result<i64, Error> {
        if field == Field::OffsetSeconds {
            return self
                .offset_seconds()
                .map(i64::from)
                .ok_or(Error::UnsupportedField(field));
        }
        self.local().get_field(field)
    }

    /// # Errors
    /// Returns `Error::UnsupportedField` for a field this value lacks.
    fn range(&self, field: Field) -> Result<ValueRange, Error> {
        if field == Field::OffsetSeconds {
            return match (self.offset_seconds(), field.fixed_range()) {
                (Some(_), Some(range)) => Ok(range),
                _ => Err(Error::UnsupportedField(field)),
            };
        }
        self.local().field_range(field)
    }

    /// Adds `amount` of `unit`. Month and year arithmetic clamps the day of
    /// month to the length of the target month.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedUnit`, `Error::ArithmeticOverflow` or
    /// `Error::DateOutOfRange`.
    fn plus(&self, amount: i64, unit: Unit) -> Result<Self, Error> {
        if !self.is_supported_unit(unit) {
            return Err(Error::UnsupportedUnit(unit));
        }
        let local = self.local().checked_add(amount, unit)?;
        self.construct(local)
    }

    /// # Errors
    /// As `plus`.
    fn minus(&self, amount: i64, unit: Unit) -> Result<Self, Error> {
        let amount = amount
            .checked_neg()
            .ok_or(Error::ArithmeticOverflow("minus"))?;
        self.plus(amount, unit)
    }

    /// Returns a copy with `field` set to `value`, after checking the field is
    /// supported and the value lies in `range(field)`.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedField` or `Error::InvalidFieldValue`.
    fn with(&self, field: Field, value: i64) -> Result<Self, Error> {
        if !self.is_supported_field(field) {
            return Err(Error::UnsupportedField(field));
        }
        self.range(field)?.check(field, value)?;
        if field == Field::OffsetSeconds {
            // range() bounds offsets to +/-18h
            return self.with_offset_seconds(value as i32);
        }
        let local = self.local().with_field(field, value)?;
        self.construct(local)
    }

    /// # Errors
    /// Returns whatever the adjuster returns.
    fn with_adjuster<A: Adjuster + ?Sized>(&self, adjuster: &A) -> Result<Self, Error> {
        let local = self.local();
        let date = adjuster.adjust(local.date())?;
        self.construct(local.with_date(date))
    }

    /// Signed duration from `self` to `end`, positive when `end` is later.
    fn until(&self, end: &Self) -> SignedDuration {
        let (start_secs, start_nanos) = self.timeline_key();
        let (end_secs, end_nanos) = end.timeline_key();
        SignedDuration::new(end_secs - start_secs, end_nanos - start_nanos)
    }

    /// Zeroes every field finer than `unit`.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedUnit` for units longer than a day.
    fn truncated_to(&self, unit: Unit) -> Result<Self, Error> {
        let local = self.local().truncate(unit)?;
        self.construct(local)
    }

    fn is_before(&self, other: &Self) -> bool {
        self.timeline_key() < other.timeline_key()
    }

    fn is_after(&self, other: &Self) -> bool {
        self.timeline_key() > other.timeline_key()
    }

    /// Equality of position on the timeline, ignoring offset, zone and
    /// chronology.
    fn is_equal(&self, other: &Self) -> bool {
        self.timeline_key() == other.timeline_key()
    }
}

/// Computes a new date from an existing one.
pub trait Adjuster {
    /// # Errors
    /// Returns an error if the adjusted date is invalid.
    fn adjust(&self, date: Date) -> Result<Date, Error>;
}

impl<F> Adjuster for F
where
    F: Fn(Date) -> Result<Date, Error>,
{
    fn adjust(&self, date: Date) -> Result<Date, Error> {
        self(date)
    }
}

impl Adjuster for Month {
    fn adjust(&self, date: Date) -> Result<Date, Error> {
        date.with_month(*self)
    }
}

/// Replaces the date outright. The chronologies must match.
impl Adjuster for Date {
    fn adjust(&self, date: Date) -> Result<Date, Error> {
        date.chronology().require(Some(self.chronology()))?;
        Ok(*self)
    }
}

/// Common date adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateAdjuster {
    FirstDayOfMonth,
    LastDayOfMonth,
    FirstDayOfNextMonth,
    FirstDayOfYear,
    LastDayOfYear,
    FirstDayOfNextYear,
    /// The next date falling on the weekday, strictly after the date.
    Next(Weekday),
    NextOrSame(Weekday),
    /// The previous date falling on the weekday, strictly before the date.
    Previous(Weekday),
    PreviousOrSame(Weekday),
}

impl Adjuster for DateAdjuster {
    fn adjust(&self, date: Date) -> Result<Date, Error> {
        let days_to = |target: Weekday| {
            (i64::from(target.number()) - i64::from(date.day_of_week().number())).rem_euclid(DAYS_PER_WEEK)
        };
        match *self {
            Self::FirstDayOfMonth => date.with_day_of_month(1),
            Self::LastDayOfMonth => date.with_day_of_month(date.length_of_month()),
            Self::FirstDayOfNextMonth => date.with_day_of_month(1)?.plus_months(1),
            Self::FirstDayOfYear => date.with_day_of_year(1),
            Self::LastDayOfYear => date.with_day_of_year(date.length_of_year()),
            Self::FirstDayOfNextYear => date.with_day_of_year(1)?.plus_years(1),
            Self::Next(weekday) => {
                let days = days_to(weekday);
                date.plus_days(if days == 0 { DAYS_PER_WEEK } else { days })
            },
            Self::NextOrSame(weekday) => date.plus_days(days_to(weekday)),
            Self::Previous(weekday) => {
                let days = (DAYS_PER_WEEK - days_to(weekday)) % DAYS_PER_WEEK;
                date.minus_days(if days == 0 { DAYS_PER_WEEK } else { days })
            },
            Self::PreviousOrSame(weekday) => {
                date.minus_days((DAYS_PER_WEEK - days_to(weekday)) % DAYS_PER_WEEK)
            },
        }
    }
}
