use crate::calendar::Chronology;
use crate::clock::Clock;
use crate::consts::{COMMON_YEAR_DAYS, DAYS_PER_WEEK, MONTHS_PER_YEAR, SECONDS_PER_DAY};
use crate::field::{Field, Unit};
use crate::fmt::{FieldAccess, Formatter, FromAccessor, TemporalKind, formats};
use crate::range::DateRange;
use crate::temporal::{LocalValue, Temporal};
use crate::types::{Month, ValueRange, Weekday};
use crate::zone::ZoneId;
use crate::{DateTime, Error, Offset, OffsetDate, Time, ZonedDateTime};
use jiff::Timestamp;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A date in a Hijrah chronology, without time of day or offset.
///
/// The fields are always valid for the chronology: the year lies in its
/// supported window and the day in the month's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    chronology: Chronology,
    epoch_day:  i64,
    year:       i32,
    month:      Month,
    day:        u8,
}

impl Date {
    /// Creates a date in the default Hijrah chronology.
    ///
    /// # Errors
    /// Returns `Error::InvalidFieldValue` for a month outside `1..=12` or a
    /// day beyond the month's length, and `Error::DateOutOfRange` for a year
    /// outside `MIN_YEAR..=MAX_YEAR`.
    pub fn of(year: i32, month: u8, day: u8) -> Result<Self, Error> {
        Self::of_in(Chronology::hijrah(), year, month, day)
    }

    /// # Errors
    /// As `of`, against `chronology`.
    pub fn of_in(chronology: Chronology, year: i32, month: u8, day: u8) -> Result<Self, Error> {
        Self::from_fields(chronology, i64::from(year), i64::from(month), i64::from(day))
    }

    /// # Errors
    /// As `of`.
    pub fn of_month(year: i32, month: Month, day: u8) -> Result<Self, Error> {
        Self::of(year, month.number(), day)
    }

    /// # Errors
    /// Returns `Error::DateOutOfRange` outside the supported window.
    pub fn of_epoch_day(epoch_day: i64) -> Result<Self, Error> {
        Self::of_epoch_day_in(Chronology::hijrah(), epoch_day)
    }

    /// # Errors
    /// Returns `Error::DateOutOfRange` outside the chronology's window.
    pub fn of_epoch_day_in(chronology: Chronology, epoch_day: i64) -> Result<Self, Error> {
        let (year, month, day) = chronology.date_fields(epoch_day)?;
        Ok(Self {
            chronology,
            epoch_day,
            year,
            month,
            day,
        })
    }

    /// Creates a date from a year and the day within it.
    ///
    /// # Errors
    /// Returns `Error::InvalidFieldValue` if the year has fewer days, and
    /// `Error::DateOutOfRange` for an unsupported year.
    pub fn of_year_day(year: i32, day_of_year: u16) -> Result<Self, Error> {
        Self::of_year_day_in(Chronology::hijrah(), year, day_of_year)
    }

    /// # Errors
    /// As `of_year_day`, against `chronology`.
    pub fn of_year_day_in(chronology: Chronology, year: i32, day_of_year: u16) -> Result<Self, Error> {
        let length = chronology.year_length(i64::from(year))?;
        ValueRange::of(1, i64::from(length)).check(Field::DayOfYear, i64::from(day_of_year))?;
        let start = chronology.epoch_day(i64::from(year), 1, 1)?;
        Self::of_epoch_day_in(chronology, start + i64::from(day_of_year) - 1)
    }

    /// The date at `instant` in `zone`.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` if the local date is unsupported, or a
    /// zone rules error.
    pub fn of_instant(instant: Timestamp, zone: &ZoneId) -> Result<Self, Error> {
        Ok(DateTime::of_instant(instant, zone)?.date())
    }

    /// Today's date according to `clock`.
    ///
    /// # Errors
    /// As `of_instant`.
    pub fn now(clock: &impl Clock) -> Result<Self, Error> {
        Self::of_instant(clock.instant(), &clock.zone())
    }

    /// First supported date of the default chronology, 1300-01-01.
    pub fn min_date() -> Self {
        let chronology = Chronology::hijrah();
        Self::of_epoch_day_in(chronology, chronology.epoch_day_bounds().0).unwrap_or_else(|_| Self::epoch())
    }

    /// Last supported date of the default chronology, 1600-12-30.
    pub fn max_date() -> Self {
        let chronology = Chronology::hijrah();
        Self::of_epoch_day_in(chronology, chronology.epoch_day_bounds().1).unwrap_or_else(|_| Self::epoch())
    }

    /// The date of epoch day 0 (1970-01-01), 1389-10-22.
    pub fn epoch() -> Self {
        Self {
            chronology: Chronology::hijrah(),
            epoch_day:  0,
            year:       1389,
            month:      Month::Shawwal,
            day:        22,
        }
    }

    /// # Errors
    /// Returns `Error::DateOutOfRange` if the Gregorian date lies outside the
    /// supported window.
    pub fn from_gregorian(date: jiff::civil::Date) -> Result<Self, Error> {
        Self::of_epoch_day(gregorian_epoch_day(date)?)
    }

    /// The proleptic Gregorian date of the same day.
    ///
    /// # Errors
    /// Only fails if the zone rules layer rejects the timestamp.
    pub fn to_gregorian(&self) -> Result<jiff::civil::Date, Error> {
        let midnight = Timestamp::from_second(self.epoch_day * SECONDS_PER_DAY).map_err(|e| Error::zone_rules(&e))?;
        Ok(jiff::tz::TimeZone::UTC.to_datetime(midnight).date())
    }

    fn from_fields(chronology: Chronology, year: i64, month: i64, day: i64) -> Result<Self, Error> {
        let epoch_day = chronology.epoch_day(year, month, day)?;
        // epoch_day() validated every field
        Ok(Self {
            chronology,
            epoch_day,
            year: year as i32,
            month: Month::of(month)?,
            day: day as u8,
        })
    }

    /// Builds a date, clamping the day to the month length.
    fn resolve_previous_valid(chronology: Chronology, year: i64, month: Month, day: u8) -> Result<Self, Error> {
        let length = chronology.month_length(year, month)?;
        Self::from_fields(chronology, year, i64::from(month.number()), i64::from(day.min(length)))
    }

    pub const fn chronology(&self) -> Chronology {
        self.chronology
    }

    pub const fn epoch_day(&self) -> i64 {
        self.epoch_day
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn month_value(&self) -> u8 {
        self.month.number()
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub fn day_of_week(&self) -> Weekday {
        Weekday::from_epoch_day(self.epoch_day)
    }

    pub fn day_of_year(&self) -> u16 {
        let start = self.chronology.provider().year_start(self.year);
        // a year is at most a few hundred days
        (self.epoch_day - start + 1) as u16
    }

    pub fn length_of_month(&self) -> u8 {
        self.chronology.provider().month_length(self.year, self.month.number())
    }

    pub fn length_of_year(&self) -> u16 {
        self.chronology.provider().year_length(self.year)
    }

    pub fn is_leap_year(&self) -> bool {
        self.length_of_year() > COMMON_YEAR_DAYS
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn plus_days(&self, days: i64) -> Result<Self, Error> {
        self.plus(days, Unit::Days)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, Error> {
        self.plus(weeks, Unit::Weeks)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn plus_months(&self, months: i64) -> Result<Self, Error> {
        self.plus(months, Unit::Months)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn plus_years(&self, years: i64) -> Result<Self, Error> {
        self.plus(years, Unit::Years)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn minus_days(&self, days: i64) -> Result<Self, Error> {
        self.minus(days, Unit::Days)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn minus_weeks(&self, weeks: i64) -> Result<Self, Error> {
        self.minus(weeks, Unit::Weeks)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn minus_months(&self, months: i64) -> Result<Self, Error> {
        self.minus(months, Unit::Months)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn minus_years(&self, years: i64) -> Result<Self, Error> {
        self.minus(years, Unit::Years)
    }

    /// Same month and day in another year, clamping the day.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` for an unsupported year.
    pub fn with_year(&self, year: i32) -> Result<Self, Error> {
        self.with(Field::Year, i64::from(year))
    }

    /// Same year and day in another month, clamping the day.
    ///
    /// # Errors
    /// Only fails for a chronology whose window excludes this date's year.
    pub fn with_month(&self, month: Month) -> Result<Self, Error> {
        self.with(Field::MonthOfYear, i64::from(month.number()))
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` if the month is shorter.
    pub fn with_day_of_month(&self, day: u8) -> Result<Self, Error> {
        self.with(Field::DayOfMonth, i64::from(day))
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` if the year is shorter.
    pub fn with_day_of_year(&self, day_of_year: u16) -> Result<Self, Error> {
        self.with(Field::DayOfYear, i64::from(day_of_year))
    }

    pub const fn at_time(&self, time: Time) -> DateTime {
        DateTime::new(*self, time)
    }

    pub const fn at_start_of_day(&self) -> DateTime {
        DateTime::new(*self, Time::MIDNIGHT)
    }

    /// The earliest valid instant of this date in `zone`. If midnight falls in
    /// a gap, the result is the first instant after the gap.
    ///
    /// # Errors
    /// Returns a zone rules error.
    pub fn at_start_of_day_in(&self, zone: ZoneId) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::of(self.at_start_of_day(), zone)
    }

    pub const fn at_offset(&self, offset: Offset) -> OffsetDate {
        OffsetDate::new(*self, offset)
    }

    /// The instant of the start of this date at `offset`.
    ///
    /// # Errors
    /// Only fails if the instant is beyond the timestamp range.
    pub fn to_instant(&self, offset: Offset) -> Result<Timestamp, Error> {
        self.at_offset(offset).to_instant()
    }

    /// The dates from this one (inclusive) to `end` (exclusive), one day apart.
    ///
    /// # Errors
    /// Returns `Error::InvalidRange` if `end` is before this date.
    pub fn dates_until(&self, end: Self) -> Result<DateRange, Error> {
        DateRange::new(*self, end)
    }

    /// The dates from this one (inclusive) to `end` (exclusive), `step` days
    /// apart.
    ///
    /// # Errors
    /// Returns `Error::InvalidRange` if `end` is before this date or `step` is
    /// not positive.
    pub fn dates_until_step(&self, end: Self, step: i64) -> Result<DateRange, Error> {
        DateRange::with_step(*self, end, step)
    }

    /// Formats as `yyyy-MM-dd`.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// # Errors
    /// Returns `Error::ChronologyMismatch` if the formatter is bound to another
    /// chronology.
    pub fn format_with(&self, formatter: &Formatter) -> Result<String, Error> {
        formatter.format(self)
    }

    /// Parses `yyyy-MM-dd` strictly.
    ///
    /// # Errors
    /// Returns `Error::ParseFailure` for malformed text, and the construction
    /// errors of `of` for invalid fields.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, &formats::DATE)
    }

    /// # Errors
    /// As `parse`, plus `Error::ChronologyMismatch` if the formatter carries no
    /// chronology.
    pub fn parse_with(text: &str, formatter: &Formatter) -> Result<Self, Error> {
        formatter.parse_into(text)
    }

    fn plus_months_clamped(&self, months: i64) -> Result<Self, Error> {
        let month_index = i64::from(self.year) * i64::from(MONTHS_PER_YEAR) + i64::from(self.month.number()) - 1;
        let target = month_index
            .checked_add(months)
            .ok_or(Error::ArithmeticOverflow("plus months"))?;
        let year = target.div_euclid(i64::from(MONTHS_PER_YEAR));
        let month = Month::of(target.rem_euclid(i64::from(MONTHS_PER_YEAR)) + 1)?;
        Self::resolve_previous_valid(self.chronology, year, month, self.day)
    }
}

pub(crate) fn gregorian_epoch_day(date: jiff::civil::Date) -> Result<i64, Error> {
    let midnight = jiff::tz::TimeZone::UTC
        .to_timestamp(date.to_datetime(jiff::civil::Time::midnight()))
        .map_err(|e| Error::zone_rules(&e))?;
    Ok(midnight.as_second().div_euclid(SECONDS_PER_DAY))
}

impl LocalValue for Date {
    fn date(&self) -> Date {
        *self
    }

    fn with_date(self, date: Date) -> Self {
        date
    }

    fn local_key(&self) -> (i64, i32) {
        (self.epoch_day * SECONDS_PER_DAY, 0)
    }

    fn is_supported_field(&self, field: Field) -> bool {
        field.is_date_based()
    }

    fn is_supported_unit(&self, unit: Unit) -> bool {
        unit.is_date_based()
    }

    fn get_field(&self, field: Field) -> Result<i64, Error> {
        match field {
            Field::Year => Ok(i64::from(self.year)),
            Field::MonthOfYear => Ok(i64::from(self.month.number())),
            Field::DayOfMonth => Ok(i64::from(self.day)),
            Field::DayOfYear => Ok(i64::from(self.day_of_year())),
            Field::DayOfWeek => Ok(i64::from(self.day_of_week().number())),
            Field::EpochDay => Ok(self.epoch_day),
            _ => Err(Error::UnsupportedField(field)),
        }
    }

    fn field_range(&self, field: Field) -> Result<ValueRange, Error> {
        match field {
            Field::DayOfMonth => Ok(ValueRange::of(1, i64::from(self.length_of_month()))),
            Field::DayOfYear => Ok(ValueRange::of(1, i64::from(self.length_of_year()))),
            _ if field.is_date_based() => Ok(self.chronology.range(field)),
            _ => Err(Error::UnsupportedField(field)),
        }
    }

    fn with_field(self, field: Field, value: i64) -> Result<Self, Error> {
        let chronology = self.chronology;
        match field {
            Field::Year => Self::resolve_previous_valid(chronology, value, self.month, self.day),
            Field::MonthOfYear => {
                Self::resolve_previous_valid(chronology, i64::from(self.year), Month::of(value)?, self.day)
            },
            Field::DayOfMonth => Self::from_fields(chronology, i64::from(self.year), i64::from(self.month.number()), value),
            Field::DayOfYear => {
                let day = u16::try_from(value).map_err(|_| Error::InvalidFieldValue {
                    field,
                    value,
                    range: ValueRange::of(1, i64::from(self.length_of_year())),
                })?;
                Self::of_year_day_in(chronology, self.year, day)
            },
            Field::DayOfWeek => {
                let current = i64::from(self.day_of_week().number());
                self.checked_add(value - current, Unit::Days)
            },
            Field::EpochDay => Self::of_epoch_day_in(chronology, value),
            _ => Err(Error::UnsupportedField(field)),
        }
    }

    fn checked_add(self, amount: i64, unit: Unit) -> Result<Self, Error> {
        let overflow = || Error::ArithmeticOverflow("date arithmetic");
        match unit {
            Unit::Days => {
                if amount == 0 {
                    return Ok(self);
                }
                let epoch_day = self.epoch_day.checked_add(amount).ok_or_else(overflow)?;
                Self::of_epoch_day_in(self.chronology, epoch_day)
            },
            Unit::Weeks => {
                let days = amount.checked_mul(DAYS_PER_WEEK).ok_or_else(overflow)?;
                self.checked_add(days, Unit::Days)
            },
            Unit::Months => self.plus_months_clamped(amount),
            Unit::Years => {
                let months = amount
                    .checked_mul(i64::from(MONTHS_PER_YEAR))
                    .ok_or_else(overflow)?;
                self.plus_months_clamped(months)
            },
            Unit::Decades => {
                let years = amount.checked_mul(10).ok_or_else(overflow)?;
                self.checked_add(years, Unit::Years)
            },
            _ => Err(Error::UnsupportedUnit(unit)),
        }
    }

    fn truncate(self, unit: Unit) -> Result<Self, Error> {
        match unit {
            Unit::Days => Ok(self),
            _ => Err(Error::UnsupportedUnit(unit)),
        }
    }
}

impl Temporal for Date {
    type Local = Self;

    fn local(&self) -> Self {
        *self
    }

    fn construct(&self, local: Self) -> Result<Self, Error> {
        Ok(local)
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch_day
            .cmp(&other.epoch_day)
            .then_with(|| self.chronology.id().cmp(other.chronology.id()))
    }
}

impl FieldAccess for Date {
    fn kind(&self) -> TemporalKind {
        TemporalKind::Date
    }

    fn chronology(&self) -> Option<Chronology> {
        Some(self.chronology)
    }

    fn field(&self, field: Field) -> Option<i64> {
        self.get_field(field).ok()
    }
}

impl FromAccessor for Date {
    fn from_accessor(accessor: &dyn FieldAccess) -> Result<Self, Error> {
        let chronology = accessor
            .chronology()
            .ok_or_else(|| Error::mismatch(Chronology::hijrah().id(), None))?;
        let epoch_day = accessor
            .field(Field::EpochDay)
            .ok_or_else(|| Error::UnsupportedTemporalType(format!("unable to obtain a date from {}", accessor.kind())))?;
        Self::of_epoch_day_in(chronology, epoch_day)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        formats::DATE.display(self, f)
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
