use crate::calendar::Chronology;
use crate::clock::Clock;
use crate::consts::SECONDS_PER_DAY;
use crate::field::{Field, Unit};
use crate::fmt::{FieldAccess, Formatter, FromAccessor, TemporalKind, formats};
use crate::temporal::{LocalValue, Temporal};
use crate::zone::ZoneId;
use crate::{Date, Error, Offset, OffsetDateTime, Time};
use jiff::Timestamp;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A Hijrah date paired with a fixed UTC offset.
///
/// The instant of an offset date is the start of its day at its offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDate {
    date:   Date,
    offset: Offset,
}

impl OffsetDate {
    pub const fn new(date: Date, offset: Offset) -> Self {
        Self { date, offset }
    }

    /// # Errors
    /// Returns the validation errors of `Date::of`.
    pub fn of(year: i32, month: u8, day: u8, offset: Offset) -> Result<Self, Error> {
        Ok(Self::new(Date::of(year, month, day)?, offset))
    }

    /// The date at `instant` in `zone`, with the zone's offset at that instant.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` if the date is unsupported, or a zone
    /// rules error.
    pub fn of_instant(instant: Timestamp, zone: &ZoneId) -> Result<Self, Error> {
        let offset = zone.offset_at(instant)?;
        Ok(Self::new(Date::of_instant(instant, zone)?, offset))
    }

    /// # Errors
    /// As `of_instant`.
    pub fn now(clock: &impl Clock) -> Result<Self, Error> {
        Self::of_instant(clock.instant(), &clock.zone())
    }

    pub const fn date(&self) -> Date {
        self.date
    }

    pub const fn offset(&self) -> Offset {
        self.offset
    }

    pub const fn chronology(&self) -> Chronology {
        self.date.chronology()
    }

    pub const fn to_date(&self) -> Date {
        self.date
    }

    pub const fn at_time(&self, time: Time) -> OffsetDateTime {
        OffsetDateTime::new(self.date.at_time(time), self.offset)
    }

    pub const fn at_start_of_day(&self) -> OffsetDateTime {
        self.at_time(Time::MIDNIGHT)
    }

    /// Epoch second of the start of this date at this offset.
    pub const fn to_epoch_second(&self) -> i64 {
        self.date.epoch_day() * SECONDS_PER_DAY - self.offset.seconds() as i64
    }

    /// # Errors
    /// Only fails if the instant is beyond the timestamp range.
    pub fn to_instant(&self) -> Result<Timestamp, Error> {
        Timestamp::from_second(self.to_epoch_second()).map_err(|e| Error::zone_rules(&e))
    }

    pub const fn with_offset_same_local(&self, offset: Offset) -> Self {
        Self::new(self.date, offset)
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

    /// Formats as `yyyy-MM-dd±HH:MM`.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// # Errors
    /// Returns `Error::ChronologyMismatch` if the formatter is bound to another
    /// chronology.
    pub fn format_with(&self, formatter: &Formatter) -> Result<String, Error> {
        formatter.format(self)
    }

    /// # Errors
    /// Returns `Error::ParseFailure` for malformed text or a missing offset.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, &formats::OFFSET_DATE)
    }

    /// # Errors
    /// As `parse`, plus `Error::ChronologyMismatch` for an unbound formatter.
    pub fn parse_with(text: &str, formatter: &Formatter) -> Result<Self, Error> {
        formatter.parse_into(text)
    }
}

impl Temporal for OffsetDate {
    type Local = Date;

    fn local(&self) -> Date {
        self.date
    }

    fn construct(&self, local: Date) -> Result<Self, Error> {
        Ok(Self::new(local, self.offset))
    }

    fn timeline_key(&self) -> (i64, i32) {
        (self.to_epoch_second(), 0)
    }

    fn offset_seconds(&self) -> Option<i32> {
        Some(self.offset.seconds())
    }

    fn with_offset_seconds(&self, seconds: i32) -> Result<Self, Error> {
        Ok(self.with_offset_same_local(Offset::from_seconds(seconds)?))
    }
}

impl PartialOrd for OffsetDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OffsetDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_epoch_second()
            .cmp(&other.to_epoch_second())
            .then_with(|| self.date.cmp(&other.date))
    }
}

impl FieldAccess for OffsetDate {
    fn kind(&self) -> TemporalKind {
        TemporalKind::OffsetDate
    }

    fn chronology(&self) -> Option<Chronology> {
        Some(self.date.chronology())
    }

    fn field(&self, field: Field) -> Option<i64> {
        match field {
            Field::OffsetSeconds => Some(i64::from(self.offset.seconds())),
            _ => self.date.get_field(field).ok(),
        }
    }

    fn offset(&self) -> Option<Offset> {
        Some(self.offset)
    }
}

impl FromAccessor for OffsetDate {
    fn from_accessor(accessor: &dyn FieldAccess) -> Result<Self, Error> {
        let offset = accessor
            .offset()
            .ok_or_else(|| Error::UnsupportedTemporalType(format!("unable to obtain an offset from {}", accessor.kind())))?;
        Ok(Self::new(Date::from_accessor(accessor)?, offset))
    }
}

impl fmt::Display for OffsetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        formats::OFFSET_DATE.display(self, f)
    }
}

impl FromStr for OffsetDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
