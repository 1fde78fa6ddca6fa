use crate::calendar::Chronology;
use crate::clock::Clock;
use crate::field::{Field, Unit};
use crate::fmt::{FieldAccess, Formatter, FromAccessor, TemporalKind, formats};
use crate::temporal::{LocalValue, Temporal};
use crate::zone::ZoneId;
use crate::{Date, DateTime, Error, Offset, OffsetDate, Time, ZonedDateTime};
use jiff::Timestamp;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A local date-time paired with a fixed UTC offset; a well-defined instant.
///
/// Structural equality compares the local value and the offset. Use
/// `is_equal` to compare instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    local:  DateTime,
    offset: Offset,
}

impl OffsetDateTime {
    pub const fn new(local: DateTime, offset: Offset) -> Self {
        Self { local, offset }
    }

    pub const fn of(date: Date, time: Time, offset: Offset) -> Self {
        Self::new(DateTime::new(date, time), offset)
    }

    /// # Errors
    /// Returns the validation errors of `DateTime::of`.
    #[allow(clippy::too_many_arguments)]
    pub fn of_fields(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
        offset: Offset,
    ) -> Result<Self, Error> {
        Ok(Self::new(
            DateTime::of(year, month, day, hour, minute, second, nanosecond)?,
            offset,
        ))
    }

    /// The value at `instant` with the offset `zone` has at that instant.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` if the local date is unsupported, or a
    /// zone rules error.
    pub fn of_instant(instant: Timestamp, zone: &ZoneId) -> Result<Self, Error> {
        Self::of_instant_in(Chronology::hijrah(), instant, zone)
    }

    /// # Errors
    /// As `of_instant`.
    pub fn of_instant_in(chronology: Chronology, instant: Timestamp, zone: &ZoneId) -> Result<Self, Error> {
        let offset = zone.offset_at(instant)?;
        let local = DateTime::of_epoch_second_in(chronology, instant.as_second(), instant.subsec_nanosecond(), offset)?;
        Ok(Self::new(local, offset))
    }

    /// # Errors
    /// As `of_instant`.
    pub fn now(clock: &impl Clock) -> Result<Self, Error> {
        Self::of_instant(clock.instant(), &clock.zone())
    }

    pub const fn offset(&self) -> Offset {
        self.offset
    }

    pub const fn to_local(&self) -> DateTime {
        self.local
    }

    pub const fn to_date(&self) -> Date {
        self.local.date()
    }

    pub const fn to_time(&self) -> Time {
        self.local.time()
    }

    pub const fn chronology(&self) -> Chronology {
        self.local.chronology()
    }

    pub const fn to_offset_date(&self) -> OffsetDate {
        OffsetDate::new(self.local.date(), self.offset)
    }

    /// `epoch_day * 86400 + second_of_day - offset`.
    pub const fn to_epoch_second(&self) -> i64 {
        self.local.to_epoch_second(self.offset)
    }

    /// # Errors
    /// Only fails if the instant is beyond the timestamp range.
    pub fn to_instant(&self) -> Result<Timestamp, Error> {
        self.local.to_instant(self.offset)
    }

    /// The same instant seen at `offset`. The local value moves by the
    /// difference of the offsets, rolling days over as needed.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` if the shifted date is unsupported.
    pub fn with_offset_same_instant(&self, offset: Offset) -> Result<Self, Error> {
        if offset == self.offset {
            return Ok(*self);
        }
        let shift = i64::from(offset.seconds()) - i64::from(self.offset.seconds());
        Ok(Self::new(self.local.plus_seconds(shift)?, offset))
    }

    pub const fn with_offset_same_local(&self, offset: Offset) -> Self {
        Self::new(self.local, offset)
    }

    /// The same local value in `zone`, resolved with this offset preferred.
    ///
    /// # Errors
    /// Returns a zone rules error or `Error::DateOutOfRange` after a gap shift.
    pub fn to_zoned(&self, zone: ZoneId) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::of_local(self.local, zone, Some(self.offset))
    }

    /// The same instant in `zone`.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` or a zone rules error.
    pub fn at_zone_same_instant(&self, zone: ZoneId) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::of_instant_in(self.chronology(), self.to_instant()?, zone)
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
    pub fn plus_hours(&self, hours: i64) -> Result<Self, Error> {
        self.plus(hours, Unit::Hours)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn plus_minutes(&self, minutes: i64) -> Result<Self, Error> {
        self.plus(minutes, Unit::Minutes)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn plus_seconds(&self, seconds: i64) -> Result<Self, Error> {
        self.plus(seconds, Unit::Seconds)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn plus_nanos(&self, nanos: i64) -> Result<Self, Error> {
        self.plus(nanos, Unit::Nanos)
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

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn minus_hours(&self, hours: i64) -> Result<Self, Error> {
        self.minus(hours, Unit::Hours)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn minus_minutes(&self, minutes: i64) -> Result<Self, Error> {
        self.minus(minutes, Unit::Minutes)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn minus_seconds(&self, seconds: i64) -> Result<Self, Error> {
        self.minus(seconds, Unit::Seconds)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow` or `Error::DateOutOfRange`.
    pub fn minus_nanos(&self, nanos: i64) -> Result<Self, Error> {
        self.minus(nanos, Unit::Nanos)
    }

    /// Formats as `yyyy-MM-ddTHH:mm:ss[.fraction]±HH:MM`.
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
    /// Returns `Error::ParseFailure` for malformed text or a missing offset,
    /// and the validation errors of `DateTime::of` for invalid fields.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, &formats::OFFSET_DATE_TIME)
    }

    /// # Errors
    /// As `parse`, plus `Error::ChronologyMismatch` for an unbound formatter.
    pub fn parse_with(text: &str, formatter: &Formatter) -> Result<Self, Error> {
        formatter.parse_into(text)
    }
}

impl Temporal for OffsetDateTime {
    type Local = DateTime;

    fn local(&self) -> DateTime {
        self.local
    }

    fn construct(&self, local: DateTime) -> Result<Self, Error> {
        Ok(Self::new(local, self.offset))
    }

    fn timeline_key(&self) -> (i64, i32) {
        // nanosecond < 10^9
        (self.to_epoch_second(), self.local.time().nanosecond() as i32)
    }

    fn offset_seconds(&self) -> Option<i32> {
        Some(self.offset.seconds())
    }

    fn with_offset_seconds(&self, seconds: i32) -> Result<Self, Error> {
        Ok(self.with_offset_same_local(Offset::from_seconds(seconds)?))
    }
}

impl PartialOrd for OffsetDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OffsetDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timeline_key()
            .cmp(&other.timeline_key())
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl FieldAccess for OffsetDateTime {
    fn kind(&self) -> TemporalKind {
        TemporalKind::OffsetDateTime
    }

    fn chronology(&self) -> Option<Chronology> {
        Some(self.local.chronology())
    }

    fn field(&self, field: Field) -> Option<i64> {
        match field {
            Field::OffsetSeconds => Some(i64::from(self.offset.seconds())),
            _ => self.local.get_field(field).ok(),
        }
    }

    fn offset(&self) -> Option<Offset> {
        Some(self.offset)
    }
}

impl FromAccessor for OffsetDateTime {
    fn from_accessor(accessor: &dyn FieldAccess) -> Result<Self, Error> {
        let offset = accessor
            .offset()
            .ok_or_else(|| Error::UnsupportedTemporalType(format!("unable to obtain an offset from {}", accessor.kind())))?;
        Ok(Self::new(DateTime::from_accessor(accessor)?, offset))
    }
}

impl fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        formats::OFFSET_DATE_TIME.display(self, f)
    }
}

impl FromStr for OffsetDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
