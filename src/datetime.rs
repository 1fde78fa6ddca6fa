use crate::calendar::Chronology;
use crate::clock::Clock;
use crate::consts::{NANOS_PER_SECOND, SECONDS_PER_DAY};
use crate::field::{Field, Unit};
use crate::fmt::{FieldAccess, Formatter, FromAccessor, TemporalKind, formats};
use crate::temporal::{LocalValue, Temporal};
use crate::types::ValueRange;
use crate::zone::ZoneId;
use crate::{Date, Error, Offset, OffsetDateTime, Time, ZonedDateTime};
use jiff::Timestamp;
use std::fmt;
use std::str::FromStr;

/// A Hijrah date with a time of day, without offset or zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    pub const fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    /// Creates a date-time in the default Hijrah chronology.
    ///
    /// # Errors
    /// Returns the validation errors of `Date::of` and `Time::new`.
    pub fn of(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> Result<Self, Error> {
        Ok(Self::new(
            Date::of(year, month, day)?,
            Time::new(hour, minute, second, nanosecond)?,
        ))
    }

    /// The local date-time at `instant` in `zone`.
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
        Self::of_epoch_second_in(
            chronology,
            instant.as_second(),
            instant.subsec_nanosecond(),
            offset,
        )
    }

    /// The local date-time of an epoch second seen at `offset`.
    ///
    /// # Errors
    /// Returns `Error::InvalidFieldValue` for a nanosecond outside a second,
    /// and `Error::DateOutOfRange` if the date is unsupported.
    pub fn of_epoch_second(epoch_second: i64, nanosecond: i32, offset: Offset) -> Result<Self, Error> {
        Self::of_epoch_second_in(Chronology::hijrah(), epoch_second, nanosecond, offset)
    }

    /// # Errors
    /// As `of_epoch_second`.
    pub fn of_epoch_second_in(
        chronology: Chronology,
        epoch_second: i64,
        nanosecond: i32,
        offset: Offset,
    ) -> Result<Self, Error> {
        ValueRange::of(0, NANOS_PER_SECOND - 1).check(Field::NanoOfSecond, i64::from(nanosecond))?;
        let local = epoch_second
            .checked_add(i64::from(offset.seconds()))
            .ok_or(Error::ArithmeticOverflow("epoch second"))?;
        let date = Date::of_epoch_day_in(chronology, local.div_euclid(SECONDS_PER_DAY))?;
        let time = Time::of_nano_of_day(local.rem_euclid(SECONDS_PER_DAY) * NANOS_PER_SECOND + i64::from(nanosecond))?;
        Ok(Self::new(date, time))
    }

    /// The current local date-time according to `clock`.
    ///
    /// # Errors
    /// As `of_instant`.
    pub fn now(clock: &impl Clock) -> Result<Self, Error> {
        Self::of_instant(clock.instant(), &clock.zone())
    }

    pub const fn date(&self) -> Date {
        self.date
    }

    pub const fn time(&self) -> Time {
        self.time
    }

    pub const fn chronology(&self) -> Chronology {
        self.date.chronology()
    }

    /// Seconds since 1970-01-01T00:00 on the local timeline.
    pub const fn local_second(&self) -> i64 {
        self.date.epoch_day() * SECONDS_PER_DAY + self.time.second_of_day()
    }

    /// The epoch second of this local value seen at `offset`.
    pub const fn to_epoch_second(&self, offset: Offset) -> i64 {
        self.local_second() - offset.seconds() as i64
    }

    /// # Errors
    /// Only fails if the instant is beyond the timestamp range.
    pub fn to_instant(&self, offset: Offset) -> Result<Timestamp, Error> {
        Timestamp::new(self.to_epoch_second(offset), self.time.nanosecond() as i32)
            .map_err(|e| Error::zone_rules(&e))
    }

    pub const fn at_offset(&self, offset: Offset) -> OffsetDateTime {
        OffsetDateTime::new(*self, offset)
    }

    /// Places this local value in `zone`, resolving gaps and overlaps.
    ///
    /// # Errors
    /// Returns a zone rules error, or `Error::DateOutOfRange` if a gap shift
    /// leaves the supported window.
    pub fn at_zone(&self, zone: ZoneId) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::of(*self, zone)
    }

    pub const fn with_date(&self, date: Date) -> Self {
        Self::new(date, self.time)
    }

    pub const fn with_time(&self, time: Time) -> Self {
        Self::new(self.date, time)
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

    /// Changes the year, clamping the day to the new month length.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` outside the chronology's years.
    pub fn with_year(&self, year: i32) -> Result<Self, Error> {
        self.with(Field::Year, i64::from(year))
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` for a month outside `1..=12`.
    pub fn with_month(&self, month: u8) -> Result<Self, Error> {
        self.with(Field::MonthOfYear, i64::from(month))
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` past the end of the month.
    pub fn with_day_of_month(&self, day: u8) -> Result<Self, Error> {
        self.with(Field::DayOfMonth, i64::from(day))
    }

    /// # Errors
    /// Returns `Error::InvalidFieldValue` past the end of the year.
    pub fn with_day_of_year(&self, day_of_year: u16) -> Result<Self, Error> {
        self.with(Field::DayOfYear, i64::from(day_of_year))
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

    /// Formats as `yyyy-MM-ddTHH:mm:ss[.fraction]`.
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
    /// Returns `Error::ParseFailure` for malformed text and the validation
    /// errors of `of` for invalid fields.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, &formats::DATE_TIME)
    }

    /// # Errors
    /// As `parse`, plus `Error::ChronologyMismatch` if the formatter carries no
    /// chronology.
    pub fn parse_with(text: &str, formatter: &Formatter) -> Result<Self, Error> {
        formatter.parse_into(text)
    }

    fn plus_nanos_wide(self, nanos: i128) -> Result<Self, Error> {
        let (time, days) = self.time.overflowing_add_nanos(nanos);
        let days = i64::try_from(days).map_err(|_| Error::ArithmeticOverflow("time arithmetic"))?;
        Ok(Self::new(self.date.plus_days(days)?, time))
    }
}

impl LocalValue for DateTime {
    fn date(&self) -> Date {
        self.date
    }

    fn with_date(self, date: Date) -> Self {
        Self::new(date, self.time)
    }

    fn local_key(&self) -> (i64, i32) {
        // nanosecond < 10^9
        (self.local_second(), self.time.nanosecond() as i32)
    }

    fn is_supported_field(&self, field: Field) -> bool {
        field.is_date_based() || field.is_time_based()
    }

    fn is_supported_unit(&self, _unit: Unit) -> bool {
        true
    }

    fn get_field(&self, field: Field) -> Result<i64, Error> {
        if field.is_time_based() {
            self.time.get(field)
        } else {
            self.date.get_field(field)
        }
    }

    fn field_range(&self, field: Field) -> Result<ValueRange, Error> {
        if field.is_time_based() {
            field.fixed_range().ok_or(Error::UnsupportedField(field))
        } else {
            self.date.field_range(field)
        }
    }

    fn with_field(self, field: Field, value: i64) -> Result<Self, Error> {
        if field.is_time_based() {
            Ok(Self::new(self.date, self.time.with(field, value)?))
        } else {
            Ok(Self::new(self.date.with_field(field, value)?, self.time))
        }
    }

    fn checked_add(self, amount: i64, unit: Unit) -> Result<Self, Error> {
        match unit.nanos() {
            Some(unit_nanos) if unit.is_time_based() => {
                self.plus_nanos_wide(i128::from(amount) * i128::from(unit_nanos))
            },
            _ => Ok(Self::new(self.date.checked_add(amount, unit)?, self.time)),
        }
    }

    fn truncate(self, unit: Unit) -> Result<Self, Error> {
        Ok(Self::new(self.date, self.time.truncated_to(unit)?))
    }
}

impl Temporal for DateTime {
    type Local = Self;

    fn local(&self) -> Self {
        *self
    }

    fn construct(&self, local: Self) -> Result<Self, Error> {
        Ok(local)
    }
}

impl FieldAccess for DateTime {
    fn kind(&self) -> TemporalKind {
        TemporalKind::DateTime
    }

    fn chronology(&self) -> Option<Chronology> {
        Some(self.date.chronology())
    }

    fn field(&self, field: Field) -> Option<i64> {
        self.get_field(field).ok()
    }
}

impl FromAccessor for DateTime {
    fn from_accessor(accessor: &dyn FieldAccess) -> Result<Self, Error> {
        Ok(Self::new(Date::from_accessor(accessor)?, Time::from_accessor(accessor)?))
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        formats::DATE_TIME.display(self, f)
    }
}

impl FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8) -> DateTime {
        DateTime::of(y, mo, d, h, mi, s, 0).unwrap()
    }

    #[test]
    fn test_time_arithmetic_rolls_dates() {
        let value = dt(1446, 2, 30, 23, 30, 0);
        assert_eq!(value.plus_minutes(45).unwrap(), dt(1446, 3, 1, 0, 15, 0));
        assert_eq!(value.plus_hours(-24).unwrap(), dt(1446, 2, 29, 23, 30, 0));
        assert_eq!(dt(1446, 1, 1, 0, 0, 0).minus_nanos(1).unwrap().date(), Date::of(1445, 12, 30).unwrap());
        assert_eq!(value.plus(3, Unit::HalfDays).unwrap(), dt(1446, 3, 2, 11, 30, 0));
    }

    #[test]
    fn test_arithmetic_inverse() {
        let value = DateTime::of(1446, 2, 5, 12, 43, 18, 250).unwrap();
        for unit in [
            Unit::Nanos,
            Unit::Micros,
            Unit::Millis,
            Unit::Seconds,
            Unit::Minutes,
            Unit::Hours,
            Unit::HalfDays,
            Unit::Days,
            Unit::Weeks,
            Unit::Months,
            Unit::Years,
            Unit::Decades,
        ] {
            for amount in [1, 7, -3] {
                let moved = value.plus(amount, unit).unwrap();
                assert_eq!(moved.minus(amount, unit).unwrap(), value, "{amount} {unit}");
            }
        }
    }

    #[test]
    fn test_overflow() {
        let value = dt(1446, 2, 5, 0, 0, 0);
        assert!(matches!(value.plus(i64::MAX, Unit::Hours), Err(Error::ArithmeticOverflow(_) | Error::DateOutOfRange { .. })));
        assert!(matches!(value.plus(i64::MAX, Unit::Decades), Err(Error::ArithmeticOverflow(_))));
    }

    #[test]
    fn test_truncation() {
        let value = DateTime::of(1446, 2, 5, 12, 43, 18, 999).unwrap();
        assert_eq!(value.truncated_to(Unit::Minutes).unwrap(), dt(1446, 2, 5, 12, 43, 0));
        assert_eq!(value.truncated_to(Unit::Days).unwrap(), dt(1446, 2, 5, 0, 0, 0));
        assert!(matches!(value.truncated_to(Unit::Months), Err(Error::UnsupportedUnit(Unit::Months))));
    }

    #[test]
    fn test_fields() {
        let value = dt(1446, 2, 5, 12, 43, 18);
        assert_eq!(value.get(Field::HourOfDay).unwrap(), 12);
        assert_eq!(value.get(Field::DayOfMonth).unwrap(), 5);
        assert!(value.get(Field::OffsetSeconds).is_err());
        assert_eq!(value.with_hour(3).unwrap(), dt(1446, 2, 5, 3, 43, 18));
        assert_eq!(value.with(Field::MonthOfYear, 1).unwrap(), dt(1446, 1, 5, 12, 43, 18));
        assert!(matches!(value.with(Field::HourOfDay, 24), Err(Error::InvalidFieldValue { .. })));

        let end_of_month = dt(1446, 4, 30, 8, 0, 0);
        assert_eq!(end_of_month.with_month(5).unwrap(), dt(1446, 5, 29, 8, 0, 0));
        assert_eq!(end_of_month.with_day_of_year(1).unwrap(), dt(1446, 1, 1, 8, 0, 0));
        assert_eq!(end_of_month.with_day_of_month(2).unwrap(), dt(1446, 4, 2, 8, 0, 0));
        assert!(end_of_month.with_year(1601).is_err());
    }

    #[test]
    fn test_epoch_seconds() {
        let value = dt(1446, 2, 5, 12, 43, 18);
        let riyadh = Offset::from_hours(3).unwrap();
        let epoch = value.to_epoch_second(riyadh);
        assert_eq!(epoch, 19_944 * 86_400 + 45_798 - 10_800);
        assert_eq!(DateTime::of_epoch_second(epoch, 0, riyadh).unwrap(), value);
        assert_eq!(
            DateTime::of_epoch_second(epoch, 0, Offset::UTC).unwrap(),
            dt(1446, 2, 5, 9, 43, 18)
        );
        assert!(DateTime::of_epoch_second(epoch, -1, Offset::UTC).is_err());
    }

    #[test]
    fn test_display_and_parse() {
        let value = DateTime::of(1446, 2, 5, 12, 43, 18, 120_000_000).unwrap();
        assert_eq!(value.to_string(), "1446-02-05T12:43:18.12");
        assert_eq!(DateTime::parse("1446-02-05T12:43:18.12").unwrap(), value);
        assert_eq!(DateTime::parse("1446-02-05t12:43").unwrap(), dt(1446, 2, 5, 12, 43, 0));
        assert!(matches!(DateTime::parse("1446-02-05 12:43"), Err(Error::ParseFailure { position: 10, .. })));
        assert_eq!(Date::parse_with("1446-02-05T12:43", &formats::DATE_TIME).unwrap(), value.date());
    }
}
