//! Date-times in a named zone.
//!
//! A zoned value always carries an offset that its zone allows for its local
//! date-time. Every constructor and adjuster funnels through
//! [`ZonedDateTime::of_local`], which applies the zone's
//! [`OffsetResolution`](crate::zone::OffsetResolution):
//!
//! * a single valid offset is used as is;
//! * in an overlap the preferred offset wins if it is one of the two,
//!   otherwise the earlier one (the larger offset);
//! * in a gap the local value moves forward by the length of the gap and
//!   takes the offset after it.

use crate::calendar::Chronology;
use crate::clock::Clock;
use crate::field::{Field, Unit};
use crate::fmt::{FieldAccess, Formatter, FromAccessor, TemporalKind, formats};
use crate::temporal::{LocalValue, Temporal};
use crate::zone::{OffsetResolution, ZoneId};
use crate::{Date, DateTime, Error, Offset, OffsetDateTime, Time};
use jiff::Timestamp;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A local date-time in a zone, with the offset resolved from the zone's
/// rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonedDateTime {
    local:  DateTime,
    offset: Offset,
    zone:   ZoneId,
}

impl ZonedDateTime {
    /// Places `local` in `zone`, taking the earlier offset in an overlap and
    /// shifting forward across a gap.
    ///
    /// # Errors
    /// Returns a zone rules error, or `Error::DateOutOfRange` if a gap shift
    /// leaves the supported window.
    pub fn of(local: DateTime, zone: ZoneId) -> Result<Self, Error> {
        Self::of_local(local, zone, None)
    }

    /// # Errors
    /// Returns the validation errors of `DateTime::of`, or as `of`.
    #[allow(clippy::too_many_arguments)]
    pub fn of_fields(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
        zone: ZoneId,
    ) -> Result<Self, Error> {
        Self::of(DateTime::of(year, month, day, hour, minute, second, nanosecond)?, zone)
    }

    /// Places `local` in `zone`, keeping `preferred` if the zone allows it for
    /// an overlapping local value.
    ///
    /// # Errors
    /// As `of`.
    pub fn of_local(local: DateTime, zone: ZoneId, preferred: Option<Offset>) -> Result<Self, Error> {
        let (local, offset) = match zone.resolve(&local)? {
            OffsetResolution::Single(offset) => (local, offset),
            gap @ OffsetResolution::Gap { after, .. } => (local.plus_seconds(gap.gap_seconds())?, after),
            OffsetResolution::Overlap { earlier, later } => {
                let offset = preferred
                    .filter(|p| *p == earlier || *p == later)
                    .unwrap_or(earlier);
                (local, offset)
            },
        };
        Ok(Self { local, offset, zone })
    }

    /// Places `local` in `zone` with exactly `offset`.
    ///
    /// # Errors
    /// Returns `Error::InvalidOffsetForZone` if the zone does not allow
    /// `offset` for `local`.
    pub fn of_strict(local: DateTime, offset: Offset, zone: ZoneId) -> Result<Self, Error> {
        if !zone.resolve(&local)?.is_valid(offset) {
            return Err(Error::InvalidOffsetForZone {
                offset: offset.to_string(),
                local:  local.to_string(),
                zone:   zone.id(),
            });
        }
        Ok(Self { local, offset, zone })
    }

    /// The value at `instant` in `zone`.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` if the local date is unsupported, or a
    /// zone rules error.
    pub fn of_instant(instant: Timestamp, zone: ZoneId) -> Result<Self, Error> {
        Self::of_instant_in(Chronology::hijrah(), instant, zone)
    }

    /// # Errors
    /// As `of_instant`.
    pub fn of_instant_in(chronology: Chronology, instant: Timestamp, zone: ZoneId) -> Result<Self, Error> {
        let offset = zone.offset_at(instant)?;
        let local = DateTime::of_epoch_second_in(chronology, instant.as_second(), instant.subsec_nanosecond(), offset)?;
        Ok(Self { local, offset, zone })
    }

    /// # Errors
    /// As `of_instant`.
    pub fn now(clock: &impl Clock) -> Result<Self, Error> {
        Self::of_instant(clock.instant(), clock.zone())
    }

    pub const fn offset(&self) -> Offset {
        self.offset
    }

    pub const fn zone(&self) -> &ZoneId {
        &self.zone
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

    pub const fn date(&self) -> Date {
        self.local.date()
    }

    pub const fn time(&self) -> Time {
        self.local.time()
    }

    pub const fn chronology(&self) -> Chronology {
        self.local.chronology()
    }

    /// Keeps the resolved offset and drops the zone.
    pub const fn to_offset_date_time(&self) -> OffsetDateTime {
        OffsetDateTime::new(self.local, self.offset)
    }

    pub const fn to_epoch_second(&self) -> i64 {
        self.local.to_epoch_second(self.offset)
    }

    /// # Errors
    /// Only fails if the instant is beyond the timestamp range.
    pub fn to_instant(&self) -> Result<Timestamp, Error> {
        self.local.to_instant(self.offset)
    }

    /// In an overlap, the same local value with the earlier offset; otherwise
    /// an equal value.
    ///
    /// # Errors
    /// Returns a zone rules error.
    pub fn with_earlier_offset_at_overlap(&self) -> Result<Self, Error> {
        match self.zone.resolve(&self.local)? {
            OffsetResolution::Overlap { earlier, .. } => Ok(self.with_resolved_offset(earlier)),
            _ => Ok(self.clone()),
        }
    }

    /// In an overlap, the same local value with the later offset; otherwise
    /// an equal value.
    ///
    /// # Errors
    /// Returns a zone rules error.
    pub fn with_later_offset_at_overlap(&self) -> Result<Self, Error> {
        match self.zone.resolve(&self.local)? {
            OffsetResolution::Overlap { later, .. } => Ok(self.with_resolved_offset(later)),
            _ => Ok(self.clone()),
        }
    }

    /// The same local value in `zone`, keeping this offset if `zone` allows
    /// it.
    ///
    /// # Errors
    /// As `of`.
    pub fn with_zone_same_local(&self, zone: ZoneId) -> Result<Self, Error> {
        if zone == self.zone {
            return Ok(self.clone());
        }
        Self::of_local(self.local, zone, Some(self.offset))
    }

    /// The same instant in `zone`.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` if the new local date is unsupported, or
    /// a zone rules error.
    pub fn with_zone_same_instant(&self, zone: ZoneId) -> Result<Self, Error> {
        if zone == self.zone {
            return Ok(self.clone());
        }
        Self::of_instant_in(self.chronology(), self.to_instant()?, zone)
    }

    fn with_resolved_offset(&self, offset: Offset) -> Self {
        Self {
            local: self.local,
            offset,
            zone: self.zone.clone(),
        }
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow`, `Error::DateOutOfRange` or a zone
    /// rules error.
    pub fn plus_days(&self, days: i64) -> Result<Self, Error> {
        self.plus(days, Unit::Days)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow`, `Error::DateOutOfRange` or a zone
    /// rules error.
    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, Error> {
        self.plus(weeks, Unit::Weeks)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow`, `Error::DateOutOfRange` or a zone
    /// rules error.
    pub fn plus_months(&self, months: i64) -> Result<Self, Error> {
        self.plus(months, Unit::Months)
    }

    /// # Errors
    /// Returns `Error::ArithmeticOverflow`, `Error::DateOutOfRange` or a zone
    /// rules error.
    pub fn plus_years(&self, years: i64) -> Result<Self, Error> {
        self.plus(years, Unit::Years)
    }

    /// Adds elapsed hours on the instant timeline.
    ///
    /// # Errors
    /// Returns `Error::ArithmeticOverflow`, `Error::DateOutOfRange` or a zone
    /// rules error.
    pub fn plus_hours(&self, hours: i64) -> Result<Self, Error> {
        self.plus(hours, Unit::Hours)
    }

    /// # Errors
    /// As `plus_hours`.
    pub fn plus_minutes(&self, minutes: i64) -> Result<Self, Error> {
        self.plus(minutes, Unit::Minutes)
    }

    /// # Errors
    /// As `plus_hours`.
    pub fn plus_seconds(&self, seconds: i64) -> Result<Self, Error> {
        self.plus(seconds, Unit::Seconds)
    }

    /// # Errors
    /// As `plus_hours`.
    pub fn plus_nanos(&self, nanos: i64) -> Result<Self, Error> {
        self.plus(nanos, Unit::Nanos)
    }

    /// # Errors
    /// As `plus_days`.
    pub fn minus_days(&self, days: i64) -> Result<Self, Error> {
        self.minus(days, Unit::Days)
    }

    /// # Errors
    /// As `plus_weeks`.
    pub fn minus_weeks(&self, weeks: i64) -> Result<Self, Error> {
        self.minus(weeks, Unit::Weeks)
    }

    /// # Errors
    /// As `plus_months`.
    pub fn minus_months(&self, months: i64) -> Result<Self, Error> {
        self.minus(months, Unit::Months)
    }

    /// # Errors
    /// As `plus_years`.
    pub fn minus_years(&self, years: i64) -> Result<Self, Error> {
        self.minus(years, Unit::Years)
    }

    /// # Errors
    /// As `plus_hours`.
    pub fn minus_hours(&self, hours: i64) -> Result<Self, Error> {
        self.minus(hours, Unit::Hours)
    }

    /// # Errors
    /// As `plus_hours`.
    pub fn minus_minutes(&self, minutes: i64) -> Result<Self, Error> {
        self.minus(minutes, Unit::Minutes)
    }

    /// # Errors
    /// As `plus_hours`.
    pub fn minus_seconds(&self, seconds: i64) -> Result<Self, Error> {
        self.minus(seconds, Unit::Seconds)
    }

    /// # Errors
    /// As `plus_hours`.
    pub fn minus_nanos(&self, nanos: i64) -> Result<Self, Error> {
        self.minus(nanos, Unit::Nanos)
    }

    /// Formats as `yyyy-MM-ddTHH:mm:ss[.fraction]±HH:MM[region]`.
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
    /// Returns `Error::ParseFailure` for malformed text, `Error::UnknownZone`
    /// for an unknown region, and the validation errors of `DateTime::of`.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, &formats::ZONED_DATE_TIME)
    }

    /// # Errors
    /// As `parse`, plus `Error::ChronologyMismatch` for an unbound formatter.
    pub fn parse_with(text: &str, formatter: &Formatter) -> Result<Self, Error> {
        formatter.parse_into(text)
    }
}

impl Temporal for ZonedDateTime {
    type Local = DateTime;

    fn local(&self) -> DateTime {
        self.local
    }

    fn construct(&self, local: DateTime) -> Result<Self, Error> {
        Self::of_local(local, self.zone.clone(), Some(self.offset))
    }

    fn timeline_key(&self) -> (i64, i32) {
        // nanosecond < 10^9
        (self.to_epoch_second(), self.local.time().nanosecond() as i32)
    }

    fn offset_seconds(&self) -> Option<i32> {
        Some(self.offset.seconds())
    }

    /// Takes the offset only when the zone allows it for the local value,
    /// which in practice means switching branches of an overlap.
    fn with_offset_seconds(&self, seconds: i32) -> Result<Self, Error> {
        let offset = Offset::from_seconds(seconds)?;
        if offset != self.offset && self.zone.resolve(&self.local)?.is_valid(offset) {
            return Ok(self.with_resolved_offset(offset));
        }
        Ok(self.clone())
    }

    /// Time units move along the instant timeline, so adding an hour across
    /// a transition adds exactly an hour of elapsed time. Date units move the
    /// local value and re-resolve it in the zone.
    fn plus(&self, amount: i64, unit: Unit) -> Result<Self, Error> {
        if unit.is_time_based() {
            let moved = self.to_offset_date_time().plus(amount, unit)?;
            return Self::of_instant_in(self.chronology(), moved.to_instant()?, self.zone.clone());
        }
        if !self.is_supported_unit(unit) {
            return Err(Error::UnsupportedUnit(unit));
        }
        self.construct(self.local.checked_add(amount, unit)?)
    }
}

impl PartialOrd for ZonedDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZonedDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timeline_key()
            .cmp(&other.timeline_key())
            .then_with(|| self.local.cmp(&other.local))
            .then_with(|| self.zone.id().cmp(&other.zone.id()))
    }
}

impl FieldAccess for ZonedDateTime {
    fn kind(&self) -> TemporalKind {
        TemporalKind::ZonedDateTime
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

    fn zone(&self) -> Option<ZoneId> {
        Some(self.zone.clone())
    }
}

/// With an offset, the parsed local value and offset fix the instant, which is
/// then placed in the zone (or in the offset itself when no region was
/// given). Without one, the local value is resolved in the zone.
impl FromAccessor for ZonedDateTime {
    fn from_accessor(accessor: &dyn FieldAccess) -> Result<Self, Error> {
        let local = DateTime::from_accessor(accessor)?;
        match (accessor.zone(), accessor.offset()) {
            (Some(zone), Some(offset)) => Self::of_instant_in(local.chronology(), local.to_instant(offset)?, zone),
            (None, Some(offset)) => Self::of_instant_in(local.chronology(), local.to_instant(offset)?, ZoneId::Fixed(offset)),
            (Some(zone), None) => Self::of(local, zone),
            (None, None) => Err(Error::UnsupportedTemporalType(format!(
                "unable to obtain a zone from {}",
                accessor.kind()
            ))),
        }
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        formats::ZONED_DATE_TIME.display(self, f)
    }
}

impl FromStr for ZonedDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    const US_EASTERN: &str = "EST5EDT,M3.2.0,M11.1.0";

    fn eastern() -> ZoneId {
        ZoneId::posix(US_EASTERN).unwrap()
    }

    fn hours(h: i8) -> Offset {
        Offset::from_hours(h).unwrap()
    }

    fn local(y: i32, mo: u8, d: u8, h: u8, mi: u8) -> DateTime {
        DateTime::of(y, mo, d, h, mi, 0, 0).unwrap()
    }

    #[test]
    fn test_single_offset() {
        let riyadh = ZoneId::region("Asia/Riyadh").unwrap();
        let value = ZonedDateTime::of_fields(1446, 2, 5, 12, 43, 18, 0, riyadh).unwrap();
        assert_eq!(value.offset(), hours(3));
        assert_eq!(value.to_string(), "1446-02-05T12:43:18+03:00[Asia/Riyadh]");
    }

    #[test]
    fn test_gap_shifts_forward() {
        // 2024-03-10 02:30 is skipped by the spring-forward transition
        let value = ZonedDateTime::of(local(1445, 8, 29, 2, 30), eastern()).unwrap();
        assert_eq!(value.to_local(), local(1445, 8, 29, 3, 30));
        assert_eq!(value.offset(), hours(-4));
    }

    #[test]
    fn test_overlap_prefers_earlier() {
        // 2024-11-03 01:30 happens twice
        let requested = local(1446, 5, 1, 1, 30);
        let value = ZonedDateTime::of(requested, eastern()).unwrap();
        assert_eq!(value.to_local(), requested);
        assert_eq!(value.offset(), hours(-4));
        let later = ZonedDateTime::of_local(requested, eastern(), Some(hours(-5))).unwrap();
        assert_eq!(later.offset(), hours(-5));
        let ignored = ZonedDateTime::of_local(requested, eastern(), Some(hours(2))).unwrap();
        assert_eq!(ignored.offset(), hours(-4));
    }

    #[test]
    fn test_overlap_adjusters_are_idempotent() {
        let value = ZonedDateTime::of(local(1446, 5, 1, 1, 30), eastern()).unwrap();
        let later = value.with_later_offset_at_overlap().unwrap();
        assert_eq!(later.offset(), hours(-5));
        assert_eq!(later.with_later_offset_at_overlap().unwrap(), later);
        let earlier = later.with_earlier_offset_at_overlap().unwrap();
        assert_eq!(earlier, value);
        assert_eq!(earlier.with_earlier_offset_at_overlap().unwrap(), earlier);
        assert_eq!(earlier.until(&later), SignedDuration::from_hours(1));

        let plain = ZonedDateTime::of(local(1446, 5, 2, 1, 30), eastern()).unwrap();
        assert_eq!(plain.with_later_offset_at_overlap().unwrap(), plain);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let a = ZonedDateTime::of(local(1446, 5, 1, 1, 30), eastern()).unwrap();
        let b = ZonedDateTime::of(local(1446, 5, 1, 1, 30), eastern()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_instant().unwrap(), b.to_instant().unwrap());
    }

    #[test]
    fn test_of_strict() {
        let requested = local(1446, 5, 1, 1, 30);
        assert!(ZonedDateTime::of_strict(requested, hours(-5), eastern()).is_ok());
        assert!(matches!(
            ZonedDateTime::of_strict(requested, hours(3), eastern()),
            Err(Error::InvalidOffsetForZone { .. })
        ));
        assert!(ZonedDateTime::of_strict(local(1445, 8, 29, 2, 30), hours(-5), eastern()).is_err());
    }

    #[test]
    fn test_time_arithmetic_crosses_transition() {
        let value = ZonedDateTime::of(local(1446, 5, 1, 1, 30), eastern()).unwrap();
        let hour_later = value.plus_hours(1).unwrap();
        assert_eq!(hour_later.to_local(), local(1446, 5, 1, 1, 30));
        assert_eq!(hour_later.offset(), hours(-5));
        assert_eq!(hour_later.minus_hours(1).unwrap(), value);
    }

    #[test]
    fn test_date_arithmetic_keeps_local_time() {
        let value = ZonedDateTime::of(local(1445, 8, 28, 2, 30), eastern()).unwrap();
        assert_eq!(value.offset(), hours(-5));
        let next = value.plus_days(1).unwrap();
        // lands in the gap and moves past it
        assert_eq!(next.to_local(), local(1445, 8, 29, 3, 30));
        assert_eq!(next.offset(), hours(-4));
        let week = value.plus_weeks(1).unwrap();
        assert_eq!(week.to_local(), local(1445, 9, 6, 2, 30));
        assert_eq!(week.offset(), hours(-4));
    }

    #[test]
    fn test_offset_field() {
        let value = ZonedDateTime::of(local(1446, 5, 1, 1, 30), eastern()).unwrap();
        assert_eq!(value.get(Field::OffsetSeconds).unwrap(), -14_400);
        assert_eq!(value.with(Field::OffsetSeconds, -18_000).unwrap().offset(), hours(-5));
        assert_eq!(value.with(Field::OffsetSeconds, 0).unwrap(), value);
    }

    #[test]
    fn test_zone_changes() {
        let riyadh = ZoneId::region("Asia/Riyadh").unwrap();
        let shanghai = ZoneId::region("Asia/Shanghai").unwrap();
        let value = ZonedDateTime::of_fields(1446, 2, 5, 12, 43, 18, 0, riyadh).unwrap();
        let same_instant = value.with_zone_same_instant(shanghai.clone()).unwrap();
        assert_eq!(same_instant.time(), Time::new(17, 43, 18, 0).unwrap());
        assert!(same_instant.is_equal(&value));
        let same_local = value.with_zone_same_local(shanghai).unwrap();
        assert_eq!(same_local.to_local(), value.to_local());
        assert_eq!(same_local.offset(), hours(8));
        assert!(same_local.is_before(&value));
    }

    #[test]
    fn test_ordering() {
        let riyadh = ZoneId::region("Asia/Riyadh").unwrap();
        let value = ZonedDateTime::of_fields(1446, 2, 5, 12, 0, 0, 0, riyadh).unwrap();
        let utc = value.with_zone_same_instant(ZoneId::utc()).unwrap();
        assert!(value.is_equal(&utc));
        assert_eq!(value.cmp(&utc), Ordering::Greater);
        assert!(utc.minus_seconds(1).unwrap() < value);
    }

    #[test]
    fn test_display_and_parse() {
        let value = ZonedDateTime::of(local(1446, 5, 1, 1, 30), eastern()).unwrap();
        let later = value.with_later_offset_at_overlap().unwrap();
        let fixed = ZonedDateTime::of(local(1446, 2, 5, 12, 0), ZoneId::fixed(hours(3))).unwrap();
        assert_eq!(fixed.to_string(), "1446-02-05T12:00:00+03:00");
        assert_eq!(ZonedDateTime::parse("1446-02-05T12:00+03:00").unwrap(), fixed);
        let riyadh = ZonedDateTime::parse("1446-02-05T12:43:18+03:00[Asia/Riyadh]").unwrap();
        assert_eq!(riyadh.zone().region_id(), Some("Asia/Riyadh"));
        assert_eq!(riyadh.to_string(), "1446-02-05T12:43:18+03:00[Asia/Riyadh]");
        assert!(matches!(
            ZonedDateTime::parse("1446-02-05T12:43:18+03:00[Mars/Olympus]"),
            Err(Error::UnknownZone(_))
        ));
        assert_eq!(later.to_string(), "1446-05-01T01:30:00-05:00[EST5EDT,M3.2.0,M11.1.0]");
        assert_eq!(ZonedDateTime::parse(&later.to_string()).unwrap(), later);
        assert_eq!(ZonedDateTime::parse(&value.to_string()).unwrap(), value);
    }
}
