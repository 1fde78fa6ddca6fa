//! Conversions from `jiff` values into Hijrah values.

use crate::date::gregorian_epoch_day;
use crate::zone::ZoneId;
use crate::{Date, DateTime, Error, Offset, OffsetDateTime, Time, ZonedDateTime};
use jiff::Timestamp;

/// Views a `jiff` instant in the Hijrah calendar.
pub trait TimestampExt {
    /// # Errors
    /// Returns `Error::DateOutOfRange` if the local date is unsupported, or a
    /// zone rules error.
    fn at_hijrah_zone(&self, zone: ZoneId) -> Result<ZonedDateTime, Error>;

    /// # Errors
    /// Returns `Error::DateOutOfRange` if the local date is unsupported.
    fn at_hijrah_offset(&self, offset: Offset) -> Result<OffsetDateTime, Error>;

    /// The instant as a Hijrah date-time in UTC, e.g.
    /// `1446-02-05T09:43:18Z`.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` if the date is unsupported.
    fn to_hijrah_string(&self) -> Result<String, Error>;
}

impl TimestampExt for Timestamp {
    fn at_hijrah_zone(&self, zone: ZoneId) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::of_instant(*self, zone)
    }

    fn at_hijrah_offset(&self, offset: Offset) -> Result<OffsetDateTime, Error> {
        OffsetDateTime::of_instant(*self, &ZoneId::fixed(offset))
    }

    fn to_hijrah_string(&self) -> Result<String, Error> {
        Ok(self.at_hijrah_offset(Offset::UTC)?.to_string())
    }
}

/// Converts Gregorian `jiff` values into their Hijrah counterparts.
pub trait GregorianExt {
    type Hijrah;

    /// # Errors
    /// Returns `Error::DateOutOfRange` if the date lies outside the supported
    /// window.
    fn to_hijrah(&self) -> Result<Self::Hijrah, Error>;
}

impl GregorianExt for jiff::civil::Date {
    type Hijrah = Date;

    fn to_hijrah(&self) -> Result<Date, Error> {
        Date::of_epoch_day(gregorian_epoch_day(*self)?)
    }
}

impl GregorianExt for jiff::civil::DateTime {
    type Hijrah = DateTime;

    fn to_hijrah(&self) -> Result<DateTime, Error> {
        Ok(DateTime::new(self.date().to_hijrah()?, Time::from(self.time())))
    }
}

impl GregorianExt for jiff::Zoned {
    type Hijrah = ZonedDateTime;

    fn to_hijrah(&self) -> Result<ZonedDateTime, Error> {
        let instant = self.timestamp();
        ZonedDateTime::of_instant(instant, ZoneId::from_jiff(self.time_zone(), instant)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_views() {
        let instant: Timestamp = "2024-08-09T09:43:18Z".parse().unwrap();
        assert_eq!(instant.to_hijrah_string().unwrap(), "1446-02-05T09:43:18Z");
        let riyadh = instant.at_hijrah_zone(ZoneId::region("Asia/Riyadh").unwrap()).unwrap();
        assert_eq!(riyadh.to_string(), "1446-02-05T12:43:18+03:00[Asia/Riyadh]");
        let offset = instant.at_hijrah_offset(Offset::from_hours(-10).unwrap()).unwrap();
        assert_eq!(offset.to_string(), "1446-02-04T23:43:18-10:00");
    }

    #[test]
    fn test_gregorian_values() {
        assert_eq!(jiff::civil::date(2024, 8, 9).to_hijrah().unwrap(), Date::of(1446, 2, 5).unwrap());
        let civil = jiff::civil::date(2024, 8, 9).at(12, 43, 18, 0);
        assert_eq!(civil.to_hijrah().unwrap(), DateTime::of(1446, 2, 5, 12, 43, 18, 0).unwrap());
        assert!(jiff::civil::date(1800, 1, 1).to_hijrah().is_err());
    }

    #[test]
    fn test_zoned() {
        let zoned = jiff::civil::date(2024, 8, 9)
            .at(12, 43, 18, 0)
            .in_tz("Asia/Riyadh")
            .unwrap();
        let hijrah = zoned.to_hijrah().unwrap();
        assert_eq!(hijrah.to_string(), "1446-02-05T12:43:18+03:00[Asia/Riyadh]");
    }
}
