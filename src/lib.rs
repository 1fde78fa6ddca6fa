/*!
Immutable Hijrah calendar dates, times, date-times and zoned date-times.

Dates are counted in the Umm al-Qura calendar by default, over the years 1300
to 1600. The arithmetic calendar is available as [`Chronology::tabular`], and
another month table can be supplied as a [`Chronology`]. Every
date is anchored to the same epoch day count as the Gregorian calendar, so
instants convert losslessly through [`jiff`], which also supplies the time
zone rules.

```
use hijrah_datetime::{Date, Temporal, Time, ZoneId, ZonedDateTime};

let local = Date::of(1446, 2, 5)?.at_time(Time::new(12, 43, 18, 0)?);
let riyadh = ZonedDateTime::of(local, ZoneId::region("Asia/Riyadh")?)?;
assert_eq!(riyadh.to_string(), "1446-02-05T12:43:18+03:00[Asia/Riyadh]");

let shanghai = riyadh.with_zone_same_instant(ZoneId::region("Asia/Shanghai")?)?;
assert_eq!(shanghai.to_string(), "1446-02-05T17:43:18+08:00[Asia/Shanghai]");
assert!(shanghai.is_equal(&riyadh));

# Ok::<(), hijrah_datetime::Error>(())
```

Local values that fall into a daylight saving gap are moved forward by the
length of the gap; in an overlap the earlier offset is used unless another
valid offset is asked for. See [`ZonedDateTime::of_local`].

# Crate features

* `serde` (default): every value serializes as its canonical text.
* `logging`: emits `log` records for zone resolution and parse failures.
*/

#[macro_use]
mod logging;

mod calendar;
mod clock;
mod consts;
mod date;
mod datetime;
mod early;
mod error;
mod ext;
mod field;
pub mod fmt;
mod offset;
mod offset_date;
mod offset_datetime;
mod prelude;
mod range;
mod temporal;
mod time;
mod types;
mod zone;
mod zoned;

pub use calendar::{CalendarProvider, Chronology, MonthTable, TabularHijrah, UmmAlQura};
pub use clock::{Clock, FixedClock, SystemClock};
pub use consts::*;
pub use date::Date;
pub use datetime::DateTime;
pub use early::EarlyDate;
pub use error::{Error, Result};
pub use ext::{GregorianExt, TimestampExt};
pub use field::{Field, Unit};
pub use offset::Offset;
pub use offset_date::OffsetDate;
pub use offset_datetime::OffsetDateTime;
pub use range::{DateRange, DatesUntil};
pub use temporal::{Adjuster, DateAdjuster, LocalValue, Temporal};
pub use time::Time;
pub use types::{Month, ValueRange, Weekday};
pub use zone::{OffsetResolution, ZoneId, ZoneRegion};
pub use zoned::ZonedDateTime;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    fn assert_value<T: Send + Sync + Clone + PartialEq + std::fmt::Debug + std::fmt::Display>() {}

    #[test]
    fn test_values_are_send_sync_and_printable() {
        assert_value::<Date>();
        assert_value::<Time>();
        assert_value::<DateTime>();
        assert_value::<Offset>();
        assert_value::<OffsetDate>();
        assert_value::<OffsetDateTime>();
        assert_value::<ZonedDateTime>();
        assert_value::<EarlyDate>();
        assert_value::<ZoneId>();
        assert_value::<DateRange>();
    }

    #[test]
    fn test_round_trip_every_type() {
        let local = DateTime::of(1446, 2, 5, 12, 43, 18, 120_000_000).unwrap();
        let offset = Offset::from_hms(3, 30, 0).unwrap();
        let zoned = local.at_zone(ZoneId::region("Asia/Riyadh").unwrap()).unwrap();

        assert_eq!(local.date().to_string().parse::<Date>().unwrap(), local.date());
        assert_eq!(local.time().to_string().parse::<Time>().unwrap(), local.time());
        assert_eq!(local.to_string().parse::<DateTime>().unwrap(), local);
        assert_eq!(offset.to_string().parse::<Offset>().unwrap(), offset);
        let offset_date = local.date().at_offset(offset);
        assert_eq!(offset_date.to_string().parse::<OffsetDate>().unwrap(), offset_date);
        let offset_date_time = local.at_offset(offset);
        assert_eq!(offset_date_time.to_string().parse::<OffsetDateTime>().unwrap(), offset_date_time);
        assert_eq!(zoned.to_string().parse::<ZonedDateTime>().unwrap(), zoned);
    }

    #[test]
    fn test_min_and_max_dates() {
        assert_eq!(Date::min_date().to_string(), "1300-01-01");
        assert_eq!(Date::max_date().to_string(), "1600-12-30");
        assert!(Date::max_date().plus_days(1).is_err());
        assert!(Date::min_date().minus_days(1).is_err());
        assert_eq!(Date::min_date().cmp(&Date::max_date()), Ordering::Less);
    }

    #[test]
    fn test_instant_views_agree() {
        let instant: jiff::Timestamp = "2024-08-09T09:43:18Z".parse().unwrap();
        let zone = ZoneId::region("Asia/Riyadh").unwrap();
        let zoned = ZonedDateTime::of_instant(instant, zone.clone()).unwrap();
        let offset = OffsetDateTime::of_instant(instant, &zone).unwrap();
        assert_eq!(zoned.to_offset_date_time(), offset);
        assert_eq!(zoned.to_instant().unwrap(), instant);
        assert_eq!(offset.to_instant().unwrap(), instant);
        assert_eq!(Date::of_instant(instant, &zone).unwrap(), zoned.to_date());
    }
}
