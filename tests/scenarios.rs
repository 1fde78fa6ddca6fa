use hijrah_datetime::{
    Chronology, Date, DateTime, Error, Offset, OffsetDate, OffsetDateTime, OffsetResolution, Temporal, Time, Unit, ZoneId,
    ZonedDateTime,
};
use std::cmp::Ordering;

fn riyadh() -> ZoneId {
    ZoneId::region("Asia/Riyadh").unwrap()
}

fn shanghai() -> ZoneId {
    ZoneId::region("Asia/Shanghai").unwrap()
}

/// Eastern time rules: the gap on 1445-08-29 (2024-03-10) and the overlap on
/// 1446-05-01 (2024-11-03).
fn eastern() -> ZoneId {
    ZoneId::posix("EST5EDT,M3.2.0,M11.1.0").unwrap()
}

fn local(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8) -> DateTime {
    DateTime::of(y, mo, d, h, mi, s, 0).unwrap()
}

fn hours(h: i8) -> Offset {
    Offset::from_hours(h).unwrap()
}

fn in_riyadh() -> ZonedDateTime {
    ZonedDateTime::of(local(1446, 2, 5, 12, 43, 18), riyadh()).unwrap()
}

#[test]
fn test_format_zoned_in_riyadh() {
    let value = in_riyadh();
    assert_eq!(value.offset(), hours(3));
    assert_eq!(value.to_string(), "1446-02-05T12:43:18+03:00[Asia/Riyadh]");
}

#[test]
fn test_same_instant_in_shanghai() {
    let value = in_riyadh().with_zone_same_instant(shanghai()).unwrap();
    assert_eq!(value.offset(), hours(8));
    assert_eq!(value.to_date(), Date::of(1446, 2, 5).unwrap());
    assert_eq!(value.to_time(), Time::new(17, 43, 18, 0).unwrap());
    assert!(value.is_equal(&in_riyadh()));
}

#[test]
fn test_parse_is_equal() {
    let parsed = ZonedDateTime::parse("1446-02-05T12:43:18+03:00[Asia/Riyadh]").unwrap();
    assert!(parsed.is_equal(&in_riyadh()));
    assert_eq!(parsed, in_riyadh());
}

#[test]
fn test_offset_date_plus_days() {
    let value = OffsetDate::of(1446, 2, 5, hours(3)).unwrap();
    let later = value.plus_days(2).unwrap();
    assert_eq!(later.date().day(), 7);
    assert_eq!(later.offset(), hours(3));
}

#[test]
fn test_dates_until_excludes_end() {
    let start = Date::of(1446, 2, 5).unwrap();
    let dates: Vec<Date> = start.dates_until(start.plus_days(3).unwrap()).unwrap().into_iter().collect();
    assert_eq!(
        dates,
        vec![start, start.plus_days(1).unwrap(), start.plus_days(2).unwrap()]
    );
}

#[test]
fn test_default_calendar_is_umm_al_qura() {
    let gregorian = jiff::civil::date(2024, 10, 28);
    let date = Date::from_gregorian(gregorian).unwrap();
    assert_eq!(date, Date::of(1446, 4, 25).unwrap());
    assert_eq!(date.chronology(), Chronology::hijrah());
    assert_eq!(date.chronology().id(), "Hijrah-umalqura");
    assert_eq!(date.to_gregorian().unwrap(), gregorian);

    // the arithmetical calendar stays available and is a day behind here
    let tabular = Date::of_epoch_day_in(Chronology::tabular(), date.epoch_day()).unwrap();
    assert_eq!((tabular.year(), tabular.month().number(), tabular.day()), (1446, 4, 24));
    assert!(tabular.is_equal(&date));
}

#[test]
fn test_day_beyond_any_month() {
    assert!(matches!(Date::of(1446, 12, 32), Err(Error::InvalidFieldValue { .. })));
    assert!(matches!(
        DateTime::of(1446, 12, 32, 0, 0, 0, 0),
        Err(Error::InvalidFieldValue { .. })
    ));
}

#[test]
fn test_round_trip_canonical_text() {
    let zoned = ZonedDateTime::of(local(1446, 5, 1, 1, 30, 0), eastern())
        .unwrap()
        .with_later_offset_at_overlap()
        .unwrap();
    let text = zoned.to_string();
    assert_eq!(text, "1446-05-01T01:30:00-05:00[EST5EDT,M3.2.0,M11.1.0]");
    assert_eq!(ZonedDateTime::parse(&text).unwrap(), zoned);
    assert!(matches!(
        ZonedDateTime::parse("1446-05-01T01:30:00-05:00[Mars/Olympus]"),
        Err(Error::UnknownZone(_))
    ));

    let fixed = zoned.to_offset_date_time();
    assert_eq!(OffsetDateTime::parse(&fixed.to_string()).unwrap(), fixed);
    for text in ["1300-01-01", "1445-12-30", "1600-12-30"] {
        assert_eq!(Date::parse(text).unwrap().to_string(), text);
    }
}

#[test]
fn test_arithmetic_inverse() {
    let start = in_riyadh();
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
        for amount in [1, 7, 15] {
            let moved = start.plus(amount, unit).unwrap();
            assert_eq!(moved.minus(amount, unit).unwrap(), start, "{amount} {unit}");
        }
    }
    let date = Date::of(1446, 2, 5).unwrap();
    assert_eq!(date.plus(40, Unit::Months).unwrap().minus(40, Unit::Months).unwrap(), date);
    assert!(matches!(date.plus(1, Unit::Hours), Err(Error::UnsupportedUnit(Unit::Hours))));
}

#[test]
fn test_resolution_is_deterministic() {
    let requested = local(1446, 5, 1, 1, 30, 0);
    let first = ZonedDateTime::of(requested, eastern()).unwrap();
    let second = ZonedDateTime::of(requested, eastern()).unwrap();
    assert_eq!(first.offset(), second.offset());
    assert_eq!(first.to_instant().unwrap(), second.to_instant().unwrap());
}

#[test]
fn test_overlap_adjusters_are_idempotent() {
    let value = ZonedDateTime::of(local(1446, 5, 1, 1, 30, 0), eastern()).unwrap();
    assert_eq!(value.offset(), hours(-4));
    let earlier = value.with_earlier_offset_at_overlap().unwrap();
    let later = value.with_later_offset_at_overlap().unwrap();
    assert_eq!(later.offset(), hours(-5));
    assert_eq!(earlier.with_earlier_offset_at_overlap().unwrap(), earlier);
    assert_eq!(later.with_later_offset_at_overlap().unwrap(), later);
    assert_eq!(earlier.until(&later).as_secs(), 3_600);
}

#[test]
fn test_gap_shifts_forward() {
    let requested = local(1445, 8, 29, 2, 30, 0);
    let zone = eastern();
    let resolution = zone.resolve(&requested).unwrap();
    assert!(matches!(resolution, OffsetResolution::Gap { .. }));
    assert_eq!(resolution.gap_seconds(), 3_600);

    let value = ZonedDateTime::of(requested, zone).unwrap();
    assert!(value.to_local() > requested);
    assert_eq!(value.to_local(), requested.plus_seconds(3_600).unwrap());
    assert_eq!(value.offset(), hours(-4));
    assert!(matches!(
        ZonedDateTime::of_strict(requested, hours(-5), eastern()),
        Err(Error::InvalidOffsetForZone { .. })
    ));
}

#[test]
fn test_total_order_across_offsets() {
    let riyadh = in_riyadh();
    let utc = riyadh.with_zone_same_instant(ZoneId::utc()).unwrap();
    let tokyo = OffsetDateTime::new(local(1446, 2, 5, 18, 43, 18), hours(9));
    let values = [
        riyadh.to_offset_date_time(),
        utc.to_offset_date_time(),
        tokyo,
        tokyo.plus_seconds(1).unwrap(),
        tokyo.minus_nanos(1).unwrap(),
    ];
    for a in &values {
        for b in &values {
            let relations = [a.is_before(b), a.is_equal(b), a.is_after(b)];
            assert_eq!(relations.iter().filter(|r| **r).count(), 1);
            let key = |v: &OffsetDateTime| (v.to_epoch_second(), v.to_local().time().nanosecond());
            let expected = key(a).cmp(&key(b));
            assert_eq!(a.is_before(b), expected == Ordering::Less);
            assert_eq!(a.is_equal(b), expected == Ordering::Equal);
        }
    }
    assert!(riyadh.is_equal(&utc));
    assert!(riyadh.to_offset_date_time().is_equal(&tokyo));
}

#[test]
fn test_year_window_boundaries() {
    assert!(Date::of(1300, 1, 1).is_ok());
    assert!(Date::of(1600, 12, 30).is_ok());
    assert!(matches!(Date::of(1299, 12, 30), Err(Error::DateOutOfRange { .. })));
    assert!(matches!(Date::of(1601, 1, 1), Err(Error::DateOutOfRange { .. })));
    assert!(matches!(
        Date::of(1600, 12, 30).unwrap().plus_years(1),
        Err(Error::DateOutOfRange { .. })
    ));
}
