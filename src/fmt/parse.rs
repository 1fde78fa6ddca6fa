use super::{FieldAccess, Formatter, Item, ResolverStyle, Setting, SignStyle, TemporalKind};
use crate::calendar::Chronology;
use crate::consts::{NANOS_PER_DAY, NANOS_PER_SECOND, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::field::Field;
use crate::types::{Month, ValueRange, Weekday};
use crate::zone::ZoneId;
use crate::{Date, Error, Offset, Time};
use std::collections::BTreeMap;

/// Most digits read for a number when parsing leniently.
const LENIENT_MAX_DIGITS: usize = 19;
/// Most digits in a fraction of a second.
const FRACTION_DIGITS: usize = 9;

/// The fields read from a text, resolved into a date, a time, an offset and
/// a zone where the fields allow it.
///
/// Fields that could not be combined are kept as parsed. A formatter without
/// a chronology never resolves a date, so its year, month and day stay raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    chronology:  Option<Chronology>,
    resolver:    ResolverStyle,
    date:        Option<Date>,
    time:        Option<Time>,
    excess_days: i64,
    fields:      BTreeMap<Field, i64>,
    offset:      Option<Offset>,
    zone:        Option<ZoneId>,
}

impl Parsed {
    pub const fn date(&self) -> Option<Date> {
        self.date
    }

    pub const fn time(&self) -> Option<Time> {
        self.time
    }

    /// Days carried out of the time fields, such as the day added by `24:00`,
    /// when no date was available to absorb them.
    pub const fn excess_days(&self) -> i64 {
        self.excess_days
    }

    pub const fn resolver_style(&self) -> ResolverStyle {
        self.resolver
    }

    /// The value of `field` exactly as it appeared in the text.
    pub fn raw(&self, field: Field) -> Option<i64> {
        self.fields.get(&field).copied()
    }
}

impl FieldAccess for Parsed {
    fn kind(&self) -> TemporalKind {
        TemporalKind::Parsed
    }

    fn chronology(&self) -> Option<Chronology> {
        self.chronology
    }

    fn field(&self, field: Field) -> Option<i64> {
        let resolved = if field.is_date_based() {
            self.date.as_ref().and_then(|date| date.field(field))
        } else if field.is_time_based() {
            self.time.as_ref().and_then(|time| time.field(field))
        } else {
            self.offset.map(|offset| i64::from(offset.seconds()))
        };
        resolved.or_else(|| self.raw(field))
    }

    fn offset(&self) -> Option<Offset> {
        self.offset
    }

    fn zone(&self) -> Option<ZoneId> {
        self.zone.clone()
    }
}

/// Why the text failed to match. A mismatch inside an optional section
/// rewinds it; a fatal error ends the parse.
#[derive(Debug)]
enum Failure {
    Mismatch { position: usize, message: String },
    Fatal(Error),
}

#[derive(Debug, Clone, Default)]
struct State {
    fields: BTreeMap<Field, i64>,
    offset: Option<Offset>,
    zone:   Option<ZoneId>,
}

#[derive(Debug, Clone, Copy)]
struct Settings {
    case_sensitive: bool,
    strict:         bool,
}

struct Parser<'t> {
    text:     &'t str,
    pos:      usize,
    settings: Settings,
    state:    State,
}

/// Parses the whole of `text` with `formatter` and resolves the result.
pub(super) fn parse(formatter: &Formatter, text: &str) -> Result<Parsed, Error> {
    let mut parser = Parser {
        text,
        pos: 0,
        settings: Settings {
            case_sensitive: true,
            strict:         true,
        },
        state: State::default(),
    };
    let matched = parser.items(formatter.items()).and_then(|()| {
        if parser.pos < text.len() {
            Err(Failure::Mismatch {
                position: parser.pos,
                message:  "unparsed text found".to_string(),
            })
        } else {
            Ok(())
        }
    });
    match matched {
        Ok(()) => {},
        Err(Failure::Mismatch { position, message }) => {
            trace!("parse of {text:?} failed at {position}: {message}");
            return Err(Error::ParseFailure {
                text: text.to_string(),
                position,
                message,
            });
        },
        Err(Failure::Fatal(err)) => {
            trace!("parse of {text:?} failed: {err}");
            return Err(err);
        },
    }
    Resolver {
        text,
        chronology: formatter.chronology(),
        style: formatter.resolver_style(),
        fields: &parser.state.fields,
    }
    .resolve(parser.state.offset, parser.state.zone.clone())
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    fn mismatch<T>(&self, position: usize, message: impl Into<String>) -> Result<T, Failure> {
        Err(Failure::Mismatch {
            position,
            message: message.into(),
        })
    }

    fn items(&mut self, items: &[Item]) -> Result<(), Failure> {
        for (i, item) in items.iter().enumerate() {
            match item {
                Item::Value {
                    field,
                    min_width,
                    max_width,
                    sign,
                } => {
                    let reserved = reserved_width(&items[i + 1..]);
                    self.value(*field, usize::from(*min_width), usize::from(*max_width), *sign, reserved)?;
                },
                Item::Fraction {
                    min_width,
                    max_width,
                    decimal_point,
                } => self.fraction(usize::from(*min_width), usize::from(*max_width), *decimal_point)?,
                Item::Char(expected) => self.char(*expected)?,
                Item::Str(expected) => self.str(expected)?,
                Item::OffsetId => self.offset_id()?,
                Item::ZoneRegionId => self.zone_region_id()?,
                Item::Optional(inner) => self.optional(inner)?,
                Item::Composite(inner) => self.items(inner)?,
                Item::Setting(setting) => match setting {
                    Setting::CaseSensitive => self.settings.case_sensitive = true,
                    Setting::CaseInsensitive => self.settings.case_sensitive = false,
                    Setting::Strict => self.settings.strict = true,
                    Setting::Lenient => self.settings.strict = false,
                },
            }
        }
        Ok(())
    }

    /// Settings changed inside the section end with it. A mismatch rewinds
    /// the position and every field the section set.
    fn optional(&mut self, items: &[Item]) -> Result<(), Failure> {
        let (pos, settings, state) = (self.pos, self.settings, self.state.clone());
        let result = self.items(items);
        self.settings = settings;
        match result {
            Err(Failure::Mismatch { .. }) => {
                self.pos = pos;
                self.state = state;
                Ok(())
            },
            other => other,
        }
    }

    fn value(&mut self, field: Field, min_width: usize, max_width: usize, sign: SignStyle, reserved: usize) -> Result<(), Failure> {
        let start = self.pos;
        let strict = self.settings.strict;
        let signed = match self.rest().as_bytes().first() {
            Some(b'+') => Some(true),
            Some(b'-') => Some(false),
            _ => None,
        };
        match signed {
            Some(positive) if !sign.accepts_sign(positive, strict, min_width == max_width) => {
                return self.mismatch(start, format!("unexpected sign for {field}"));
            },
            None if strict && sign == SignStyle::Always => {
                return self.mismatch(start, format!("expected a sign for {field}"));
            },
            _ => {},
        }
        let digits_start = start + usize::from(signed.is_some());
        let (min_digits, max_digits) = if strict { (min_width, max_width) } else { (1, LENIENT_MAX_DIGITS) };
        let available = self.text[digits_start..]
            .bytes()
            .take(max_digits + reserved)
            .take_while(u8::is_ascii_digit)
            .count();
        let taken = available.saturating_sub(reserved).min(max_digits);
        if taken < min_digits {
            return self.mismatch(start, format!("expected {min_digits} digits for {field}"));
        }
        if strict && sign == SignStyle::ExceedsPad {
            let exceeds = taken > min_width;
            if exceeds != (signed == Some(true)) && signed != Some(false) {
                return self.mismatch(start, format!("sign of {field} does not match its width"));
            }
        }
        let digits = &self.text[digits_start..digits_start + taken];
        let magnitude: i64 = match digits.parse() {
            Ok(magnitude) => magnitude,
            Err(_) => return self.mismatch(start, format!("{field} is too large")),
        };
        let value = if signed == Some(false) { -magnitude } else { magnitude };
        self.pos = digits_start + taken;
        self.set_field(field, value, start)
    }

    fn fraction(&mut self, min_width: usize, max_width: usize, decimal_point: bool) -> Result<(), Failure> {
        let start = self.pos;
        let (mut min_digits, max_digits) = if self.settings.strict { (min_width, max_width) } else { (0, FRACTION_DIGITS) };
        if decimal_point {
            if !self.rest().starts_with('.') {
                return if min_width == 0 {
                    Ok(())
                } else {
                    self.mismatch(start, "expected '.'")
                };
            }
            self.pos += 1;
            min_digits = min_digits.max(1);
        }
        let digits = self
            .rest()
            .bytes()
            .take(max_digits)
            .take_while(u8::is_ascii_digit)
            .count();
        if digits < min_digits {
            return self.mismatch(start, "expected a fraction of a second");
        }
        if digits == 0 {
            return Ok(());
        }
        let text = &self.rest()[..digits];
        let nanos = format!("{text:0<9}")
            .parse::<i64>()
            .or_else(|_| self.mismatch(start, "invalid fraction of a second"))?;
        self.pos += digits;
        self.set_field(Field::NanoOfSecond, nanos, start)
    }

    fn char(&mut self, expected: char) -> Result<(), Failure> {
        match self.rest().chars().next() {
            Some(found) if self.chars_match(expected, found) => {
                self.pos += found.len_utf8();
                Ok(())
            },
            _ => self.mismatch(self.pos, format!("expected '{expected}'")),
        }
    }

    fn str(&mut self, expected: &str) -> Result<(), Failure> {
        let start = self.pos;
        let mut found = self.rest().chars();
        for want in expected.chars() {
            match found.next() {
                Some(got) if self.chars_match(want, got) => {},
                _ => return self.mismatch(start, format!("expected '{expected}'")),
            }
        }
        self.pos = self.text.len() - found.as_str().len();
        Ok(())
    }

    fn chars_match(&self, expected: char, found: char) -> bool {
        if self.settings.case_sensitive {
            expected == found
        } else {
            expected.eq_ignore_ascii_case(&found)
        }
    }

    /// `Z` or `±HH:MM[:SS]`. Lenient parsing also takes `±HH`, `±HHMM` and
    /// `±HHMMSS`.
    fn offset_id(&mut self) -> Result<(), Failure> {
        let start = self.pos;
        let rest = self.rest();
        if rest.starts_with('Z') || (!self.settings.case_sensitive && rest.starts_with('z')) {
            self.pos += 1;
            return self.set_offset(Offset::UTC, start);
        }
        let sign = match rest.as_bytes().first() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return self.mismatch(start, "expected an offset"),
        };
        let bytes = rest.as_bytes();
        let pair = |at: usize| -> Option<i32> {
            match bytes.get(at..at + 2) {
                Some([a, b]) if a.is_ascii_digit() && b.is_ascii_digit() => Some(i32::from(a - b'0') * 10 + i32::from(b - b'0')),
                _ => None,
            }
        };
        let Some(hours) = pair(1) else {
            return self.mismatch(start, "expected offset hours");
        };
        let mut len = 3;
        let mut colon = false;
        let mut minutes = 0;
        let mut seconds = 0;
        if bytes.get(len) == Some(&b':') && pair(len + 1).is_some() {
            colon = true;
            minutes = pair(len + 1).unwrap_or_default();
            len += 3;
        } else if !self.settings.strict && pair(len).is_some() {
            minutes = pair(len).unwrap_or_default();
            len += 2;
        } else if self.settings.strict {
            return self.mismatch(start, "expected an offset of the form ±HH:MM");
        }
        if len > 3 {
            if colon && bytes.get(len) == Some(&b':') && pair(len + 1).is_some() {
                seconds = pair(len + 1).unwrap_or_default();
                len += 3;
            } else if !colon && pair(len).is_some() {
                seconds = pair(len).unwrap_or_default();
                len += 2;
            }
        }
        if minutes > 59 || seconds > 59 {
            return self.mismatch(start, "invalid offset");
        }
        let Ok(offset) = Offset::from_seconds(sign * (hours * SECONDS_PER_HOUR as i32 + minutes * SECONDS_PER_MINUTE as i32 + seconds)) else {
            return self.mismatch(start, "offset out of range");
        };
        self.pos += len;
        self.set_offset(offset, start)
    }

    fn zone_region_id(&mut self) -> Result<(), Failure> {
        let start = self.pos;
        let len = self
            .rest()
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || b"/_+-.~,:<>".contains(b))
            .count();
        if len == 0 {
            return self.mismatch(start, "expected a zone region id");
        }
        let zone = ZoneId::of(&self.rest()[..len]).map_err(Failure::Fatal)?;
        self.pos += len;
        match &self.state.zone {
            Some(existing) if *existing != zone => self.mismatch(start, "conflicting zone"),
            _ => {
                self.state.zone = Some(zone);
                Ok(())
            },
        }
    }

    fn set_field(&mut self, field: Field, value: i64, position: usize) -> Result<(), Failure> {
        match self.state.fields.insert(field, value) {
            Some(previous) if previous != value => {
                self.mismatch(position, format!("conflicting values for {field}: {previous} and {value}"))
            },
            _ => Ok(()),
        }
    }

    fn set_offset(&mut self, offset: Offset, position: usize) -> Result<(), Failure> {
        match self.state.offset.replace(offset) {
            Some(previous) if previous != offset => {
                self.mismatch(position, format!("conflicting offsets: {previous} and {offset}"))
            },
            _ => Ok(()),
        }
    }
}

/// Digits claimed by the fixed-width values directly after a value, so that
/// `yyyyMMdd` leaves the month and day to their own items.
fn reserved_width(following: &[Item]) -> usize {
    following
        .iter()
        .map_while(|item| match item {
            Item::Value {
                min_width,
                max_width,
                ..
            } if min_width == max_width => Some(usize::from(*min_width)),
            _ => None,
        })
        .sum()
}

struct Resolver<'a> {
    text:       &'a str,
    chronology: Option<Chronology>,
    style:      ResolverStyle,
    fields:     &'a BTreeMap<Field, i64>,
}

impl Resolver<'_> {
    fn resolve(&self, offset: Option<Offset>, zone: Option<ZoneId>) -> Result<Parsed, Error> {
        let offset = match (offset, self.get(Field::OffsetSeconds)) {
            (Some(offset), Some(seconds)) if i64::from(offset.seconds()) != seconds => {
                return Err(self.conflict(Field::OffsetSeconds, seconds, i64::from(offset.seconds())));
            },
            (Some(offset), _) => Some(offset),
            (None, Some(seconds)) => {
                let seconds = check(Field::OffsetSeconds, seconds)?;
                // checked against +/-18 hours
                Some(Offset::from_seconds(seconds as i32)?)
            },
            (None, None) => None,
        };
        let (time, excess_days) = match self.time()? {
            Some((time, excess_days)) => (Some(time), excess_days),
            None => (None, 0),
        };
        let (date, excess_days) = match self.date()? {
            Some(date) if excess_days != 0 => (Some(date.plus_days(excess_days)?), 0),
            date => (date, excess_days),
        };
        debug!(
            "resolved {:?} with {} resolver: date {date:?}, time {time:?}",
            self.text, self.style
        );
        Ok(Parsed {
            chronology: self.chronology,
            resolver: self.style,
            date,
            time,
            excess_days,
            fields: self.fields.clone(),
            offset,
            zone,
        })
    }

    fn get(&self, field: Field) -> Option<i64> {
        self.fields.get(&field).copied()
    }

    fn conflict(&self, field: Field, parsed: i64, resolved: i64) -> Error {
        Error::ParseFailure {
            text:     self.text.to_string(),
            position: self.text.len(),
            message:  format!("conflict found: {field} {parsed} differs from {field} {resolved} derived from the other fields"),
        }
    }

    fn date(&self) -> Result<Option<Date>, Error> {
        let Some(chronology) = self.chronology else {
            return Ok(None);
        };
        let (date, used): (Date, &[Field]) = if let Some(epoch_day) = self.get(Field::EpochDay) {
            (Date::of_epoch_day_in(chronology, epoch_day)?, &[Field::EpochDay])
        } else if let (Some(year), Some(month), Some(day)) =
            (self.get(Field::Year), self.get(Field::MonthOfYear), self.get(Field::DayOfMonth))
        {
            (
                self.year_month_day(chronology, year, month, day)?,
                &[Field::Year, Field::MonthOfYear, Field::DayOfMonth],
            )
        } else if let (Some(year), Some(day_of_year)) = (self.get(Field::Year), self.get(Field::DayOfYear)) {
            (self.year_day(chronology, year, day_of_year)?, &[Field::Year, Field::DayOfYear])
        } else {
            return Ok(None);
        };
        for field in [
            Field::Year,
            Field::MonthOfYear,
            Field::DayOfMonth,
            Field::DayOfYear,
            Field::DayOfWeek,
            Field::EpochDay,
        ] {
            if used.contains(&field) {
                continue;
            }
            if let (Some(parsed), Some(resolved)) = (self.get(field), date.field(field)) {
                if parsed != resolved {
                    if field == Field::DayOfWeek {
                        Weekday::of(parsed)?;
                    }
                    return Err(self.conflict(field, parsed, resolved));
                }
            }
        }
        Ok(Some(date))
    }

    fn year_month_day(&self, chronology: Chronology, year: i64, month: i64, day: i64) -> Result<Date, Error> {
        let year = chronology.check_year(year)?;
        if self.style == ResolverStyle::Lenient {
            let first = Date::of_in(chronology, year, 1, 1)?;
            let months = month.checked_sub(1).ok_or(Error::ArithmeticOverflow("month"))?;
            let days = day.checked_sub(1).ok_or(Error::ArithmeticOverflow("day"))?;
            return first.plus_months(months)?.plus_days(days);
        }
        let month = Month::of(month)?;
        let day = chronology.range(Field::DayOfMonth).check(Field::DayOfMonth, day)?;
        let day = if self.style == ResolverStyle::Smart {
            day.min(i64::from(chronology.month_length(i64::from(year), month)?))
        } else {
            day
        };
        // day is within 1..=30
        Date::of_in(chronology, year, month.number(), day as u8)
    }

    fn year_day(&self, chronology: Chronology, year: i64, day_of_year: i64) -> Result<Date, Error> {
        let year = chronology.check_year(year)?;
        if self.style == ResolverStyle::Lenient {
            let days = day_of_year.checked_sub(1).ok_or(Error::ArithmeticOverflow("day of year"))?;
            return Date::of_in(chronology, year, 1, 1)?.plus_days(days);
        }
        let day_of_year = chronology.range(Field::DayOfYear).check(Field::DayOfYear, day_of_year)?;
        // within 1..=355
        Date::of_year_day_in(chronology, year, day_of_year as u16)
    }

    /// The time and the whole days carried out of it.
    fn time(&self) -> Result<Option<(Time, i64)>, Error> {
        let nanos = |value: i64| i128::from(value) * i128::from(NANOS_PER_SECOND);
        let total = if let Some(nano_of_day) = self.get(Field::NanoOfDay) {
            i128::from(nano_of_day)
        } else if let Some(second_of_day) = self.get(Field::SecondOfDay) {
            if self.style != ResolverStyle::Lenient {
                check(Field::SecondOfDay, second_of_day)?;
            }
            nanos(second_of_day) + i128::from(self.get(Field::NanoOfSecond).unwrap_or(0))
        } else if let Some(hour) = self.get(Field::HourOfDay) {
            let minute = self.get(Field::MinuteOfHour);
            let second = self.get(Field::SecondOfMinute);
            if minute.is_none() && second.is_some() {
                return Ok(None);
            }
            let (minute, second) = (minute.unwrap_or(0), second.unwrap_or(0));
            let nano = self.get(Field::NanoOfSecond).unwrap_or(0);
            if self.style != ResolverStyle::Lenient {
                check(Field::MinuteOfHour, minute)?;
                check(Field::SecondOfMinute, second)?;
                check(Field::NanoOfSecond, nano)?;
                let end_of_day = self.style == ResolverStyle::Smart && hour == 24 && minute == 0 && second == 0 && nano == 0;
                if !end_of_day {
                    check(Field::HourOfDay, hour)?;
                }
            }
            // lenient values are unbounded, so the sum is taken in i128
            let seconds = i128::from(hour) * i128::from(SECONDS_PER_HOUR)
                + i128::from(minute) * i128::from(SECONDS_PER_MINUTE)
                + i128::from(second);
            seconds * i128::from(NANOS_PER_SECOND) + i128::from(nano)
        } else {
            return Ok(None);
        };
        if self.style != ResolverStyle::Lenient && self.get(Field::NanoOfDay).is_some() {
            // i128 of an i64
            check(Field::NanoOfDay, total as i64)?;
        }
        let day_nanos = i128::from(NANOS_PER_DAY);
        let days = i64::try_from(total.div_euclid(day_nanos)).map_err(|_| Error::ArithmeticOverflow("time"))?;
        // always below one day
        let time = Time::of_nano_of_day(total.rem_euclid(day_nanos) as i64)?;
        if days == 0 {
            for field in [Field::HourOfDay, Field::MinuteOfHour, Field::SecondOfMinute, Field::SecondOfDay] {
                if let (Some(parsed), Some(resolved)) = (self.get(field), time.field(field)) {
                    if parsed != resolved && self.style != ResolverStyle::Lenient {
                        return Err(self.conflict(field, parsed, resolved));
                    }
                }
            }
        }
        Ok(Some((time, days)))
    }
}

fn check(field: Field, value: i64) -> Result<i64, Error> {
    field
        .fixed_range()
        .unwrap_or(ValueRange::of(0, 0))
        .check(field, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::{FormatterBuilder, FromAccessor, formats};
    use crate::{DateTime, EarlyDate, OffsetDateTime};

    fn failure_position(result: Result<Parsed, Error>) -> usize {
        match result {
            Err(Error::ParseFailure { position, .. }) => position,
            other => panic!("expected a parse failure, got {other:?}"),
        }
    }

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::of(y, m, d).unwrap()
    }

    #[test]
    fn test_resolver_styles() {
        let smart = formats::DATE.with_resolver_style(ResolverStyle::Smart);
        let lenient = formats::DATE.with_resolver_style(ResolverStyle::Lenient);
        // Muharram 1446 has 29 days
        assert!(matches!(formats::DATE.parse("1446-01-30"), Err(Error::InvalidFieldValue { .. })));
        assert_eq!(smart.parse("1446-01-30").unwrap().date(), Some(date(1446, 1, 29)));
        assert!(matches!(
            smart.parse("1446-01-31"),
            Err(Error::InvalidFieldValue { field: Field::DayOfMonth, .. })
        ));
        assert!(matches!(
            smart.parse("1446-13-01"),
            Err(Error::InvalidFieldValue { field: Field::MonthOfYear, .. })
        ));
        assert_eq!(lenient.parse("1446-01-30").unwrap().date(), Some(date(1446, 2, 1)));
        assert_eq!(lenient.parse("1446-13-01").unwrap().date(), Some(date(1447, 1, 1)));
        assert_eq!(lenient.parse("1446-01-00").unwrap().date(), Some(date(1445, 12, 30)));
        assert!(matches!(smart.parse("1601-01-01"), Err(Error::DateOutOfRange { .. })));
    }

    #[test]
    fn test_time_resolution() {
        let smart = formats::DATE_TIME.with_resolver_style(ResolverStyle::Smart);
        let lenient = formats::DATE_TIME.with_resolver_style(ResolverStyle::Lenient);
        let next_day = DateTime::of(1446, 2, 6, 0, 0, 0, 0).unwrap();
        assert_eq!(smart.parse_into::<DateTime>("1446-02-05T24:00").unwrap(), next_day);
        assert!(matches!(
            formats::DATE_TIME.parse("1446-02-05T24:00"),
            Err(Error::InvalidFieldValue { field: Field::HourOfDay, .. })
        ));
        assert!(smart.parse("1446-02-05T24:01").is_err());
        assert_eq!(lenient.parse_into::<DateTime>("1446-02-05T23:60").unwrap(), next_day);

        let time = formats::LOCAL_TIME.with_resolver_style(ResolverStyle::Smart);
        let parsed = time.parse("24:00").unwrap();
        assert_eq!(parsed.time(), Some(Time::MIDNIGHT));
        assert_eq!(parsed.excess_days(), 1);

        let hours = FormatterBuilder::new()
            .parse_lenient()
            .append_value(Field::HourOfDay)
            .to_formatter()
            .with_resolver_style(ResolverStyle::Lenient);
        let parsed = hours.parse("999999999999999999").unwrap();
        assert_eq!(parsed.time(), Some(Time::new(15, 0, 0, 0).unwrap()));
        assert_eq!(parsed.excess_days(), 41_666_666_666_666_666);
        let minutes = FormatterBuilder::new()
            .parse_lenient()
            .append_value(Field::HourOfDay)
            .append_literal(':')
            .append_value(Field::MinuteOfHour)
            .to_formatter()
            .with_resolver_style(ResolverStyle::Lenient);
        let parsed = minutes.parse("9223372036854775807:9223372036854775807").unwrap();
        assert!(parsed.excess_days() > 0);
    }

    #[test]
    fn test_failure_positions() {
        assert_eq!(failure_position(formats::DATE.parse("1446-2-05")), 5);
        assert_eq!(failure_position(formats::DATE.parse("1446/02/05")), 4);
        assert_eq!(failure_position(formats::DATE.parse("")), 0);
        // the optional seconds are skipped, leaving ":1" unparsed
        assert_eq!(failure_position(formats::LOCAL_TIME.parse("12:43:1")), 5);
        assert_eq!(failure_position(formats::LOCAL_TIME.parse("12:43:18.")), 8);
        assert_eq!(failure_position(formats::LOCAL_TIME.parse("12:43:18.1234567891")), 18);
    }

    #[test]
    fn test_signs() {
        assert_eq!(failure_position(formats::DATE.parse("+1446-02-05")), 0);
        assert_eq!(failure_position(formats::DATE.parse("14460-02-05")), 0);
        assert!(matches!(formats::DATE.parse("+14460-02-05"), Err(Error::DateOutOfRange { .. })));
        let lenient = FormatterBuilder::new()
            .parse_lenient()
            .append_value_fixed(Field::MonthOfYear, 2)
            .to_formatter();
        assert_eq!(lenient.parse("7").unwrap().raw(Field::MonthOfYear), Some(7));
        assert_eq!(failure_position(lenient.parse("-7")), 0);
    }

    #[test]
    fn test_adjacent_values() {
        let compact = FormatterBuilder::new()
            .append_value_range(Field::Year, 4, 10, SignStyle::ExceedsPad)
            .append_value_fixed(Field::MonthOfYear, 2)
            .append_value_fixed(Field::DayOfMonth, 2)
            .to_formatter()
            .with_chronology(Chronology::hijrah());
        assert_eq!(compact.parse("14460205").unwrap().date(), Some(date(1446, 2, 5)));
        assert_eq!(compact.format(&date(1446, 2, 5)).unwrap(), "14460205");
    }

    #[test]
    fn test_case_and_settings_scope() {
        assert!(formats::DATE_TIME.parse("1446-02-05t12:43").is_ok());
        let scoped = FormatterBuilder::new()
            .optional_start()
            .parse_case_insensitive()
            .append_literal('T')
            .optional_end()
            .append_literal('x')
            .to_formatter();
        assert!(scoped.parse("tx").is_ok());
        assert_eq!(failure_position(scoped.parse("tX")), 1);
        let words = FormatterBuilder::new()
            .parse_case_insensitive()
            .append_literal_str("at")
            .to_formatter();
        assert!(words.parse("AT").is_ok());
    }

    #[test]
    fn test_offsets() {
        let offset = |text: &str| formats::OFFSET_DATE_TIME.parse(text).map(|p| p.offset());
        assert_eq!(offset("1446-02-05T12:00+03:00").unwrap(), Some(Offset::from_hours(3).unwrap()));
        assert_eq!(offset("1446-02-05T12:00-0330").unwrap(), Some(Offset::from_hms(-3, -30, 0).unwrap()));
        assert_eq!(offset("1446-02-05T12:00+03:00:30").unwrap(), Some(Offset::from_hms(3, 0, 30).unwrap()));
        assert_eq!(offset("1446-02-05T12:00z").unwrap(), Some(Offset::UTC));
        assert_eq!(failure_position(formats::OFFSET_DATE_TIME.parse("1446-02-05T12:00+19:00")), 16);
        assert_eq!(failure_position(formats::OFFSET_DATE_TIME.parse("1446-02-05T12:00+03:61")), 16);
        // the date-only form is strict about the minutes
        assert_eq!(failure_position(formats::OFFSET_DATE.parse("1446-02-05+03")), 10);
    }

    #[test]
    fn test_conflicts() {
        let twice = FormatterBuilder::new()
            .append_value(Field::Year)
            .append_literal('/')
            .append_value(Field::Year)
            .to_formatter();
        assert!(twice.parse("1446/1446").is_ok());
        assert_eq!(failure_position(twice.parse("1446/1447")), 5);

        let with_weekday = FormatterBuilder::new()
            .append(&formats::DATE)
            .append_literal(' ')
            .append_value(Field::DayOfWeek)
            .to_formatter()
            .with_chronology(Chronology::hijrah());
        // 1446-02-05 is a Friday
        assert_eq!(with_weekday.parse("1446-02-05 5").unwrap().date(), Some(date(1446, 2, 5)));
        assert_eq!(failure_position(with_weekday.parse("1446-02-05 1")), 12);
        assert!(matches!(
            with_weekday.parse("1446-02-05 9"),
            Err(Error::InvalidFieldValue { field: Field::DayOfWeek, .. })
        ));
    }

    #[test]
    fn test_other_date_paths() {
        let year_day = FormatterBuilder::new()
            .append_value_fixed(Field::Year, 4)
            .append_literal('-')
            .append_value_fixed(Field::DayOfYear, 3)
            .to_formatter()
            .with_chronology(Chronology::hijrah());
        assert_eq!(year_day.parse("1446-036").unwrap().date(), Some(date(1446, 2, 7)));
        assert!(year_day.parse("1446-356").is_err());

        let epoch_day = FormatterBuilder::new()
            .append_value(Field::EpochDay)
            .to_formatter()
            .with_chronology(Chronology::hijrah());
        assert_eq!(epoch_day.parse("19944").unwrap().date(), Some(date(1446, 2, 5)));
        assert_eq!(epoch_day.parse("0").unwrap().date(), Some(date(1389, 10, 22)));
    }

    #[test]
    fn test_unbound_formatter_keeps_raw_fields() {
        let parsed = formats::DATE.without_chronology().parse("1446-02-30").unwrap();
        assert_eq!(parsed.date(), None);
        assert_eq!(parsed.field(Field::DayOfMonth), Some(30));
        assert_eq!(parsed.chronology(), None);
        assert!(matches!(Date::from_accessor(&parsed), Err(Error::ChronologyMismatch { .. })));
        let early = formats::DATE.without_chronology().parse_into::<EarlyDate>("0622-01-01").unwrap();
        assert_eq!(early.year(), 622);
    }

    #[test]
    fn test_zone_region() {
        let parsed = formats::ZONED_DATE_TIME
            .parse("1446-02-05T12:43:18+03:00[Asia/Riyadh]")
            .unwrap();
        assert_eq!(parsed.zone().unwrap().region_id(), Some("Asia/Riyadh"));
        assert!(matches!(
            formats::ZONED_DATE_TIME.parse("1446-02-05T12:43:18+03:00[Mars/Olympus]"),
            Err(Error::UnknownZone(_))
        ));
        assert_eq!(failure_position(formats::ZONED_DATE_TIME.parse("1446-02-05T12:43:18+03:00[]")), 25);
        let value: OffsetDateTime = formats::ZONED_DATE_TIME.parse_into("1446-02-05T12:43:18+03:00").unwrap();
        assert_eq!(value.offset(), Offset::from_hours(3).unwrap());
    }
}
