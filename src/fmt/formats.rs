//! The canonical formatters. All parse strictly and resolve with
//! [`ResolverStyle::Strict`]; every one but [`LOCAL_TIME`] is bound to the
//! default Hijrah chronology.

use super::{FieldAccess, Formatter, FormatterBuilder, ResolverStyle, SignStyle, TemporalKind};
use crate::calendar::Chronology;
use crate::consts::{DATE_SEPARATOR, TIME_DESIGNATOR, TIME_SEPARATOR};
use crate::field::Field;
use crate::Error;
use std::sync::LazyLock;

/// `HH:mm[:ss[.fraction]]`, with as few fraction digits as the value needs.
pub static LOCAL_TIME: LazyLock<Formatter> = LazyLock::new(|| {
    FormatterBuilder::new()
        .append_value_fixed(Field::HourOfDay, 2)
        .append_literal(TIME_SEPARATOR)
        .append_value_fixed(Field::MinuteOfHour, 2)
        .optional_start()
        .append_literal(TIME_SEPARATOR)
        .append_value_fixed(Field::SecondOfMinute, 2)
        .optional_start()
        .append_fraction(0, 9, true)
        .to_formatter()
        .with_resolver_style(ResolverStyle::Strict)
});

/// `yyyy-MM-dd`. Years beyond four digits carry a sign.
pub static DATE: LazyLock<Formatter> = LazyLock::new(|| {
    FormatterBuilder::new()
        .append_value_range(Field::Year, 4, 10, SignStyle::ExceedsPad)
        .append_literal(DATE_SEPARATOR)
        .append_value_fixed(Field::MonthOfYear, 2)
        .append_literal(DATE_SEPARATOR)
        .append_value_fixed(Field::DayOfMonth, 2)
        .to_formatter()
        .with_resolver_style(ResolverStyle::Strict)
        .with_chronology(Chronology::hijrah())
});

/// `DATE` `T` `LOCAL_TIME`; the `T` parses in either case.
pub static DATE_TIME: LazyLock<Formatter> = LazyLock::new(|| {
    FormatterBuilder::new()
        .parse_case_insensitive()
        .append(&DATE)
        .append_literal(TIME_DESIGNATOR)
        .append(&LOCAL_TIME)
        .to_formatter()
        .with_resolver_style(ResolverStyle::Strict)
        .with_chronology(Chronology::hijrah())
});

/// `DATE` followed by the offset, e.g. `1446-02-05+03:00`.
pub static OFFSET_DATE: LazyLock<Formatter> = LazyLock::new(|| {
    FormatterBuilder::new()
        .parse_case_insensitive()
        .append(&DATE)
        .append_offset_id()
        .to_formatter()
        .with_resolver_style(ResolverStyle::Strict)
        .with_chronology(Chronology::hijrah())
});

/// `DATE_TIME` followed by the offset. The offset parses leniently, so
/// `+03` and `+0300` are accepted as well as `+03:00`.
pub static OFFSET_DATE_TIME: LazyLock<Formatter> = LazyLock::new(|| {
    FormatterBuilder::new()
        .parse_case_insensitive()
        .append(&DATE_TIME)
        .parse_lenient()
        .append_offset_id()
        .parse_strict()
        .to_formatter()
        .with_resolver_style(ResolverStyle::Strict)
        .with_chronology(Chronology::hijrah())
});

/// `OFFSET_DATE_TIME` followed by `[region]` for region zones, e.g.
/// `1446-02-05T12:43:18+03:00[Asia/Riyadh]`.
pub static ZONED_DATE_TIME: LazyLock<Formatter> = LazyLock::new(|| {
    FormatterBuilder::new()
        .append(&OFFSET_DATE_TIME)
        .optional_start()
        .append_literal('[')
        .parse_case_sensitive()
        .append_zone_region_id()
        .append_literal(']')
        .to_formatter()
        .with_resolver_style(ResolverStyle::Strict)
        .with_chronology(Chronology::hijrah())
});

/// The canonical formatter for the kind of `value`.
///
/// # Errors
/// Returns `Error::UnsupportedTemporalType` for kinds without one: times,
/// early dates and parse results.
pub fn recommended_formatter(value: &dyn FieldAccess) -> Result<&'static Formatter, Error> {
    match value.kind() {
        TemporalKind::Date => Ok(&*DATE),
        TemporalKind::DateTime => Ok(&*DATE_TIME),
        TemporalKind::OffsetDate => Ok(&*OFFSET_DATE),
        TemporalKind::OffsetDateTime => Ok(&*OFFSET_DATE_TIME),
        TemporalKind::ZonedDateTime => Ok(&*ZONED_DATE_TIME),
        kind @ (TemporalKind::Time | TemporalKind::EarlyDate | TemporalKind::Parsed) => Err(
            Error::UnsupportedTemporalType(format!("no recommended formatter for {kind}")),
        ),
    }
}
