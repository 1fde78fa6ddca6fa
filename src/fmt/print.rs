use super::{FieldAccess, Item, SignStyle};
use crate::consts::NANOS_PER_SECOND;
use crate::field::Field;
use crate::Error;
use std::fmt::Write;

/// Why an item could not be printed. Inside an optional section an
/// unavailable value drops the section; anything else fails the whole print.
#[derive(Debug)]
enum PrintError {
    Unavailable(Error),
    Failed(Error),
}

impl From<PrintError> for Error {
    fn from(err: PrintError) -> Self {
        match err {
            PrintError::Unavailable(err) | PrintError::Failed(err) => err,
        }
    }
}

/// Prints `items` for `value` into a fresh string.
pub(super) fn print(items: &[Item], value: &dyn FieldAccess) -> Result<String, Error> {
    let mut out = String::new();
    print_items(items, value, &mut out)?;
    Ok(out)
}

fn print_items(items: &[Item], value: &dyn FieldAccess, out: &mut String) -> Result<(), PrintError> {
    for item in items {
        match item {
            Item::Value {
                field,
                min_width,
                max_width,
                sign,
            } => {
                let number = value
                    .field(*field)
                    .ok_or(PrintError::Unavailable(Error::UnsupportedField(*field)))?;
                print_value(*field, number, *min_width, *max_width, *sign, out)?;
            },
            Item::Fraction {
                min_width,
                max_width,
                decimal_point,
            } => {
                let nanos = value
                    .field(Field::NanoOfSecond)
                    .ok_or(PrintError::Unavailable(Error::UnsupportedField(Field::NanoOfSecond)))?;
                print_fraction(nanos, *min_width, *max_width, *decimal_point, out);
            },
            Item::Char(c) => out.push(*c),
            Item::Str(s) => out.push_str(s),
            Item::OffsetId => {
                let offset = value
                    .offset()
                    .ok_or(PrintError::Unavailable(Error::UnsupportedField(Field::OffsetSeconds)))?;
                // writing to a String cannot fail
                let _ = write!(out, "{offset}");
            },
            Item::ZoneRegionId => {
                let zone = value.zone();
                let region = zone.as_ref().and_then(|zone| zone.region_id()).ok_or_else(|| {
                    PrintError::Unavailable(Error::UnsupportedTemporalType(format!(
                        "unable to obtain a zone region from {}",
                        value.kind()
                    )))
                })?;
                out.push_str(region);
            },
            Item::Optional(inner) => {
                let mark = out.len();
                match print_items(inner, value, out) {
                    Ok(()) => {},
                    Err(PrintError::Unavailable(_)) => out.truncate(mark),
                    Err(failed) => return Err(failed),
                }
            },
            Item::Composite(inner) => print_items(inner, value, out)?,
            Item::Setting(_) => {},
        }
    }
    Ok(())
}

fn print_value(
    field: Field,
    value: i64,
    min_width: u8,
    max_width: u8,
    sign: SignStyle,
    out: &mut String,
) -> Result<(), PrintError> {
    let digits = value.unsigned_abs().to_string();
    if digits.len() > usize::from(max_width) {
        return Err(PrintError::Failed(Error::InvalidFieldValue {
            field,
            value,
            range: crate::types::ValueRange::of(-max_for_width(max_width), max_for_width(max_width)),
        }));
    }
    if value >= 0 {
        match sign {
            SignStyle::ExceedsPad if digits.len() > usize::from(min_width) => out.push('+'),
            SignStyle::Always => out.push('+'),
            _ => {},
        }
    } else {
        match sign {
            SignStyle::Normal | SignStyle::ExceedsPad | SignStyle::Always => out.push('-'),
            SignStyle::NotNegative => {
                return Err(PrintError::Failed(Error::InvalidFieldValue {
                    field,
                    value,
                    range: crate::types::ValueRange::of(0, max_for_width(max_width)),
                }));
            },
            SignStyle::Never => {},
        }
    }
    for _ in digits.len()..usize::from(min_width) {
        out.push('0');
    }
    out.push_str(&digits);
    Ok(())
}

/// Largest value printable in `width` digits.
fn max_for_width(width: u8) -> i64 {
    10_i64
        .checked_pow(u32::from(width))
        .map_or(i64::MAX, |limit| limit - 1)
}

fn print_fraction(nanos: i64, min_width: u8, max_width: u8, decimal_point: bool, out: &mut String) {
    let nanos = nanos.rem_euclid(NANOS_PER_SECOND);
    if nanos == 0 && min_width == 0 {
        return;
    }
    let full = format!("{nanos:09}");
    let significant = full.trim_end_matches('0').len();
    let width = significant.clamp(usize::from(min_width), usize::from(max_width));
    if width == 0 {
        return;
    }
    if decimal_point {
        out.push('.');
    }
    out.push_str(&full[..width]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::{FormatterBuilder, formats};
    use crate::{Date, DateTime, EarlyDate, Offset, OffsetDateTime, Time, ZoneId, ZonedDateTime};

    fn printed(formatter: &crate::fmt::Formatter, value: &dyn FieldAccess) -> String {
        formatter.format(value).unwrap()
    }

    #[test]
    fn test_sign_styles() {
        let date = Date::of(1446, 2, 5).unwrap();
        let year = |sign, min, max| {
            FormatterBuilder::new()
                .append_value_range(Field::Year, min, max, sign)
                .to_formatter()
        };
        assert_eq!(printed(&year(SignStyle::Normal, 4, 10), &date), "1446");
        assert_eq!(printed(&year(SignStyle::Always, 4, 10), &date), "+1446");
        assert_eq!(printed(&year(SignStyle::ExceedsPad, 4, 10), &date), "1446");
        assert_eq!(printed(&year(SignStyle::ExceedsPad, 2, 10), &date), "+1446");
        assert_eq!(printed(&year(SignStyle::Normal, 6, 10), &date), "001446");
        assert!(matches!(
            year(SignStyle::Normal, 1, 3).format(&date),
            Err(Error::InvalidFieldValue { field: Field::Year, .. })
        ));
    }

    #[test]
    fn test_negative_values() {
        let formatter = |sign| {
            FormatterBuilder::new()
                .append_value_range(Field::OffsetSeconds, 1, 6, sign)
                .to_formatter()
        };
        let value = OffsetDateTime::new(
            DateTime::of(1446, 2, 5, 0, 0, 0, 0).unwrap(),
            Offset::from_hours(-1).unwrap(),
        );
        assert_eq!(printed(&formatter(SignStyle::Normal), &value), "-3600");
        assert_eq!(printed(&formatter(SignStyle::Never), &value), "3600");
        assert!(formatter(SignStyle::NotNegative).format(&value).is_err());
    }

    #[test]
    fn test_fractions() {
        let time = |nanos| Time::new(12, 0, 0, nanos).unwrap();
        let fraction = |min, max| {
            FormatterBuilder::new()
                .append_fraction(min, max, true)
                .to_formatter()
        };
        assert_eq!(printed(&fraction(0, 9), &time(0)), "");
        assert_eq!(printed(&fraction(0, 9), &time(500_000_000)), ".5");
        assert_eq!(printed(&fraction(0, 9), &time(123_456_789)), ".123456789");
        assert_eq!(printed(&fraction(3, 9), &time(500_000_000)), ".500");
        assert_eq!(printed(&fraction(0, 3), &time(123_456_789)), ".123");
        assert_eq!(printed(&fraction(2, 9), &time(0)), ".00");
    }

    #[test]
    fn test_optional_sections_drop_missing_values() {
        let fixed = ZonedDateTime::of(DateTime::of(1446, 2, 5, 12, 0, 0, 0).unwrap(), ZoneId::utc()).unwrap();
        assert_eq!(printed(&formats::ZONED_DATE_TIME, &fixed), "1446-02-05T12:00:00Z");
        let offset = fixed.to_offset_date_time();
        assert_eq!(printed(&formats::ZONED_DATE_TIME, &offset), "1446-02-05T12:00:00Z");
        assert_eq!(OffsetDateTime::parse("1446-02-05T12:00:00Z").unwrap(), offset);
        let non_optional = FormatterBuilder::new().append_zone_region_id().to_formatter();
        assert!(matches!(non_optional.format(&fixed), Err(Error::UnsupportedTemporalType(_))));
    }

    #[test]
    fn test_early_date_prints_without_chronology() {
        let early = EarlyDate::of(622, 1, 1).unwrap();
        assert_eq!(printed(&formats::DATE, &early), "0622-01-01");
    }
}
