/*!
Formatting and parsing of Hijrah temporal values.

A [`Formatter`] is an immutable list of printer-parser items built with a
[`FormatterBuilder`]. It may be bound to a [`Chronology`]; a bound formatter
refuses to print values of another calendar and resolves parsed fields in
its own calendar. The canonical formatters live in [`formats`].

Every temporal type exposes its fields through [`FieldAccess`], so any
formatter can print any value that has the fields it needs. Parsing produces
a [`Parsed`] accessor which each type turns into a value with
[`FromAccessor`].

# Example

```
use hijrah_datetime::fmt::{FormatterBuilder, SignStyle};
use hijrah_datetime::{Date, Field};

let formatter = FormatterBuilder::new()
    .append_value_fixed(Field::DayOfMonth, 2)
    .append_literal('/')
    .append_value_fixed(Field::MonthOfYear, 2)
    .append_literal('/')
    .append_value_range(Field::Year, 4, 10, SignStyle::ExceedsPad)
    .to_formatter()
    .with_chronology(hijrah_datetime::Chronology::hijrah());

let date = Date::of(1446, 2, 5)?;
assert_eq!(date.format_with(&formatter)?, "05/02/1446");
assert_eq!(Date::parse_with("05/02/1446", &formatter)?, date);

# Ok::<(), hijrah_datetime::Error>(())
```
*/

use crate::calendar::Chronology;
use crate::field::Field;
use crate::prelude::*;
use crate::zone::ZoneId;
use crate::{Error, Offset};
use std::fmt;
use std::sync::Arc;

mod builder;
pub mod formats;
mod parse;
mod print;
#[cfg(feature = "serde")]
mod serde;

pub use builder::FormatterBuilder;
pub use formats::recommended_formatter;
pub use parse::Parsed;

/// How the sign of a numeric field is printed and parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum SignStyle {
    /// `-` for negative values only. Strict parsing rejects `+`.
    #[default]
    #[display(fmt = "normal")]
    Normal,
    /// Always a sign.
    #[display(fmt = "always")]
    Always,
    /// Never a sign; the absolute value is printed.
    #[display(fmt = "never")]
    Never,
    /// Negative values cannot be printed.
    #[display(fmt = "not-negative")]
    NotNegative,
    /// `+` only when the value needs more digits than the minimum width.
    #[display(fmt = "exceeds-pad")]
    ExceedsPad,
}

impl SignStyle {
    /// Whether a parsed `+` (`positive`) or `-` is acceptable.
    const fn accepts_sign(self, positive: bool, strict: bool, fixed_width: bool) -> bool {
        match self {
            Self::Normal => !positive || !strict,
            Self::Always | Self::ExceedsPad => true,
            Self::Never | Self::NotNegative => !strict && !fixed_width,
        }
    }
}

/// How parsed fields are combined into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum ResolverStyle {
    /// Every field must be valid as given.
    #[display(fmt = "strict")]
    Strict,
    /// Day-of-month is clamped to the month length and `24:00` is accepted as
    /// the start of the next day.
    #[default]
    #[display(fmt = "smart")]
    Smart,
    /// Excess months, days and time fields roll over.
    #[display(fmt = "lenient")]
    Lenient,
}

/// A locale tag carried by a formatter. The numeric formats of this crate
/// print the same in every locale; the tag is informational.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Display, From, Into)]
pub struct Locale(String);

impl Locale {
    /// The root locale, `und`.
    pub fn root() -> Self {
        Self("und".to_string())
    }

    pub fn tag(&self) -> &str {
        &self.0
    }
}

/// The closed set of value kinds a formatter can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TemporalKind {
    #[display(fmt = "Date")]
    Date,
    #[display(fmt = "Time")]
    Time,
    #[display(fmt = "DateTime")]
    DateTime,
    #[display(fmt = "OffsetDate")]
    OffsetDate,
    #[display(fmt = "OffsetDateTime")]
    OffsetDateTime,
    #[display(fmt = "ZonedDateTime")]
    ZonedDateTime,
    #[display(fmt = "EarlyDate")]
    EarlyDate,
    #[display(fmt = "Parsed")]
    Parsed,
}

/// Read access to the fields of a temporal value.
pub trait FieldAccess {
    fn kind(&self) -> TemporalKind;

    fn chronology(&self) -> Option<Chronology> {
        None
    }

    /// The value of `field`, or `None` if this value lacks it.
    fn field(&self, field: Field) -> Option<i64>;

    fn offset(&self) -> Option<Offset> {
        None
    }

    fn zone(&self) -> Option<ZoneId> {
        None
    }
}

/// Builds a value from the fields of another, typically a [`Parsed`].
pub trait FromAccessor: Sized {
    /// # Errors
    /// Returns an error if the accessor lacks a needed field, carries the
    /// wrong chronology, or holds invalid values.
    fn from_accessor(accessor: &dyn FieldAccess) -> Result<Self, Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Item {
    Value {
        field:     Field,
        min_width: u8,
        max_width: u8,
        sign:      SignStyle,
    },
    /// Nano-of-second as a fraction. `min_width == 0` prints nothing for zero.
    Fraction {
        min_width:     u8,
        max_width:     u8,
        decimal_point: bool,
    },
    Char(char),
    Str(Arc<str>),
    OffsetId,
    ZoneRegionId,
    Optional(Arc<[Item]>),
    Composite(Arc<[Item]>),
    Setting(Setting),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Setting {
    CaseSensitive,
    CaseInsensitive,
    Strict,
    Lenient,
}

/// An immutable, thread-safe formatter and parser.
#[derive(Debug, Clone)]
pub struct Formatter {
    items:      Arc<[Item]>,
    chronology: Option<Chronology>,
    locale:     Locale,
    resolver:   ResolverStyle,
}

impl Formatter {
    pub(crate) fn new(items: Vec<Item>) -> Self {
        Self {
            items:      items.into(),
            chronology: None,
            locale:     Locale::root(),
            resolver:   ResolverStyle::default(),
        }
    }

    pub(crate) fn items(&self) -> &[Item] {
        &self.items
    }

    pub const fn chronology(&self) -> Option<Chronology> {
        self.chronology
    }

    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    pub const fn resolver_style(&self) -> ResolverStyle {
        self.resolver
    }

    #[must_use]
    pub fn with_chronology(&self, chronology: Chronology) -> Self {
        Self {
            chronology: Some(chronology),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn without_chronology(&self) -> Self {
        Self {
            chronology: None,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_locale(&self, locale: Locale) -> Self {
        Self {
            locale,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_resolver_style(&self, resolver: ResolverStyle) -> Self {
        Self {
            resolver,
            ..self.clone()
        }
    }

    /// Prints `value`.
    ///
    /// # Errors
    /// Returns `Error::ChronologyMismatch` if this formatter is bound to a
    /// different calendar than `value`, and `Error::UnsupportedField` if the
    /// value lacks a field the formatter needs.
    pub fn format(&self, value: &dyn FieldAccess) -> Result<String, Error> {
        let mut out = String::new();
        self.format_to(value, &mut out)?;
        Ok(out)
    }

    /// Appends the text of `value` to `out`. Nothing is appended on error.
    ///
    /// # Errors
    /// As `format`.
    pub fn format_to(&self, value: &dyn FieldAccess, out: &mut String) -> Result<(), Error> {
        if let (Some(expected), Some(found)) = (self.chronology, value.chronology()) {
            if expected != found {
                return Err(Error::mismatch(expected.id(), Some(found.id())));
            }
        }
        let text = print::print(&self.items, value)?;
        out.push_str(&text);
        Ok(())
    }

    /// Writes `value` without the chronology check, for `Display` impls.
    pub(crate) fn display(&self, value: &dyn FieldAccess, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = print::print(&self.items, value).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }

    /// Parses the whole of `text` and resolves the fields.
    ///
    /// # Errors
    /// Returns `Error::ParseFailure` with the failing position when the text
    /// does not match, and `Error::InvalidFieldValue` or
    /// `Error::DateOutOfRange` when the fields cannot be resolved.
    pub fn parse(&self, text: &str) -> Result<Parsed, Error> {
        parse::parse(self, text)
    }

    /// Parses `text` into `T`.
    ///
    /// # Errors
    /// As `parse`, plus the errors of `T::from_accessor`.
    pub fn parse_into<T: FromAccessor>(&self, text: &str) -> Result<T, Error> {
        let parsed = self.parse(text)?;
        T::from_accessor(&parsed)
    }
}

/// Shows the item pattern, e.g. `Value(year,4,10,exceeds-pad)'-'...`.
impl fmt::Display for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_items(&self.items, f)
    }
}

fn write_items(items: &[Item], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for item in items {
        match item {
            Item::Value {
                field,
                min_width,
                max_width,
                sign,
            } => write!(f, "Value({field},{min_width},{max_width},{sign})")?,
            Item::Fraction {
                min_width,
                max_width,
                decimal_point,
            } => write!(f, "Fraction(nano-of-second,{min_width},{max_width}{})", if *decimal_point { ",DecimalPoint" } else { "" })?,
            Item::Char(c) => write!(f, "'{c}'")?,
            Item::Str(s) => write!(f, "'{s}'")?,
            Item::OffsetId => f.write_str("Offset(+HH:MM:ss,'Z')")?,
            Item::ZoneRegionId => f.write_str("ZoneRegionId()")?,
            Item::Optional(inner) => {
                f.write_str("[")?;
                write_items(inner, f)?;
                f.write_str("]")?;
            },
            Item::Composite(inner) => {
                f.write_str("(")?;
                write_items(inner, f)?;
                f.write_str(")")?;
            },
            Item::Setting(setting) => write!(f, "ParseSetting({setting:?})")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Date, DateTime, Time};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_formatter_is_send_and_sync() {
        assert_send_sync::<Formatter>();
        assert_send_sync::<Parsed>();
    }

    #[test]
    fn test_configuration() {
        let formatter = formats::DATE.with_resolver_style(ResolverStyle::Lenient);
        assert_eq!(formatter.resolver_style(), ResolverStyle::Lenient);
        assert_eq!(formats::DATE.resolver_style(), ResolverStyle::Strict);
        assert_eq!(formats::DATE.chronology(), Some(Chronology::hijrah()));
        assert_eq!(formats::LOCAL_TIME.chronology(), None);
        let tagged = formats::DATE.with_locale(Locale::from("ar-SA".to_string()));
        assert_eq!(tagged.locale().tag(), "ar-SA");
        assert_eq!(formats::DATE.locale(), &Locale::root());
    }

    #[test]
    fn test_format_any_value_with_needed_fields() {
        let value = DateTime::of(1446, 2, 5, 12, 43, 18, 0).unwrap();
        assert_eq!(formats::DATE.format(&value).unwrap(), "1446-02-05");
        assert_eq!(formats::LOCAL_TIME.format(&value).unwrap(), "12:43:18");
        assert!(matches!(
            formats::DATE_TIME.format(&Date::of(1446, 2, 5).unwrap()),
            Err(Error::UnsupportedField(Field::HourOfDay))
        ));
        assert!(matches!(
            formats::DATE.format(&Time::NOON),
            Err(Error::UnsupportedField(Field::Year))
        ));
    }

    #[test]
    fn test_format_to_appends() {
        let mut out = String::from("on ");
        formats::DATE.format_to(&Date::of(1446, 2, 5).unwrap(), &mut out).unwrap();
        assert_eq!(out, "on 1446-02-05");
        assert!(formats::DATE_TIME.format_to(&Time::NOON, &mut out).is_err());
        assert_eq!(out, "on 1446-02-05");
    }

    #[test]
    fn test_pattern_display() {
        assert_eq!(
            formats::DATE.to_string(),
            "Value(year,4,10,exceeds-pad)'-'Value(month-of-year,2,2,not-negative)'-'Value(day-of-month,2,2,not-negative)"
        );
    }
}
