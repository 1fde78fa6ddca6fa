use super::{Formatter, Item, Setting, SignStyle};
use crate::field::Field;
use std::sync::Arc;

/// Longest run of digits a numeric field may print or parse.
const MAX_WIDTH: u8 = 19;
/// Most fraction digits, one per decimal place of a nanosecond.
const MAX_FRACTION_WIDTH: u8 = 9;

/// Assembles a [`Formatter`] item by item.
///
/// Optional sections nest: `optional_start` opens one and `optional_end`
/// closes the innermost. Sections still open when `to_formatter` is called
/// are closed.
#[derive(Debug, Clone)]
pub struct FormatterBuilder {
    /// Innermost open section last; the first entry is the top level.
    sections: Vec<Vec<Item>>,
}

impl Default for FormatterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatterBuilder {
    pub fn new() -> Self {
        Self {
            sections: vec![Vec::new()],
        }
    }

    /// A value printed with as many digits as it needs and a sign only when
    /// negative.
    #[must_use]
    pub fn append_value(self, field: Field) -> Self {
        self.append_value_range(field, 1, MAX_WIDTH, SignStyle::Normal)
    }

    /// A non-negative value printed with exactly `width` digits, zero padded.
    #[must_use]
    pub fn append_value_fixed(self, field: Field, width: u8) -> Self {
        let width = width.clamp(1, MAX_WIDTH);
        self.push(Item::Value {
            field,
            min_width: width,
            max_width: width,
            sign: SignStyle::NotNegative,
        })
    }

    /// A value printed with `min_width..=max_width` digits. Widths are
    /// clamped to `1..=19` and `max_width` is raised to `min_width` if lower.
    #[must_use]
    pub fn append_value_range(self, field: Field, min_width: u8, max_width: u8, sign: SignStyle) -> Self {
        let min_width = min_width.clamp(1, MAX_WIDTH);
        let max_width = max_width.clamp(min_width, MAX_WIDTH);
        self.push(Item::Value {
            field,
            min_width,
            max_width,
            sign,
        })
    }

    /// Nano-of-second as a decimal fraction of `min_width..=max_width`
    /// digits, optionally preceded by `.`. With a zero minimum width and a
    /// decimal point, nothing at all is printed for a whole second.
    #[must_use]
    pub fn append_fraction(self, min_width: u8, max_width: u8, decimal_point: bool) -> Self {
        let min_width = min_width.min(MAX_FRACTION_WIDTH);
        let max_width = max_width.clamp(min_width.max(1), MAX_FRACTION_WIDTH);
        self.push(Item::Fraction {
            min_width,
            max_width,
            decimal_point,
        })
    }

    #[must_use]
    pub fn append_literal(self, literal: char) -> Self {
        self.push(Item::Char(literal))
    }

    /// Appends a literal string. An empty string appends nothing.
    #[must_use]
    pub fn append_literal_str(self, literal: &str) -> Self {
        match literal.chars().count() {
            0 => self,
            1 => match literal.chars().next() {
                Some(c) => self.push(Item::Char(c)),
                None => self,
            },
            _ => self.push(Item::Str(Arc::from(literal))),
        }
    }

    /// The UTC offset as `+HH:MM`, with `:SS` when the seconds are nonzero.
    /// Parsing accepts `Z` for zero.
    #[must_use]
    pub fn append_offset_id(self) -> Self {
        self.push(Item::OffsetId)
    }

    /// The region id of the zone, such as `Asia/Riyadh`. Fixed-offset zones
    /// have no region id.
    #[must_use]
    pub fn append_zone_region_id(self) -> Self {
        self.push(Item::ZoneRegionId)
    }

    /// Appends every item of `formatter`. Parse settings changed inside it
    /// stay in effect afterwards.
    #[must_use]
    pub fn append(self, formatter: &Formatter) -> Self {
        self.push(Item::Composite(formatter.items().into()))
    }

    /// Appends `formatter` as an optional section.
    #[must_use]
    pub fn append_optional(self, formatter: &Formatter) -> Self {
        self.push(Item::Optional(formatter.items().into()))
    }

    /// Opens an optional section. When printing, the section is dropped if a
    /// value it needs is unavailable; when parsing, it is skipped if it does
    /// not match.
    #[must_use]
    pub fn optional_start(mut self) -> Self {
        self.sections.push(Vec::new());
        self
    }

    /// Closes the innermost optional section. Does nothing at the top level.
    #[must_use]
    pub fn optional_end(mut self) -> Self {
        if self.sections.len() > 1 {
            if let Some(section) = self.sections.pop() {
                if !section.is_empty() {
                    return self.push(Item::Optional(section.into()));
                }
            }
        }
        self
    }

    #[must_use]
    pub fn parse_case_sensitive(self) -> Self {
        self.push(Item::Setting(Setting::CaseSensitive))
    }

    #[must_use]
    pub fn parse_case_insensitive(self) -> Self {
        self.push(Item::Setting(Setting::CaseInsensitive))
    }

    #[must_use]
    pub fn parse_strict(self) -> Self {
        self.push(Item::Setting(Setting::Strict))
    }

    #[must_use]
    pub fn parse_lenient(self) -> Self {
        self.push(Item::Setting(Setting::Lenient))
    }

    /// Finishes the formatter, closing any open optional sections. The result
    /// has no chronology, the root locale and the smart resolver.
    pub fn to_formatter(mut self) -> Formatter {
        while self.sections.len() > 1 {
            self = self.optional_end();
        }
        Formatter::new(self.sections.pop().unwrap_or_default())
    }

    fn push(mut self, item: Item) -> Self {
        if let Some(section) = self.sections.last_mut() {
            section.push(item);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::ResolverStyle;

    #[test]
    fn test_widths_are_clamped() {
        let formatter = FormatterBuilder::new()
            .append_value_range(Field::Year, 0, 40, SignStyle::Normal)
            .append_value_range(Field::DayOfMonth, 3, 2, SignStyle::Never)
            .append_value_fixed(Field::HourOfDay, 0)
            .to_formatter();
        assert_eq!(
            formatter.to_string(),
            "Value(year,1,19,normal)Value(day-of-month,3,3,never)Value(hour-of-day,1,1,not-negative)"
        );
    }

    #[test]
    fn test_optional_sections_nest_and_close() {
        let formatter = FormatterBuilder::new()
            .append_value(Field::HourOfDay)
            .optional_start()
            .append_literal(':')
            .append_value_fixed(Field::MinuteOfHour, 2)
            .optional_start()
            .append_literal(':')
            .append_value_fixed(Field::SecondOfMinute, 2)
            .to_formatter();
        assert_eq!(
            formatter.to_string(),
            "Value(hour-of-day,1,19,normal)[':'Value(minute-of-hour,2,2,not-negative)[':'Value(second-of-minute,2,2,not-negative)]]"
        );
    }

    #[test]
    fn test_empty_sections_are_dropped() {
        let formatter = FormatterBuilder::new()
            .optional_start()
            .optional_end()
            .optional_end()
            .append_literal_str("")
            .append_literal_str("T")
            .append_literal_str("at")
            .to_formatter();
        assert_eq!(formatter.to_string(), "'T''at'");
    }

    #[test]
    fn test_defaults() {
        let formatter = FormatterBuilder::default().append_fraction(0, 9, true).to_formatter();
        assert_eq!(formatter.chronology(), None);
        assert_eq!(formatter.resolver_style(), ResolverStyle::Smart);
        assert_eq!(formatter.to_string(), "Fraction(nano-of-second,0,9,DecimalPoint)");
    }

    #[test]
    fn test_append_composite_and_optional() {
        let time = FormatterBuilder::new()
            .append_value_fixed(Field::HourOfDay, 2)
            .to_formatter();
        let formatter = FormatterBuilder::new()
            .append(&time)
            .append_optional(&time)
            .parse_lenient()
            .to_formatter();
        assert_eq!(
            formatter.to_string(),
            "(Value(hour-of-day,2,2,not-negative))[Value(hour-of-day,2,2,not-negative)]ParseSetting(Lenient)"
        );
    }
}
