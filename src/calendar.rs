//! Calendar providers and the `Chronology` handle that binds values to one.
//!
//! A provider maps `(year, month, day)` to a signed count of days since
//! 1970-01-01 (the epoch day) and back, and knows the length of every month
//! in its supported window of years. The crate ships the Umm al-Qura
//! calendar of Saudi Arabia (the default), the arithmetic (tabular) Hijrah
//! calendar, and `MonthTable` for calendars given as explicit month lengths.

use crate::consts::{
    COMMON_YEAR_DAYS, CYCLE_DAYS, CYCLE_YEARS, HIJRAH_EPOCH_DAY, LEAP_YEAR_DAYS, LONG_MONTH_DAYS,
    MAX_YEAR, MIN_YEAR, MONTHS_PER_YEAR, SHORT_MONTH_DAYS,
};
use crate::field::Field;
use crate::types::{Month, ValueRange};
use crate::Error;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Strategy for converting between calendar fields and epoch days.
///
/// Methods taking a year may assume it lies in `min_year()..=max_year()`
/// (and `year_start` additionally accepts `max_year() + 1`), and months lie
/// in `1..=12`. `Chronology` validates before delegating.
pub trait CalendarProvider: fmt::Debug + Send + Sync {
    /// Unique identifier. Two chronologies are equal when their ids are.
    fn id(&self) -> &str;

    fn min_year(&self) -> i32;

    fn max_year(&self) -> i32;

    /// Length of `month` in `year`, 29 or 30.
    fn month_length(&self, year: i32, month: u8) -> u8;

    /// Epoch day of the first day of `year`.
    fn year_start(&self, year: i32) -> i64;

    fn year_length(&self, year: i32) -> u16 {
        (1..=MONTHS_PER_YEAR)
            .map(|month| u16::from(self.month_length(year, month)))
            .sum()
    }

    /// Shortest and longest year in the window.
    fn year_length_range(&self) -> (u16, u16) {
        (COMMON_YEAR_DAYS, LEAP_YEAR_DAYS)
    }

    fn epoch_day(&self, year: i32, month: u8, day: u8) -> i64 {
        let before: i64 = (1..month)
            .map(|m| i64::from(self.month_length(year, m)))
            .sum();
        self.year_start(year) + before + i64::from(day) - 1
    }

    /// Inverse of `epoch_day` for an epoch day inside the window.
    fn year_month_day(&self, epoch_day: i64) -> (i32, u8, u8) {
        let (min, max) = (self.min_year(), self.max_year());
        let estimate = (epoch_day - self.year_start(min)) / i64::from(COMMON_YEAR_DAYS);
        let mut year = i32::try_from(i64::from(min) + estimate)
            .unwrap_or(max)
            .clamp(min, max);
        while year > min && self.year_start(year) > epoch_day {
            year -= 1;
        }
        while year < max && self.year_start(year + 1) <= epoch_day {
            year += 1;
        }

        let mut remaining = epoch_day - self.year_start(year);
        let mut month = 1;
        while month < MONTHS_PER_YEAR && remaining >= i64::from(self.month_length(year, month)) {
            remaining -= i64::from(self.month_length(year, month));
            month += 1;
        }
        // remaining < 30 once the month is found
        (year, month, (remaining + 1) as u8)
    }
}

/// The arithmetic Hijrah calendar: a 30-year cycle with 11 leap years,
/// odd months of 30 days, even months of 29 days, and a 30-day twelfth
/// month in leap years. Day 1 of year 1 is 16 July 622 (Julian).
///
/// Supports years `MIN_YEAR..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabularHijrah;

impl TabularHijrah {
    pub const ID: &'static str = "Hijrah-tabular";

    /// Years 2, 5, 7, 10, 13, 16, 18, 21, 24, 26 and 29 of each cycle are leap.
    pub const fn is_leap_year(year: i32) -> bool {
        (14 + 11 * year as i64).rem_euclid(CYCLE_YEARS) < 11
    }

    const fn days_before_year(year: i64) -> i64 {
        (year - 1) * COMMON_YEAR_DAYS as i64 + (3 + 11 * year).div_euclid(CYCLE_YEARS)
    }
}

impl CalendarProvider for TabularHijrah {
    fn id(&self) -> &str {
        Self::ID
    }

    fn min_year(&self) -> i32 {
        MIN_YEAR
    }

    fn max_year(&self) -> i32 {
        MAX_YEAR
    }

    fn month_length(&self, year: i32, month: u8) -> u8 {
        if month % 2 == 1 || (month == MONTHS_PER_YEAR && Self::is_leap_year(year)) {
            LONG_MONTH_DAYS
        } else {
            SHORT_MONTH_DAYS
        }
    }

    fn year_start(&self, year: i32) -> i64 {
        HIJRAH_EPOCH_DAY + Self::days_before_year(i64::from(year))
    }

    fn year_length(&self, year: i32) -> u16 {
        if Self::is_leap_year(year) {
            LEAP_YEAR_DAYS
        } else {
            COMMON_YEAR_DAYS
        }
    }

    fn epoch_day(&self, year: i32, month: u8, day: u8) -> i64 {
        let month = i64::from(month);
        self.year_start(year) + 29 * (month - 1) + month / 2 + i64::from(day) - 1
    }

    fn year_month_day(&self, epoch_day: i64) -> (i32, u8, u8) {
        let days = epoch_day - HIJRAH_EPOCH_DAY;
        let year = (CYCLE_YEARS * days + 10_646).div_euclid(CYCLE_DAYS);
        // the window keeps the year well inside i32
        let year = year as i32;
        let day_of_year = epoch_day - self.year_start(year);
        let month = ((11 * day_of_year + 330) / 325).min(i64::from(MONTHS_PER_YEAR));
        let day = day_of_year - (29 * (month - 1) + month / 2) + 1;
        (year, month as u8, day as u8)
    }
}

/// The Umm al-Qura calendar, the official calendar of Saudi Arabia, for the
/// years `MIN_YEAR..=MAX_YEAR`. Month lengths come from the published
/// tables rather than from a rule, so any year may have 354 or 355 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UmmAlQura;

impl UmmAlQura {
    pub const ID: &'static str = "Hijrah-umalqura";

    /// Epoch day of 1 Muharram 1300 (1882-11-12).
    const FIRST_EPOCH_DAY: i64 = -31_826;

    const fn mask(year: i32) -> u16 {
        UMM_AL_QURA_MONTHS[(year - MIN_YEAR) as usize]
    }
}

/// `YEAR_STARTS[i]` is the epoch day of 1 Muharram of `MIN_YEAR + i`; the
/// last entry is the day after the window.
const YEAR_STARTS: [i64; UMM_AL_QURA_MONTHS.len() + 1] = {
    let mut starts = [0; UMM_AL_QURA_MONTHS.len() + 1];
    starts[0] = UmmAlQura::FIRST_EPOCH_DAY;
    let mut i = 0;
    while i < UMM_AL_QURA_MONTHS.len() {
        let long_months = UMM_AL_QURA_MONTHS[i].count_ones() as i64;
        starts[i + 1] = starts[i] + 12 * SHORT_MONTH_DAYS as i64 + long_months;
        i += 1;
    }
    starts
};

impl CalendarProvider for UmmAlQura {
    fn id(&self) -> &str {
        Self::ID
    }

    fn min_year(&self) -> i32 {
        MIN_YEAR
    }

    fn max_year(&self) -> i32 {
        MAX_YEAR
    }

    fn month_length(&self, year: i32, month: u8) -> u8 {
        if Self::mask(year) & (1 << (month - 1)) == 0 {
            SHORT_MONTH_DAYS
        } else {
            LONG_MONTH_DAYS
        }
    }

    fn year_start(&self, year: i32) -> i64 {
        YEAR_STARTS[(year - MIN_YEAR) as usize]
    }

    fn year_length(&self, year: i32) -> u16 {
        u16::from(MONTHS_PER_YEAR) * u16::from(SHORT_MONTH_DAYS) + Self::mask(year).count_ones() as u16
    }

    fn year_month_day(&self, epoch_day: i64) -> (i32, u8, u8) {
        // number of years starting on or before the day, at least one inside the window
        let index = YEAR_STARTS[..UMM_AL_QURA_MONTHS.len()]
            .partition_point(|start| *start <= epoch_day)
            .max(1);
        let year = MIN_YEAR + index as i32 - 1;
        let mut remaining = epoch_day - self.year_start(year);
        let mut month = 1;
        while month < MONTHS_PER_YEAR && remaining >= i64::from(self.month_length(year, month)) {
            remaining -= i64::from(self.month_length(year, month));
            month += 1;
        }
        (year, month, (remaining + 1) as u8)
    }
}

/// One entry per year from `MIN_YEAR`; bit `m - 1` is set when month `m` has
/// 30 days.
const UMM_AL_QURA_MONTHS: [u16; (MAX_YEAR - MIN_YEAR + 1) as usize] = [
    0x555, 0x2AB, 0x937, 0x2B6, 0x576, 0x36C, 0xB55, 0xAAA, 0x956, 0x49E,
    0x95D, 0x2BA, 0x5B5, 0x3AA, 0xB4B, 0xA96, 0x52E, 0x2AD, 0x56D, 0xB5A,
    0x752, 0xF25, 0xE8A, 0xD16, 0xA56, 0xAB5, 0x6B4, 0xDA9, 0xB92, 0xB25,
    0x64B, 0xA9B, 0x35A, 0x6D9, 0x5D4, 0xDA5, 0xD4A, 0xA95, 0x536, 0x975,
    0x2F4, 0x6E9, 0x6D4, 0x6A9, 0x535, 0x25D, 0x4BD, 0x9BA, 0x3B4, 0xB69,
    0xB2A, 0xA55, 0x4AD, 0xA5D, 0x2DA, 0x6D9, 0xEAA, 0xE94, 0xD2A, 0xC56,
    0x4AE, 0xA6D, 0x56A, 0xD55, 0xD4A, 0xA93, 0x52B, 0xA5B, 0x53A, 0x6B5,
    0xEA9, 0xD52, 0xD29, 0xA55, 0x4AD, 0x56D, 0xAEA, 0x6E4, 0xED1, 0xDA2,
    0xAAA, 0x95A, 0x2DA, 0x5B9, 0xBB2, 0x764, 0x6C9, 0x555, 0x2AB, 0x4DB,
    0xABA, 0x5B4, 0xDA9, 0xD52, 0xAA5, 0x92D, 0x26D, 0x8ED, 0x2DA, 0xAD5,
    0xAA5, 0xA4B, 0x497, 0x937, 0x2B6, 0x975, 0xD69, 0xD52, 0xC95, 0x92B,
    0x25B, 0x4DB, 0x9D5, 0x5D2, 0xDA5, 0xD4A, 0xA95, 0x54D, 0xAAD, 0x3AA,
    0xBD2, 0xBC4, 0xB89, 0xA95, 0x52D, 0x5AD, 0xB6A, 0x6D4, 0xDC9, 0xD92,
    0xAA6, 0x956, 0x2AE, 0x56D, 0x36A, 0xB55, 0xAAA, 0x94D, 0x49D, 0x95D,
    0x2BA, 0x5B5, 0x5AA, 0xD55, 0xA9A, 0x92E, 0x26E, 0x55D, 0xADA, 0x6D4,
    0x6A5, 0xB27, 0xA4D, 0x4AD, 0x56D, 0xB5A, 0x754, 0xF49, 0xE92, 0xD26,
    0xA56, 0x356, 0x6B5, 0xBAA, 0xB92, 0xB25, 0x68B, 0xA9B, 0x55A, 0xADA,
    0x5B4, 0xDA9, 0xB52, 0xA9A, 0x536, 0x276, 0x575, 0xAF2, 0x6D4, 0x6A9,
    0x555, 0x2AD, 0x4BD, 0x9BA, 0x574, 0xB69, 0xB52, 0xA95, 0x52D, 0xA5D,
    0x4DA, 0xAD9, 0x6B2, 0xE95, 0xE2A, 0xC96, 0x92E, 0xAAD, 0x56A, 0xD65,
    0xD4A, 0xD15, 0x62B, 0xC5B, 0x53A, 0x6B5, 0xDB2, 0xD64, 0xD29, 0xA55,
    0x4AD, 0x96D, 0xAEA, 0x6E8, 0xED1, 0xDA4, 0xD4A, 0xA6A, 0x2DA, 0x5B9,
    0xB72, 0xB68, 0x6D1, 0x655, 0x4AB, 0x95B, 0x2BA, 0x5B5, 0xDA9, 0xD52,
    0xCA6, 0x94E, 0x46E, 0x95D, 0x4DA, 0xAD5, 0xAAA, 0xA4D, 0x49B, 0x937,
    0x4B6, 0x975, 0xD6A, 0xD52, 0xAA5, 0x94B, 0x2AB, 0x55B, 0xAD9, 0x5D2,
    0xDC5, 0xD92, 0xB25, 0x555, 0xAB5, 0x5B4, 0xBA9, 0x7A2, 0x745, 0x593,
    0xAAB, 0x4D6, 0x9D6, 0x5D2, 0xBA5, 0xB4A, 0xA95, 0x4AD, 0x15D, 0x2DD,
    0x9DA, 0x5B4, 0x5A9, 0x52D, 0x25B, 0x8B7, 0x176, 0x56D, 0xB6A, 0xACA,
    0xA96, 0x52B, 0x15B, 0x2BB, 0x5B6, 0xDAA, 0xB94, 0xD46, 0xA8D, 0x52D,
    0xA9D, 0x55A, 0x755, 0x749, 0xF13, 0xE4A, 0xA96, 0x556, 0x6B5, 0xBAA,
    0xB94,
];

static UMM_AL_QURA: UmmAlQura = UmmAlQura;

static TABULAR_HIJRAH: TabularHijrah = TabularHijrah;

/// Handle to the calendar provider a value belongs to.
///
/// Cheap to copy. Equality and hashing use the provider id.
#[derive(Clone, Copy)]
pub struct Chronology {
    provider: &'static dyn CalendarProvider,
}

impl Chronology {
    pub const fn new(provider: &'static dyn CalendarProvider) -> Self {
        Self { provider }
    }

    /// The default Hijrah chronology, Umm al-Qura.
    pub fn hijrah() -> Self {
        Self::new(&UMM_AL_QURA)
    }

    /// The arithmetic Hijrah calendar over the same years.
    pub fn tabular() -> Self {
        Self::new(&TABULAR_HIJRAH)
    }

    pub fn id(&self) -> &'static str {
        self.provider.id()
    }

    pub fn provider(&self) -> &'static dyn CalendarProvider {
        self.provider
    }

    pub fn min_year(&self) -> i32 {
        self.provider.min_year()
    }

    pub fn max_year(&self) -> i32 {
        self.provider.max_year()
    }

    pub fn is_supported_year(&self, year: i64) -> bool {
        i64::from(self.min_year()) <= year && year <= i64::from(self.max_year())
    }

    /// Validates `year` against the provider window.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` if the year is outside the window.
    pub fn check_year(&self, year: i64) -> Result<i32, Error> {
        if self.is_supported_year(year) {
            // inside an i32 window
            Ok(year as i32)
        } else {
            Err(Error::DateOutOfRange {
                field: Field::Year,
                value: year,
                min: i64::from(self.min_year()),
                max: i64::from(self.max_year()),
            })
        }
    }

    /// # Errors
    /// Returns `Error::DateOutOfRange` if the year is outside the window.
    pub fn is_leap_year(&self, year: i64) -> Result<bool, Error> {
        Ok(self.year_length(year)? > COMMON_YEAR_DAYS)
    }

    /// # Errors
    /// Returns `Error::DateOutOfRange` if the year is outside the window.
    pub fn month_length(&self, year: i64, month: Month) -> Result<u8, Error> {
        let year = self.check_year(year)?;
        Ok(self.provider.month_length(year, month.number()))
    }

    /// # Errors
    /// Returns `Error::DateOutOfRange` if the year is outside the window.
    pub fn year_length(&self, year: i64) -> Result<u16, Error> {
        let year = self.check_year(year)?;
        Ok(self.provider.year_length(year))
    }

    /// First and last supported epoch day.
    pub fn epoch_day_bounds(&self) -> (i64, i64) {
        let max = self.max_year();
        (
            self.provider.year_start(self.min_year()),
            self.provider.year_start(max) + i64::from(self.provider.year_length(max)) - 1,
        )
    }

    /// Validates the fields and returns the epoch day.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` for a year outside the window and
    /// `Error::InvalidFieldValue` for a bad month or day.
    pub fn epoch_day(&self, year: i64, month: i64, day: i64) -> Result<i64, Error> {
        let month = Month::of(month)?;
        let length = self.month_length(year, month)?;
        ValueRange::of(1, i64::from(length)).check(Field::DayOfMonth, day)?;
        // validated above
        Ok(self.provider.epoch_day(year as i32, month.number(), day as u8))
    }

    /// Converts an epoch day to `(year, month, day)`.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` outside the supported window.
    pub fn date_fields(&self, epoch_day: i64) -> Result<(i32, Month, u8), Error> {
        let (min, max) = self.epoch_day_bounds();
        if epoch_day < min || epoch_day > max {
            return Err(Error::DateOutOfRange {
                field: Field::EpochDay,
                value: epoch_day,
                min,
                max,
            });
        }
        let (year, month, day) = self.provider.year_month_day(epoch_day);
        Ok((year, Month::of(i64::from(month))?, day))
    }

    /// Chronology-wide range of a field.
    pub fn range(&self, field: Field) -> ValueRange {
        let (short_year, long_year) = self.provider.year_length_range();
        match field {
            Field::Year => ValueRange::of(i64::from(self.min_year()), i64::from(self.max_year())),
            Field::MonthOfYear => Month::RANGE,
            Field::DayOfMonth => ValueRange::variable(
                1,
                i64::from(SHORT_MONTH_DAYS),
                i64::from(LONG_MONTH_DAYS),
            ),
            Field::DayOfYear => ValueRange::variable(1, i64::from(short_year), i64::from(long_year)),
            Field::EpochDay => {
                let (min, max) = self.epoch_day_bounds();
                ValueRange::of(min, max)
            },
            other => other.fixed_range().unwrap_or(ValueRange::of(0, 0)),
        }
    }

    /// # Errors
    /// Returns `Error::ChronologyMismatch` unless `other` is this chronology.
    pub fn require(&self, other: Option<Self>) -> Result<(), Error> {
        match other {
            Some(other) if other == *self => Ok(()),
            other => Err(Error::mismatch(self.id(), other.map(|c| c.id()))),
        }
    }
}

impl Default for Chronology {
    fn default() -> Self {
        Self::hijrah()
    }
}

impl PartialEq for Chronology {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Chronology {}

impl Hash for Chronology {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Chronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Chronology").field(&self.id()).finish()
    }
}

impl fmt::Display for Chronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A calendar defined by explicit month lengths, twelve per year starting at
/// `first_year`, whose first day falls on `first_epoch_day`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTable {
    id:          String,
    first_year:  i32,
    lengths:     Vec<u8>,
    year_starts: Vec<i64>,
}

impl MonthTable {
    /// Builds a table.
    ///
    /// # Errors
    /// Returns `Error::InvalidRange` unless `month_lengths` holds a positive
    /// whole number of years, and `Error::InvalidFieldValue` for a month
    /// length other than 29 or 30.
    pub fn new(
        id: impl Into<String>,
        first_year: i32,
        first_epoch_day: i64,
        month_lengths: &[u8],
    ) -> Result<Self, Error> {
        let months = usize::from(MONTHS_PER_YEAR);
        if month_lengths.is_empty() || month_lengths.len() % months != 0 {
            return Err(Error::InvalidRange(format!(
                "month table holds {} lengths, expected a positive multiple of {months}",
                month_lengths.len()
            )));
        }
        let valid = ValueRange::of(i64::from(SHORT_MONTH_DAYS), i64::from(LONG_MONTH_DAYS));
        for length in month_lengths {
            valid.check(Field::DayOfMonth, i64::from(*length))?;
        }

        let mut year_starts = Vec::with_capacity(month_lengths.len() / months + 1);
        let mut start = first_epoch_day;
        year_starts.push(start);
        for year in month_lengths.chunks(months) {
            start += year.iter().map(|l| i64::from(*l)).sum::<i64>();
            year_starts.push(start);
        }

        Ok(Self {
            id: id.into(),
            first_year,
            lengths: month_lengths.to_vec(),
            year_starts,
        })
    }

    /// Copies the months of `first_year..=last_year` from another provider.
    ///
    /// # Errors
    /// Returns `Error::DateOutOfRange` if the years are not all supported by
    /// `provider`.
    pub fn from_provider(
        id: impl Into<String>,
        provider: &dyn CalendarProvider,
        first_year: i32,
        last_year: i32,
    ) -> Result<Self, Error> {
        if first_year < provider.min_year() || last_year > provider.max_year() || first_year > last_year {
            return Err(Error::DateOutOfRange {
                field: Field::Year,
                value: i64::from(if first_year < provider.min_year() { first_year } else { last_year }),
                min: i64::from(provider.min_year()),
                max: i64::from(provider.max_year()),
            });
        }
        let lengths: Vec<u8> = (first_year..=last_year)
            .flat_map(|year| (1..=MONTHS_PER_YEAR).map(move |month| provider.month_length(year, month)))
            .collect();
        Self::new(id, first_year, provider.year_start(first_year), &lengths)
    }

    /// Leaks the table to obtain a `Chronology` for it.
    pub fn into_chronology(self) -> Chronology {
        Chronology::new(Box::leak(Box::new(self)))
    }

    fn index(&self, year: i32) -> usize {
        // callers pass years inside the window
        (year - self.first_year) as usize
    }
}

impl CalendarProvider for MonthTable {
    fn id(&self) -> &str {
        &self.id
    }

    fn min_year(&self) -> i32 {
        self.first_year
    }

    fn max_year(&self) -> i32 {
        // year_starts has one more entry than there are years
        self.first_year + self.year_starts.len() as i32 - 2
    }

    fn month_length(&self, year: i32, month: u8) -> u8 {
        let index = self.index(year) * usize::from(MONTHS_PER_YEAR) + usize::from(month) - 1;
        self.lengths.get(index).copied().unwrap_or(SHORT_MONTH_DAYS)
    }

    fn year_start(&self, year: i32) -> i64 {
        self.year_starts
            .get(self.index(year))
            .copied()
            .unwrap_or_default()
    }

    fn year_length(&self, year: i32) -> u16 {
        let index = self.index(year);
        match (self.year_starts.get(index), self.year_starts.get(index + 1)) {
            (Some(start), Some(end)) => (end - start) as u16,
            _ => COMMON_YEAR_DAYS,
        }
    }

    fn year_length_range(&self) -> (u16, u16) {
        let lengths = self.year_starts.windows(2).map(|w| (w[1] - w[0]) as u16);
        let min = lengths.clone().min().unwrap_or(COMMON_YEAR_DAYS);
        let max = lengths.max().unwrap_or(LEAP_YEAR_DAYS);
        (min, max)
    }
}
