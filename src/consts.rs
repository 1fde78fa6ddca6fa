/// First year of the default Hijrah chronology (inclusive)
pub const MIN_YEAR: i32 = 1300;

/// Last year of the default Hijrah chronology (inclusive)
pub const MAX_YEAR: i32 = 1600;

/// First year representable by `EarlyDate`
pub const EARLY_MIN_YEAR: i32 = 1;

/// Last year representable by `EarlyDate`, the year before `MIN_YEAR`
pub const EARLY_MAX_YEAR: i32 = MIN_YEAR - 1;

/// Number of months in every Hijrah year
pub const MONTHS_PER_YEAR: u8 = 12;

/// Length of a short (even) month
pub const SHORT_MONTH_DAYS: u8 = 29;
/// Length of a long (odd) month, and of the last month in a leap year
pub const LONG_MONTH_DAYS: u8 = 30;

/// Days in a common year of the tabular calendar
pub const COMMON_YEAR_DAYS: u16 = 354;
/// Days in a leap year of the tabular calendar
pub const LEAP_YEAR_DAYS: u16 = 355;

/// Years in one intercalation cycle of the tabular calendar
pub(crate) const CYCLE_YEARS: i64 = 30;
/// Days in one intercalation cycle (30 * 354 + 11 leap days)
pub(crate) const CYCLE_DAYS: i64 = 10631;
/// Epoch day of 1 Muharram 1 AH in the civil (Friday) epoch
pub(crate) const HIJRAH_EPOCH_DAY: i64 = -492_148;

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;
pub const DAYS_PER_WEEK: i64 = 7;

/// Largest absolute UTC offset, in seconds (18 hours)
pub const MAX_OFFSET_SECONDS: i32 = 18 * 3_600;

/// Date component separator
pub const DATE_SEPARATOR: char = '-';
/// Separator between the date and the time
pub const TIME_DESIGNATOR: char = 'T';
/// Time component separator
pub const TIME_SEPARATOR: char = ':';
/// Range separator (start/end)
pub const RANGE_SEPARATOR: char = '/';
