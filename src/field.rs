use crate::consts::{MAX_OFFSET_SECONDS, NANOS_PER_DAY, NANOS_PER_SECOND, SECONDS_PER_DAY};
use crate::prelude::*;
use crate::types::ValueRange;

/// A field of a date, time or offset that can be read or replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Field {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month-of-year")]
    MonthOfYear,
    #[display(fmt = "day-of-month")]
    DayOfMonth,
    #[display(fmt = "day-of-year")]
    DayOfYear,
    /// ISO day of week, Monday = 1 through Sunday = 7
    #[display(fmt = "day-of-week")]
    DayOfWeek,
    /// Days since 1970-01-01 (Gregorian), shared by every chronology
    #[display(fmt = "epoch-day")]
    EpochDay,
    #[display(fmt = "hour-of-day")]
    HourOfDay,
    #[display(fmt = "minute-of-hour")]
    MinuteOfHour,
    #[display(fmt = "second-of-minute")]
    SecondOfMinute,
    #[display(fmt = "nano-of-second")]
    NanoOfSecond,
    #[display(fmt = "second-of-day")]
    SecondOfDay,
    #[display(fmt = "nano-of-day")]
    NanoOfDay,
    /// Total UTC offset in seconds
    #[display(fmt = "offset-seconds")]
    OffsetSeconds,
}

impl Field {
    pub const fn is_date_based(self) -> bool {
        matches!(
            self,
            Self::Year
                | Self::MonthOfYear
                | Self::DayOfMonth
                | Self::DayOfYear
                | Self::DayOfWeek
                | Self::EpochDay
        )
    }

    pub const fn is_time_based(self) -> bool {
        matches!(
            self,
            Self::HourOfDay
                | Self::MinuteOfHour
                | Self::SecondOfMinute
                | Self::NanoOfSecond
                | Self::SecondOfDay
                | Self::NanoOfDay
        )
    }

    /// Returns the calendar-independent range of the field, or `None` for the
    /// date fields whose range depends on the chronology.
    pub const fn fixed_range(self) -> Option<ValueRange> {
        match self {
            Self::DayOfWeek => Some(ValueRange::of(1, 7)),
            Self::HourOfDay => Some(ValueRange::of(0, 23)),
            Self::MinuteOfHour | Self::SecondOfMinute => Some(ValueRange::of(0, 59)),
            Self::NanoOfSecond => Some(ValueRange::of(0, NANOS_PER_SECOND - 1)),
            Self::SecondOfDay => Some(ValueRange::of(0, SECONDS_PER_DAY - 1)),
            Self::NanoOfDay => Some(ValueRange::of(0, NANOS_PER_DAY - 1)),
            Self::OffsetSeconds => Some(ValueRange::of(
                -(MAX_OFFSET_SECONDS as i64),
                MAX_OFFSET_SECONDS as i64,
            )),
            Self::Year
            | Self::MonthOfYear
            | Self::DayOfMonth
            | Self::DayOfYear
            | Self::EpochDay => None,
        }
    }
}

/// A unit of amount for temporal arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Unit {
    #[display(fmt = "nanos")]
    Nanos,
    #[display(fmt = "micros")]
    Micros,
    #[display(fmt = "millis")]
    Millis,
    #[display(fmt = "seconds")]
    Seconds,
    #[display(fmt = "minutes")]
    Minutes,
    #[display(fmt = "hours")]
    Hours,
    #[display(fmt = "half-days")]
    HalfDays,
    #[display(fmt = "days")]
    Days,
    #[display(fmt = "weeks")]
    Weeks,
    #[display(fmt = "months")]
    Months,
    #[display(fmt = "years")]
    Years,
    #[display(fmt = "decades")]
    Decades,
}

impl Unit {
    pub const fn is_time_based(self) -> bool {
        matches!(
            self,
            Self::Nanos
                | Self::Micros
                | Self::Millis
                | Self::Seconds
                | Self::Minutes
                | Self::Hours
                | Self::HalfDays
        )
    }

    pub const fn is_date_based(self) -> bool {
        !self.is_time_based()
    }

    /// Exact length in nanoseconds for units up to `Days`. Calendar units
    /// beyond a day have no fixed length in a lunar calendar.
    pub const fn nanos(self) -> Option<i64> {
        match self {
            Self::Nanos => Some(1),
            Self::Micros => Some(1_000),
            Self::Millis => Some(1_000_000),
            Self::Seconds => Some(NANOS_PER_SECOND),
            Self::Minutes => Some(60 * NANOS_PER_SECOND),
            Self::Hours => Some(3_600 * NANOS_PER_SECOND),
            Self::HalfDays => Some(NANOS_PER_DAY / 2),
            Self::Days => Some(NANOS_PER_DAY),
            Self::Weeks | Self::Months | Self::Years | Self::Decades => None,
        }
    }
}
