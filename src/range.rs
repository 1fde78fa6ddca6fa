use std::{cmp::Ordering, fmt, iter::FusedIterator, str::FromStr};

use crate::{Date, Error, RANGE_SEPARATOR};

/// A half-open run of dates from `start` (inclusive) to `end` (exclusive),
/// `step` days apart.
///
/// The range is a description, not a cursor: every call to [`iter`](Self::iter)
/// starts again from `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: Date,
    end:   Date,
    step:  i64,
}

impl DateRange {
    /// Creates a range of consecutive days.
    ///
    /// # Errors
    /// Returns `Error::InvalidRange` if `end` is before `start`.
    pub fn new(start: Date, end: Date) -> Result<Self, Error> {
        Self::with_step(start, end, 1)
    }

    /// # Errors
    /// Returns `Error::InvalidRange` if `end` is before `start` or `step` is not
    /// positive.
    pub fn with_step(start: Date, end: Date, step: i64) -> Result<Self, Error> {
        if end.epoch_day() < start.epoch_day() {
            return Err(Error::InvalidRange(format!("end {end} is before start {start}")));
        }
        if step <= 0 {
            return Err(Error::InvalidRange(format!("step must be positive, got {step}")));
        }
        Ok(Self { start, end, step })
    }

    /// Returns the first date of the range
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the exclusive end of the range
    pub const fn end(&self) -> Date {
        self.end
    }

    pub const fn step(&self) -> i64 {
        self.step
    }

    /// Number of dates the range yields.
    pub const fn len(&self) -> usize {
        let span = self.end.epoch_day() - self.start.epoch_day();
        // span and step are both non-negative, step non-zero
        ((span + self.step - 1) / self.step) as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.start.epoch_day() == self.end.epoch_day()
    }

    /// Checks if the range yields `date`.
    pub fn contains(&self, date: &Date) -> bool {
        let offset = date.epoch_day() - self.start.epoch_day();
        date.epoch_day() < self.end.epoch_day() && offset >= 0 && offset % self.step == 0
    }

    pub fn iter(&self) -> DatesUntil {
        DatesUntil {
            start:     self.start,
            next:      0,
            remaining: self.len(),
            step:      self.step,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = Date;
    type IntoIter = DatesUntil;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = Date;
    type IntoIter = DatesUntil;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the dates of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DatesUntil {
    start:     Date,
    next:      i64,
    remaining: usize,
    step:      i64,
}

impl Iterator for DatesUntil {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        if self.remaining == 0 {
            return None;
        }
        // every yielded day lies before the range end, which is a valid date
        let date = self.start.plus_days(self.next).ok()?;
        self.next += self.step;
        self.remaining -= 1;
        Some(date)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for DatesUntil {}

impl FusedIterator for DatesUntil {}

/// `start/end` for a daily range, `start/end/step` otherwise.
impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RANGE_SEPARATOR}{}", self.start, self.end)?;
        if self.step != 1 {
            write!(f, "{RANGE_SEPARATOR}{}", self.step)?;
        }
        Ok(())
    }
}

impl FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split(RANGE_SEPARATOR).map(str::trim).collect();
        let failure = |message: String| Error::ParseFailure {
            text: s.to_string(),
            position: 0,
            message,
        };

        match parts.as_slice() {
            [start, end] => Self::new(start.parse()?, end.parse()?),
            [start, end, step] => {
                let step = step
                    .parse::<i64>()
                    .map_err(|e| failure(format!("invalid step '{step}': {e}")))?;
                Self::with_step(start.parse()?, end.parse()?, step)
            },
            _ => Err(failure(format!(
                "expected 'start{RANGE_SEPARATOR}end[{RANGE_SEPARATOR}step]', found {} separators",
                parts.len() - 1
            ))),
        }
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare start dates first, then end dates
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end).then(self.step.cmp(&other.step)),
            ord => ord,
        }
    }
}
