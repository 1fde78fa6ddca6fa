//! Sources of the current instant and zone for the `now` constructors.

use crate::zone::ZoneId;
use jiff::Timestamp;

/// Supplies the current instant and the zone to interpret it in.
pub trait Clock {
    fn instant(&self) -> Timestamp;

    fn zone(&self) -> ZoneId;
}

/// The system clock, seen from a fixed zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemClock {
    zone: ZoneId,
}

impl SystemClock {
    pub const fn new(zone: ZoneId) -> Self {
        Self { zone }
    }

    pub const fn utc() -> Self {
        Self::new(ZoneId::utc())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn instant(&self) -> Timestamp {
        Timestamp::now()
    }

    fn zone(&self) -> ZoneId {
        self.zone.clone()
    }
}

/// A clock stopped at one instant, for tests and reproducible runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock {
    instant: Timestamp,
    zone:    ZoneId,
}

impl FixedClock {
    pub const fn new(instant: Timestamp, zone: ZoneId) -> Self {
        Self { instant, zone }
    }
}

impl Clock for FixedClock {
    fn instant(&self) -> Timestamp {
        self.instant
    }

    fn zone(&self) -> ZoneId {
        self.zone.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Date, OffsetDateTime, Temporal, ZonedDateTime};

    #[test]
    fn test_fixed_clock() {
        let instant: Timestamp = "2024-08-09T09:43:18Z".parse().unwrap();
        let clock = FixedClock::new(instant, ZoneId::region("Asia/Riyadh").unwrap());
        assert_eq!(Date::now(&clock).unwrap(), Date::of(1446, 2, 5).unwrap());
        let zoned = ZonedDateTime::now(&clock).unwrap();
        assert_eq!(zoned.to_string(), "1446-02-05T12:43:18+03:00[Asia/Riyadh]");
        assert_eq!(zoned.to_instant().unwrap(), instant);
        assert_eq!(OffsetDateTime::now(&clock).unwrap().offset().seconds(), 10_800);
    }

    #[test]
    fn test_system_clock() {
        let clock = SystemClock::default();
        let before = ZonedDateTime::now(&clock).unwrap();
        let after = ZonedDateTime::now(&clock).unwrap();
        assert!(!after.is_before(&before));
        assert_eq!(before.zone(), &ZoneId::utc());
    }
}
