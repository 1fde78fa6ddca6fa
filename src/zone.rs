//! Zone identifiers and the resolution of local date-times against zone
//! rules.
//!
//! Rules come from the IANA database bundled into `jiff`, or from a POSIX TZ
//! rule string. Nothing here touches the file system.

use crate::{DateTime, Error, Offset};
use jiff::Timestamp;
use jiff::tz::{AmbiguousOffset, TimeZone};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// A time zone: either a fixed offset or a named region with rules.
#[derive(Clone)]
pub enum ZoneId {
    Fixed(Offset),
    Region(ZoneRegion),
}

/// A named region and the rules that map its local times to offsets.
#[derive(Clone)]
pub struct ZoneRegion {
    name:  Arc<str>,
    rules: TimeZone,
}

impl ZoneRegion {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn rules(&self) -> &TimeZone {
        &self.rules
    }
}

/// The offsets a zone allows for one local date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetResolution {
    /// Exactly one offset is valid.
    Single(Offset),
    /// No offset is valid: clocks jumped forward from `before` to `after`.
    Gap { before: Offset, after: Offset },
    /// Two offsets are valid: clocks were set back. `earlier` is the larger
    /// offset and gives the earlier instant.
    Overlap { earlier: Offset, later: Offset },
}

impl OffsetResolution {
    /// Whether `offset` is one of the offsets valid for the local value.
    pub fn is_valid(&self, offset: Offset) -> bool {
        match *self {
            Self::Single(single) => single == offset,
            Self::Gap { .. } => false,
            Self::Overlap { earlier, later } => offset == earlier || offset == later,
        }
    }

    /// Length of the gap in seconds, zero unless this is a gap.
    pub const fn gap_seconds(&self) -> i64 {
        match *self {
            Self::Gap { before, after } => after.seconds() as i64 - before.seconds() as i64,
            _ => 0,
        }
    }

    pub const fn is_gap(&self) -> bool {
        matches!(self, Self::Gap { .. })
    }

    pub const fn is_overlap(&self) -> bool {
        matches!(self, Self::Overlap { .. })
    }
}

impl ZoneId {
    /// Parses a zone identifier: `Z` or a signed offset gives a fixed zone,
    /// anything else is looked up as a region, and failing that read as a
    /// POSIX TZ rule.
    ///
    /// # Errors
    /// Returns `Error::UnknownZone` for an id that is neither a known region
    /// nor a valid rule, or the offset parse error for a malformed offset.
    pub fn of(id: &str) -> Result<Self, Error> {
        if id.eq_ignore_ascii_case("z") || id.starts_with(['+', '-']) {
            return Ok(Self::Fixed(Offset::parse(id)?));
        }
        Self::region(id).or_else(|unknown| Self::posix(id).map_err(|_| unknown))
    }

    pub const fn fixed(offset: Offset) -> Self {
        Self::Fixed(offset)
    }

    pub const fn utc() -> Self {
        Self::Fixed(Offset::UTC)
    }

    /// Looks up a region in the bundled zone database. The name must match the
    /// database spelling exactly.
    ///
    /// # Errors
    /// Returns `Error::UnknownZone` if no such region exists.
    pub fn region(name: &str) -> Result<Self, Error> {
        let rules = TimeZone::get(name).map_err(|_| Error::UnknownZone(name.to_string()))?;
        if rules.iana_name() != Some(name) {
            return Err(Error::UnknownZone(name.to_string()));
        }
        Ok(Self::Region(ZoneRegion {
            name: Arc::from(name),
            rules,
        }))
    }

    /// A region whose rules are given by a POSIX TZ string such as
    /// `EST5EDT,M3.2.0,M11.1.0`. The rule string is also the region id, so
    /// [`ZoneId::of`] rebuilds the zone from its text.
    ///
    /// # Errors
    /// Returns `Error::ZoneRules` for a malformed rule.
    pub fn posix(rule: &str) -> Result<Self, Error> {
        let rules = TimeZone::posix(rule).map_err(|e| Error::zone_rules(&e))?;
        Ok(Self::Region(ZoneRegion {
            name: Arc::from(rule),
            rules,
        }))
    }

    /// Wraps a `jiff` time zone. A zone without an IANA name becomes the fixed
    /// offset it has at `at`.
    pub(crate) fn from_jiff(rules: &TimeZone, at: Timestamp) -> Result<Self, Error> {
        match rules.iana_name() {
            Some(name) => Ok(Self::Region(ZoneRegion {
                name:  Arc::from(name),
                rules: rules.clone(),
            })),
            None => Ok(Self::Fixed(Offset::from_jiff(rules.to_offset(at))?)),
        }
    }

    pub fn id(&self) -> String {
        self.to_string()
    }

    /// The region name, or `None` for a fixed-offset zone.
    pub fn region_id(&self) -> Option<&str> {
        match self {
            Self::Fixed(_) => None,
            Self::Region(region) => Some(region.name()),
        }
    }

    pub const fn fixed_offset(&self) -> Option<Offset> {
        match self {
            Self::Fixed(offset) => Some(*offset),
            Self::Region(_) => None,
        }
    }

    pub fn to_jiff(&self) -> TimeZone {
        match self {
            Self::Fixed(offset) => TimeZone::fixed(offset.to_jiff()),
            Self::Region(region) => region.rules.clone(),
        }
    }

    /// The offset in effect at `instant`.
    ///
    /// # Errors
    /// Returns `Error::InvalidFieldValue` if the rules produce an offset beyond
    /// +/-18 hours.
    pub fn offset_at(&self, instant: Timestamp) -> Result<Offset, Error> {
        match self {
            Self::Fixed(offset) => Ok(*offset),
            Self::Region(region) => Offset::from_jiff(region.rules.to_offset(instant)),
        }
    }

    /// The offsets valid for `local` under this zone's rules.
    ///
    /// # Errors
    /// Returns `Error::ZoneRules` if the local value is beyond the rules'
    /// range.
    pub fn resolve(&self, local: &DateTime) -> Result<OffsetResolution, Error> {
        let region = match self {
            Self::Fixed(offset) => return Ok(OffsetResolution::Single(*offset)),
            Self::Region(region) => region,
        };
        let civil = civil_date_time(local)?;
        let resolution = match region.rules.to_ambiguous_timestamp(civil).offset() {
            AmbiguousOffset::Unambiguous { offset } => OffsetResolution::Single(Offset::from_jiff(offset)?),
            AmbiguousOffset::Gap { before, after } => OffsetResolution::Gap {
                before: Offset::from_jiff(before)?,
                after:  Offset::from_jiff(after)?,
            },
            AmbiguousOffset::Fold { before, after } => OffsetResolution::Overlap {
                earlier: Offset::from_jiff(before)?,
                later:   Offset::from_jiff(after)?,
            },
        };
        if !matches!(resolution, OffsetResolution::Single(_)) {
            trace!("{local} in {}: {resolution:?}", region.name);
        }
        Ok(resolution)
    }
}

/// The `jiff` civil date-time with the same position on the local timeline.
fn civil_date_time(local: &DateTime) -> Result<jiff::civil::DateTime, Error> {
    // the nanosecond of a Time is below one second
    let at = Timestamp::new(local.local_second(), local.time().nanosecond() as i32).map_err(|e| Error::zone_rules(&e))?;
    Ok(TimeZone::UTC.to_datetime(at))
}

impl PartialEq for ZoneId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::Region(a), Self::Region(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl Eq for ZoneId {}

impl Hash for ZoneId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Fixed(offset) => offset.hash(state),
            Self::Region(region) => region.name.hash(state),
        }
    }
}

impl fmt::Debug for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(offset) => f.debug_tuple("Fixed").field(offset).finish(),
            Self::Region(region) => f.debug_tuple("Region").field(&region.name).finish(),
        }
    }
}

impl fmt::Debug for ZoneRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoneRegion").field("name", &self.name).finish_non_exhaustive()
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(offset) => fmt::Display::fmt(offset, f),
            Self::Region(region) => f.write_str(&region.name),
        }
    }
}

impl FromStr for ZoneId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::of(s)
    }
}

impl From<Offset> for ZoneId {
    fn from(offset: Offset) -> Self {
        Self::Fixed(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const US_EASTERN: &str = "EST5EDT,M3.2.0,M11.1.0";

    fn local(y: i32, mo: u8, d: u8, h: u8, mi: u8) -> DateTime {
        DateTime::of(y, mo, d, h, mi, 0, 0).unwrap()
    }

    fn hours(h: i8) -> Offset {
        Offset::from_hours(h).unwrap()
    }

    #[test]
    fn test_of() {
        assert_eq!(ZoneId::of("Z").unwrap(), ZoneId::utc());
        assert_eq!(ZoneId::of("+03:00").unwrap(), ZoneId::fixed(hours(3)));
        assert_eq!(ZoneId::of("Asia/Riyadh").unwrap().region_id(), Some("Asia/Riyadh"));
        assert!(matches!(ZoneId::of("Mars/Olympus"), Err(Error::UnknownZone(_))));
        assert!(matches!(ZoneId::of("asia/riyadh"), Err(Error::UnknownZone(_))));
    }

    #[test]
    fn test_ids() {
        assert_eq!(ZoneId::utc().id(), "Z");
        assert_eq!(ZoneId::of(&ZoneId::utc().id()).unwrap(), ZoneId::utc());
        assert_eq!(ZoneId::region("Asia/Shanghai").unwrap().to_string(), "Asia/Shanghai");
        assert_eq!(ZoneId::fixed(hours(-5)).fixed_offset(), Some(hours(-5)));
        assert_eq!(ZoneId::utc().region_id(), None);
    }

    #[test]
    fn test_resolve_single() {
        let riyadh = ZoneId::region("Asia/Riyadh").unwrap();
        let resolution = riyadh.resolve(&local(1446, 2, 5, 12, 0)).unwrap();
        assert_eq!(resolution, OffsetResolution::Single(hours(3)));
        assert!(resolution.is_valid(hours(3)));
        assert!(!resolution.is_valid(hours(2)));
        assert_eq!(ZoneId::fixed(hours(1)).resolve(&local(1446, 2, 5, 0, 0)).unwrap(), OffsetResolution::Single(hours(1)));
    }

    #[test]
    fn test_resolve_gap() {
        let zone = ZoneId::posix(US_EASTERN).unwrap();
        // 2024-03-10 02:30 does not exist
        let resolution = zone.resolve(&local(1445, 8, 29, 2, 30)).unwrap();
        assert_eq!(
            resolution,
            OffsetResolution::Gap {
                before: hours(-5),
                after:  hours(-4),
            }
        );
        assert_eq!(resolution.gap_seconds(), 3_600);
        assert!(!resolution.is_valid(hours(-5)));
    }

    #[test]
    fn test_resolve_overlap() {
        let zone = ZoneId::posix(US_EASTERN).unwrap();
        // 2024-11-03 01:30 happens twice
        let resolution = zone.resolve(&local(1446, 5, 1, 1, 30)).unwrap();
        assert_eq!(
            resolution,
            OffsetResolution::Overlap {
                earlier: hours(-4),
                later:   hours(-5),
            }
        );
        assert!(resolution.is_overlap());
        assert!(resolution.is_valid(hours(-5)));
        assert_eq!(resolution.gap_seconds(), 0);
    }

    #[test]
    fn test_offset_at() {
        let zone = ZoneId::posix(US_EASTERN).unwrap();
        let winter: Timestamp = "2024-01-15T12:00:00Z".parse().unwrap();
        let summer: Timestamp = "2024-07-15T12:00:00Z".parse().unwrap();
        assert_eq!(zone.offset_at(winter).unwrap(), hours(-5));
        assert_eq!(zone.offset_at(summer).unwrap(), hours(-4));
    }

    #[test]
    fn test_bad_posix_rule() {
        assert!(matches!(ZoneId::posix("not a rule"), Err(Error::ZoneRules(_))));
    }

    #[test]
    fn test_posix_rule_is_its_own_id() {
        let zone = ZoneId::posix(US_EASTERN).unwrap();
        assert_eq!(zone.to_string(), US_EASTERN);
        let rebuilt = ZoneId::of(&zone.to_string()).unwrap();
        assert_eq!(rebuilt, zone);
        assert_eq!(
            rebuilt.resolve(&local(1445, 8, 29, 2, 30)).unwrap(),
            zone.resolve(&local(1445, 8, 29, 2, 30)).unwrap()
        );
        assert_eq!(ZoneId::of("<+0330>-3:30").unwrap().offset_at(Timestamp::UNIX_EPOCH).unwrap(), Offset::from_hms(3, 30, 0).unwrap());
    }
}
