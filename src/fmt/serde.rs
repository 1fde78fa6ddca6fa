//! `serde` support: every value serializes as its canonical text and
//! deserializes through `FromStr`.

use crate::range::DateRange;
use crate::zone::ZoneId;
use crate::{Date, DateTime, EarlyDate, Offset, OffsetDate, OffsetDateTime, Time, ZonedDateTime};

macro_rules! serde_via_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serializer.collect_str(self)
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    let s = String::deserialize(deserializer)?;
                    s.parse().map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

serde_via_str!(
    Date,
    Time,
    DateTime,
    Offset,
    OffsetDate,
    OffsetDateTime,
    ZonedDateTime,
    EarlyDate,
    ZoneId,
    DateRange,
);
