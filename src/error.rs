//! Error type shared by every fallible operation in the crate.

use crate::field::{Field, Unit};
use crate::types::ValueRange;

/// Error type for all fallible operations in the hijrah_datetime crate.
///
/// Failures are synchronous and atomic: a failed operation never produces a
/// partially-updated value, and the receiver is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A value or formatter is bound to a different calendar than required,
    /// or a formatter carries no calendar at all.
    #[error("chronology mismatch: expected {expected}, found {found}")]
    ChronologyMismatch {
        /// Identifier of the calendar that was required.
        expected: String,
        /// Identifier of the calendar that was supplied, or `none`.
        found: String,
    },

    /// A field value lies outside the range valid for it.
    #[error("invalid value for {field}: {value} (valid values {range})")]
    InvalidFieldValue {
        /// The field being set or validated.
        field: Field,
        /// The rejected value.
        value: i64,
        /// The range the value had to lie in.
        range: ValueRange,
    },

    /// A date falls outside the calendar provider's supported year window.
    #[error("{field} {value} is outside the supported range {min}..={max}")]
    DateOutOfRange {
        /// `year` or `epoch day`, depending on how the date was addressed.
        field: Field,
        /// The rejected value.
        value: i64,
        /// Smallest supported value.
        min: i64,
        /// Largest supported value.
        max: i64,
    },

    /// The unit is not supported by the receiving type or operation.
    #[error("unsupported unit: {0}")]
    UnsupportedUnit(Unit),

    /// The field is not supported by the receiving type, or a formatter
    /// needs a field the value cannot provide.
    #[error("unsupported field: {0}")]
    UnsupportedField(Field),

    /// No recommended formatter exists for the kind of value.
    #[error("unsupported temporal type: {0}")]
    UnsupportedTemporalType(String),

    /// The text does not match the formatter's grammar.
    #[error("text '{text}' could not be parsed at index {position}: {message}")]
    ParseFailure {
        /// The complete input text.
        text: String,
        /// Byte offset at which parsing failed.
        position: usize,
        /// What was expected at that position.
        message: String,
    },

    /// Integer overflow in an arithmetic operation.
    #[error("arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),

    /// A date sequence was requested with a non-positive step or an end
    /// before its start.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// The zone identifier is not known to the bundled zone database.
    #[error("unknown time zone: {0}")]
    UnknownZone(String),

    /// An offset is not one of the offsets the zone allows for a local value.
    #[error("offset {offset} is not valid for {local} in zone {zone}")]
    InvalidOffsetForZone {
        /// The rejected offset.
        offset: String,
        /// The local date-time being resolved.
        local: String,
        /// The zone identifier.
        zone: String,
    },

    /// The zone rules could not be applied (for example, a malformed POSIX
    /// rule string or an instant beyond the rules' range).
    #[error("time zone rules error: {0}")]
    ZoneRules(String),
}

impl Error {
    pub(crate) fn mismatch(expected: &str, found: Option<&str>) -> Self {
        Self::ChronologyMismatch {
            expected: expected.to_string(),
            found: found.unwrap_or("none").to_string(),
        }
    }

    pub(crate) fn zone_rules(err: &jiff::Error) -> Self {
        Self::ZoneRules(err.to_string())
    }

    /// Returns the parse position for `ParseFailure`, otherwise `None`.
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::ParseFailure { position, .. } => Some(*position),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
