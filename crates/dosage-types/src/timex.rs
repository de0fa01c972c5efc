//! Timestamp annotations from the external temporal annotator.
//!
//! These are read-only inputs: date/duration/set expressions with a
//! normalized ISO-8601-like value string (e.g. `P3D`, `R1P24H`), used as a
//! fallback source when no lexical frequency or duration cue exists.

use crate::TextSpan;

/// The TIMEX3 class of a timestamp annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum TimexType {
    /// A calendar date.
    Date,
    /// A clock time.
    Time,
    /// An elapsed-time expression.
    Duration,
    /// A recurring schedule expression.
    Set,
}

impl TimexType {
    /// Parses a TIMEX3 type string, case-insensitively.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DATE" => Some(Self::Date),
            "TIME" => Some(Self::Time),
            "DURATION" => Some(Self::Duration),
            "SET" => Some(Self::Set),
            _ => None,
        }
    }
}

/// An externally-supplied temporal annotation.
///
/// # Examples
///
/// ```
/// use dosage_types::{TextSpan, TimestampAnnotation, TimexType};
///
/// let ts = TimestampAnnotation::new(TimexType::Set, TextSpan::new(40, 52), "R1P24H");
/// assert_eq!(ts.timex_type, TimexType::Set);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimestampAnnotation {
    /// The TIMEX3 class of this annotation.
    pub timex_type: TimexType,
    /// Location in the source document.
    pub span: TextSpan,
    /// The normalized ISO-8601-like value string.
    pub value: String,
}

impl TimestampAnnotation {
    /// Creates a new timestamp annotation.
    pub fn new(timex_type: TimexType, span: TextSpan, value: impl Into<String>) -> Self {
        Self {
            timex_type,
            span,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timex_type_parsing() {
        assert_eq!(TimexType::from_str_loose("SET"), Some(TimexType::Set));
        assert_eq!(TimexType::from_str_loose("set"), Some(TimexType::Set));
        assert_eq!(TimexType::from_str_loose("Duration"), Some(TimexType::Duration));
        assert_eq!(TimexType::from_str_loose("FREQUENCY"), None);
    }
}
