//! Time-unit normalization.
//!
//! Maps free-text time-unit tokens ("hours", "wk", "daily", weekday
//! names) to canonical UCUM codes.

use dosage_types::UnitOfTime;

/// Normalizes a free-text time-unit token to a UCUM unit of time.
///
/// A token ending in "day" that is longer than three characters is a
/// weekday name ("Monday", "saturdays" after trimming); those fold into
/// the week unit, which is how day-of-week mentions become a weekly
/// period. All other tokens dispatch on their first two lowercase
/// characters, with a single-character table for already-abbreviated
/// inputs.
///
/// Returns `None` when no rule matches.
///
/// # Examples
///
/// ```
/// use dosage_extract::unit::normalize_unit;
/// use dosage_types::UnitOfTime;
///
/// assert_eq!(normalize_unit("hours"), Some(UnitOfTime::Hour));
/// assert_eq!(normalize_unit("hr"), Some(UnitOfTime::Hour));
/// assert_eq!(normalize_unit("daily"), Some(UnitOfTime::Day));
/// assert_eq!(normalize_unit("Monday"), Some(UnitOfTime::Week));
/// ```
pub fn normalize_unit(text: &str) -> Option<UnitOfTime> {
    let lowered = text.to_lowercase();
    if lowered.ends_with("day") && lowered.len() > 3 {
        // Mon-Sun
        return Some(UnitOfTime::Week);
    }
    if lowered.len() > 1 {
        // A non-ASCII token can lack a char boundary at byte 2; such
        // tokens are never recognized units
        match lowered.get(..2)? {
            "ho" => Some(UnitOfTime::Hour),
            "da" => Some(UnitOfTime::Day),
            "mo" => Some(UnitOfTime::Month),
            "mi" => Some(UnitOfTime::Minute),
            "ye" => Some(UnitOfTime::Year),
            "we" | "wk" => Some(UnitOfTime::Week),
            "se" => Some(UnitOfTime::Second),
            "hr" => Some(UnitOfTime::Hour),
            _ => None,
        }
    } else {
        match lowered.as_str() {
            "d" => Some(UnitOfTime::Day),
            "m" => Some(UnitOfTime::Minute),
            "y" | "a" => Some(UnitOfTime::Year),
            "s" => Some(UnitOfTime::Second),
            "h" => Some(UnitOfTime::Hour),
            "w" => Some(UnitOfTime::Week),
            _ => None,
        }
    }
}
