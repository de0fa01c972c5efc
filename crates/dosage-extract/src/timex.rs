//! Timestamp-value parsing and reduction.
//!
//! The temporal annotator emits restricted ISO-8601-like duration values
//! (`P3D`, `PT12H`, `R1P24H`). These parse into per-unit components and
//! then reduce to a single `(value, unit)` pair that the timing extractor
//! can place into a repeat record.

use dosage_types::UnitOfTime;

use crate::patterns::TIMEX_DURATION;

/// Duration components of a timestamp value, one slot per unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DurationComponents {
    /// Years (designator `Y`).
    pub years: f64,
    /// Months (`M` before the time designator).
    pub months: f64,
    /// Weeks (`W`, an annotator extension).
    pub weeks: f64,
    /// Days (`D`).
    pub days: f64,
    /// Hours (`H` after the time designator).
    pub hours: f64,
    /// Minutes (`M` after the time designator).
    pub minutes: f64,
    /// Seconds (`S`).
    pub seconds: f64,
}

impl DurationComponents {
    fn is_empty(&self) -> bool {
        self.slots().iter().all(|&(v, _)| v == 0.0)
    }

    fn slots(&self) -> [(f64, UnitOfTime); 7] {
        [
            (self.years, UnitOfTime::Year),
            (self.months, UnitOfTime::Month),
            (self.weeks, UnitOfTime::Week),
            (self.days, UnitOfTime::Day),
            (self.hours, UnitOfTime::Hour),
            (self.minutes, UnitOfTime::Minute),
            (self.seconds, UnitOfTime::Second),
        ]
    }

    /// Reduces the components to a single value and unit.
    ///
    /// A single populated slot passes through unchanged. Multi-unit
    /// durations (`P1M15D`) collapse to a day total using calendar
    /// approximations of 365 days per year and 30 per month, since the
    /// repeat record carries exactly one period unit.
    pub fn reduce(&self) -> (f64, UnitOfTime) {
        let populated: Vec<(f64, UnitOfTime)> = self
            .slots()
            .into_iter()
            .filter(|&(v, _)| v != 0.0)
            .collect();
        match populated.as_slice() {
            [single] => *single,
            _ => {
                let days = self.years * 365.0
                    + self.months * 30.0
                    + self.weeks * 7.0
                    + self.days
                    + self.hours / 24.0
                    + self.minutes / 1440.0
                    + self.seconds / 86400.0;
                (days, UnitOfTime::Day)
            }
        }
    }
}

/// Parses a timestamp duration value into components.
///
/// Returns `None` for values that do not carry a recognizable duration
/// (plain dates, malformed strings, durations where every component is
/// zero). Parsing is lenient about the repeat-count prefix of SET values.
///
/// # Examples
///
/// ```
/// use dosage_extract::timex::parse_duration;
/// use dosage_types::UnitOfTime;
///
/// let components = parse_duration("R1P24H").unwrap();
/// assert_eq!(components.reduce(), (24.0, UnitOfTime::Hour));
/// assert!(parse_duration("2014-02-01").is_none());
/// ```
pub fn parse_duration(value: &str) -> Option<DurationComponents> {
    let caps = TIMEX_DURATION.captures(value)?;
    let slot = |name: &str| -> f64 {
        caps.name(name)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or_default()
    };
    let components = DurationComponents {
        years: slot("years"),
        months: slot("months"),
        weeks: slot("weeks"),
        days: slot("days"),
        hours: slot("hours"),
        minutes: slot("minutes"),
        seconds: slot("seconds"),
    };
    if components.is_empty() {
        None
    } else {
        Some(components)
    }
}

/// Parses and reduces in one step.
pub fn reduce_duration(value: &str) -> Option<(f64, UnitOfTime)> {
    parse_duration(value).map(|c| c.reduce())
}
