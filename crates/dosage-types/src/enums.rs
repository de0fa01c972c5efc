//! Coded enumeration types for timing values.
//!
//! This module provides enum representations for the coded values used in
//! timing records: UCUM units of time, FHIR weekday codes, and HL7
//! event-timing codes.

/// A UCUM unit of time, as used by FHIR `Timing.repeat.periodUnit`.
///
/// # Examples
///
/// ```
/// use dosage_types::UnitOfTime;
///
/// let unit = UnitOfTime::from_code("wk");
/// assert_eq!(unit, Some(UnitOfTime::Week));
/// assert_eq!(UnitOfTime::Week.code(), "wk");
/// assert_eq!(UnitOfTime::Week.hours(), 168.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitOfTime {
    /// Seconds (`s`).
    Second,
    /// Minutes (`min`).
    Minute,
    /// Hours (`h`).
    Hour,
    /// Days (`d`).
    Day,
    /// Weeks (`wk`).
    Week,
    /// Months (`mo`).
    Month,
    /// Years (`a`).
    Year,
}

impl UnitOfTime {
    /// Returns the UCUM code for this unit.
    pub fn code(self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
            Self::Day => "d",
            Self::Week => "wk",
            Self::Month => "mo",
            Self::Year => "a",
        }
    }

    /// Parses a UCUM code, case-insensitively.
    ///
    /// Returns `None` if the code is not a recognized unit of time.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "s" => Some(Self::Second),
            "min" => Some(Self::Minute),
            "h" => Some(Self::Hour),
            "d" => Some(Self::Day),
            "wk" => Some(Self::Week),
            "mo" => Some(Self::Month),
            "a" => Some(Self::Year),
            _ => None,
        }
    }

    /// Returns the hours-equivalent scale factor for this unit.
    ///
    /// Uses the fixed conversions year = 365 days and month = 30 days.
    /// Intended only for timing-abbreviation inference, not calendar
    /// arithmetic.
    pub fn hours(self) -> f64 {
        match self {
            Self::Year => 365.0 * 24.0,
            Self::Month => 30.0 * 24.0,
            Self::Week => 7.0 * 24.0,
            Self::Day => 24.0,
            Self::Hour => 1.0,
            Self::Minute => 1.0 / 60.0,
            Self::Second => 1.0 / 3600.0,
        }
    }
}

/// A day of the week with its 3-letter FHIR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    /// Monday (`mon`).
    Monday,
    /// Tuesday (`tue`).
    Tuesday,
    /// Wednesday (`wed`).
    Wednesday,
    /// Thursday (`thu`).
    Thursday,
    /// Friday (`fri`).
    Friday,
    /// Saturday (`sat`).
    Saturday,
    /// Sunday (`sun`).
    Sunday,
}

impl Weekday {
    /// Returns the 3-letter FHIR code for this weekday.
    pub fn code(self) -> &'static str {
        match self {
            Self::Monday => "mon",
            Self::Tuesday => "tue",
            Self::Wednesday => "wed",
            Self::Thursday => "thu",
            Self::Friday => "fri",
            Self::Saturday => "sat",
            Self::Sunday => "sun",
        }
    }

    /// Parses a weekday from the first three letters of its lowercase
    /// English name ("mon", "tue", ...).
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_lowercase().as_str() {
            "mon" => Some(Self::Monday),
            "tue" => Some(Self::Tuesday),
            "wed" => Some(Self::Wednesday),
            "thu" => Some(Self::Thursday),
            "fri" => Some(Self::Friday),
            "sat" => Some(Self::Saturday),
            "sun" => Some(Self::Sunday),
            _ => None,
        }
    }
}

/// Ante/post modifier of an event-timing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventOffset {
    /// Before the event ("before meals" -> `AC`).
    Ante,
    /// After the event ("after meals" -> `PC`).
    Post,
    /// At/during/with the event; no prefix.
    #[default]
    None,
}

impl EventOffset {
    /// Returns the code prefix: `A`, `P`, or the empty string.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Ante => "A",
            Self::Post => "P",
            Self::None => "",
        }
    }
}

/// A dosing-relevant daily event or time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimingEvent {
    /// Any meal (`C`).
    Meal,
    /// Breakfast (`CM`).
    Breakfast,
    /// Lunch (`CD`).
    Lunch,
    /// Dinner (`CV`).
    Dinner,
    /// Sleep or bedtime (`HS`).
    Sleep,
    /// Waking (`WAKE`).
    Waking,
    /// Morning (`MORN`).
    Morning,
    /// Afternoon (`AFT`).
    Afternoon,
    /// Evening (`EVE`).
    Evening,
    /// Night (`NIGHT`).
    Night,
}

impl TimingEvent {
    /// Returns the base HL7 code for this event (without ante/post prefix).
    pub fn base_code(self) -> &'static str {
        match self {
            Self::Meal => "C",
            Self::Breakfast => "CM",
            Self::Lunch => "CD",
            Self::Dinner => "CV",
            Self::Sleep => "HS",
            Self::Waking => "WAKE",
            Self::Morning => "MORN",
            Self::Afternoon => "AFT",
            Self::Evening => "EVE",
            Self::Night => "NIGHT",
        }
    }

    /// Parses an event keyword as matched by the timing-event and
    /// time-of-day patterns.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "meal" | "meals" => Some(Self::Meal),
            "breakfast" => Some(Self::Breakfast),
            "lunch" => Some(Self::Lunch),
            "dinner" => Some(Self::Dinner),
            "sleep" | "bedtime" => Some(Self::Sleep),
            "waking" => Some(Self::Waking),
            "morning" => Some(Self::Morning),
            "afternoon" => Some(Self::Afternoon),
            "evening" => Some(Self::Evening),
            "night" => Some(Self::Night),
            _ => None,
        }
    }
}

/// A complete HL7 event-timing code: an event with an optional ante/post
/// modifier.
///
/// # Examples
///
/// ```
/// use dosage_types::{EventOffset, EventTiming, TimingEvent};
///
/// let before_meals = EventTiming::new(EventOffset::Ante, TimingEvent::Meal);
/// assert_eq!(before_meals.code(), "AC");
///
/// let at_night = EventTiming::new(EventOffset::None, TimingEvent::Night);
/// assert_eq!(at_night.code(), "NIGHT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventTiming {
    /// Ante/post modifier.
    pub offset: EventOffset,
    /// The event being referenced.
    pub event: TimingEvent,
}

impl EventTiming {
    /// Creates an event-timing code.
    pub fn new(offset: EventOffset, event: TimingEvent) -> Self {
        Self { offset, event }
    }

    /// Renders the combined HL7 code, e.g. `ACM` for "before breakfast".
    pub fn code(self) -> String {
        format!("{}{}", self.offset.prefix(), self.event.base_code())
    }
}
