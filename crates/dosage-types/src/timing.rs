//! FHIR Timing and Timing.repeat records.

use crate::{CodedConcept, EventTiming, Spanned, TextSpan, UnitOfTime, Weekday};

/// A duration value paired with its unit, used for `boundsDuration`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundedDuration {
    /// Total elapsed-time value.
    pub value: Spanned<f64>,
    /// Unit of the value.
    pub unit: Spanned<UnitOfTime>,
}

/// The repeat portion of a FHIR Timing: how often, over what period, and
/// tied to which events a medication is administered.
///
/// Built incrementally during a single extraction pass and then frozen.
/// Absent fields are the normal case.
///
/// Invariant: `when` and the frequency/period triad are mutually
/// exclusive; [`TimingRepeat::set_when`] enforces this by clearing
/// `frequency`, `frequency_max`, `period`, `period_max` and `period_unit`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingRepeat {
    /// Number of administrations per period.
    pub frequency: Option<Spanned<f64>>,
    /// Upper bound of an administration-count range ("3-4 times").
    pub frequency_max: Option<Spanned<f64>>,
    /// Length of the repeat period.
    pub period: Option<Spanned<f64>>,
    /// Upper bound of a period range ("every 4-6 hours").
    pub period_max: Option<Spanned<f64>>,
    /// Unit of the period.
    pub period_unit: Option<Spanned<UnitOfTime>>,
    /// Days of the week on which the drug is taken, in mention order.
    pub day_of_week: Vec<Spanned<Weekday>>,
    /// Event-timing code when dosing is tied to an event rather than a
    /// clock schedule.
    pub when: Option<Spanned<EventTiming>>,
    /// Simple elapsed-time duration (no frequency present).
    pub duration: Option<Spanned<f64>>,
    /// Unit of `duration`.
    pub duration_unit: Option<Spanned<UnitOfTime>>,
    /// Bounded total duration (frequency present: "take repeatedly, for
    /// N total days").
    pub bounds_duration: Option<BoundedDuration>,
}

impl TimingRepeat {
    /// Creates an empty repeat record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the event-timing code, clearing the frequency/period triad to
    /// maintain mutual exclusivity.
    pub fn set_when(&mut self, when: Spanned<EventTiming>) {
        self.frequency = None;
        self.frequency_max = None;
        self.period = None;
        self.period_max = None;
        self.period_unit = None;
        self.when = Some(when);
    }

    /// Returns true if frequency, period, and period unit are all set,
    /// i.e. the record describes a complete clock schedule.
    pub fn has_complete_schedule(&self) -> bool {
        self.frequency.is_some() && self.period.is_some() && self.period_unit.is_some()
    }
}

/// A FHIR Timing: a repeat record plus an optional derived GTS
/// timing-abbreviation concept.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing {
    /// The schedule itself.
    pub repeat: TimingRepeat,
    /// Derived GTS abbreviation (e.g. BID), when one matches.
    pub code: Option<CodedConcept>,
    /// Overall source span of the timing information.
    pub span: TextSpan,
}
