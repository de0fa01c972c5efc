//! Well-known coding systems and value sets.
//!
//! This module provides the coding-system URIs referenced by synthesized
//! records and the GTS timing-abbreviation value set
//! (<http://hl7.org/fhir/ValueSet/timing-abbreviation>).

// =============================================================================
// Coding systems
// =============================================================================

/// RxNorm drug vocabulary.
pub const RXNORM: &str = "http://www.nlm.nih.gov/research/umls/rxnorm";

/// HL7 v3 GTS abbreviation value set.
pub const GTS_ABBREVIATION: &str = "http://hl7.org/fhir/v3/GTSAbbreviation";

// =============================================================================
// Timing abbreviations
// =============================================================================

/// A standardized timing-abbreviation code for a common frequency/period
/// combination.
///
/// Each abbreviation is keyed by a (frequency, offset-in-periods,
/// period-in-hours) triple. `AM`/`PM` carry no frequency key and are never
/// produced by the timing lookup; they exist for completeness of the
/// value set.
///
/// # Examples
///
/// ```
/// use dosage_types::well_known::TimingAbbreviation;
///
/// let twice_daily = TimingAbbreviation::from_timing(2.0, 1.0, 24.0);
/// assert_eq!(twice_daily, Some(TimingAbbreviation::Bid));
/// assert_eq!(TimingAbbreviation::Bid.code(), "BID");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimingAbbreviation {
    /// Twice a day.
    Bid,
    /// Three times a day.
    Tid,
    /// Four times a day.
    Qid,
    /// Every morning.
    Am,
    /// Every evening.
    Pm,
    /// Once a day.
    Qd,
    /// Every other day.
    Qod,
    /// Every 4 hours.
    Q4h,
    /// Every 6 hours.
    Q6h,
}

impl TimingAbbreviation {
    /// Returns the abbreviation code string.
    pub fn code(self) -> &'static str {
        match self {
            Self::Bid => "BID",
            Self::Tid => "TID",
            Self::Qid => "QID",
            Self::Am => "AM",
            Self::Pm => "PM",
            Self::Qd => "QD",
            Self::Qod => "QOD",
            Self::Q4h => "Q4H",
            Self::Q6h => "Q6H",
        }
    }

    /// Returns the (frequency, offset, period-hours) key for this
    /// abbreviation, or `None` for `AM`/`PM` which have no frequency key.
    pub fn timing_key(self) -> Option<(f64, f64, f64)> {
        match self {
            Self::Bid => Some((2.0, 1.0, 24.0)),
            Self::Tid => Some((3.0, 1.0, 24.0)),
            Self::Qid => Some((4.0, 1.0, 24.0)),
            Self::Qd => Some((1.0, 1.0, 24.0)),
            Self::Qod => Some((1.0, 2.0, 24.0)),
            Self::Q4h => Some((1.0, 1.0, 4.0)),
            Self::Q6h => Some((1.0, 1.0, 6.0)),
            Self::Am | Self::Pm => None,
        }
    }

    /// Looks up the abbreviation matching a (frequency, offset,
    /// period-in-hours) triple. No match is not an error.
    pub fn from_timing(frequency: f64, offset: f64, period_hours: f64) -> Option<Self> {
        const ALL: [TimingAbbreviation; 9] = [
            TimingAbbreviation::Bid,
            TimingAbbreviation::Tid,
            TimingAbbreviation::Qid,
            TimingAbbreviation::Am,
            TimingAbbreviation::Pm,
            TimingAbbreviation::Qd,
            TimingAbbreviation::Qod,
            TimingAbbreviation::Q4h,
            TimingAbbreviation::Q6h,
        ];
        ALL.into_iter().find(|abbv| {
            abbv.timing_key()
                .is_some_and(|(f, o, p)| f == frequency && o == offset && p == period_hours)
        })
    }
}
