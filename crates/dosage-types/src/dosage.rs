//! Dosage-instruction records and their supporting value types.

use crate::{Spanned, TextSpan, Timing, UnitOfTime};

/// A measured amount: a decimal value with an optional unit string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quantity {
    /// The numeric amount.
    pub value: Spanned<f64>,
    /// Free-text unit ("mg", "tablet"), if one was extracted.
    pub unit: Option<Spanned<String>>,
}

impl Quantity {
    /// Creates a quantity without a unit.
    pub fn new(value: Spanned<f64>) -> Self {
        Self { value, unit: None }
    }

    /// Creates a quantity with a unit.
    pub fn with_unit(value: Spanned<f64>, unit: Spanned<String>) -> Self {
        Self {
            value,
            unit: Some(unit),
        }
    }
}

/// A low/high dose range ("3-4 tablets").
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoseRange {
    /// Lower bound.
    pub low: Quantity,
    /// Upper bound.
    pub high: Quantity,
}

/// A numerator/denominator ratio of two quantities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ratio {
    /// Numerator quantity.
    pub numerator: Quantity,
    /// Denominator quantity.
    pub denominator: Quantity,
}

/// A single coding: a code within a coding system.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coding {
    /// URI of the coding system.
    pub system: String,
    /// The code value.
    pub code: Spanned<String>,
}

/// A coded concept: display text plus zero or more codings.
///
/// # Examples
///
/// ```
/// use dosage_types::{CodedConcept, Spanned, TextSpan};
///
/// let route = CodedConcept::from_text(Spanned::new("oral".to_string(), TextSpan::new(5, 9)));
/// assert_eq!(route.text.as_ref().unwrap().value, "oral");
/// assert!(route.codings.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodedConcept {
    /// Human-readable display text.
    pub text: Option<Spanned<String>>,
    /// Codings in one or more terminologies.
    pub codings: Vec<Coding>,
}

impl CodedConcept {
    /// Creates a concept carrying only display text.
    pub fn from_text(text: Spanned<String>) -> Self {
        Self {
            text: Some(text),
            codings: Vec::new(),
        }
    }

    /// Creates a concept with text and a single coding.
    pub fn coded(text: Spanned<String>, system: impl Into<String>, code: Spanned<String>) -> Self {
        Self {
            text: Some(text),
            codings: vec![Coding {
                system: system.into(),
                code,
            }],
        }
    }
}

/// The dose amount of an instruction: a single quantity or a range,
/// mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoseAmount {
    /// A single dose quantity ("2 tablets").
    Quantity(Quantity),
    /// A dose range ("3-4 tablets").
    Range(DoseRange),
}

impl DoseAmount {
    /// Returns the quantity governing maximum-dose derivation: the
    /// quantity itself, or the high bound of a range.
    pub fn max_quantity(&self) -> &Quantity {
        match self {
            Self::Quantity(q) => q,
            Self::Range(r) => &r.high,
        }
    }
}

/// A complete dosage instruction for one drug mention.
///
/// Created once per mention, mutated only during the extraction pass for
/// that mention, then frozen. `max_dose_per_period` is always derived,
/// never extracted directly.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DosageInstruction {
    /// Overall source span, expanded as attributes are consumed.
    pub span: TextSpan,
    /// Free-text fallback when no structured timing could be derived.
    pub text: Option<Spanned<String>>,
    /// The timing schedule.
    pub timing: Timing,
    /// True when the instruction is "as needed" / "prn".
    pub as_needed: Option<Spanned<bool>>,
    /// Dose amount (quantity or range).
    pub dose: Option<DoseAmount>,
    /// Administration route.
    pub route: Option<CodedConcept>,
    /// Body site of administration.
    pub site: Option<CodedConcept>,
    /// Administration method.
    pub method: Option<CodedConcept>,
    /// Additional coded instructions, in mention order.
    pub additional_instructions: Vec<CodedConcept>,
    /// Reason for the prescription.
    pub reason: Option<CodedConcept>,
    /// Derived maximum dose per period ratio.
    pub max_dose_per_period: Option<Ratio>,
}

impl DosageInstruction {
    /// Creates an empty instruction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience accessor for the repeat record.
    pub fn repeat(&self) -> &crate::TimingRepeat {
        &self.timing.repeat
    }

    /// Returns the period unit of the timing schedule, if set.
    pub fn period_unit(&self) -> Option<UnitOfTime> {
        self.timing.repeat.period_unit.as_ref().map(|u| u.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantity(v: f64) -> Quantity {
        Quantity::new(Spanned::new(v, TextSpan::new(0, 3)))
    }

    #[test]
    fn test_dose_amount_max_quantity() {
        let single = DoseAmount::Quantity(quantity(500.0));
        assert_eq!(single.max_quantity().value.value, 500.0);

        let range = DoseAmount::Range(DoseRange {
            low: quantity(3.0),
            high: quantity(4.0),
        });
        assert_eq!(range.max_quantity().value.value, 4.0);
    }

    #[test]
    fn test_coded_concept_from_text() {
        let c = CodedConcept::from_text(Spanned::new("oral".to_string(), TextSpan::new(1, 5)));
        assert_eq!(c.text.unwrap().value, "oral");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let mut instruction = DosageInstruction::new();
        instruction.dose = Some(DoseAmount::Quantity(quantity(2.0)));
        instruction.as_needed = Some(Spanned::new(true, TextSpan::new(10, 13)));
        let json = serde_json::to_string(&instruction).unwrap();
        let parsed: DosageInstruction = serde_json::from_str(&json).unwrap();
        assert_eq!(instruction, parsed);
    }
}
