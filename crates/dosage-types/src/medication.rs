//! Medication and ingredient records.

use crate::{CodedConcept, Ratio, TextSpan};

/// A medication ingredient with an optional strength ratio.
///
/// The strength denominator defaults to the unit quantity "1" when the
/// extractor supplies only a numerator ("500 mg" means 500 mg per 1 dose
/// unit).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ingredient {
    /// The ingredient substance concept.
    pub item: CodedConcept,
    /// Strength as numerator quantity over denominator quantity.
    pub strength: Option<Ratio>,
}

/// A medication: a coded concept plus its ingredient list and optional
/// dose form.
///
/// # Examples
///
/// ```
/// use dosage_types::{CodedConcept, Medication, Spanned, TextSpan};
///
/// let code = CodedConcept::from_text(Spanned::new(
///     "lisinopril".to_string(),
///     TextSpan::new(0, 10),
/// ));
/// let med = Medication::new(code, TextSpan::new(0, 10));
/// assert!(med.ingredients.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Medication {
    /// The drug concept (vocabulary code plus display text).
    pub code: CodedConcept,
    /// Constituent ingredients.
    pub ingredients: Vec<Ingredient>,
    /// Dose form ("tablet", "capsule"), when extracted.
    pub form: Option<CodedConcept>,
    /// Source span of the drug mention, expanded over strength/form
    /// attributes.
    pub span: TextSpan,
}

impl Medication {
    /// Creates a medication with no ingredients.
    pub fn new(code: CodedConcept, span: TextSpan) -> Self {
        Self {
            code,
            ingredients: Vec::new(),
            form: None,
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Spanned;

    #[test]
    fn test_medication_construction() {
        let code = CodedConcept::from_text(Spanned::new(
            "metformin".to_string(),
            TextSpan::new(12, 21),
        ));
        let med = Medication::new(code, TextSpan::new(12, 21));
        assert_eq!(med.code.text.as_ref().unwrap().value, "metformin");
        assert!(med.form.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let code = CodedConcept::from_text(Spanned::new(
            "aspirin".to_string(),
            TextSpan::new(0, 7),
        ));
        let med = Medication::new(code, TextSpan::new(0, 7));
        let json = serde_json::to_string(&med).unwrap();
        let parsed: Medication = serde_json::from_str(&json).unwrap();
        assert_eq!(med, parsed);
    }
}
