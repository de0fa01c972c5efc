//! Medication attribute spans.
//!
//! This module provides `AttributeSpan`, the tagged character interval an
//! upstream entity extractor produces for each drug-related attribute
//! (frequency, duration, route, and so on).

use crate::TextSpan;

/// Semantic tag of a medication attribute span.
///
/// These are the attribute categories consumed from the upstream entity
/// extractor; other tags it may emit are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AttributeTag {
    /// How often the drug is taken ("q6h", "twice daily").
    Frequency,
    /// How long the drug is taken ("for 3 days").
    Duration,
    /// Administration route ("oral", "topical").
    Route,
    /// Dose amount ("2 tablets", "3-4 tablets").
    Dosage,
    /// Ingredient strength ("500 mg").
    Strength,
    /// Drug form ("tablet", "capsule").
    Form,
}

impl AttributeTag {
    /// Parses a tag from the extractor's lowercase tag string.
    ///
    /// Returns `None` for tags this engine does not consume.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "frequency" => Some(Self::Frequency),
            "duration" => Some(Self::Duration),
            "route" => Some(Self::Route),
            "dosage" => Some(Self::Dosage),
            "strength" => Some(Self::Strength),
            "form" => Some(Self::Form),
            _ => None,
        }
    }
}

/// A tagged character interval extracted by the upstream NLP component.
///
/// Immutable once created; `begin <= end` always holds (enforced by
/// [`TextSpan::new`]).
///
/// # Examples
///
/// ```
/// use dosage_types::{AttributeSpan, AttributeTag, TextSpan};
///
/// let attr = AttributeSpan::new(
///     AttributeTag::Frequency,
///     TextSpan::new(20, 31),
///     "twice daily",
/// );
/// assert_eq!(attr.covered_text(), "twice daily");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeSpan {
    /// Semantic tag of this attribute.
    pub tag: AttributeTag,
    /// Location in the source document.
    pub span: TextSpan,
    /// The text covered by the span.
    pub covered_text: String,
}

impl AttributeSpan {
    /// Creates a new attribute span.
    pub fn new(tag: AttributeTag, span: TextSpan, covered_text: impl Into<String>) -> Self {
        Self {
            tag,
            span,
            covered_text: covered_text.into(),
        }
    }

    /// Returns the covered text.
    pub fn covered_text(&self) -> &str {
        &self.covered_text
    }
}

/// Returns the first attribute with the given tag, if any.
///
/// Mirrors the upstream convention that at most one attribute of each tag
/// is attached to a drug mention; extras are ignored.
pub fn find_attribute(tag: AttributeTag, attrs: &[AttributeSpan]) -> Option<&AttributeSpan> {
    attrs.iter().find(|a| a.tag == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parsing() {
        assert_eq!(AttributeTag::from_tag("frequency"), Some(AttributeTag::Frequency));
        assert_eq!(AttributeTag::from_tag("FREQUENCY"), Some(AttributeTag::Frequency));
        assert_eq!(AttributeTag::from_tag("dosage"), Some(AttributeTag::Dosage));
        assert_eq!(AttributeTag::from_tag("unknown"), None);
    }

    #[test]
    fn test_find_attribute_takes_first() {
        let attrs = vec![
            AttributeSpan::new(AttributeTag::Route, TextSpan::new(0, 4), "oral"),
            AttributeSpan::new(AttributeTag::Frequency, TextSpan::new(5, 8), "bid"),
            AttributeSpan::new(AttributeTag::Frequency, TextSpan::new(9, 12), "tid"),
        ];
        let found = find_attribute(AttributeTag::Frequency, &attrs).unwrap();
        assert_eq!(found.covered_text(), "bid");
        assert!(find_attribute(AttributeTag::Duration, &attrs).is_none());
    }
}
