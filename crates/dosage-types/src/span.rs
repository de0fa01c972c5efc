//! Character-span types.
//!
//! This module provides `TextSpan`, a half-open character interval over a
//! source document, and `Spanned<T>`, a value paired with the span it was
//! extracted from.

/// A half-open character interval `[begin, end)` over a source document.
///
/// Spans are produced by upstream NLP annotators and carried through every
/// extracted field for traceability. The invariant `begin <= end` holds for
/// every constructed span.
///
/// A span of `(0, 0)` is treated as "not yet positioned" by
/// [`TextSpan::expand`], matching the convention of the annotation source.
///
/// # Examples
///
/// ```
/// use dosage_types::TextSpan;
///
/// let span = TextSpan::new(4, 9);
/// assert_eq!(span.len(), 5);
/// assert!(span.overlaps(TextSpan::new(8, 12)));
/// assert!(!span.overlaps(TextSpan::new(9, 12)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextSpan {
    /// First character offset covered by the span.
    pub begin: usize,
    /// First character offset past the end of the span.
    pub end: usize,
}

impl TextSpan {
    /// Creates a new span.
    ///
    /// # Panics
    /// Panics if `begin > end`; an inverted span indicates an upstream
    /// annotator contract breach.
    pub fn new(begin: usize, end: usize) -> Self {
        assert!(begin <= end, "inverted span: {begin}..{end}");
        Self { begin, end }
    }

    /// The empty unset span `(0, 0)`.
    pub const EMPTY: TextSpan = TextSpan { begin: 0, end: 0 };

    /// Returns the number of characters covered.
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Returns true if the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns true if this span is the unset `(0, 0)` sentinel.
    pub fn is_unset(&self) -> bool {
        self.begin == 0 && self.end == 0
    }

    /// Returns true if the two spans share at least one character.
    pub fn overlaps(&self, other: TextSpan) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    /// Returns true if `other` lies entirely within this span.
    pub fn contains(&self, other: TextSpan) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// Returns the smallest span covering both inputs.
    pub fn union(&self, other: TextSpan) -> TextSpan {
        TextSpan {
            begin: self.begin.min(other.begin),
            end: self.end.max(other.end),
        }
    }

    /// Grows this span to cover `other`, treating the unset `(0, 0)` span
    /// as "take `other` as-is".
    ///
    /// This reproduces the span-expansion convention used when assembling
    /// a dosage instruction from several attribute mentions.
    pub fn expand(&mut self, other: TextSpan) {
        if self.is_unset() {
            *self = other;
        } else {
            *self = self.union(other);
        }
    }
}

/// A value paired with the source span it was extracted from.
///
/// This is the closed set of span-carrying primitives (decimals, strings,
/// codes, booleans) represented as a single generic rather than one type
/// per primitive shape.
///
/// # Examples
///
/// ```
/// use dosage_types::{Spanned, TextSpan};
///
/// let freq = Spanned::new(2.0, TextSpan::new(10, 15));
/// assert_eq!(freq.value, 2.0);
/// assert_eq!(freq.span.begin, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spanned<T> {
    /// The extracted value.
    pub value: T,
    /// Where in the source document the value came from.
    pub span: TextSpan,
}

impl<T> Spanned<T> {
    /// Pairs a value with its source span.
    pub fn new(value: T, span: TextSpan) -> Self {
        Self { value, span }
    }

    /// Maps the value while keeping the span.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned {
            value: f(self.value),
            span: self.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_overlap() {
        let a = TextSpan::new(5, 10);
        assert!(a.overlaps(TextSpan::new(9, 20)));
        assert!(a.overlaps(TextSpan::new(0, 6)));
        assert!(!a.overlaps(TextSpan::new(10, 20)));
        assert!(!a.overlaps(TextSpan::new(0, 5)));
    }

    #[test]
    fn test_span_union() {
        let a = TextSpan::new(5, 10);
        let b = TextSpan::new(8, 14);
        assert_eq!(a.union(b), TextSpan::new(5, 14));
    }

    #[test]
    fn test_expand_treats_zero_zero_as_unset() {
        let mut span = TextSpan::EMPTY;
        span.expand(TextSpan::new(7, 12));
        assert_eq!(span, TextSpan::new(7, 12));

        span.expand(TextSpan::new(2, 9));
        assert_eq!(span, TextSpan::new(2, 12));
    }

    #[test]
    fn test_default_is_unset_sentinel() {
        assert_eq!(TextSpan::default(), TextSpan::EMPTY);
        assert!(TextSpan::default().is_unset());
        // Defaulted containers start with an unset span
        assert!(crate::Timing::default().span.is_unset());
        assert!(crate::DosageInstruction::new().span.is_unset());
    }

    #[test]
    #[should_panic]
    fn test_inverted_span_panics() {
        let _ = TextSpan::new(9, 4);
    }

    #[test]
    fn test_spanned_map() {
        let s = Spanned::new("2", TextSpan::new(0, 1));
        let n = s.map(|v| v.parse::<i32>().unwrap());
        assert_eq!(n.value, 2);
        assert_eq!(n.span, TextSpan::new(0, 1));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let s = Spanned::new(1.5, TextSpan::new(3, 6));
        let json = serde_json::to_string(&s).unwrap();
        let parsed: Spanned<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(s, parsed);
    }
}
