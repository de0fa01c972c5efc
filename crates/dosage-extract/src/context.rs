//! Read-only per-document annotation context.
//!
//! The extraction cascade works over annotations produced upstream:
//! sentence boundaries and timestamp annotations. This module bundles
//! them with the document text and provides the containment lookups the
//! cascade needs (timestamps inside a sentence, sentences covering an
//! attribute span).

use dosage_types::{TextSpan, TimestampAnnotation};

/// Document text plus the upstream annotations the cascade consults.
///
/// # Examples
///
/// ```
/// use dosage_extract::context::DocumentContext;
/// use dosage_types::{TextSpan, TimestampAnnotation, TimexType};
///
/// let text = "Take aspirin every day. Stop after one week.";
/// let ctx = DocumentContext::new(
///     text,
///     vec![TextSpan::new(0, 23), TextSpan::new(24, 44)],
///     vec![TimestampAnnotation::new(TimexType::Set, TextSpan::new(13, 22), "R1P24H")],
/// );
/// assert_eq!(ctx.covered_text(TextSpan::new(5, 12)), "aspirin");
/// ```
#[derive(Debug, Clone)]
pub struct DocumentContext {
    text: String,
    sentences: Vec<TextSpan>,
    timestamps: Vec<TimestampAnnotation>,
}

impl DocumentContext {
    /// Bundles document text with sentence spans and timestamp
    /// annotations. Annotation order is preserved; callers supply them in
    /// document order.
    pub fn new(
        text: impl Into<String>,
        sentences: Vec<TextSpan>,
        timestamps: Vec<TimestampAnnotation>,
    ) -> Self {
        Self {
            text: text.into(),
            sentences,
            timestamps,
        }
    }

    /// The full document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text a span covers, empty for out-of-range or inverted spans.
    pub fn covered_text(&self, span: TextSpan) -> &str {
        self.text.get(span.begin..span.end).unwrap_or_default()
    }

    /// All timestamp annotations in the document.
    pub fn timestamps(&self) -> &[TimestampAnnotation] {
        &self.timestamps
    }

    /// Timestamp annotations fully contained in `span`, in document
    /// order.
    pub fn timestamps_within(&self, span: TextSpan) -> impl Iterator<Item = &TimestampAnnotation> {
        self.timestamps
            .iter()
            .filter(move |ts| span.contains(ts.span))
    }

    /// Sentences fully containing `span`, in document order.
    pub fn sentences_covering(&self, span: TextSpan) -> impl Iterator<Item = TextSpan> + '_ {
        self.sentences
            .iter()
            .copied()
            .filter(move |sentence| sentence.contains(span))
    }

    /// The last sentence containing `span`, if any. With well-formed
    /// sentence annotations there is at most one; overlapping annotations
    /// resolve to the last in document order.
    pub fn last_covering_sentence(&self, span: TextSpan) -> Option<TextSpan> {
        self.sentences_covering(span).last()
    }

    /// Timestamps inside any sentence that covers `span`, in document
    /// order.
    pub fn timestamps_in_covering_sentences<'a>(
        &'a self,
        span: TextSpan,
    ) -> impl Iterator<Item = &'a TimestampAnnotation> {
        self.sentences_covering(span)
            .flat_map(|sentence| self.timestamps_within(sentence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosage_types::TimexType;

    fn sample() -> DocumentContext {
        // 0         1         2         3         4
        // 0123456789012345678901234567890123456789012345
        let text = "Take aspirin every 6 hours. Continue for 3 days.";
        DocumentContext::new(
            text,
            vec![TextSpan::new(0, 27), TextSpan::new(28, 48)],
            vec![
                TimestampAnnotation::new(TimexType::Set, TextSpan::new(13, 26), "RP6H"),
                TimestampAnnotation::new(TimexType::Duration, TextSpan::new(41, 47), "P3D"),
            ],
        )
    }

    #[test]
    fn test_covered_text() {
        let ctx = sample();
        assert_eq!(ctx.covered_text(TextSpan::new(5, 12)), "aspirin");
        assert_eq!(ctx.covered_text(TextSpan::new(40, 400)), "");
    }

    #[test]
    fn test_timestamps_within_sentence() {
        let ctx = sample();
        let first: Vec<_> = ctx.timestamps_within(TextSpan::new(0, 27)).collect();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].value, "RP6H");

        let second: Vec<_> = ctx.timestamps_within(TextSpan::new(28, 48)).collect();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].timex_type, TimexType::Duration);
    }

    #[test]
    fn test_covering_sentence() {
        let ctx = sample();
        assert_eq!(
            ctx.last_covering_sentence(TextSpan::new(13, 26)),
            Some(TextSpan::new(0, 27))
        );
        // Spans straddling a sentence boundary are covered by nothing
        assert_eq!(ctx.last_covering_sentence(TextSpan::new(20, 30)), None);
    }

    #[test]
    fn test_timestamps_in_covering_sentences() {
        let ctx = sample();
        let hits: Vec<_> = ctx
            .timestamps_in_covering_sentences(TextSpan::new(41, 47))
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, "P3D");
    }
}
