//! Per-document and corpus scoring.
//!
//! Matching is span-collision based: an extracted field counts as a true
//! positive when some gold annotation of the comparator's class overlaps
//! its record span and agrees on value, a false positive otherwise; a
//! gold annotation nothing agrees with is a false negative. Documents
//! score independently, so corpus runs parallelize per document and
//! merge the per-field tallies.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::compare::{standard_comparators, FieldComparator};
use crate::types::{DocumentRecords, ExtractedRecord, GoldAnnotation};

/// True/false positive and false negative counts for one scored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldTally {
    /// Extracted values a gold annotation agreed with.
    pub true_positives: u64,
    /// Extracted values no gold annotation agreed with.
    pub false_positives: u64,
    /// Gold annotations no extracted value agreed with.
    pub false_negatives: u64,
}

impl FieldTally {
    /// Precision: TP / (TP + FP). Zero when nothing was extracted.
    pub fn precision(&self) -> f64 {
        let denominator = self.true_positives + self.false_positives;
        if denominator == 0 {
            0.0
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }

    /// Recall: TP / (TP + FN). Zero when the gold standard is empty.
    pub fn recall(&self) -> f64 {
        let denominator = self.true_positives + self.false_negatives;
        if denominator == 0 {
            0.0
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }

    /// Harmonic mean of precision and recall.
    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// Adds another tally's counts into this one.
    pub fn merge(&mut self, other: &FieldTally) {
        self.true_positives += other.true_positives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
    }
}

/// Per-field tallies keyed by comparator label, in stable label order.
pub type Tallies = BTreeMap<String, FieldTally>;

/// Scores one document's extracted records against its gold annotations.
pub fn evaluate_document(
    doc_id: &str,
    records: &[ExtractedRecord],
    gold: &[GoldAnnotation],
    comparators: &[Box<dyn FieldComparator>],
) -> Tallies {
    let mut tallies = Tallies::new();
    for comparator in comparators {
        let tally = score_field(doc_id, records, gold, comparator.as_ref());
        tallies.insert(comparator.label(), tally);
    }
    tallies
}

fn score_field(
    doc_id: &str,
    records: &[ExtractedRecord],
    gold: &[GoldAnnotation],
    comparator: &dyn FieldComparator,
) -> FieldTally {
    let mut tally = FieldTally::default();

    // Extracted side: true and false positives.
    for record in records {
        if !comparator.has_interested_property(record) {
            continue;
        }
        let span = comparator.span(record);
        let agreed = gold
            .iter()
            .filter(|g| g.span.overlaps(span) && g.class.eq_ignore_ascii_case(comparator.field()))
            .any(|g| comparator.matches(record, g));
        if agreed {
            tally.true_positives += 1;
        } else {
            debug!(
                field = %comparator.label(),
                doc = doc_id,
                begin = span.begin,
                end = span.end,
                "false positive"
            );
            tally.false_positives += 1;
        }
    }

    // Gold side: false negatives.
    for g in gold {
        if !g.class.eq_ignore_ascii_case(comparator.field()) {
            continue;
        }
        let agreed = records.iter().any(|record| {
            comparator.has_interested_property(record)
                && comparator.span(record).overlaps(g.span)
                && comparator.matches(record, g)
        });
        if !agreed {
            debug!(
                field = %comparator.label(),
                doc = doc_id,
                value = %g.text,
                "false negative"
            );
            tally.false_negatives += 1;
        }
    }

    tally
}

/// Scores a corpus with the standard comparator set, one rayon task per
/// document, merging per-document tallies into a single corpus tally.
pub fn evaluate_corpus(documents: &[DocumentRecords]) -> Tallies {
    let comparators = standard_comparators();
    documents
        .par_iter()
        .map(|doc| evaluate_document(&doc.id, &doc.records, &doc.gold, &comparators))
        .reduce(Tallies::new, merge_tallies)
}

/// Folds the right tally map into the left.
pub fn merge_tallies(mut left: Tallies, right: Tallies) -> Tallies {
    for (label, tally) in right {
        left.entry(label).or_default().merge(&tally);
    }
    left
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosage_extract::context::DocumentContext;
    use dosage_extract::synthesizer::{DosageSynthesizer, DrugMention};
    use dosage_types::{AttributeSpan, AttributeTag, TextSpan};

    fn aspirin_document() -> DocumentRecords {
        // 0         1         2         3
        // 0123456789012345678901234567890123456789
        let text = "Aspirin 81 mg tablet twice daily";
        let ctx = DocumentContext::new(text, vec![TextSpan::new(0, 32)], vec![]);
        let mention = DrugMention::new(TextSpan::new(0, 7), "aspirin", Some("1191".to_string()));
        let attrs = vec![
            AttributeSpan::new(AttributeTag::Strength, TextSpan::new(8, 13), "81 mg"),
            AttributeSpan::new(AttributeTag::Form, TextSpan::new(14, 20), "tablet"),
            AttributeSpan::new(AttributeTag::Frequency, TextSpan::new(21, 32), "twice daily"),
        ];
        let (medication, instruction) = DosageSynthesizer::new(&ctx).synthesize(&mention, &attrs);
        DocumentRecords::new(
            "doc-1",
            vec![ExtractedRecord::new(medication, instruction)],
            vec![
                GoldAnnotation::new(
                    "Dosage.Timing.repeat.frequency",
                    TextSpan::new(21, 26),
                    "two",
                ),
                GoldAnnotation::new(
                    "Dosage.Timing.repeat.period%2Bunit",
                    TextSpan::new(27, 32),
                    "1,d",
                ),
                GoldAnnotation::new("Medication.form", TextSpan::new(14, 20), "tablet"),
            ],
        )
    }

    #[test]
    fn test_tally_metrics() {
        let tally = FieldTally {
            true_positives: 3,
            false_positives: 1,
            false_negatives: 2,
        };
        assert_eq!(tally.precision(), 0.75);
        assert_eq!(tally.recall(), 0.6);
        let f1 = tally.f1();
        assert!((f1 - 2.0 * 0.75 * 0.6 / 1.35).abs() < 1e-12);

        assert_eq!(FieldTally::default().precision(), 0.0);
        assert_eq!(FieldTally::default().f1(), 0.0);
    }

    #[test]
    fn test_evaluate_document_true_positives() {
        let doc = aspirin_document();
        let tallies =
            evaluate_document(&doc.id, &doc.records, &doc.gold, &standard_comparators());

        let frequency = &tallies["Dosage.Timing.repeat.frequency"];
        assert_eq!(frequency.true_positives, 1);
        assert_eq!(frequency.false_positives, 0);
        assert_eq!(frequency.false_negatives, 0);

        let period = &tallies["Dosage.Timing.repeat.period%2Bunit_value"];
        assert_eq!(period.true_positives, 1);
        let period_unit = &tallies["Dosage.Timing.repeat.period%2Bunit_units"];
        assert_eq!(period_unit.true_positives, 1);

        let form = &tallies["Medication.form"];
        assert_eq!(form.true_positives, 1);
    }

    #[test]
    fn test_evaluate_document_counts_disagreement_twice() {
        // A gold value that disagrees yields both a false positive (the
        // extracted value matched nothing) and a false negative (the gold
        // value went unmatched).
        let mut doc = aspirin_document();
        doc.gold[0].text = "3".to_string();
        let tallies =
            evaluate_document(&doc.id, &doc.records, &doc.gold, &standard_comparators());

        let frequency = &tallies["Dosage.Timing.repeat.frequency"];
        assert_eq!(frequency.true_positives, 0);
        assert_eq!(frequency.false_positives, 1);
        assert_eq!(frequency.false_negatives, 1);
    }

    #[test]
    fn test_evaluate_document_requires_overlap() {
        let mut doc = aspirin_document();
        // Move the gold frequency annotation outside the timing span
        doc.gold[0].span = TextSpan::new(0, 7);
        let tallies =
            evaluate_document(&doc.id, &doc.records, &doc.gold, &standard_comparators());

        let frequency = &tallies["Dosage.Timing.repeat.frequency"];
        assert_eq!(frequency.true_positives, 0);
        assert_eq!(frequency.false_positives, 1);
        assert_eq!(frequency.false_negatives, 1);
    }

    #[test]
    fn test_evaluate_corpus_merges_documents() {
        let docs = vec![aspirin_document(), aspirin_document()];
        let tallies = evaluate_corpus(&docs);
        assert_eq!(tallies["Dosage.Timing.repeat.frequency"].true_positives, 2);
        assert_eq!(tallies["Medication.form"].true_positives, 2);
    }

    #[test]
    fn test_merge_tallies() {
        let mut left = Tallies::new();
        left.insert(
            "a".to_string(),
            FieldTally {
                true_positives: 1,
                false_positives: 0,
                false_negatives: 2,
            },
        );
        let mut right = Tallies::new();
        right.insert(
            "a".to_string(),
            FieldTally {
                true_positives: 2,
                false_positives: 1,
                false_negatives: 0,
            },
        );
        right.insert("b".to_string(), FieldTally::default());

        let merged = merge_tallies(left, right);
        assert_eq!(merged["a"].true_positives, 3);
        assert_eq!(merged["a"].false_positives, 1);
        assert_eq!(merged["a"].false_negatives, 2);
        assert!(merged.contains_key("b"));
    }
}
