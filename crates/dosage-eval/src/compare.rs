//! Field comparators: one per scored gold-standard class.
//!
//! Each comparator knows how to pull its field out of an
//! [`ExtractedRecord`], whether the record carries the field at all, and
//! how to decide agreement with a gold annotation's value text. Value
//! comparison is numeric-first: both sides are normalized through the
//! extraction crate's number normalizer and compared as doubles, with a
//! case-insensitive text comparison as the fallback when either side does
//! not parse. Gold value text is never normalized at annotation time, so
//! normalization happens here.

use dosage_extract::{number, unit};
use dosage_types::well_known::GTS_ABBREVIATION;
use dosage_types::{DoseAmount, EventOffset, EventTiming, Ratio, TextSpan, TimingEvent};

use crate::types::{ExtractedRecord, GoldAnnotation};

/// Agreement test between one extracted field and gold annotations of one
/// class.
///
/// `matches` is only ever called for records where
/// `has_interested_property` returned true; implementations may rely on
/// the field being present.
pub trait FieldComparator: Send + Sync {
    /// The gold-standard class name this comparator scores against.
    fn field(&self) -> &'static str;

    /// Disambiguating suffix when several comparators share a gold class
    /// (period value vs. period unit). `None` for most fields.
    fn suffix(&self) -> Option<&'static str> {
        None
    }

    /// The span used for collision detection against gold annotations.
    fn span(&self, record: &ExtractedRecord) -> TextSpan;

    /// Whether the record carries the field this comparator scores.
    fn has_interested_property(&self, record: &ExtractedRecord) -> bool;

    /// Whether the extracted field value agrees with the gold annotation.
    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool;

    /// Report label: the gold class name plus the suffix, if any.
    fn label(&self) -> String {
        match self.suffix() {
            Some(suffix) => format!("{}_{}", self.field(), suffix),
            None => self.field().to_string(),
        }
    }
}

/// The full comparator set covering every synthesized field.
pub fn standard_comparators() -> Vec<Box<dyn FieldComparator>> {
    vec![
        Box::new(FrequencyComparator),
        Box::new(FrequencyMaxComparator),
        Box::new(PeriodValueComparator),
        Box::new(PeriodUnitComparator),
        Box::new(PeriodMaxComparator),
        Box::new(DurationValueComparator),
        Box::new(DurationUnitComparator),
        Box::new(TimingCodeComparator),
        Box::new(WhenComparator),
        Box::new(AsNeededComparator),
        Box::new(DoseQuantityValueComparator),
        Box::new(DoseQuantityUnitComparator),
        Box::new(RouteComparator),
        Box::new(FormComparator),
        Box::new(MedicationCodeComparator),
        Box::new(StrengthNumeratorValueComparator),
        Box::new(StrengthNumeratorUnitComparator),
        Box::new(StrengthDenominatorValueComparator),
        Box::new(StrengthDenominatorUnitComparator),
    ]
}

/// Numeric-first comparison of an extracted double against gold value
/// text. The gold side is normalized before parsing; if it still does not
/// parse as a number, the comparison falls back to case-insensitive text
/// against the extracted value's canonical rendering.
fn numeric_matches(extracted: f64, gold: &str) -> bool {
    match number::normalize(gold).parse::<f64>() {
        Ok(gold_value) => extracted == gold_value,
        Err(_) => format_value(extracted).eq_ignore_ascii_case(gold.trim()),
    }
}

/// Canonical rendering of an extracted numeric value ("2", "0.5").
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn text_matches(extracted: &str, gold: &str) -> bool {
    extracted.trim().eq_ignore_ascii_case(gold.trim())
}

/// Maps gold unit text ("days", "hr") to the same UCUM code the extractor
/// emits, so unit comparisons are code-to-code. Unmappable gold text is
/// compared verbatim.
fn unit_matches(extracted_code: &str, gold: &str) -> bool {
    match unit::normalize_unit(gold.trim()) {
        Some(gold_unit) => extracted_code.eq_ignore_ascii_case(gold_unit.code()),
        None => extracted_code.eq_ignore_ascii_case(gold.trim()),
    }
}

/// Derives the HL7 event-timing code a gold "when" annotation denotes
/// ("before meals" -> "AC"). Gold text with no recognizable event is
/// returned verbatim and compared as-is.
fn gold_when_code(gold: &str) -> String {
    let lowered = gold.to_lowercase();
    let mut offset = EventOffset::None;
    let mut event = None;
    for token in lowered.split_whitespace() {
        match token {
            "before" => offset = EventOffset::Ante,
            "after" => offset = EventOffset::Post,
            _ => {
                if event.is_none() {
                    event = TimingEvent::from_keyword(token);
                }
            }
        }
    }
    match event {
        Some(event) => EventTiming::new(offset, event).code(),
        None => gold.to_string(),
    }
}

/// Strength ratios of a record's ingredients, in ingredient order.
fn strengths(record: &ExtractedRecord) -> impl Iterator<Item = &Ratio> {
    record
        .medication
        .ingredients
        .iter()
        .filter_map(|i| i.strength.as_ref())
}

struct FrequencyComparator;

impl FieldComparator for FrequencyComparator {
    fn field(&self) -> &'static str {
        "Dosage.Timing.repeat.frequency"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.instruction.timing.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        record.instruction.repeat().frequency.is_some()
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        record
            .instruction
            .repeat()
            .frequency
            .is_some_and(|f| numeric_matches(f.value, &gold.text))
    }
}

struct FrequencyMaxComparator;

impl FieldComparator for FrequencyMaxComparator {
    fn field(&self) -> &'static str {
        "Dosage.Timing.repeat.frequencyMax"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.instruction.timing.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        record.instruction.repeat().frequency_max.is_some()
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        record
            .instruction
            .repeat()
            .frequency_max
            .is_some_and(|f| numeric_matches(f.value, &gold.text))
    }
}

/// Gold period annotations carry "value,unit" in one string; the value
/// comparator reads the first element.
struct PeriodValueComparator;

impl FieldComparator for PeriodValueComparator {
    fn field(&self) -> &'static str {
        "Dosage.Timing.repeat.period%2Bunit"
    }

    fn suffix(&self) -> Option<&'static str> {
        Some("value")
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.instruction.timing.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        record.instruction.repeat().period.is_some()
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        let gold_value = gold.text.split(',').next().unwrap_or_default();
        record
            .instruction
            .repeat()
            .period
            .is_some_and(|p| numeric_matches(p.value, gold_value))
    }
}

/// Second element of the "value,unit" gold period annotation.
struct PeriodUnitComparator;

impl FieldComparator for PeriodUnitComparator {
    fn field(&self) -> &'static str {
        "Dosage.Timing.repeat.period%2Bunit"
    }

    fn suffix(&self) -> Option<&'static str> {
        Some("units")
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.instruction.timing.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        record.instruction.repeat().period_unit.is_some()
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        let parts: Vec<&str> = gold.text.split(',').collect();
        if parts.len() != 2 {
            return false;
        }
        record
            .instruction
            .repeat()
            .period_unit
            .is_some_and(|u| unit_matches(u.value.code(), parts[1]))
    }
}

struct PeriodMaxComparator;

impl FieldComparator for PeriodMaxComparator {
    fn field(&self) -> &'static str {
        "Dosage.Timing.repeat.periodMax"
    }

    fn suffix(&self) -> Option<&'static str> {
        Some("value")
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.instruction.timing.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        record.instruction.repeat().period_max.is_some()
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        record
            .instruction
            .repeat()
            .period_max
            .is_some_and(|p| numeric_matches(p.value, &gold.text))
    }
}

/// Duration value: the simple duration when present, otherwise the value
/// of the bounded duration.
struct DurationValueComparator;

impl FieldComparator for DurationValueComparator {
    fn field(&self) -> &'static str {
        "Dosage.Timing.repeat.duration"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.instruction.timing.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        let repeat = record.instruction.repeat();
        repeat.duration.is_some() || repeat.bounds_duration.is_some()
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        let repeat = record.instruction.repeat();
        let value = repeat
            .duration
            .map(|d| d.value)
            .or_else(|| repeat.bounds_duration.as_ref().map(|b| b.value.value));
        value.is_some_and(|v| numeric_matches(v, &gold.text))
    }
}

struct DurationUnitComparator;

impl FieldComparator for DurationUnitComparator {
    fn field(&self) -> &'static str {
        "Dosage.Timing.repeat.durationUnit"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.instruction.timing.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        let repeat = record.instruction.repeat();
        repeat.duration_unit.is_some() || repeat.bounds_duration.is_some()
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        let repeat = record.instruction.repeat();
        let unit = repeat
            .duration_unit
            .map(|u| u.value)
            .or_else(|| repeat.bounds_duration.as_ref().map(|b| b.unit.value));
        unit.is_some_and(|u| unit_matches(u.code(), &gold.text))
    }
}

/// A derived GTS abbreviation (BID, Q6H). The gold standard does not
/// record normalized codes, so overlapping annotations of the class count
/// as agreement.
struct TimingCodeComparator;

impl FieldComparator for TimingCodeComparator {
    fn field(&self) -> &'static str {
        "Dosage.Timing.code"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record
            .instruction
            .timing
            .code
            .as_ref()
            .and_then(|c| c.text.as_ref())
            .map(|t| t.span)
            .unwrap_or(record.instruction.timing.span)
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        record
            .instruction
            .timing
            .code
            .as_ref()
            .is_some_and(|c| c.codings.iter().any(|c| c.system == GTS_ABBREVIATION))
    }

    fn matches(&self, _record: &ExtractedRecord, _gold: &GoldAnnotation) -> bool {
        true
    }
}

struct WhenComparator;

impl FieldComparator for WhenComparator {
    fn field(&self) -> &'static str {
        "Dosage.Timing.repeat.when"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record
            .instruction
            .repeat()
            .when
            .map(|w| w.span)
            .unwrap_or(record.instruction.timing.span)
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        record.instruction.repeat().when.is_some()
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        record
            .instruction
            .repeat()
            .when
            .is_some_and(|w| w.value.code().eq_ignore_ascii_case(&gold_when_code(&gold.text)))
    }
}

/// As-needed is a bare boolean; presence in both places is agreement.
struct AsNeededComparator;

impl FieldComparator for AsNeededComparator {
    fn field(&self) -> &'static str {
        "Dosage.asNeededBoolean"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.instruction.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        record.instruction.as_needed.is_some()
    }

    fn matches(&self, _record: &ExtractedRecord, _gold: &GoldAnnotation) -> bool {
        true
    }
}

/// Simple dose quantities only; dose ranges are annotated under a
/// different gold class and are not scored here.
struct DoseQuantityValueComparator;

impl FieldComparator for DoseQuantityValueComparator {
    fn field(&self) -> &'static str {
        "Dosage.dose.quantity.value"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.instruction.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        matches!(record.instruction.dose, Some(DoseAmount::Quantity(_)))
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        match &record.instruction.dose {
            Some(DoseAmount::Quantity(q)) => numeric_matches(q.value.value, &gold.text),
            _ => false,
        }
    }
}

struct DoseQuantityUnitComparator;

impl FieldComparator for DoseQuantityUnitComparator {
    fn field(&self) -> &'static str {
        "Dosage.dose.quantity.unit"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.instruction.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        matches!(&record.instruction.dose, Some(DoseAmount::Quantity(q)) if q.unit.is_some())
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        match &record.instruction.dose {
            Some(DoseAmount::Quantity(q)) => q
                .unit
                .as_ref()
                .is_some_and(|u| text_matches(&u.value, &gold.text)),
            _ => false,
        }
    }
}

struct RouteComparator;

impl FieldComparator for RouteComparator {
    fn field(&self) -> &'static str {
        "Dosage.route"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.instruction.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        record.instruction.route.is_some()
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        record
            .instruction
            .route
            .as_ref()
            .and_then(|r| r.text.as_ref())
            .is_some_and(|t| text_matches(&t.value, &gold.text))
    }
}

struct FormComparator;

impl FieldComparator for FormComparator {
    fn field(&self) -> &'static str {
        "Medication.form"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.medication.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        record.medication.form.is_some()
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        record
            .medication
            .form
            .as_ref()
            .and_then(|f| f.text.as_ref())
            .is_some_and(|t| text_matches(&t.value, &gold.text))
    }
}

/// The gold standard records no normalized drug code, so overlapping
/// medication mentions count as agreement.
struct MedicationCodeComparator;

impl FieldComparator for MedicationCodeComparator {
    fn field(&self) -> &'static str {
        "MedicationStatement.medicationCodeableConcept"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.medication.span
    }

    fn has_interested_property(&self, _record: &ExtractedRecord) -> bool {
        true
    }

    fn matches(&self, _record: &ExtractedRecord, _gold: &GoldAnnotation) -> bool {
        true
    }
}

struct StrengthNumeratorValueComparator;

impl FieldComparator for StrengthNumeratorValueComparator {
    fn field(&self) -> &'static str {
        "Medication.ingredient.amount.numerator.quantity.value"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.medication.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        strengths(record).next().is_some()
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        strengths(record).any(|s| numeric_matches(s.numerator.value.value, &gold.text))
    }
}

struct StrengthNumeratorUnitComparator;

impl FieldComparator for StrengthNumeratorUnitComparator {
    fn field(&self) -> &'static str {
        "Medication.ingredient.amount.numerator.quantity.unit"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.medication.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        strengths(record).any(|s| s.numerator.unit.is_some())
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        strengths(record)
            .filter_map(|s| s.numerator.unit.as_ref())
            .any(|u| text_matches(&u.value, &gold.text))
    }
}

struct StrengthDenominatorValueComparator;

impl FieldComparator for StrengthDenominatorValueComparator {
    fn field(&self) -> &'static str {
        "Medication.ingredient.amount.denumerator.quantity.value"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.medication.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        strengths(record).next().is_some()
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        strengths(record).any(|s| numeric_matches(s.denominator.value.value, &gold.text))
    }
}

struct StrengthDenominatorUnitComparator;

impl FieldComparator for StrengthDenominatorUnitComparator {
    fn field(&self) -> &'static str {
        "Medication.ingredient.amount.denumerator.quantity.unit"
    }

    fn span(&self, record: &ExtractedRecord) -> TextSpan {
        record.medication.span
    }

    fn has_interested_property(&self, record: &ExtractedRecord) -> bool {
        strengths(record).any(|s| s.denominator.unit.is_some())
    }

    fn matches(&self, record: &ExtractedRecord, gold: &GoldAnnotation) -> bool {
        strengths(record)
            .filter_map(|s| s.denominator.unit.as_ref())
            .any(|u| text_matches(&u.value, &gold.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosage_extract::context::DocumentContext;
    use dosage_extract::synthesizer::{DosageSynthesizer, DrugMention};
    use dosage_types::{AttributeSpan, AttributeTag, TextSpan};

    fn record(text: &str, mention_end: usize, attrs: Vec<AttributeSpan>) -> ExtractedRecord {
        let ctx = DocumentContext::new(text, vec![TextSpan::new(0, text.len())], vec![]);
        let mention = DrugMention::new(TextSpan::new(0, mention_end), &text[..mention_end], None);
        let (medication, instruction) = DosageSynthesizer::new(&ctx).synthesize(&mention, &attrs);
        ExtractedRecord::new(medication, instruction)
    }

    fn sample_record() -> ExtractedRecord {
        // 0         1         2         3
        // 0123456789012345678901234567890123456789
        let text = "Aspirin 81 mg tablet twice daily";
        record(
            text,
            7,
            vec![
                AttributeSpan::new(AttributeTag::Strength, TextSpan::new(8, 13), "81 mg"),
                AttributeSpan::new(AttributeTag::Form, TextSpan::new(14, 20), "tablet"),
                AttributeSpan::new(AttributeTag::Frequency, TextSpan::new(21, 32), "twice daily"),
            ],
        )
    }

    #[test]
    fn test_numeric_matches_normalizes_gold() {
        assert!(numeric_matches(2.0, "two"));
        assert!(numeric_matches(2.0, "2"));
        assert!(numeric_matches(0.5, "1/2"));
        assert!(!numeric_matches(2.0, "3"));
    }

    #[test]
    fn test_numeric_matches_text_fallback() {
        // Unparseable gold compares against the canonical rendering
        assert!(!numeric_matches(2.0, "a few"));
    }

    #[test]
    fn test_unit_matches_maps_gold_words() {
        assert!(unit_matches("d", "days"));
        assert!(unit_matches("h", "Hours"));
        assert!(unit_matches("d", "d"));
        assert!(!unit_matches("d", "weeks"));
    }

    #[test]
    fn test_gold_when_code() {
        assert_eq!(gold_when_code("before meals"), "AC");
        assert_eq!(gold_when_code("after breakfast"), "PCM");
        assert_eq!(gold_when_code("bedtime"), "HS");
        assert_eq!(gold_when_code("HS"), "HS");
    }

    #[test]
    fn test_frequency_comparator() {
        let rec = sample_record();
        let cmp = FrequencyComparator;
        assert!(cmp.has_interested_property(&rec));
        let gold = GoldAnnotation::new(cmp.field(), TextSpan::new(21, 26), "two");
        assert!(cmp.matches(&rec, &gold));
        let wrong = GoldAnnotation::new(cmp.field(), TextSpan::new(21, 26), "3");
        assert!(!cmp.matches(&rec, &wrong));
    }

    #[test]
    fn test_period_comparators_split_gold_value() {
        let rec = sample_record();
        let gold = GoldAnnotation::new("Dosage.Timing.repeat.period%2Bunit", TextSpan::new(27, 32), "1,d");
        assert!(PeriodValueComparator.matches(&rec, &gold));
        assert!(PeriodUnitComparator.matches(&rec, &gold));

        let value_only =
            GoldAnnotation::new("Dosage.Timing.repeat.period%2Bunit", TextSpan::new(27, 32), "1");
        assert!(PeriodValueComparator.matches(&rec, &value_only));
        // Unit comparator requires both elements
        assert!(!PeriodUnitComparator.matches(&rec, &value_only));
    }

    #[test]
    fn test_timing_code_comparator_property() {
        let rec = sample_record();
        // "twice daily" derives BID
        assert!(TimingCodeComparator.has_interested_property(&rec));
        let gold = GoldAnnotation::new("Dosage.Timing.code", TextSpan::new(21, 32), "bid");
        assert!(TimingCodeComparator.matches(&rec, &gold));
    }

    #[test]
    fn test_strength_comparators() {
        let rec = sample_record();
        let numerator =
            GoldAnnotation::new(StrengthNumeratorValueComparator.field(), TextSpan::new(8, 10), "81");
        assert!(StrengthNumeratorValueComparator.matches(&rec, &numerator));
        let unit =
            GoldAnnotation::new(StrengthNumeratorUnitComparator.field(), TextSpan::new(11, 13), "MG");
        assert!(StrengthNumeratorUnitComparator.matches(&rec, &unit));
        // Denominator defaults to the unit quantity
        let denominator = GoldAnnotation::new(
            StrengthDenominatorValueComparator.field(),
            TextSpan::new(8, 13),
            "1",
        );
        assert!(StrengthDenominatorValueComparator.matches(&rec, &denominator));
        assert!(!StrengthDenominatorUnitComparator.has_interested_property(&rec));
    }

    #[test]
    fn test_dose_comparators_skip_ranges() {
        // 0         1         2
        // 012345678901234567890123456789
        let text = "Ibuprofen take 1-2 tablets";
        let rec = record(
            text,
            9,
            vec![AttributeSpan::new(
                AttributeTag::Dosage,
                TextSpan::new(15, 26),
                "1-2 tablets",
            )],
        );
        assert!(!DoseQuantityValueComparator.has_interested_property(&rec));
        assert!(!DoseQuantityUnitComparator.has_interested_property(&rec));
    }

    #[test]
    fn test_labels_distinguish_period_comparators() {
        assert_eq!(
            PeriodValueComparator.label(),
            "Dosage.Timing.repeat.period%2Bunit_value"
        );
        assert_eq!(
            PeriodUnitComparator.label(),
            "Dosage.Timing.repeat.period%2Bunit_units"
        );
        assert_eq!(FrequencyComparator.label(), FrequencyComparator.field());
    }

    #[test]
    fn test_standard_comparators_labels_unique() {
        let comparators = standard_comparators();
        let mut labels: Vec<String> = comparators.iter().map(|c| c.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), comparators.len());
    }
}
