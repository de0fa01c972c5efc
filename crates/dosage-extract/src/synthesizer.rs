//! Dosage-instruction and medication synthesis.
//!
//! The synthesizer assembles the final output records for one drug
//! mention: it runs the timing cascade, attaches route, dose amount, and
//! form from the remaining attribute spans, derives the
//! maximum-dose-per-period ratio, and builds the medication record with
//! its ingredient strength.

use dosage_types::{
    find_attribute, well_known, AttributeSpan, AttributeTag, CodedConcept, DosageInstruction,
    DoseAmount, DoseRange, Ingredient, Medication, Quantity, Ratio, Spanned, TextSpan,
};
use tracing::warn;

use crate::context::DocumentContext;
use crate::number;
use crate::patterns;
use crate::timing::TimingExtractor;

/// A drug mention as delivered by the upstream medication extractor:
/// where it is, its normalized name, and its vocabulary code when the
/// terminology resolver supplied one.
#[derive(Debug, Clone, PartialEq)]
pub struct DrugMention {
    /// Location of the mention.
    pub span: TextSpan,
    /// Normalized drug name.
    pub name: String,
    /// RxNorm code, or the resolver's fallback category code.
    pub code: Option<String>,
}

impl DrugMention {
    /// Creates a drug mention.
    pub fn new(span: TextSpan, name: impl Into<String>, code: Option<String>) -> Self {
        Self {
            span,
            name: name.into(),
            code,
        }
    }
}

/// Builds [`Medication`] and [`DosageInstruction`] records for drug
/// mentions in one document.
///
/// # Examples
///
/// ```
/// use dosage_extract::context::DocumentContext;
/// use dosage_extract::synthesizer::{DosageSynthesizer, DrugMention};
/// use dosage_types::{AttributeSpan, AttributeTag, TextSpan};
///
/// let text = "ibuprofen 200 mg every 6 hours";
/// let ctx = DocumentContext::new(text, vec![TextSpan::new(0, 30)], vec![]);
/// let mention = DrugMention::new(TextSpan::new(0, 9), "ibuprofen", Some("5640".into()));
/// let attrs = vec![
///     AttributeSpan::new(AttributeTag::Strength, TextSpan::new(10, 16), "200 mg"),
///     AttributeSpan::new(AttributeTag::Frequency, TextSpan::new(17, 30), "every 6 hours"),
/// ];
/// let (_, instruction) = DosageSynthesizer::new(&ctx).synthesize(&mention, &attrs);
/// assert_eq!(instruction.repeat().period.unwrap().value, 6.0);
/// ```
pub struct DosageSynthesizer<'a> {
    ctx: &'a DocumentContext,
}

impl<'a> DosageSynthesizer<'a> {
    /// Creates a synthesizer over a document context.
    pub fn new(ctx: &'a DocumentContext) -> Self {
        Self { ctx }
    }

    /// Synthesizes the medication and dosage instruction for one mention.
    pub fn synthesize(
        &self,
        mention: &DrugMention,
        attrs: &[AttributeSpan],
    ) -> (Medication, DosageInstruction) {
        let medication = self.build_medication(mention, attrs);
        let instruction = self.build_instruction(mention, attrs);
        (medication, instruction)
    }

    /// Builds the dosage instruction: timing cascade output plus route,
    /// dose, and the derived maximum-dose ratio.
    pub fn build_instruction(
        &self,
        mention: &DrugMention,
        attrs: &[AttributeSpan],
    ) -> DosageInstruction {
        let extraction = TimingExtractor::new(self.ctx).extract(mention.span, attrs);
        let mut instruction = DosageInstruction::new();
        instruction.span = extraction.span;
        instruction.text = extraction.text;
        instruction.as_needed = extraction.as_needed;
        instruction.timing = extraction.timing;

        if let Some(route) = find_attribute(AttributeTag::Route, attrs) {
            instruction.route = Some(CodedConcept::from_text(Spanned::new(
                route.covered_text().to_string(),
                route.span,
            )));
            instruction.span.expand(route.span);
        }

        if let Some(dosage) = find_attribute(AttributeTag::Dosage, attrs) {
            instruction.dose = parse_dose(dosage);
            instruction.span.expand(dosage.span);
        }

        derive_max_dose_per_period(&mut instruction);
        instruction
    }

    /// Builds the medication record: drug concept, ingredient with
    /// strength, and dose form.
    pub fn build_medication(&self, mention: &DrugMention, attrs: &[AttributeSpan]) -> Medication {
        let name = Spanned::new(mention.name.clone(), mention.span);
        let concept = match &mention.code {
            Some(code) => CodedConcept::coded(
                name,
                well_known::RXNORM,
                Spanned::new(code.clone(), mention.span),
            ),
            None => CodedConcept::from_text(name),
        };
        let mut medication = Medication::new(concept.clone(), mention.span);
        let mut ingredient = Ingredient {
            item: concept,
            strength: None,
        };
        if let Some(strength) = find_attribute(AttributeTag::Strength, attrs) {
            ingredient.strength = parse_strength(strength);
            if let Some(ratio) = &ingredient.strength {
                medication.span.expand(ratio.numerator.value.span);
            }
        }
        medication.ingredients.push(ingredient);
        if let Some(form) = find_attribute(AttributeTag::Form, attrs) {
            medication.form = Some(CodedConcept::from_text(Spanned::new(
                form.covered_text().to_string(),
                form.span,
            )));
        }
        medication
    }
}

/// Parses the dosage attribute into a quantity or a range.
///
/// Range texts split on a dash or " to "; the unit (if any) rides on the
/// second half and applies to both bounds, and reversed bounds swap so
/// low <= high always holds.
fn parse_dose(attr: &AttributeSpan) -> Option<DoseAmount> {
    let text = attr.covered_text();
    if text.contains('-') || text.contains("to") {
        let parts: Vec<&str> = patterns::DOSE_RANGE.split(text).collect();
        if parts.len() < 2 {
            warn!(text, "could not parse dose range");
            return None;
        }
        let mut low_text = parts[0].trim().to_string();
        let mut high_tokens = parts[1].split([' ', '-']);
        let mut high_text = high_tokens.next().unwrap_or("").trim().to_string();
        let unit = high_tokens.next().map(|u| u.to_string());
        if parse_number(&low_text) > parse_number(&high_text) {
            std::mem::swap(&mut low_text, &mut high_text);
        }
        let quantity = |value_text: &str| {
            let value = Spanned::new(parse_number(value_text), attr.span);
            match &unit {
                Some(u) => Quantity::with_unit(value, Spanned::new(u.clone(), attr.span)),
                None => Quantity::new(value),
            }
        };
        Some(DoseAmount::Range(DoseRange {
            low: quantity(&low_text),
            high: quantity(&high_text),
        }))
    } else {
        let mut tokens = text.split([' ', '-']);
        let value_text = tokens.next().unwrap_or("");
        let value = Spanned::new(parse_number(value_text), attr.span);
        let quantity = match tokens.next() {
            Some(u) => Quantity::with_unit(value, Spanned::new(u.to_string(), attr.span)),
            None => Quantity::new(value),
        };
        Some(DoseAmount::Quantity(quantity))
    }
}

/// Parses the strength attribute into a ratio over the unit quantity "1".
fn parse_strength(attr: &AttributeSpan) -> Option<Ratio> {
    let text = attr.covered_text();
    let mut tokens: Vec<&str> = text.split(' ').collect();
    if tokens.len() == 1 {
        // Split on dashes separately so a spaced range is not broken up
        tokens = tokens[0].split('-').collect();
    }
    let value_text = *tokens.first()?;
    let value = Spanned::new(parse_number(value_text), attr.span);
    let numerator = match tokens.get(1) {
        Some(u) => Quantity::with_unit(value, Spanned::new(u.to_string(), attr.span)),
        None => Quantity::new(value),
    };
    // Per-dose denominator information is not extracted upstream
    let denominator = Quantity::new(Spanned::new(1.0, attr.span));
    Some(Ratio {
        numerator,
        denominator,
    })
}

/// Derives the maximum-dose-per-period ratio when both a dose amount and
/// a period exist. The range high bound and the period upper bound are
/// preferred, and the period unit propagates onto the denominator.
fn derive_max_dose_per_period(instruction: &mut DosageInstruction) {
    let Some(dose) = &instruction.dose else {
        return;
    };
    let repeat = &instruction.timing.repeat;
    let Some(period) = repeat.period else {
        return;
    };
    let period_to_use = repeat.period_max.unwrap_or(period);
    let mut denominator = Quantity::new(Spanned::new(
        period_to_use.value,
        TextSpan::new(period.span.begin.min(period_to_use.span.begin), period_to_use.span.end),
    ));
    if let Some(unit) = repeat.period_unit {
        denominator.unit = Some(Spanned::new(unit.value.code().to_string(), unit.span));
    }
    instruction.max_dose_per_period = Some(Ratio {
        numerator: dose.max_quantity().clone(),
        denominator,
    });
}

fn parse_number(text: &str) -> f64 {
    number::normalize(text).parse().unwrap_or_default()
}
