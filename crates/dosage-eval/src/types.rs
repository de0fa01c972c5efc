//! Evaluation-specific types.

use dosage_types::{DosageInstruction, Medication, TextSpan};
use thiserror::Error;

/// Errors that can occur while writing evaluation reports.
#[derive(Error, Debug)]
pub enum EvalError {
    /// I/O error writing a report.
    #[error("IO error writing report: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV error writing report: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for report operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// A single gold-standard annotation: a field class name, its character
/// span in the document, and its annotated value text.
///
/// Class names follow the gold-standard schema
/// ("Dosage.Timing.repeat.frequency", "Medication.form", ...); see the
/// comparator set for the names the harness scores.
#[derive(Debug, Clone, PartialEq)]
pub struct GoldAnnotation {
    /// The annotated field class.
    pub class: String,
    /// Character span of the annotation.
    pub span: TextSpan,
    /// The annotated value text, unnormalized.
    pub text: String,
}

impl GoldAnnotation {
    /// Creates a gold annotation.
    pub fn new(class: impl Into<String>, span: TextSpan, text: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            span,
            text: text.into(),
        }
    }
}

/// One extracted medication/instruction pair, the unit the comparators
/// inspect.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRecord {
    /// The synthesized medication.
    pub medication: Medication,
    /// The synthesized dosage instruction.
    pub instruction: DosageInstruction,
}

impl ExtractedRecord {
    /// Pairs a medication with its instruction.
    pub fn new(medication: Medication, instruction: DosageInstruction) -> Self {
        Self {
            medication,
            instruction,
        }
    }
}

/// One document's worth of evaluation input: extracted records plus the
/// gold annotations for the same text.
#[derive(Debug, Clone)]
pub struct DocumentRecords {
    /// Document identifier, used only in log output.
    pub id: String,
    /// Records extracted from the document.
    pub records: Vec<ExtractedRecord>,
    /// Gold-standard annotations over the document.
    pub gold: Vec<GoldAnnotation>,
}

impl DocumentRecords {
    /// Bundles a document's extracted records with its gold annotations.
    pub fn new(
        id: impl Into<String>,
        records: Vec<ExtractedRecord>,
        gold: Vec<GoldAnnotation>,
    ) -> Self {
        Self {
            id: id.into(),
            records,
            gold,
        }
    }
}
