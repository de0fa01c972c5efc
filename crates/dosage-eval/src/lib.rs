//! # dosage-eval
//!
//! Gold-standard evaluation harness for extracted dosage records.
//!
//! Scores the output of [`dosage_extract`] against span-annotated gold
//! standard values: each scored field has a [`FieldComparator`] that
//! decides presence and value agreement, documents are tallied into
//! per-field true/false positive and false negative counts, and corpus
//! runs parallelize per document before merging into one report.
//!
//! ## Usage
//!
//! ```rust
//! use dosage_eval::{evaluate_corpus, write_report, DocumentRecords, GoldAnnotation};
//! use dosage_extract::context::DocumentContext;
//! use dosage_extract::synthesizer::{DosageSynthesizer, DrugMention};
//! use dosage_types::{AttributeSpan, AttributeTag, TextSpan};
//!
//! let text = "Aspirin 81 mg once daily";
//! let ctx = DocumentContext::new(text, vec![TextSpan::new(0, 24)], vec![]);
//! let mention = DrugMention::new(TextSpan::new(0, 7), "aspirin", None);
//! let attrs = vec![
//!     AttributeSpan::new(AttributeTag::Strength, TextSpan::new(8, 13), "81 mg"),
//!     AttributeSpan::new(AttributeTag::Frequency, TextSpan::new(14, 24), "once daily"),
//! ];
//! let (medication, instruction) = DosageSynthesizer::new(&ctx).synthesize(&mention, &attrs);
//!
//! let gold = vec![GoldAnnotation::new(
//!     "Dosage.Timing.repeat.frequency",
//!     TextSpan::new(14, 18),
//!     "1",
//! )];
//! let docs = vec![DocumentRecords::new(
//!     "note-1",
//!     vec![dosage_eval::ExtractedRecord::new(medication, instruction)],
//!     gold,
//! )];
//!
//! let tallies = evaluate_corpus(&docs);
//! assert_eq!(tallies["Dosage.Timing.repeat.frequency"].true_positives, 1);
//!
//! let mut report = Vec::new();
//! write_report(&mut report, &tallies).unwrap();
//! ```

#![warn(missing_docs)]

mod compare;
mod report;
mod score;
mod types;

pub use compare::{standard_comparators, FieldComparator};
pub use report::{write_report, write_report_file};
pub use score::{evaluate_corpus, evaluate_document, merge_tallies, FieldTally, Tallies};
pub use types::{DocumentRecords, EvalError, EvalResult, ExtractedRecord, GoldAnnotation};
