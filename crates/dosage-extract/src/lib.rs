//! # dosage-extract
//!
//! Timing and dosage-instruction extraction from clinical NLP annotations.
//!
//! This crate turns the loosely structured output of upstream medication
//! NLP annotators (attribute spans such as "every 6 hours" or "3-4
//! tablets", plus temporal annotations) into the structured records of
//! [`dosage_types`]: a normalized timing schedule, a dose amount, and a
//! complete dosage instruction with derived aggregate fields.
//!
//! ## Architecture
//!
//! - [`number`] / [`unit`]: canonical numeric-string and time-unit
//!   normalization.
//! - [`patterns`]: the compiled regular-expression library.
//! - [`timex`]: ISO-8601-like duration parsing for timestamp annotations.
//! - [`context`]: read-only per-document annotation indices.
//! - [`timing`]: the ordered extraction cascade producing a
//!   `Timing`/`TimingRepeat`, with an audit trail of field writes.
//! - [`synthesizer`]: assembly of the final `DosageInstruction` and
//!   `Medication` records for a drug mention.
//!
//! ## Usage
//!
//! ```rust
//! use dosage_extract::context::DocumentContext;
//! use dosage_extract::synthesizer::{DosageSynthesizer, DrugMention};
//! use dosage_types::{AttributeSpan, AttributeTag, TextSpan};
//!
//! let text = "Aspirin 81 mg tablet once daily";
//! let ctx = DocumentContext::new(text, vec![TextSpan::new(0, 31)], vec![]);
//! let mention = DrugMention::new(TextSpan::new(0, 7), "aspirin", Some("1191".to_string()));
//! let attrs = vec![
//!     AttributeSpan::new(AttributeTag::Strength, TextSpan::new(8, 13), "81 mg"),
//!     AttributeSpan::new(AttributeTag::Form, TextSpan::new(14, 20), "tablet"),
//!     AttributeSpan::new(AttributeTag::Frequency, TextSpan::new(21, 31), "once daily"),
//! ];
//! let (medication, instruction) = DosageSynthesizer::new(&ctx).synthesize(&mention, &attrs);
//! assert_eq!(instruction.repeat().frequency.unwrap().value, 1.0);
//! assert_eq!(medication.ingredients[0].strength.as_ref().unwrap()
//!     .numerator.value.value, 81.0);
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod number;
pub mod patterns;
pub mod synthesizer;
pub mod timex;
pub mod timing;
pub mod unit;

pub use dosage_types;
