//! # dosage-types
//!
//! Type definitions for structured clinical dosage information.
//!
//! This crate provides the data model produced by the dosage extraction
//! engine: character spans, medication attribute spans, timestamp
//! annotations, FHIR Timing/TimingRepeat records, dosage instructions,
//! and medications, together with the coded value sets they reference.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via
//!   serde. Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use dosage_types::{AttributeSpan, AttributeTag, TextSpan, TimingRepeat};
//! use dosage_types::{Spanned, UnitOfTime};
//!
//! // An attribute span as supplied by the upstream entity extractor
//! let freq_attr = AttributeSpan::new(
//!     AttributeTag::Frequency,
//!     TextSpan::new(20, 33),
//!     "every 6 hours",
//! );
//! assert_eq!(freq_attr.covered_text(), "every 6 hours");
//!
//! // A timing repeat under construction
//! let mut repeat = TimingRepeat::new();
//! repeat.frequency = Some(Spanned::new(1.0, freq_attr.span));
//! repeat.period = Some(Spanned::new(6.0, freq_attr.span));
//! repeat.period_unit = Some(Spanned::new(UnitOfTime::Hour, freq_attr.span));
//! assert!(repeat.has_complete_schedule());
//! ```
//!
//! ## Without Serde
//!
//! To use this crate without serde (zero dependencies):
//!
//! ```toml
//! [dependencies]
//! dosage-types = { version = "0.1", default-features = false }
//! ```

#![warn(missing_docs)]

mod attribute;
mod dosage;
mod enums;
mod medication;
mod span;
mod timex;
mod timing;
pub mod well_known;

// Re-export all public types at crate root
pub use attribute::{find_attribute, AttributeSpan, AttributeTag};
pub use dosage::{
    CodedConcept, Coding, DosageInstruction, DoseAmount, DoseRange, Quantity, Ratio,
};
pub use enums::{EventOffset, EventTiming, TimingEvent, UnitOfTime, Weekday};
pub use medication::{Ingredient, Medication};
pub use span::{Spanned, TextSpan};
pub use timex::{TimestampAnnotation, TimexType};
pub use timing::{BoundedDuration, Timing, TimingRepeat};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        // Verify all types are accessible from crate root
        let _span = TextSpan::new(0, 4);
        let _tag = AttributeTag::Frequency;
        let _unit = UnitOfTime::Day;
        let _day = Weekday::Monday;
        let _timex = TimexType::Set;
        let _repeat = TimingRepeat::new();
        let _instruction = DosageInstruction::new();
    }

    #[test]
    fn test_well_known_accessible() {
        assert_eq!(
            well_known::GTS_ABBREVIATION,
            "http://hl7.org/fhir/v3/GTSAbbreviation"
        );
        assert!(well_known::RXNORM.contains("rxnorm"));
    }
}
