//! Tab-separated evaluation report output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::score::Tallies;
use crate::types::EvalResult;

const HEADER: [&str; 7] = [
    "field",
    "true_positives",
    "false_positives",
    "false_negatives",
    "precision",
    "recall",
    "f1",
];

/// Writes per-field tallies and derived metrics as tab-separated rows,
/// one per field in label order, with a header row.
pub fn write_report<W: Write>(writer: W, tallies: &Tallies) -> EvalResult<()> {
    let mut out = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    out.write_record(HEADER)?;
    for (label, tally) in tallies {
        out.write_record([
            label.as_str(),
            &tally.true_positives.to_string(),
            &tally.false_positives.to_string(),
            &tally.false_negatives.to_string(),
            &format!("{:.4}", tally.precision()),
            &format!("{:.4}", tally.recall()),
            &format!("{:.4}", tally.f1()),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the report to a file path.
pub fn write_report_file<P: AsRef<Path>>(path: P, tallies: &Tallies) -> EvalResult<()> {
    let file = File::create(path)?;
    write_report(file, tallies)
}
