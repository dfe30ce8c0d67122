//! Report generation for scan results
//!
//! Output formatters for batches of scan results:
//!
//! - **CSV**: spreadsheet-compatible, one row per scanned image
//! - **JSON**: machine-readable, full result detail plus explanations
//!
//! `generate` picks the format from the file extension; anything that is
//! not `.json` gets CSV, matching the CLI's default report type.

pub mod csv;
pub mod json;

use crate::analyzer::{AnalysisResult, Verdict};
use serde::Serialize;
use std::io;
use std::path::Path;

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, results: &[AnalysisResult]) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "json" => json::write(&mut file, results),
        _ => csv::write(&mut file, results),
    }
}

/// Verdict counts for a batch of scans.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub total: usize,
    pub real: usize,
    pub fake: usize,
}

impl Summary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let mut summary = Self::default();
        summary.total = results.len();

        for r in results {
            match r.verdict {
                Verdict::Real => summary.real += 1,
                Verdict::Fake => summary.fake += 1,
            }
        }

        summary
    }
}
