//! JSON report writer
//!
//! Full scan detail as a single pretty-printed document: a timestamp, the
//! verdict summary, then every result with its feature partition, reasons,
//! and image statistics.

use super::Summary;
use crate::analyzer::AnalysisResult;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: String,
    summary: Summary,
    files: &'a [AnalysisResult],
}

pub fn write<W: Write>(out: &mut W, results: &[AnalysisResult]) -> io::Result<()> {
    let report = JsonReport {
        generated: chrono::Local::now().to_rfc3339(),
        summary: Summary::from_results(results),
        files: results,
    };

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    out.write_all(json.as_bytes())?;
    writeln!(out)
}
