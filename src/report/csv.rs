//! CSV report writer
//!
//! One row per scanned image. Feature lists are joined with `; ` inside a
//! single quoted cell so the column count stays fixed.

use crate::analyzer::AnalysisResult;
use std::io::{self, Write};

/// Quote a CSV field, doubling embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn write<W: Write>(out: &mut W, results: &[AnalysisResult]) -> io::Result<()> {
    writeln!(
        out,
        "file,currency,denomination,verdict,confidence_pct,probability_real,\
         observed_features,missing_features,suspicious_reasons,\
         brightness,contrast,edge_density"
    )?;

    for r in results {
        writeln!(
            out,
            "{},{},{},{},{},{:.4},{},{},{},{:.2},{:.2},{:.2}",
            quote(&r.file_path),
            r.currency,
            quote(&r.denomination),
            r.verdict,
            r.confidence_pct(),
            r.probability_real,
            quote(&r.observed_features.join("; ")),
            quote(&r.missing_features.join("; ")),
            quote(&r.suspicious_reasons.join("; ")),
            r.stats.brightness,
            r.stats.contrast,
            r.stats.edge_density,
        )?;
    }

    Ok(())
}
