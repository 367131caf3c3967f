// src/csv.rs
//
// Flatten scan reports into CSV/TSV text (clipboard copy, stdout).

use std::io::{self, Write};

use crate::scan::{UrlOutcome, UrlReport};

pub const REPORT_HEADERS: [&str; 5] = ["URL", "Status", "Detected", "Notes", "Time (ms)"];

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 { write!(w, "{}", sep)?; }
        let cell = cell.as_ref();
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Status label shown in tables.
pub fn status_label(outcome: &UrlOutcome) -> &'static str {
    match outcome {
        UrlOutcome::Classified(c) if c.matched.is_empty() => "none",
        UrlOutcome::Classified(_) => "detected",
        UrlOutcome::Failed { .. } => "error",
        UrlOutcome::Skipped => "skipped",
    }
}

/// Fetch error, or the detectors that could not be evaluated.
pub fn notes(outcome: &UrlOutcome) -> String {
    match outcome {
        UrlOutcome::Classified(c) => c
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.detector, e.error))
            .collect::<Vec<_>>()
            .join("; "),
        UrlOutcome::Failed { error } => error.clone(),
        UrlOutcome::Skipped => s!(),
    }
}

/// One table row per report, in `REPORT_HEADERS` order.
pub fn report_row(r: &UrlReport) -> [String; 5] {
    [
        r.url.clone(),
        s!(status_label(&r.outcome)),
        r.matched().join(", "),
        notes(&r.outcome),
        r.elapsed_ms.to_string(),
    ]
}

pub fn reports_to_string(reports: &[UrlReport], include_headers: bool, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        let _ = write_row(&mut buf, &REPORT_HEADERS, sep);
    }
    for r in reports {
        let _ = write_row(&mut buf, &report_row(r), sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
