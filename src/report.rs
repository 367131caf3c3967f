// src/report.rs
//
// Console output for the CLI. Styling goes through an explicit Palette
// handed to the printer; nothing here touches process-wide color state.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use crate::{
    config::consts::BANNER,
    engine::Verdict,
    progress::Progress,
    scan::{UrlOutcome, UrlReport},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn colored() -> Self { Self { color: true } }
    pub fn plain() -> Self { Self { color: false } }

    fn paint(&self, s: &str, f: fn(&str) -> ColoredString) -> String {
        if self.color { f(s).to_string() } else { s!(s) }
    }

    pub fn banner(&self, s: &str) -> String { self.paint(s, |x| x.cyan()) }
    pub fn scanning(&self, s: &str) -> String { self.paint(s, |x| x.yellow()) }
    pub fn label(&self, s: &str) -> String { self.paint(s, |x| x.white()) }
    pub fn hit(&self, s: &str) -> String { self.paint(s, |x| x.green()) }
    pub fn miss(&self, s: &str) -> String { self.paint(s, |x| x.red()) }
    pub fn warn(&self, s: &str) -> String { self.paint(s, |x| x.magenta()) }
    pub fn dim(&self, s: &str) -> String { self.paint(s, |x| x.dimmed()) }
}

/// Prints one block per URL as results arrive.
pub struct ConsoleProgress<W: Write> {
    out: W,
    palette: Palette,
    explain: bool,
    done: usize,
    total: usize,
    failed: usize,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W, palette: Palette, explain: bool) -> Self {
        Self { out, palette, explain, done: 0, total: 0, failed: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{}\n", self.palette.banner(BANNER))
    }

    fn write_report(&mut self, r: &UrlReport) -> io::Result<()> {
        let p = self.palette;
        writeln!(self.out, "{}", p.scanning(&format!("[+] Scanning: {}", r.url)))?;

        match &r.outcome {
            UrlOutcome::Classified(c) if c.matched.is_empty() => {
                writeln!(self.out, "    {}", p.miss("→ No page type detected"))?;
            }
            UrlOutcome::Classified(c) => {
                let names: Vec<String> = c.matched.iter().map(|n| p.hit(n)).collect();
                writeln!(self.out, "    {} {}", p.label("→ Detected:"), names.join(", "))?;
            }
            UrlOutcome::Failed { error } => {
                writeln!(self.out, "    {}", p.miss(&format!("→ Error: {}", error)))?;
            }
            UrlOutcome::Skipped => {
                writeln!(self.out, "    {}", p.dim("→ Skipped"))?;
            }
        }

        if let Some(c) = r.classification() {
            for e in &c.errors {
                writeln!(self.out, "    {}", p.warn(&format!("! {}: {}", e.detector, e.error)))?;
            }
            if self.explain {
                for v in &c.verdicts {
                    writeln!(self.out, "      {}", explain_line(v, p))?;
                }
            }
        }
        writeln!(self.out)
    }
}

fn explain_line(v: &Verdict, p: Palette) -> String {
    match v.score {
        Some(s) => {
            let line = format!(
                "{:<24} {:>7.2} (html {:.2} + text {:.2}) / min {:.2}",
                v.detector, s.total, s.html, s.text, v.threshold
            );
            if v.matched { p.hit(&line) } else { p.dim(&line) }
        }
        None => p.warn(&format!("{:<24} not evaluated", v.detector)),
    }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        let _ = writeln!(self.out, "{}", self.palette.dim(msg));
    }

    fn item_done(&mut self, report: &UrlReport) {
        self.done += 1;
        if report.is_failed() {
            self.failed += 1;
        }
        if let Err(e) = self.write_report(report) {
            loge!("Report: write failed: {}", e);
        }
    }

    fn finish(&mut self) {
        let summary = format!(
            "Scanned {} of {} ({} failed)",
            self.done, plural!(self.total, "URL"), self.failed
        );
        let _ = writeln!(self.out, "{}", self.palette.dim(&summary));
        let _ = self.out.flush();
    }
}

/// Reports as a JSON array. `explain` adds every detector's score.
pub fn to_json(reports: &[UrlReport], explain: bool) -> serde_json::Result<String> {
    if !explain {
        return serde_json::to_string_pretty(reports);
    }
    let rows: Vec<serde_json::Value> = reports
        .iter()
        .map(|r| {
            let mut v = serde_json::to_value(r)?;
            if let (Some(c), Some(obj)) = (r.classification(), v.as_object_mut()) {
                obj.insert(s!("verdicts"), serde_json::to_value(&c.verdicts)?);
            }
            Ok(v)
        })
        .collect::<serde_json::Result<_>>()?;
    serde_json::to_string_pretty(&rows)
}
