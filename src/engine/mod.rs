// src/engine/mod.rs
//
// Scoring engine: signals → score → threshold → matched names.
// Pure functions over a validated Registry and one page.

mod engine;
mod signals;
mod types;

pub use engine::{classify, clears_threshold, evaluate, score};
pub use signals::{html_score, text_score};
pub use types::{Classification, DetectorError, Score, Verdict};
