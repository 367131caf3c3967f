// src/engine/types.rs
use serde::Serialize;

use crate::error::EvaluationError;

/// One detector's score on one page. `total = html + text`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Score {
    pub html: f64,
    pub text: f64,
    pub total: f64,
}

impl Score {
    pub fn new(html: f64, text: f64) -> Self {
        Self { html, text, total: html + text }
    }
}

/// A detector that could not be evaluated on this page. It counts as not matched.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetectorError {
    pub detector: String,
    pub error: EvaluationError,
}

/// Every detector's result on one page, registry order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Verdict {
    pub detector: String,
    pub threshold: f64,
    /// `None` when evaluation failed.
    pub score: Option<Score>,
    pub matched: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Classification {
    /// Names of matched detectors, registry order.
    pub matched: Vec<String>,
    pub errors: Vec<DetectorError>,
    #[serde(skip)]
    pub verdicts: Vec<Verdict>,
}

impl Classification {
    pub fn is_match(&self, name: &str) -> bool {
        self.matched.iter().any(|m| m == name)
    }

    pub fn score_of(&self, name: &str) -> Option<Score> {
        self.verdicts.iter().find(|v| v.detector == name).and_then(|v| v.score)
    }
}
