// src/engine/engine.rs
use crate::core::PageDocument;
use crate::detector::{Detector, Registry};
use crate::error::EvaluationError;

use super::signals::{html_score, text_score};
use super::types::*;

/// HTML score + text score for one detector on one page.
pub fn score<D>(detector: &Detector, page: &D) -> Result<Score, EvaluationError>
where
    D: PageDocument + ?Sized,
{
    let html = html_score(page, &detector.html, &detector.scoring)?;
    let text = text_score(page.text(), &detector.text, &detector.scoring);
    Ok(Score::new(html, text))
}

/// Threshold is inclusive.
pub fn clears_threshold(detector: &Detector, score: &Score) -> bool {
    score.total >= detector.logic.min_total_score
}

/// `Some(name)` if the detector matches this page.
pub fn evaluate<'d, D>(detector: &'d Detector, page: &D) -> Result<Option<&'d str>, EvaluationError>
where
    D: PageDocument + ?Sized,
{
    let s = score(detector, page)?;
    Ok(clears_threshold(detector, &s).then_some(detector.name.as_str()))
}

/// Run every detector against one page, registry order.
/// A detector that fails to evaluate is recorded in `errors` and skipped;
/// the rest still run.
pub fn classify<D>(page: &D, registry: &Registry) -> Classification
where
    D: PageDocument + ?Sized,
{
    let mut out = Classification {
        verdicts: Vec::with_capacity(registry.len()),
        ..Classification::default()
    };

    for detector in registry {
        let verdict = match score(detector, page) {
            Ok(s) => {
                let matched = clears_threshold(detector, &s);
                if matched {
                    out.matched.push(detector.name.clone());
                }
                Verdict { detector: detector.name.clone(), threshold: detector.logic.min_total_score, score: Some(s), matched }
            }
            Err(error) => {
                logw!("Classify: detector '{}' skipped: {}", detector.name, error);
                out.errors.push(DetectorError { detector: detector.name.clone(), error });
                Verdict { detector: detector.name.clone(), threshold: detector.logic.min_total_score, score: None, matched: false }
            }
        };
        out.verdicts.push(verdict);
    }

    out
}
