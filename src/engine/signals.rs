// src/engine/signals.rs
//
// Score contribution of one signal category. Every entry of every bucket
// is checked; an entry that hits adds its bucket weight exactly once.

use crate::core::{PageDocument, sanitize::fold_text};
use crate::detector::{Bucket, Scoring, Signals};
use crate::error::EvaluationError;

/// Selectors: an entry hits if it matches at least one element.
pub fn html_score<D>(page: &D, signals: &Signals, scoring: &Scoring) -> Result<f64, EvaluationError>
where
    D: PageDocument + ?Sized,
{
    let mut score = 0.0;
    for bucket in Bucket::ALL {
        let weight = scoring.html_weight(bucket);
        for selector in signals.bucket(bucket) {
            if page.selector_matches(selector)? {
                score += weight;
            }
        }
    }
    Ok(score)
}

/// Substrings: containment in the folded page text. Patterns are folded
/// the same way here, so detectors built in code match like loaded ones.
pub fn text_score(text: &str, signals: &Signals, scoring: &Scoring) -> f64 {
    let mut score = 0.0;
    for bucket in Bucket::ALL {
        let weight = scoring.text_weight(bucket);
        for pat in signals.bucket(bucket) {
            let pat = fold_text(pat);
            if !pat.is_empty() && text.contains(pat.as_str()) {
                score += weight;
            }
        }
    }
    score
}
