// src/detector/model.rs
//
// Typed form of one detector resource. serde rejects missing and unknown
// keys, so an absent list is a load error instead of an empty list.

use serde::{Deserialize, Serialize};

use crate::core::sanitize::fold_text;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Detector {
    pub name: String,
    pub html: Signals,
    pub text: Signals,
    pub scoring: Scoring,
    pub logic: Logic,
}

/// Selectors (html) or substrings (text), one list per bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Signals {
    pub required: Vec<String>,
    pub optional: Vec<String>,
    pub forbidden: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bucket {
    Required,
    Optional,
    Forbidden,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Required, Bucket::Optional, Bucket::Forbidden];

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Required => "required",
            Bucket::Optional => "optional",
            Bucket::Forbidden => "forbidden",
        }
    }
}

impl Signals {
    pub fn bucket(&self, b: Bucket) -> &[String] {
        match b {
            Bucket::Required => &self.required,
            Bucket::Optional => &self.optional,
            Bucket::Forbidden => &self.forbidden,
        }
    }

    pub fn len(&self) -> usize {
        self.required.len() + self.optional.len() + self.forbidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> impl Iterator<Item = (Bucket, &String)> {
        Bucket::ALL
            .into_iter()
            .flat_map(move |b| self.bucket(b).iter().map(move |e| (b, e)))
    }
}

/// Per-bucket weights. `forbidden_penalty` is shared by html and text hits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scoring {
    pub html_required: f64,
    pub html_optional: f64,
    pub text_required: f64,
    pub text_optional: f64,
    pub forbidden_penalty: f64,
}

impl Scoring {
    pub fn html_weight(&self, b: Bucket) -> f64 {
        match b {
            Bucket::Required => self.html_required,
            Bucket::Optional => self.html_optional,
            Bucket::Forbidden => self.forbidden_penalty,
        }
    }

    pub fn text_weight(&self, b: Bucket) -> f64 {
        match b {
            Bucket::Required => self.text_required,
            Bucket::Optional => self.text_optional,
            Bucket::Forbidden => self.forbidden_penalty,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("html_required", self.html_required),
            ("html_optional", self.html_optional),
            ("text_required", self.text_required),
            ("text_optional", self.text_optional),
            ("forbidden_penalty", self.forbidden_penalty),
        ]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Logic {
    pub min_total_score: f64,
}

impl Detector {
    /// Check the invariants serde can't express. `origin` names the file
    /// (or position) in error messages.
    pub fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid { origin: s!(origin), reason };

        if self.name.trim().is_empty() {
            return Err(invalid(s!("detector name is empty")));
        }

        for (field, w) in self.scoring.fields() {
            if !w.is_finite() {
                return Err(invalid(format!("scoring.{field} is not a finite number")));
            }
        }
        if !self.logic.min_total_score.is_finite() {
            return Err(invalid(s!("logic.min_total_score is not a finite number")));
        }

        // "" is contained in every text and never parses as a selector
        for (kind, signals) in [("html", &self.html), ("text", &self.text)] {
            if let Some((b, _)) = signals.entries().find(|(_, e)| e.trim().is_empty()) {
                return Err(invalid(format!("{kind}.{} contains an empty entry", b.label())));
            }
        }
        Ok(())
    }

    /// Text is compared against folded page text; fold the patterns once here.
    pub(crate) fn normalized(mut self) -> Self {
        for list in [&mut self.text.required, &mut self.text.optional, &mut self.text.forbidden] {
            for pat in list.iter_mut() {
                *pat = fold_text(pat);
            }
        }
        self
    }

    /// Number of selector + substring checks this detector runs per page.
    pub fn signal_count(&self) -> usize {
        self.html.len() + self.text.len()
    }
}
