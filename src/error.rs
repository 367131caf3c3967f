// src/error.rs
//
// One enum per failure scope:
//   ConfigError     → whole run (broken rule set or options)
//   EvaluationError → one detector on one page
//   FetchError      → one URL

use std::{io, path::PathBuf};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin}: {reason}")]
    Invalid { origin: String, reason: String },

    #[error("duplicate detector name '{name}' ({first} and {second})")]
    DuplicateName { name: String, first: String, second: String },

    #[error("no detector files (*.json) found in {0}")]
    NoDetectors(PathBuf),

    #[error("options: {0}")]
    Options(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluationError {
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("timed out after {secs}s: {url}")]
    Timeout { url: String, secs: u64 },

    #[error("browser: {0}")]
    Browser(String),
}
