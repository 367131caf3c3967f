// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod csv;
pub mod detector;
pub mod engine;
pub mod error;
pub mod file;
pub mod gui;
pub mod progress;
pub mod scan;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod report;

pub use detector::{Detector, Registry};
pub use engine::{classify, Classification};
pub use error::{ConfigError, EvaluationError, FetchError};
