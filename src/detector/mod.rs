// src/detector/mod.rs
mod model;
mod registry;

pub use model::{Bucket, Detector, Logic, Scoring, Signals};
pub use registry::Registry;
