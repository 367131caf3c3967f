// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{cancel,copy,load_urls,scan}.

mod copy;  // src/gui/actions/copy.rs
mod load;  // src/gui/actions/load.rs
mod scan;  // src/gui/actions/scan.rs

pub use copy::copy;
pub use load::load_urls;
pub use scan::{cancel, scan};
