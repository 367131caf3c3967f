// src/progress.rs
use crate::scan::UrlReport;

/// Optional progress sink for GUI/CLI.
/// Called from the thread running the scan, in result-arrival order.
pub trait Progress {
    fn begin(&mut self, _total: usize) {}
    fn log(&mut self, _msg: &str) {}
    fn item_started(&mut self, _index: usize, _url: &str) {}
    fn item_done(&mut self, _report: &UrlReport) {}
    fn finish(&mut self) {}
}

/// A no-op progress sink you can pass when you don't care.
pub struct NullProgress;
impl Progress for NullProgress {}
