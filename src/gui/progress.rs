// src/gui/progress.rs
use std::sync::{ Arc, Mutex };

use eframe::egui;

use crate::{ core::sanitize::ellipsize_middle, progress::Progress, scan::UrlReport };

const STATUS_URL_CHARS: usize = 60;

/// Feeds scan results into the App's shared state from the scan thread.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    reports: Arc<Mutex<Vec<UrlReport>>>,
    ctx: egui::Context,
    done: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>, reports: Arc<Mutex<Vec<UrlReport>>>, ctx: egui::Context) -> Self {
        Self { status, reports, ctx, done: 0, total: 0 }
    }

    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
        self.ctx.request_repaint();
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.set_status(format!("Scanning {}…", plural!(total, "URL")));
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn item_started(&mut self, _index: usize, url: &str) {
        self.set_status(format!("Scanning {} ({}/{})", ellipsize_middle(url, STATUS_URL_CHARS), self.done, self.total));
    }
    fn item_done(&mut self, report: &UrlReport) {
        self.done += 1;
        if let Ok(mut r) = self.reports.lock() {
            r.push(report.clone());
            r.sort_by_key(|r| r.index);
        }
        self.set_status(format!("Scanned {} ({}/{})", ellipsize_middle(&report.url, STATUS_URL_CHARS), self.done, self.total));
    }
    fn finish(&mut self) {
        if self.total == 0 {
            self.set_status(s!("Nothing to scan"));
        } else {
            self.set_status(format!("Scan complete ({}/{})", self.done, self.total));
        }
    }
}
