// src/gui/actions/copy.rs
use eframe::egui;
use crate::{gui::app::App, csv};

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let reports = app.reports_snapshot();

    if reports.is_empty() {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but there's nothing to copy");
        return;
    }

    // TSV pastes cleanly into spreadsheets
    let txt = csv::reports_to_string(&reports, true, '\t');
    logf!("Copy: rows={}", reports.len());

    ui_ctx.copy_text(txt);
    app.status("Copied to clipboard");
}
