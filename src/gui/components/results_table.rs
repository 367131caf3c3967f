// src/gui/components/results_table.rs
//
// Draws one row per scanned URL. Purely a view over a snapshot of app.reports.

use eframe::egui::{self, Color32, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::{
    csv,
    gui::app::App,
    scan::{UrlOutcome, UrlReport},
};

fn status_color(outcome: &UrlOutcome) -> Color32 {
    match outcome {
        UrlOutcome::Classified(c) if c.matched.is_empty() => Color32::GRAY,
        UrlOutcome::Classified(_) => Color32::from_rgb(60, 170, 90),
        UrlOutcome::Failed { .. } => Color32::from_rgb(220, 60, 60),
        UrlOutcome::Skipped => Color32::DARK_GRAY,
    }
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let reports = app.reports_snapshot();
    let show_notes = app.state.gui.show_notes;

    if reports.is_empty() {
        ui.add_space(8.0);
        ui.label(RichText::new("No results yet").weak());
        return;
    }

    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
    }

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .min_scrolled_height(0.0)
        .column(Column::initial(320.0).at_least(80.0).clip(true))
        .column(Column::initial(80.0).at_least(50.0))
        .column(Column::initial(200.0).at_least(60.0).clip(true));
    if show_notes {
        table = table.column(Column::initial(260.0).at_least(60.0).clip(true));
    }
    table = table.column(Column::remainder().at_least(60.0));

    let headers: Vec<&str> = csv::REPORT_HEADERS
        .iter()
        .copied()
        .filter(|h| show_notes || *h != "Notes")
        .collect();

    table
        .header(24.0, |mut header| {
            for h in &headers {
                header.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                    ui.strong(*h);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, reports.len(), |mut row| {
                let r: &UrlReport = &reports[row.index()];
                let cells = csv::report_row(r);

                // URL
                row.col(|ui| {
                    ui.label(RichText::new(&cells[0]).monospace()).on_hover_text(&cells[0]);
                });
                // Status
                row.col(|ui| {
                    ui.label(RichText::new(&cells[1]).color(status_color(&r.outcome)));
                });
                // Detected
                row.col(|ui| {
                    ui.label(RichText::new(&cells[2]).strong());
                });
                // Notes
                if show_notes {
                    row.col(|ui| {
                        if !cells[3].is_empty() {
                            ui.label(RichText::new(&cells[3]).small()).on_hover_text(&cells[3]);
                        }
                    });
                }
                // Time
                row.col(|ui| {
                    ui.label(&cells[4]);
                });
            });
        });
}
