// src/gui/components/url_panel.rs
//
// Left panel: URL file loader and the editable URL list.

use eframe::egui;
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("URLs");

    let running = app.is_running();

    ui.horizontal(|ui| {
        ui.label("File:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.url_file)
                .hint_text("urls.txt")
                .desired_width(ui.available_width() - 50.0)
                .font(egui::TextStyle::Monospace),
        );
        let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if ui.add_enabled(!running, egui::Button::new("Load")).clicked() || (enter && !running) {
            actions::load_urls(app);
        }
    });

    ui.label(
        egui::RichText::new(format!("{} · one per line, # for comments", plural!(app.url_count(), "URL")))
            .small()
            .weak(),
    );

    ui.separator();

    // Match the scroll bar aesthetics used in the results table
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
        let visuals = &mut ui.style_mut().visuals;
        visuals.extreme_bg_color = visuals.panel_fill;
    }

    egui::ScrollArea::vertical()
        .id_salt("url_panel_scroll")
        .show(ui, |ui| {
            ui.add_enabled(
                !running,
                egui::TextEdit::multiline(&mut app.state.gui.url_text)
                    .hint_text("https://example.com/login")
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY)
                    .desired_rows(24),
            );
        });
}
