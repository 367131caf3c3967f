// src/gui/components/action_bar.rs

use eframe::egui::{self, widgets::Spinner};
use crate::{
    config::{consts::MAX_WORKERS, options::RendererKind},
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let running = app.is_running();

    // --- Detectors dir + renderer + workers ---
    ui.horizontal(|ui| {
        ui.label("Detectors:");
        if ui
            .add_enabled(
                !running,
                egui::TextEdit::singleline(&mut app.state.gui.detectors_text)
                    .desired_width(220.0)
                    .font(egui::TextStyle::Monospace),
            )
            .changed()
        {
            logd!("UI: detectors_text → {}", app.state.gui.detectors_text);
        }

        ui.separator();

        let scan = &mut app.state.options.scan;
        let before = scan.renderer;
        ui.label("Renderer:");
        ui.add_enabled_ui(!running, |ui| {
            ui.selectable_value(&mut scan.renderer, RendererKind::Chrome, "Chrome")
                .on_hover_text("Headless Chrome; runs page JavaScript");
            ui.selectable_value(&mut scan.renderer, RendererKind::Http, "HTTP")
                .on_hover_text("Plain HTTP GET; no JavaScript");
        });
        if scan.renderer != before {
            logf!("UI: renderer → {}", scan.renderer.label());
        }

        ui.separator();

        ui.label("Workers:");
        ui.add_enabled(
            !running,
            egui::DragValue::new(&mut scan.workers).range(1..=MAX_WORKERS),
        );
    });

    // Actions: Scan / Cancel / Copy
    ui.horizontal(|ui| {
        let green = egui::Color32::from_rgb(40, 160, 70);
        let black = egui::Color32::BLACK;

        if running {
            if ui.button("Cancel").clicked() {
                actions::cancel(app);
            }
        } else {
            let button_scan = ui.add(
                egui::Button::new(egui::RichText::new("SCAN").color(black).strong()).fill(green),
            );
            if button_scan.clicked() {
                actions::scan(app, ui.ctx());
            }
        }

        let button_copy = ui.add_enabled(!running, egui::Button::new("Copy"));
        if button_copy.on_hover_text("Copy results as TSV").clicked() {
            actions::copy(app, ui.ctx());
        }

        ui.checkbox(&mut app.state.gui.show_notes, "Notes");

        if running {
            ui.add(Spinner::new().size(16.0));
        }

        ui.label(app.status_text());
    });
}
