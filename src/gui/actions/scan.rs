// src/gui/actions/scan.rs
use std::{
    path::PathBuf,
    sync::{ Arc, atomic::Ordering },
    thread,
};

use eframe::egui;

use crate::{
    core::net,
    detector::Registry,
    file,
    gui::{ app::App, progress::GuiProgress },
    scan::Scan,
};

/// Load detectors, build the renderer and run the scan on a background thread.
/// Reports stream into `app.reports`; the final ordered list replaces them at the end.
pub fn scan(app: &mut App, ctx: &egui::Context) {
    if app.is_running() {
        return;
    }

    let urls = file::parse_url_list(&app.state.gui.url_text);
    if urls.is_empty() {
        app.status("No URLs to scan");
        return;
    }

    // Align scan options with the typed detectors dir
    let dir = app.state.gui.detectors_text.trim();
    if !dir.is_empty() {
        app.state.options.scan.detectors_dir = PathBuf::from(dir);
    }
    let opts = app.state.options.scan.clone();
    if let Err(e) = opts.validate() {
        app.status(format!("Error: {e}"));
        return;
    }

    let registry = match Registry::load_dir(&opts.detectors_dir) {
        Ok(r) => r,
        Err(e) => {
            loge!("Scan: detectors: {}", e);
            app.status(format!("Detectors: {e}"));
            return;
        }
    };
    let renderer = match net::build_renderer(&opts) {
        Ok(r) => r,
        Err(e) => {
            loge!("Scan: renderer: {}", e);
            app.status(format!("Renderer: {e}"));
            return;
        }
    };

    logf!(
        "Scan: Begin urls={} detectors={} renderer={}",
        urls.len(),
        registry.len(),
        opts.renderer.label()
    );

    let scan = Scan::new(Arc::new(registry), renderer, opts);
    app.cancel = Some(scan.cancel_flag());
    if let Ok(mut r) = app.reports.lock() {
        r.clear();
    }
    app.running.store(true, Ordering::Relaxed);

    let status = Arc::clone(&app.status);
    let reports = Arc::clone(&app.reports);
    let running = Arc::clone(&app.running);
    let ctx = ctx.clone();

    thread::spawn(move || {
        let mut prog = GuiProgress::new(status, Arc::clone(&reports), ctx.clone());

        // → This is where the scan happens ←
        let done = scan.run(&urls, Some(&mut prog));

        if let Ok(mut r) = reports.lock() {
            *r = done;
        }
        running.store(false, Ordering::Relaxed);
        ctx.request_repaint();
    });
}

pub fn cancel(app: &mut App) {
    if let Some(flag) = &app.cancel {
        flag.store(true, Ordering::Relaxed);
        logf!("Scan: Cancel requested");
        app.status("Cancelling… (pages in flight will finish)");
    }
}
