// src/gui/app.rs
use std::{
    error::Error,
    path::Path,
    sync::{ Arc, Mutex, atomic::{ AtomicBool, Ordering } },
};

use eframe::egui;

use crate::{
    config::{ consts::LOG_FILE, options::AppOptions, state::AppState },
    scan::UrlReport,
};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    crate::log::init(false, Path::new(LOG_FILE));

    let app_options = match AppOptions::load(None) {
        Ok(o) => o,
        Err(e) => {
            loge!("Config: {}; using defaults", e);
            AppOptions::default()
        }
    };

    eframe::run_native(
        "DoomScope Page Identifier",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::new(app_options))))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth for inputs (UI thread only)
    pub state: AppState,

    // results + status (scan thread writes here)
    pub reports: Arc<Mutex<Vec<UrlReport>>>,
    pub status: Arc<Mutex<String>>,
    pub running: Arc<AtomicBool>,

    // cancel flag of the scan in flight
    pub cancel: Option<Arc<AtomicBool>>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        logf!(
            "Init: detectors_dir={}, renderer={}",
            state.options.scan.detectors_dir.display(),
            state.options.scan.renderer.label()
        );
        Self {
            state,
            reports: Arc::new(Mutex::new(Vec::new())),
            status: Arc::new(Mutex::new(s!("Idle"))),
            running: Arc::new(AtomicBool::new(false)),
            cancel: None,
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    #[inline]
    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Snapshot for drawing; the scan thread may append meanwhile.
    pub fn reports_snapshot(&self) -> Vec<UrlReport> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn url_count(&self) -> usize {
        crate::file::parse_url_list(&self.state.gui.url_text).len()
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("urls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                crate::gui::components::url_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            crate::gui::components::action_bar::draw(ui, self);

            ui.separator();

            crate::gui::components::results_table::draw(ui, self);
        });
    }
}
