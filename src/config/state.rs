// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// URL list being edited (one per line)
    pub url_text: String,
    /// Path typed into the "Load file" field
    pub url_file: String,
    /// Detectors dir as typed; applied to options.scan on scan
    pub detectors_text: String,

    /// Results table: show per-detector notes column
    pub show_notes: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            url_text: s!(),
            url_file: s!(),
            detectors_text: s!(crate::config::consts::DETECTORS_DIR),
            show_notes: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

impl AppState {
    pub fn new(options: AppOptions) -> Self {
        let gui = GuiState {
            detectors_text: options.scan.detectors_dir.to_string_lossy().into_owned(),
            ..GuiState::default()
        };
        Self { options, gui }
    }
}
