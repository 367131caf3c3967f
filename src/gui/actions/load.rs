// src/gui/actions/load.rs
use std::path::PathBuf;

use crate::{file, gui::app::App};

/// Read the URL file named in the path field into the editor.
pub fn load_urls(app: &mut App) {
    let raw = app.state.gui.url_file.trim();
    if raw.is_empty() {
        app.status("Enter a path to a URL file first");
        return;
    }
    let path = PathBuf::from(raw);

    match file::read_url_list(&path) {
        Ok(urls) => {
            app.state.gui.url_text = urls.join("\n");
            app.status(format!("Loaded {} from {}", plural!(urls.len(), "URL"), path.display()));
        }
        Err(e) => {
            loge!("URLs: cannot read {}: {}", path.display(), e);
            app.status(format!("File not found or unreadable: {}", path.display()));
        }
    }
}
