// src/file.rs

use std::{fs, io, path::Path};

use crate::core::sanitize::url_from_line;

/// URL list: one per line; blank lines and `#` comments skipped; order kept.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines().filter_map(url_from_line).map(String::from).collect()
}

pub fn read_url_list(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let urls = parse_url_list(&text);
    logf!("URLs: read {} from {}", urls.len(), path.display());
    Ok(urls)
}
