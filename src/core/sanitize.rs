// src/core/sanitize.rs

/// Collapse every whitespace run (incl. NBSP) to one ASCII space; trim ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Page text and text patterns are compared in this form.
pub fn fold_text(s: &str) -> String {
    normalize_ws(s).to_lowercase()
}

/// One line of a URL list → the URL, or None for blanks and `#` comments.
/// A BOM on the first line is dropped.
pub fn url_from_line(line: &str) -> Option<&str> {
    let t = line.trim_start_matches('\u{feff}').trim();
    if t.is_empty() || t.starts_with('#') { None } else { Some(t) }
}

/// Shorten long URLs for one-line display: keep head and tail, "…" between.
pub fn ellipsize_middle(s: &str, max_chars: usize) -> String {
    let n = s.chars().count();
    if n <= max_chars || max_chars < 3 {
        return s.to_string();
    }
    let keep = max_chars - 1;
    let head = keep / 2 + keep % 2;
    let tail = keep / 2;
    let mut out: String = s.chars().take(head).collect();
    out.push('…');
    out.extend(s.chars().skip(n - tail));
    out
}
