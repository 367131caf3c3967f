// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::consts::*;
use crate::error::ConfigError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scan: ScanOptions,
    pub output: OutputOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Plain GET, no JavaScript.
    Http,
    /// Headless Chrome/Chromium, DOM dumped after load.
    Chrome,
}

impl RendererKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Some(RendererKind::Http),
            "chrome" | "chromium" => Some(RendererKind::Chrome),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RendererKind::Http => "http",
            RendererKind::Chrome => "chrome",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    pub detectors_dir: PathBuf,
    pub renderer: RendererKind,
    /// Explicit browser binary; `None` → search `CHROME_CANDIDATES` on PATH.
    pub chrome_path: Option<PathBuf>,
    pub workers: usize,
    pub timeout_secs: u64,
    pub request_pause_ms: u64,
    pub jitter_ms: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            detectors_dir: PathBuf::from(DETECTORS_DIR),
            renderer: RendererKind::Chrome,
            chrome_path: None,
            workers: WORKERS,
            timeout_secs: PAGE_TIMEOUT_SECS,
            request_pause_ms: REQUEST_PAUSE_MS,
            jitter_ms: JITTER_MS,
        }
    }
}

impl ScanOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Never more workers than URLs, never zero, never above `MAX_WORKERS`.
    pub fn effective_workers(&self, url_count: usize) -> usize {
        self.workers.min(url_count).clamp(1, MAX_WORKERS)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Options(s!("workers must be at least 1")));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Options(s!("timeout_secs must be at least 1")));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub color: bool,
    /// Print every detector's score breakdown, not just the matches.
    pub explain: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            explain: false,
        }
    }
}

/* ---------------- doomscope.toml ---------------- */

// Every key optional; present keys overwrite the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileOptions {
    #[serde(default)]
    scan: FileScan,
    #[serde(default)]
    output: FileOutput,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileScan {
    detectors_dir: Option<PathBuf>,
    renderer: Option<RendererKind>,
    chrome_path: Option<PathBuf>,
    workers: Option<usize>,
    timeout_secs: Option<u64>,
    request_pause_ms: Option<u64>,
    jitter_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileOutput {
    format: Option<OutputFormat>,
    color: Option<bool>,
    explain: Option<bool>,
}

impl AppOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: FileOptions =
            toml::from_str(text).map_err(|e| ConfigError::Options(e.to_string()))?;

        let mut opts = AppOptions::default();
        let scan = &mut opts.scan;
        if let Some(v) = file.scan.detectors_dir { scan.detectors_dir = v; }
        if let Some(v) = file.scan.renderer { scan.renderer = v; }
        if let Some(v) = file.scan.chrome_path { scan.chrome_path = Some(v); }
        if let Some(v) = file.scan.workers { scan.workers = v; }
        if let Some(v) = file.scan.timeout_secs { scan.timeout_secs = v; }
        if let Some(v) = file.scan.request_pause_ms { scan.request_pause_ms = v; }
        if let Some(v) = file.scan.jitter_ms { scan.jitter_ms = v; }

        let out = &mut opts.output;
        if let Some(v) = file.output.format { out.format = v; }
        if let Some(v) = file.output.color { out.color = v; }
        if let Some(v) = file.output.explain { out.explain = v; }

        opts.scan.validate()?;
        Ok(opts)
    }

    /// Explicit path: must exist. No path: `./doomscope.toml` if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(CONFIG_FILE);
                if !p.is_file() {
                    logd!("Config: no {} in working dir, using defaults", CONFIG_FILE);
                    return Ok(AppOptions::default());
                }
                p
            }
        };

        let text = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Io { path: path.clone(), source })?;
        let opts = Self::from_toml_str(&text).map_err(|e| match e {
            ConfigError::Options(msg) => ConfigError::Options(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        logf!("Config: loaded {}", path.display());
        Ok(opts)
    }
}
