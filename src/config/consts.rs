// src/config/consts.rs

// Detectors
pub const DETECTORS_DIR: &str = "detectors";
pub const DETECTOR_EXT: &str = "json";

// Local files
pub const LOG_FILE: &str = ".doomscope/debug.log";
pub const CONFIG_FILE: &str = "doomscope.toml";

// Rendering
pub const USER_AGENT: &str = concat!("doomscope/", env!("CARGO_PKG_VERSION"));
pub const PAGE_TIMEOUT_SECS: u64 = 30;
pub const CHROME_JS_BUDGET_MS: u64 = 5_000; // virtual time for scripts before the DOM dump
pub const CHROME_FLAGS: &[&str] = &[
    "--headless=new",
    "--disable-gpu",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--log-level=3",
    "--silent",
    "--disable-logging",
    "--disable-software-rasterizer",
    "--hide-scrollbars",
    "--mute-audio",
];
pub const CHROME_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

// Concurrency
pub const WORKERS: usize = 4;
pub const MAX_WORKERS: usize = 32;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms

// Output
pub const BANNER: &str = "==== DoomScope Page Identifier ====";
