// src/log.rs
//
// File-backed tracing subscriber + short call-site macros.
// Nothing here writes to stdout: stdout belongs to scan results.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive, e.g. `DOOMSCOPE_LOG=debug`.
pub const LOG_ENV: &str = "DOOMSCOPE_LOG";

static INIT: OnceLock<()> = OnceLock::new();

fn default_directive(verbose: bool) -> String {
    let lvl = if verbose { "debug" } else { "info" };
    // html5ever/selectors/hyper are chatty at debug
    format!("warn,doomscope={lvl},cli={lvl}")
}

/// Install the global subscriber once. Later calls are no-ops.
/// If the log file cannot be opened we warn on stderr and run without logging.
pub fn init(verbose: bool, path: &Path) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = fs::create_dir_all(parent);
            }
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
                return;
            }
        };

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .with_timer(fmt::time::uptime())
            .try_init();
    });
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => { ::tracing::info!($($arg)*) };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => { ::tracing::debug!($($arg)*) };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => { ::tracing::warn!($($arg)*) };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => { ::tracing::error!($($arg)*) };
}
