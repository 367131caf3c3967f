// src/core/net.rs
//
// Renderers: turn a URL into final HTML text.
//   HttpRenderer   → plain GET (fast, no JavaScript)
//   ChromeRenderer → headless Chrome/Chromium `--dump-dom`
//   FileRenderer   → local files (file:// or plain path)
// AutoRenderer routes local targets to FileRenderer, the rest to the web renderer.

use std::{
    env, fs,
    io::Read,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    sync::{Arc, OnceLock},
    thread,
    time::{Duration, Instant},
};

use crate::config::{
    consts::{CHROME_CANDIDATES, CHROME_FLAGS, CHROME_JS_BUDGET_MS, USER_AGENT},
    options::{RendererKind, ScanOptions},
};
use crate::error::FetchError;

pub trait Renderer: Send + Sync {
    fn render(&self, url: &str) -> Result<String, FetchError>;
    fn name(&self) -> &'static str;
}

/* ---------------- HTTP ---------------- */

pub struct HttpRenderer {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpRenderer {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, timeout })
    }
}

impl Renderer for HttpRenderer {
    fn render(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().map_err(|e| self.classify(url, e))?;
        // Error pages (404, 403, 500, …) are still pages to classify
        let status = resp.status();
        if !status.is_success() {
            logd!("Render: {} answered HTTP {}", url, status.as_u16());
        }
        resp.text().map_err(|e| self.classify(url, e))
    }

    fn name(&self) -> &'static str { "http" }
}

impl HttpRenderer {
    fn classify(&self, url: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout { url: s!(url), secs: self.timeout.as_secs() }
        } else {
            FetchError::Http(e)
        }
    }
}

/* ---------------- Headless Chrome ---------------- */

pub struct ChromeRenderer {
    explicit: Option<PathBuf>,
    resolved: OnceLock<Option<PathBuf>>,
    timeout: Duration,
}

impl ChromeRenderer {
    /// `binary: None` → first of `CHROME_CANDIDATES` found on PATH, looked up on first use.
    pub fn new(binary: Option<PathBuf>, timeout: Duration) -> Self {
        Self { explicit: binary, resolved: OnceLock::new(), timeout }
    }

    fn binary(&self) -> Result<&Path, FetchError> {
        if let Some(p) = &self.explicit {
            return Ok(p.as_path());
        }
        self.resolved
            .get_or_init(|| CHROME_CANDIDATES.iter().find_map(|c| find_on_path(c)))
            .as_deref()
            .ok_or_else(|| FetchError::Browser(s!(
                "no Chrome/Chromium binary found on PATH (set --chrome or scan.chrome_path)"
            )))
    }

    fn command(&self, binary: &Path, url: &str) -> Command {
        let mut cmd = Command::new(binary);
        cmd.args(CHROME_FLAGS)
            .arg(format!("--user-agent={}", USER_AGENT))
            .arg(format!("--virtual-time-budget={}", CHROME_JS_BUDGET_MS))
            .arg("--dump-dom")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null()); // Chrome noise stays out of our output
        cmd
    }
}

impl Renderer for ChromeRenderer {
    fn render(&self, url: &str) -> Result<String, FetchError> {
        let binary = self.binary()?;
        let mut child = self
            .command(binary, url)
            .spawn()
            .map_err(|e| FetchError::Browser(format!("cannot start {}: {}", binary.display(), e)))?;

        // Drain stdout on a side thread so a large DOM can't fill the pipe and stall the child
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| FetchError::Browser(s!("no stdout pipe")))?;
        let reader = thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stdout.read_to_end(&mut buf);
            buf
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    // Chrome helpers can keep the pipe open; leave the reader detached
                    drop(reader);
                    return Err(FetchError::Timeout { url: s!(url), secs: self.timeout.as_secs() });
                }
                Ok(None) => thread::sleep(Duration::from_millis(25)),
                Err(e) => return Err(FetchError::Browser(format!("wait failed: {}", e))),
            }
        };

        let buf = reader
            .join()
            .map_err(|_| FetchError::Browser(s!("stdout reader panicked")))?;
        if !status.success() {
            return Err(FetchError::Browser(format!("{} exited with {}", binary.display(), status)));
        }
        if buf.is_empty() {
            return Err(FetchError::Browser(format!("empty DOM for {}", url)));
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn name(&self) -> &'static str { "chrome" }
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| {
        let p = dir.join(name);
        if p.is_file() { return Some(p); }
        let exe = dir.join(format!("{}.exe", name));
        if exe.is_file() { Some(exe) } else { None }
    })
}

/* ---------------- Local files ---------------- */

pub struct FileRenderer;

impl FileRenderer {
    /// `file:///x/y.html` or an existing plain path → that path.
    pub fn local_path(target: &str) -> Option<PathBuf> {
        if let Some(rest) = target.strip_prefix("file://") {
            return Some(PathBuf::from(rest));
        }
        if target.contains("://") {
            return None;
        }
        let p = Path::new(target);
        if p.is_file() { Some(p.to_path_buf()) } else { None }
    }
}

impl Renderer for FileRenderer {
    fn render(&self, url: &str) -> Result<String, FetchError> {
        let path = Self::local_path(url).unwrap_or_else(|| PathBuf::from(url));
        let bytes = fs::read(&path).map_err(|source| FetchError::Io { path, source })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn name(&self) -> &'static str { "file" }
}

/* ---------------- Routing ---------------- */

pub struct AutoRenderer {
    web: Box<dyn Renderer>,
    file: FileRenderer,
}

impl AutoRenderer {
    pub fn new(web: Box<dyn Renderer>) -> Self {
        Self { web, file: FileRenderer }
    }
}

/// Bare hosts ("example.com/login") get https:// so both web renderers accept them.
pub fn with_scheme(url: &str) -> String {
    if url.contains("://") || url.starts_with("about:") || url.starts_with("data:") {
        s!(url)
    } else {
        format!("https://{}", url)
    }
}

impl Renderer for AutoRenderer {
    fn render(&self, url: &str) -> Result<String, FetchError> {
        if FileRenderer::local_path(url).is_some() {
            logd!("Render: {} via file", url);
            return self.file.render(url);
        }
        let target = with_scheme(url);
        logd!("Render: {} via {}", target, self.web.name());
        self.web.render(&target)
    }

    fn name(&self) -> &'static str { self.web.name() }
}

/// Renderer for a scan, as configured.
pub fn build_renderer(opts: &ScanOptions) -> Result<Arc<dyn Renderer>, FetchError> {
    let web: Box<dyn Renderer> = match opts.renderer {
        RendererKind::Http => Box::new(HttpRenderer::new(opts.timeout())?),
        RendererKind::Chrome => Box::new(ChromeRenderer::new(opts.chrome_path.clone(), opts.timeout())),
    };
    logf!("Render: using {} renderer (timeout {}s)", web.name(), opts.timeout_secs);
    Ok(Arc::new(AutoRenderer::new(web)))
}
