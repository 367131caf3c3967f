// src/scan.rs
//
// Batch runner: URL list → render → parse → classify, on a small worker pool.
// One URL's failure (fetch error, even a panic) never touches the others.

use std::{
    panic::{self, AssertUnwindSafe},
    sync::{ mpsc, Arc, atomic::{ AtomicBool, AtomicUsize, Ordering }},
    thread,
    time::{ Duration, Instant },
};

use serde::Serialize;

use crate::{
    config::options::ScanOptions,
    core::{ HtmlPage, Renderer },
    detector::Registry,
    engine::{ self, Classification },
    error::FetchError,
    progress::Progress,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UrlOutcome {
    Classified(Classification),
    Failed { error: String },
    /// Scan cancelled before this URL was picked up.
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UrlReport {
    /// Position in the input list.
    pub index: usize,
    pub url: String,
    #[serde(flatten)]
    pub outcome: UrlOutcome,
    pub elapsed_ms: u64,
}

impl UrlReport {
    fn skipped(index: usize, url: &str) -> Self {
        Self { index, url: s!(url), outcome: UrlOutcome::Skipped, elapsed_ms: 0 }
    }

    /// Matched detector names; empty for failed/skipped URLs.
    pub fn matched(&self) -> &[String] {
        match &self.outcome {
            UrlOutcome::Classified(c) => &c.matched,
            _ => &[],
        }
    }

    pub fn classification(&self) -> Option<&Classification> {
        match &self.outcome {
            UrlOutcome::Classified(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, UrlOutcome::Failed { .. })
    }
}

/// Parse + classify already-rendered HTML.
pub fn classify_html(html: &str, registry: &Registry) -> Classification {
    let page = HtmlPage::parse(html);
    engine::classify(&page, registry)
}

/// Render one URL and classify it.
pub fn identify(url: &str, registry: &Registry, renderer: &dyn Renderer) -> Result<Classification, FetchError> {
    let html = renderer.render(url)?;
    logd!("Scan: {} rendered ({} bytes)", url, html.len());
    Ok(classify_html(&html, registry))
}

/// `identify` with failure isolation and timing, as a report.
pub fn scan_one(index: usize, url: &str, registry: &Registry, renderer: &dyn Renderer) -> UrlReport {
    let started = Instant::now();

    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| identify(url, registry, renderer))) {
        Ok(Ok(c)) => {
            logf!("Scan: {} → [{}] ({} detector errors)", url, c.matched.join(", "), c.errors.len());
            UrlOutcome::Classified(c)
        }
        Ok(Err(e)) => {
            loge!("Scan: {} failed: {}", url, e);
            UrlOutcome::Failed { error: e.to_string() }
        }
        Err(_) => {
            loge!("Scan: {} panicked", url);
            UrlOutcome::Failed { error: s!("internal error while processing this page") }
        }
    };

    UrlReport {
        index,
        url: s!(url),
        outcome,
        elapsed_ms: started.elapsed().as_millis() as u64,
    }
}

enum Msg {
    Started(usize),
    Done(UrlReport),
}

pub struct Scan {
    registry: Arc<Registry>,
    renderer: Arc<dyn Renderer>,
    opts: ScanOptions,
    cancel: Arc<AtomicBool>,
}

impl Scan {
    pub fn new(registry: Arc<Registry>, renderer: Arc<dyn Renderer>, opts: ScanOptions) -> Self {
        Self { registry, renderer, opts, cancel: Arc::new(AtomicBool::new(false)) }
    }

    /// Set to true to stop handing out URLs. In-flight pages finish; the rest come back `Skipped`.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Scan every URL. Progress sees results as they arrive;
    /// the returned reports are in input order.
    pub fn run(&self, urls: &[String], mut progress: Option<&mut dyn Progress>) -> Vec<UrlReport> {
        if let Some(p) = progress.as_deref_mut() {
            p.begin(urls.len());
        }
        if urls.is_empty() {
            if let Some(p) = progress.as_deref_mut() {
                p.finish();
            }
            return Vec::new();
        }

        // Concurrency
        let urls_arc = Arc::new(urls.to_vec());
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel::<Msg>();

        let workers = self.opts.effective_workers(urls.len());
        logf!("Scan: begin urls={} workers={} detectors={}", urls.len(), workers, self.registry.len());

        // Spawn workers
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let urls = Arc::clone(&urls_arc);
            let idx = Arc::clone(&counter);
            let tx = tx.clone();
            let registry = Arc::clone(&self.registry);
            let renderer = Arc::clone(&self.renderer);
            let cancel = Arc::clone(&self.cancel);
            let (pause_ms, jitter_ms) = (self.opts.request_pause_ms, self.opts.jitter_ms);

            handles.push(thread::spawn(move || {
                loop {
                    if cancel.load(Ordering::Relaxed) {
                        break;
                    }
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= urls.len() {
                        break;
                    }
                    let _ = tx.send(Msg::Started(i));
                    let report = scan_one(i, &urls[i], &registry, renderer.as_ref());
                    if tx.send(Msg::Done(report)).is_err() {
                        break;
                    }
                    if idx.load(Ordering::Relaxed) >= urls.len() {
                        break; // nothing left to fetch
                    }
                    let jitter = if jitter_ms > 0 { (i as u64).wrapping_mul(7919) % jitter_ms } else { 0 };
                    thread::sleep(Duration::from_millis(pause_ms + jitter)); // be polite
                }
            }));
        }
        drop(tx); // main thread is sole receiver now

        // Aggregate results
        let mut slots: Vec<Option<UrlReport>> = vec![None; urls.len()];
        for msg in rx {
            match msg {
                Msg::Started(i) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_started(i, &urls[i]);
                    }
                }
                Msg::Done(report) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&report);
                    }
                    let i = report.index;
                    slots[i] = Some(report);
                }
            }
        }
        for h in handles {
            let _ = h.join();
        }

        let reports: Vec<UrlReport> = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| slot.unwrap_or_else(|| UrlReport::skipped(i, &urls[i])))
            .collect();

        let failed = reports.iter().filter(|r| r.is_failed()).count();
        logf!("Scan: done urls={} failed={}", reports.len(), failed);

        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        reports
    }
}
