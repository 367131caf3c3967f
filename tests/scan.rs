// tests/scan.rs
use std::sync::{Arc, atomic::Ordering};
use std::thread;
use std::time::Duration;

use doomscope::config::options::ScanOptions;
use doomscope::core::Renderer;
use doomscope::detector::{Detector, Logic, Registry, Scoring, Signals};
use doomscope::error::FetchError;
use doomscope::progress::Progress;
use doomscope::scan::{self, Scan, UrlOutcome, UrlReport};

/// Serves canned pages by URL prefix:
///   "login…" → login form, "plain…" → empty page, "slow…" → login form after a delay,
///   "fail…" → fetch error, "panic…" → panics.
struct FakeRenderer;

const LOGIN: &str = r#"<html><body><form class="login"><input type="password"></form></body></html>"#;

impl Renderer for FakeRenderer {
    fn render(&self, url: &str) -> Result<String, FetchError> {
        if url.starts_with("login") {
            Ok(LOGIN.into())
        } else if url.starts_with("plain") {
            Ok("<html><body><p>hello</p></body></html>".into())
        } else if url.starts_with("slow") {
            thread::sleep(Duration::from_millis(60));
            Ok(LOGIN.into())
        } else if url.starts_with("panic") {
            panic!("renderer blew up");
        } else {
            Err(FetchError::Browser(format!("cannot open {url}")))
        }
    }
    fn name(&self) -> &'static str {
        "fake"
    }
}

fn registry() -> Arc<Registry> {
    let d = Detector {
        name: "login_form".into(),
        html: Signals { required: vec!["form.login".into()], ..Signals::default() },
        text: Signals::default(),
        scoring: Scoring { html_required: 5.0, ..Scoring::default() },
        logic: Logic { min_total_score: 5.0 },
    };
    Arc::new(Registry::from_detectors(vec![d]).unwrap())
}

fn opts(workers: usize) -> ScanOptions {
    ScanOptions { workers, request_pause_ms: 0, jitter_ms: 0, ..ScanOptions::default() }
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[derive(Default)]
struct Recorder {
    total: Option<usize>,
    started: usize,
    done: Vec<usize>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) {
        self.total = Some(total);
    }
    fn item_started(&mut self, _index: usize, _url: &str) {
        self.started += 1;
    }
    fn item_done(&mut self, report: &UrlReport) {
        self.done.push(report.index);
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn failing_url_does_not_affect_the_others() {
    let scan = Scan::new(registry(), Arc::new(FakeRenderer), opts(2));
    let list = urls(&["login-1", "fail-2", "plain-3", "panic-4", "login-5"]);

    let reports = scan.run(&list, None);

    assert_eq!(reports.len(), 5);
    assert_eq!(reports[0].matched(), ["login_form".to_string()]);
    assert!(matches!(&reports[1].outcome, UrlOutcome::Failed { error } if error.contains("fail-2")));
    assert!(reports[2].matched().is_empty());
    assert!(!reports[2].is_failed());
    assert!(reports[3].is_failed());
    assert_eq!(reports[4].matched(), ["login_form".to_string()]);
}

#[test]
fn reports_come_back_in_input_order() {
    let scan = Scan::new(registry(), Arc::new(FakeRenderer), opts(4));
    let list = urls(&["slow-0", "plain-1", "slow-2", "login-3", "plain-4", "fail-5"]);

    let mut rec = Recorder::default();
    let reports = scan.run(&list, Some(&mut rec));

    let got: Vec<&str> = reports.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(got, list.iter().map(String::as_str).collect::<Vec<_>>());
    for (i, r) in reports.iter().enumerate() {
        assert_eq!(r.index, i);
    }

    assert_eq!(rec.total, Some(6));
    assert_eq!(rec.started, 6);
    let mut done = rec.done.clone();
    done.sort_unstable();
    assert_eq!(done, vec![0, 1, 2, 3, 4, 5]);
    assert!(rec.finished);
}

#[test]
fn cancelled_scan_reports_skipped() {
    let scan = Scan::new(registry(), Arc::new(FakeRenderer), opts(2));
    scan.cancel_flag().store(true, Ordering::Relaxed);

    let reports = scan.run(&urls(&["login-a", "login-b", "login-c"]), None);

    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r.outcome == UrlOutcome::Skipped));
    assert_eq!(reports[2].url, "login-c");
}

#[test]
fn last_url_does_not_wait_out_the_pause() {
    let slow_pause = ScanOptions { workers: 1, request_pause_ms: 2_000, jitter_ms: 0, ..ScanOptions::default() };
    let scan = Scan::new(registry(), Arc::new(FakeRenderer), slow_pause);

    let started = std::time::Instant::now();
    let reports = scan.run(&urls(&["login-only"]), None);

    assert_eq!(reports.len(), 1);
    assert!(started.elapsed() < Duration::from_millis(1_500), "took {:?}", started.elapsed());
}

#[test]
fn empty_list_still_begins_and_finishes() {
    let scan = Scan::new(registry(), Arc::new(FakeRenderer), opts(4));
    let mut rec = Recorder::default();

    let reports = scan.run(&[], Some(&mut rec));

    assert!(reports.is_empty());
    assert_eq!(rec.total, Some(0));
    assert!(rec.finished);
}

#[test]
fn scan_one_isolates_a_panicking_renderer() {
    let reg = registry();
    let r = scan::scan_one(7, "panic-now", &reg, &FakeRenderer);
    assert_eq!(r.index, 7);
    assert!(r.is_failed());
}

#[test]
fn classify_html_needs_no_renderer() {
    let c = scan::classify_html(LOGIN, &registry());
    assert!(c.is_match("login_form"));
}

#[test]
fn report_serializes_with_status_tag() {
    let reg = registry();
    let r = scan::scan_one(0, "login-x", &reg, &FakeRenderer);
    let v = serde_json::to_value(&r).unwrap();

    assert_eq!(v["status"], "classified");
    assert_eq!(v["url"], "login-x");
    assert_eq!(v["matched"][0], "login_form");
    assert!(v.get("verdicts").is_none());

    let f = scan::scan_one(1, "fail-x", &reg, &FakeRenderer);
    let v = serde_json::to_value(&f).unwrap();
    assert_eq!(v["status"], "failed");
    assert!(v["error"].as_str().unwrap().contains("fail-x"));
}
