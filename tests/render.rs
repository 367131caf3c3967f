// tests/render.rs
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use std::time::Duration;

use doomscope::core::Renderer;
use doomscope::core::net::HttpRenderer;
use doomscope::detector::Registry;
use doomscope::scan::{self, UrlOutcome};

const NOT_FOUND: &str = "<html><body><h1 class=\"error\">404 Not Found</h1>\
                         <p>The page you asked for does not exist.</p></body></html>";

/// Answer one request with `status_line` and `body`, then close. Returns the base URL.
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
        let resp = format!(
            "{status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(resp.as_bytes());
        let _ = stream.flush();
    });

    format!("http://{}", addr)
}

fn bundled() -> Registry {
    Registry::load_dir(&Path::new(env!("CARGO_MANIFEST_DIR")).join("detectors")).unwrap()
}

#[test]
fn http_error_page_body_is_returned() {
    let base = serve_once("HTTP/1.1 404 Not Found", NOT_FOUND);
    let renderer = HttpRenderer::new(Duration::from_secs(10)).unwrap();

    let html = renderer.render(&format!("{base}/missing")).unwrap();
    assert!(html.contains("404 Not Found"));
}

#[test]
fn http_error_page_gets_classified() {
    let base = serve_once("HTTP/1.1 404 Not Found", NOT_FOUND);
    let renderer = HttpRenderer::new(Duration::from_secs(10)).unwrap();
    let registry = bundled();

    let report = scan::scan_one(0, &format!("{base}/missing"), &registry, &renderer);

    match &report.outcome {
        UrlOutcome::Classified(c) => assert!(c.is_match("error_page"), "matched: {:?}", c.matched),
        other => panic!("expected a classified page, got {other:?}"),
    }
}

#[test]
fn unreachable_host_is_a_fetch_failure() {
    // bind then drop: nothing listens on this port afterwards
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let renderer = HttpRenderer::new(Duration::from_secs(5)).unwrap();

    let report = scan::scan_one(0, &format!("http://127.0.0.1:{port}/"), &bundled(), &renderer);
    assert!(report.is_failed());
}
