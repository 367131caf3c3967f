// tests/classify.rs
use doomscope::core::{HtmlPage, PageDocument};
use doomscope::detector::{Detector, Logic, Registry, Scoring, Signals};
use doomscope::engine::{self, classify};
use doomscope::error::EvaluationError;

fn detector(name: &str) -> Detector {
    Detector {
        name: name.into(),
        html: Signals::default(),
        text: Signals::default(),
        scoring: Scoring::default(),
        logic: Logic::default(),
    }
}

fn login_form() -> Detector {
    let mut d = detector("login_form");
    d.html.required = vec!["form.login".into()];
    d.scoring.html_required = 5.0;
    d.logic.min_total_score = 5.0;
    d
}

/// Page stand-in: a fixed set of selectors "match", `"!bad"` fails to parse.
struct FakePage {
    present: Vec<&'static str>,
    text: String,
}

impl FakePage {
    fn new(present: &[&'static str], text: &str) -> Self {
        Self { present: present.to_vec(), text: text.to_lowercase() }
    }
}

impl PageDocument for FakePage {
    fn selector_matches(&self, selector: &str) -> Result<bool, EvaluationError> {
        if selector == "!bad" {
            return Err(EvaluationError::InvalidSelector { selector: selector.into(), reason: "fake".into() });
        }
        Ok(self.present.iter().any(|p| *p == selector))
    }
    fn text(&self) -> &str {
        &self.text
    }
}

#[test]
fn login_form_matches_with_exact_score() {
    let reg = Registry::from_detectors(vec![login_form()]).unwrap();
    let page = HtmlPage::parse(r#"<html><body><form class="login"><input name="u"></form></body></html>"#);

    let c = classify(&page, &reg);
    assert_eq!(c.matched, vec!["login_form".to_string()]);
    assert_eq!(c.score_of("login_form").unwrap().total, 5.0);
    assert!(c.errors.is_empty());
}

#[test]
fn missing_form_scores_zero_and_does_not_match() {
    let reg = Registry::from_detectors(vec![login_form()]).unwrap();
    let page = HtmlPage::parse("<html><body><p>Welcome</p><form class=\"search\"></form></body></html>");

    let c = classify(&page, &reg);
    assert!(c.matched.is_empty());
    assert_eq!(c.score_of("login_form").unwrap().total, 0.0);
}

#[test]
fn forbidden_text_pulls_score_below_threshold() {
    let mut d = detector("article");
    d.html.required = vec!["h1".into()];
    d.text.forbidden = vec!["404".into()];
    d.scoring.html_required = 8.0;
    d.scoring.forbidden_penalty = -10.0;
    d.logic.min_total_score = 5.0;
    let reg = Registry::from_detectors(vec![d]).unwrap();

    let page = HtmlPage::parse("<html><body><h1>404 Not Found</h1></body></html>");
    let c = classify(&page, &reg);

    let s = c.score_of("article").unwrap();
    assert_eq!(s.html, 8.0);
    assert_eq!(s.text, -10.0);
    assert_eq!(s.total, -2.0);
    assert!(!c.is_match("article"));
}

#[test]
fn html_and_text_forbidden_hits_each_add_the_penalty() {
    let mut d = detector("clean_article");
    d.html.required = vec!["article".into()];
    d.html.forbidden = vec!["div.ad".into()];
    d.text.forbidden = vec!["sponsored".into()];
    d.scoring.html_required = 10.0;
    d.scoring.forbidden_penalty = -3.0;
    d.logic.min_total_score = 5.0;
    let reg = Registry::from_detectors(vec![d]).unwrap();

    let page = HtmlPage::parse(
        r#"<html><body><article>News</article><div class="ad">Sponsored content</div>
           <div class="ad">more</div></body></html>"#,
    );
    let s = classify(&page, &reg).score_of("clean_article").unwrap();

    // two div.ad elements still count once
    assert_eq!(s.html, 10.0 - 3.0);
    assert_eq!(s.text, -3.0);
    assert_eq!(s.total, 4.0);
    assert!(!classify(&page, &reg).is_match("clean_article"));
}

#[test]
fn detector_built_in_code_matches_text_case_insensitively() {
    let mut d = detector("paywall");
    d.text.required = vec!["Subscribe".into()];
    d.scoring.text_required = 1.0;
    d.logic.min_total_score = 1.0;

    let page = HtmlPage::parse("<p>Subscribe to read</p>");
    let s = engine::score(&d, &page).unwrap();
    assert_eq!(s.total, 1.0);
    assert_eq!(engine::evaluate(&d, &page).unwrap(), Some("paywall"));
}

#[test]
fn text_patterns_ignore_extra_whitespace() {
    let mut d = detector("reading");
    d.text.optional = vec!["Keep\u{a0} READING".into(), "  sign   in ".into()];
    d.scoring.text_optional = 2.0;

    let page = HtmlPage::parse("<p>Keep reading</p><button>Sign\nin</button>");
    assert_eq!(engine::score(&d, &page).unwrap().text, 4.0);
}

#[test]
fn two_matches_come_back_in_registry_order() {
    let mut z = detector("zeta");
    z.text.required = vec!["password".into()];
    z.scoring.text_required = 1.0;
    z.logic.min_total_score = 1.0;

    let mut a = detector("alpha");
    a.html.optional = vec!["input[type=password]".into()];
    a.scoring.html_optional = 2.0;
    a.logic.min_total_score = 2.0;

    let reg = Registry::from_detectors(vec![z, a]).unwrap();
    let page = HtmlPage::parse(r#"<form><label>Password</label><input type="password"></form>"#);

    let c = classify(&page, &reg);
    assert_eq!(c.matched, vec!["zeta".to_string(), "alpha".to_string()]);
}

#[test]
fn broken_selector_only_takes_out_its_own_detector() {
    let mut broken = detector("broken");
    broken.html.optional = vec!["div[[".into()];
    broken.scoring.html_optional = 1.0;

    let reg = Registry::from_detectors(vec![broken, login_form()]).unwrap();
    let page = HtmlPage::parse(r#"<form class="login"></form>"#);

    let c = classify(&page, &reg);
    assert_eq!(c.matched, vec!["login_form".to_string()]);
    assert_eq!(c.errors.len(), 1);
    assert_eq!(c.errors[0].detector, "broken");
    assert!(matches!(c.errors[0].error, EvaluationError::InvalidSelector { .. }));
    assert!(c.score_of("broken").is_none());
    assert_eq!(c.verdicts.len(), 2);
}

#[test]
fn threshold_is_inclusive() {
    let page = FakePage::new(&["form"], "");
    let mut d = detector("t");
    d.html.required = vec!["form".into()];
    d.scoring.html_required = 5.0;

    d.logic.min_total_score = 5.0;
    assert_eq!(engine::evaluate(&d, &page).unwrap(), Some("t"));

    d.logic.min_total_score = 5.0 + 1e-9;
    assert_eq!(engine::evaluate(&d, &page).unwrap(), None);
}

#[test]
fn empty_detector_scores_zero_everywhere() {
    let d = detector("empty");
    for page in [
        FakePage::new(&[], ""),
        FakePage::new(&["form", "h1", "input"], "sign in with your password"),
    ] {
        let s = engine::score(&d, &page).unwrap();
        assert_eq!(s.total, 0.0);
    }

    // 0 >= 0: a zero threshold still matches
    let page = FakePage::new(&[], "");
    assert_eq!(engine::evaluate(&d, &page).unwrap(), Some("empty"));
}

#[test]
fn extra_matching_optional_never_lowers_score() {
    let page = FakePage::new(&["a", "b", "c"], "one two three");
    let mut d = detector("m");
    d.scoring.html_optional = 1.5;
    d.scoring.text_optional = 0.5;

    let mut last = engine::score(&d, &page).unwrap().total;
    for (sel, word) in [("a", "one"), ("b", "two"), ("c", "three")] {
        d.html.optional.push(sel.into());
        d.text.optional.push(word.into());
        let now = engine::score(&d, &page).unwrap().total;
        assert!(now >= last, "{now} < {last}");
        last = now;
    }
    assert_eq!(last, 3.0 * 1.5 + 3.0 * 0.5);
}

#[test]
fn every_hit_in_a_bucket_counts() {
    // Two required entries both matching count twice, not once
    let page = FakePage::new(&["x", "y"], "");
    let mut d = detector("r");
    d.html.required = vec!["x".into(), "y".into(), "z".into()];
    d.scoring.html_required = 2.0;
    assert_eq!(engine::score(&d, &page).unwrap().html, 4.0);
}

#[test]
fn detectors_do_not_influence_each_other() {
    let page = FakePage::new(&["form"], "sign in");
    let mut b = detector("b");
    b.html.required = vec!["form".into()];
    b.text.optional = vec!["sign in".into()];
    b.scoring.html_required = 2.0;
    b.scoring.text_optional = 1.0;
    b.logic.min_total_score = 3.0;

    let mut a = detector("a");
    a.html.required = vec!["!bad".into()];

    let alone = classify(&page, &Registry::from_detectors(vec![b.clone()]).unwrap());
    let with_a = classify(&page, &Registry::from_detectors(vec![a, b]).unwrap());

    assert_eq!(alone.score_of("b"), with_a.score_of("b"));
    assert_eq!(alone.matched, with_a.matched);
}

#[test]
fn classifying_twice_is_identical() {
    let reg = Registry::load_dir(&std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("detectors")).unwrap();
    let page = HtmlPage::parse(
        r#"<html><body><form action="/login"><input type="email"><input type="password">
           <button type="submit">Sign in</button><a href="/forgot">Forgot password?</a></form></body></html>"#,
    );
    let first = classify(&page, &reg);
    let second = classify(&page, &reg);
    assert_eq!(first, second);
    assert!(first.is_match("login_page"));
}

#[test]
fn text_patterns_are_case_insensitive() {
    let mut d = detector("paywall");
    d.text.required = vec!["Subscribe NOW".into()];
    d.scoring.text_required = 1.0;
    d.logic.min_total_score = 1.0;
    let reg = Registry::from_detectors(vec![d]).unwrap();

    let page = HtmlPage::parse("<div>SUBSCRIBE   now to keep reading</div>");
    assert!(classify(&page, &reg).is_match("paywall"));
}

#[test]
fn text_inside_scripts_is_ignored() {
    let mut d = detector("captcha");
    d.text.required = vec!["verify you are human".into()];
    d.scoring.text_required = 1.0;
    d.logic.min_total_score = 1.0;
    let reg = Registry::from_detectors(vec![d]).unwrap();

    let page = HtmlPage::parse(
        "<html><head><script>var s = 'verify you are human';</script></head><body>hello</body></html>",
    );
    assert!(classify(&page, &reg).matched.is_empty());
}
