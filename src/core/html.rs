// src/core/html.rs
//
// Page evaluation context: parsed document + lowercase visible text.
// `scraper::Html` is !Send, so an HtmlPage lives and dies on the worker
// thread that fetched the page.

use scraper::{Html, Node, Selector};

use super::sanitize::fold_text;
use crate::error::EvaluationError;

/// Subtrees whose text never renders.
const HIDDEN: &[&str] = &["script", "style", "noscript", "template"];

/// What the scoring engine needs from a page.
pub trait PageDocument {
    /// True iff at least one element matches `selector`.
    fn selector_matches(&self, selector: &str) -> Result<bool, EvaluationError>;

    /// Lowercase, whitespace-collapsed visible text.
    fn text(&self) -> &str;
}

pub struct HtmlPage {
    doc: Html,
    text: String,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);
        let text = visible_text(&doc);
        Self { doc, text }
    }
}

impl PageDocument for HtmlPage {
    fn selector_matches(&self, selector: &str) -> Result<bool, EvaluationError> {
        let sel = Selector::parse(selector).map_err(|e| EvaluationError::InvalidSelector {
            selector: s!(selector),
            reason: e.to_string(),
        })?;
        Ok(self.doc.select(&sel).next().is_some())
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// Text nodes in document order, joined by spaces, hidden subtrees skipped.
/// Explicit stack: hostile pages can nest deeper than the call stack allows.
pub fn visible_text(doc: &Html) -> String {
    let mut raw = String::new();
    let mut stack = vec![*doc.root_element()];

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(t) => {
                raw.push_str(t);
                raw.push(' ');
            }
            Node::Element(el) if HIDDEN.contains(&el.name()) => {}
            Node::Element(_) => stack.extend(node.children().rev()),
            _ => {}
        }
    }

    fold_text(&raw)
}
