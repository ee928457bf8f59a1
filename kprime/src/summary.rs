//! # Summary Module
//!
//! Plain-text renderings of k-prime questions and responses for reports and review screens,
//! and the inline HTML clean-up used when presenting row texts.
//!
//! ## Overview
//!
//! - [`PlainTextRenderer`]: the default [`TextRenderer`], flattening stored rich text.
//! - [`make_html_inline`]: removes paragraph markup so HTML fits inside a table cell.
//! - [`KprimeQuestion::summarise_response`]: `"<row>: <column>"` pairs in attempt order.

use crate::KprimeQuestion;
use crate::error::KprimeError;
use crate::order::field;
use crate::response::canonical;
use crate::traits::renderer::TextRenderer;
use crate::types::Response;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Node};
use util::question_bank::question_bank::TextFormat;

static PARAGRAPH_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*<p>\s*").unwrap());
static PARAGRAPH_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*</p>\s*").unwrap());
static TRAILING_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(<br\s*/?>)+$").unwrap());

// Elements that start a new line of text; they become whitespace instead of vanishing.
const BLOCK_ELEMENTS: &[&str] = &[
    "br", "p", "div", "li", "tr", "td", "th", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Makes HTML suitable for inline presentation: drops `<p>` openers, turns `</p>` into
/// `<br />` and removes trailing line breaks.
pub fn make_html_inline(html: &str) -> String {
    let html = PARAGRAPH_OPEN.replace_all(html, "");
    let html = PARAGRAPH_CLOSE.replace_all(&html, "<br />");
    let html = TRAILING_BREAKS.replace_all(&html, "");
    html.trim().to_string()
}

/// Text content of an HTML fragment with entities decoded and whitespace collapsed.
fn html_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut text = String::new();

    for node in fragment.root_element().descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(element) if BLOCK_ELEMENTS.contains(&element.name()) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Flattens HTML-like formats by parsing the markup; plain and markdown text pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl TextRenderer for PlainTextRenderer {
    fn to_plain_text(&self, text: &str, format: TextFormat) -> String {
        match format {
            TextFormat::Html | TextFormat::Moodle => html_text(text),
            TextFormat::Plain | TextFormat::Markdown => text.trim().to_string(),
        }
    }
}

impl KprimeQuestion {
    /// Plain-text summary of a response for reports.
    ///
    /// Rows are listed in attempt order as `"<row text>: <column text>"`, joined with `"; "`.
    /// Rows without a submitted value, or whose value names no column, are left out.
    pub fn summarise_response(&self, response: &Response) -> Result<String, KprimeError> {
        let mut result = Vec::new();

        for (position, row) in self.ordered_rows()? {
            let Some(value) = response.get(&field(position)) else {
                continue;
            };
            let selected = canonical(value);
            for column in self.columns() {
                if column.number.to_string() == selected {
                    result.push(format!(
                        "{}: {}",
                        self.html_to_text(&row.option_text, row.option_text_format),
                        self.html_to_text(&column.response_text, column.response_text_format)
                    ));
                }
            }
        }

        Ok(result.join("; "))
    }

    /// Plain-text summary of the question: its text, then the row texts in attempt order.
    pub fn question_summary(&self) -> Result<String, KprimeError> {
        let definition = self.definition();
        let question = self.html_to_text(&definition.question_text, definition.question_text_format);
        let choices = self
            .ordered_rows()?
            .into_iter()
            .map(|(_, row)| self.html_to_text(&row.option_text, row.option_text_format))
            .collect::<Vec<_>>();
        Ok(format!("{}: {}", question, choices.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Order;
    use crate::test_support::definition;
    use serde_json::json;

    fn question(order: Vec<i64>) -> KprimeQuestion {
        KprimeQuestion::new(definition(&[1, 2, 1], true, "kprime"), Some(Order::new(order))).unwrap()
    }

    #[test]
    fn test_make_html_inline() {
        assert_eq!(make_html_inline("<p>One</p>"), "One");
        assert_eq!(make_html_inline("<p>One</p> <p>Two</p>"), "One<br />Two");
        assert_eq!(make_html_inline("  Text<br /><br>"), "Text");
        assert_eq!(make_html_inline("plain"), "plain");
    }

    #[test]
    fn test_plain_text_renderer_html() {
        let r = PlainTextRenderer;
        assert_eq!(
            r.to_plain_text("<p>Statement <b>1</b></p>", TextFormat::Html),
            "Statement 1"
        );
        assert_eq!(
            r.to_plain_text("<p>a &amp; b</p><p>c&nbsp;&lt;d&gt;</p>", TextFormat::Html),
            "a & b c <d>"
        );
        assert_eq!(r.to_plain_text("line<br/>next", TextFormat::Moodle), "line next");
    }

    #[test]
    fn test_plain_text_renderer_decodes_entities() {
        let r = PlainTextRenderer;
        assert_eq!(
            r.to_plain_text("<p>caf&eacute; &#233; &#x27;x&#x27; &mdash;</p>", TextFormat::Html),
            "caf\u{e9} \u{e9} 'x' \u{2014}"
        );
    }

    #[test]
    fn test_plain_text_renderer_keeps_bare_angle_brackets() {
        let r = PlainTextRenderer;
        assert_eq!(
            r.to_plain_text("<p>x < y and y > z</p>", TextFormat::Html),
            "x < y and y > z"
        );
    }

    #[test]
    fn test_plain_text_renderer_separates_list_items() {
        let r = PlainTextRenderer;
        assert_eq!(
            r.to_plain_text("<ul><li>one</li><li>two</li></ul>", TextFormat::Html),
            "one two"
        );
    }

    #[test]
    fn test_plain_text_renderer_passes_plain_through() {
        let r = PlainTextRenderer;
        assert_eq!(r.to_plain_text(" <b>not html</b> ", TextFormat::Plain), "<b>not html</b>");
        assert_eq!(r.to_plain_text("**bold**", TextFormat::Markdown), "**bold**");
    }

    #[test]
    fn test_summarise_response_follows_order() {
        let q = question(vec![103, 101, 102]);
        let response = Response::from([
            ("option0".to_string(), json!(1)),
            ("option1".to_string(), json!("2")),
            ("option2".to_string(), json!(2)),
        ]);
        assert_eq!(
            q.summarise_response(&response).unwrap(),
            "Statement 3: True; Statement 1: False; Statement 2: False"
        );
    }

    #[test]
    fn test_summarise_response_skips_unanswered_rows() {
        let q = question(vec![101, 102, 103]);
        let response = Response::from([
            ("option1".to_string(), json!(1)),
            ("option2".to_string(), json!(9)),
        ]);
        assert_eq!(q.summarise_response(&response).unwrap(), "Statement 2: True");
        assert_eq!(q.summarise_response(&Response::new()).unwrap(), "");
    }

    #[test]
    fn test_question_summary() {
        let q = question(vec![102, 103, 101]);
        assert_eq!(
            q.question_summary().unwrap(),
            "Decide for each statement.: Statement 2; Statement 3; Statement 1"
        );
    }

    #[test]
    fn test_custom_renderer() {
        struct Upper;
        impl TextRenderer for Upper {
            fn to_plain_text(&self, text: &str, _: TextFormat) -> String {
                text.to_uppercase()
            }
        }

        let q = question(vec![101, 102, 103]).with_renderer(Upper);
        let response = Response::from([("option0".to_string(), json!(1))]);
        assert_eq!(
            q.summarise_response(&response).unwrap(),
            "<P>STATEMENT <B>1</B></P>: TRUE"
        );
    }
}
