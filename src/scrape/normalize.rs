//! Markup to plain-text normalization for problem descriptions

use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;

/// Elements whose text never reaches the normalized output
const SKIPPED_ELEMENTS: [&str; 3] = ["pre", "script", "style"];

static BLANK_LINES: OnceLock<Regex> = OnceLock::new();
static SPACE_RUNS: OnceLock<Regex> = OnceLock::new();

/// Converts problem markup into normalized plain text
///
/// Preformatted blocks are dropped entirely before text extraction. Runs of
/// blank lines collapse to a single blank line, runs of spaces to a single
/// space, and the result is trimmed. Empty input yields an empty string.
///
/// # Example
///
/// ```
/// use leetcode_export::scrape::normalize;
///
/// assert_eq!(normalize("<pre>code</pre><p>Hello   world</p>"), "Hello world");
/// ```
pub fn normalize(markup: &str) -> String {
    if markup.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(markup);
    let mut text = String::new();

    for node in fragment.root_element().descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };

        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| SKIPPED_ELEMENTS.contains(&element.name()))
        });

        if !skipped {
            text.push_str(chunk);
        }
    }

    collapse_whitespace(&text)
}

/// Collapses blank-line and space runs, then trims
pub fn collapse_whitespace(text: &str) -> String {
    let blank_lines = BLANK_LINES.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid regex"));
    let space_runs = SPACE_RUNS.get_or_init(|| Regex::new(r"[ \t]+").expect("valid regex"));

    let text = text.replace('\u{a0}', " ").replace("\r\n", "\n");
    let text = blank_lines.replace_all(&text, "\n\n");
    let text = space_runs.replace_all(&text, " ");
    text.trim().to_string()
}
