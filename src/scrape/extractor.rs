//! Page extraction for the scrape fallback
//!
//! The [`PageExtractor`] trait is the seam between the fallback logic and the
//! markup-parsing technology. [`HtmlExtractor`] implements it with CSS
//! selectors over the rendered LeetCode pages; tests can substitute their own
//! implementation and feed it fixture pages.

use crate::scrape::normalize::{collapse_whitespace, normalize};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Fields recovered from a rendered problem page
///
/// Each field is `None` (or empty) when the page did not yield it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedProblem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub tags: Vec<String>,
}

impl ScrapedProblem {
    /// True when the page yielded nothing at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.difficulty.is_none()
            && self.tags.is_empty()
    }
}

/// Extracts export fields from rendered pages
pub trait PageExtractor {
    /// Extracts problem metadata from a problem page
    fn extract_problem(&self, html: &str) -> ScrapedProblem;

    /// Extracts source code from a submission detail page
    fn extract_submission_code(&self, html: &str) -> Option<String>;
}

/// Selector-based extractor for LeetCode pages
#[derive(Debug, Clone, Default)]
pub struct HtmlExtractor;

const TITLE_SUFFIX: &str = " - LeetCode";

const DESCRIPTION_SELECTORS: [&str; 3] = [
    "div.content__u3I1",
    "div.question-content",
    r#"div[data-track-load="description_content"]"#,
];

const DIFFICULTY_CLASSES: [(&str, &str); 3] = [
    ("div.text-difficulty-easy", "Easy"),
    ("div.text-difficulty-medium", "Medium"),
    ("div.text-difficulty-hard", "Hard"),
];

const TAG_SELECTORS: [&str; 2] = ["div.tag-v2", r#"a[href^="/tag/"]"#];

static SUBMISSION_CODE: OnceLock<Regex> = OnceLock::new();

impl PageExtractor for HtmlExtractor {
    fn extract_problem(&self, html: &str) -> ScrapedProblem {
        let document = Html::parse_document(html);

        ScrapedProblem {
            title: extract_title(&document),
            description: extract_description(&document),
            difficulty: extract_difficulty(&document),
            tags: extract_tags(&document),
        }
    }

    fn extract_submission_code(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);

        code_from_editor(&document)
            .or_else(|| code_from_script(html))
            .filter(|code| !code.trim().is_empty())
    }
}

/// Extracts the page title without the site suffix
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .map(|title| title.trim().trim_end_matches(TITLE_SUFFIX).trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_description(document: &Html) -> Option<String> {
    DESCRIPTION_SELECTORS
        .iter()
        .filter_map(|selector| Selector::parse(selector).ok())
        .find_map(|selector| document.select(&selector).next())
        .map(|element| normalize(&element.inner_html()))
        .filter(|s| !s.is_empty())
}

fn extract_difficulty(document: &Html) -> Option<String> {
    if let Ok(selector) = Selector::parse("div[diff]") {
        let marked = document
            .select(&selector)
            .filter_map(|element| element.value().attr("diff"))
            .map(str::trim)
            .find(|value| !value.is_empty());

        if let Some(value) = marked {
            return Some(value.to_string());
        }
    }

    DIFFICULTY_CLASSES.iter().find_map(|(selector, label)| {
        let selector = Selector::parse(selector).ok()?;
        document
            .select(&selector)
            .next()
            .map(|_| label.to_string())
    })
}

/// Collects tag labels, de-duplicated in page order
fn extract_tags(document: &Html) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for selector in TAG_SELECTORS.iter().filter_map(|s| Selector::parse(s).ok()) {
        for element in document.select(&selector) {
            let label = element_text(element);
            if !label.is_empty() && !tags.contains(&label) {
                tags.push(label);
            }
        }
        if !tags.is_empty() {
            break;
        }
    }

    tags
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Reads code line by line out of a CodeMirror display region
fn code_from_editor(document: &Html) -> Option<String> {
    let region_selector = Selector::parse("div.CodeMirror-code").ok()?;
    let region = document.select(&region_selector).next()?;

    let line_selector = Selector::parse("pre.CodeMirror-line").ok()?;
    let mut lines: Vec<String> = region
        .select(&line_selector)
        .map(|line| line.text().collect::<String>())
        .collect();

    if lines.is_empty() {
        lines = region
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "div")
            .map(|line| line.text().collect::<String>())
            .collect();
    }

    let code = lines.join("\n").trim().to_string();
    Some(code).filter(|c| !c.is_empty())
}

/// Reads the `submissionCode: '...'` literal embedded in page scripts
fn code_from_script(html: &str) -> Option<String> {
    let pattern = SUBMISSION_CODE.get_or_init(|| {
        Regex::new(r"submissionCode:\s*'((?:[^'\\]|\\.)*)'").expect("valid regex")
    });

    let literal = pattern.captures(html)?.get(1)?.as_str();
    let code = unescape_js(literal).trim().to_string();
    Some(code).filter(|c| !c.is_empty())
}

/// Decodes the escapes that appear in a single-quoted JavaScript string
fn unescape_js(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}
