//! Best-effort metadata scraping over raw HTML text. Nothing here parses HTML
//! into a tree: each field is located with a targeted regular expression, so
//! malformed markup degrades to "not found" rather than an error. Every
//! function is pure and total; absence is reported as [`None`] (or `false`).

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::fmt::Display;

static TITLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("valid regex"));
static H1_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1\s*>").expect("valid regex"));
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

// `\d` is Unicode-aware in `regex`; posts are dated with ASCII digits only.
static DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));
static LEADING_DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("valid regex"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the trimmed `content` of the first `<meta name="{name}" ...>` tag
/// in `html`. Both attribute orders are recognized (`name` before `content` is
/// tried first) and values may be single- or double-quoted. `name` is matched
/// literally and exactly; the tag and attribute names themselves are matched
/// case-insensitively. The content is returned verbatim: entities are not
/// decoded and markup is not stripped.
pub fn extract_meta_tag(html: &str, name: &str) -> Option<String> {
    extract_meta_attribute(html, &NAME_PATTERNS, name)
}

/// Like [`extract_meta_tag`], but keyed on the `property` attribute used by
/// Open Graph tags such as `<meta property="og:image" content="...">`.
pub fn extract_meta_property(html: &str, property: &str) -> Option<String> {
    extract_meta_attribute(html, &PROPERTY_PATTERNS, property)
}

fn extract_meta_attribute(html: &str, patterns: &MetaPatterns, value: &str) -> Option<String> {
    if html.is_empty() || value.is_empty() {
        return None;
    }

    patterns
        .key_first
        .captures_iter(html)
        .find_map(|c| keyed_content(&c, value, (1, 2), (3, 4)))
        .or_else(|| {
            patterns
                .content_first
                .captures_iter(html)
                .find_map(|c| keyed_content(&c, value, (3, 4), (1, 2)))
        })
}

// Each pattern captures the key attribute's value in one pair of groups
// (double- or single-quoted) and the content in the other.
fn keyed_content(
    captures: &Captures,
    value: &str,
    key: (usize, usize),
    content: (usize, usize),
) -> Option<String> {
    let group = |(double, single): (usize, usize)| {
        captures.get(double).or_else(|| captures.get(single))
    };
    match group(key)?.as_str() == value {
        true => group(content).map(|m| m.as_str().trim().to_owned()),
        false => None,
    }
}

/// The two attribute orders of a `<meta>` tag keyed on one attribute.
struct MetaPatterns {
    key_first: Regex,
    content_first: Regex,
}

fn meta_patterns(attribute: &str) -> MetaPatterns {
    let quoted = r#"(?:"([^"]*)"|'([^']*)')"#;
    let keyed = format!(r"{}\s*=\s*{}", attribute, quoted);
    let content = format!(r"content\s*=\s*{}", quoted);
    let pattern = |first: &str, second: &str| {
        Regex::new(&format!(r"(?i)<meta\s(?:[^>]*?\s)?{}[^>]*?\s{}", first, second))
            .expect("valid regex")
    };
    MetaPatterns {
        key_first: pattern(&keyed, &content),
        content_first: pattern(&content, &keyed),
    }
}

static NAME_PATTERNS: Lazy<MetaPatterns> = Lazy::new(|| meta_patterns("name"));
static PROPERTY_PATTERNS: Lazy<MetaPatterns> = Lazy::new(|| meta_patterns("property"));

/// Returns the page title: the trimmed contents of the first terminated
/// `<title>` element, falling back to the first `<h1>` with its inner tags
/// stripped. Blank candidates count as missing.
pub fn extract_title(html: &str) -> Option<String> {
    if html.is_empty() {
        return None;
    }

    let title = TITLE_REGEX
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|t| !t.is_empty());
    if title.is_some() {
        return title;
    }

    H1_REGEX
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| TAG_REGEX.replace_all(m.as_str(), "").trim().to_owned())
        .filter(|t| !t.is_empty())
}

/// Escapes `text` for inclusion in HTML. `&` is handled in the same pass as
/// the other characters, so generated entities are never escaped twice.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Renders `value` with [`Display`] and escapes it via [`escape_html`]. A
/// missing value renders as the empty string.
pub fn escape_for_display<T: Display + ?Sized>(value: Option<&T>) -> String {
    match value {
        None => String::new(),
        Some(value) => escape_html(&value.to_string()),
    }
}

/// Reports whether `text` is exactly a zero-padded `YYYY-MM-DD` string naming
/// a real calendar day. Overflowing dates such as `2025-02-30` are rejected.
pub fn is_valid_calendar_date(text: &str) -> bool {
    if !DATE_REGEX.is_match(text) {
        return false;
    }
    match NaiveDate::parse_from_str(text, DATE_FORMAT) {
        Ok(date) => date.format(DATE_FORMAT).to_string() == text,
        Err(_) => false,
    }
}

/// Returns the `YYYY-MM-DD` prefix of `filename`, if it has one. This is a
/// purely lexical check; pair it with [`is_valid_calendar_date`] when the
/// date has to exist.
pub fn extract_leading_date(filename: &str) -> Option<String> {
    LEADING_DATE_REGEX
        .find(filename)
        .map(|m| m.as_str().to_owned())
}

/// Returns the slug of a dated post filename: whatever follows the leading
/// date and its `-` separator, minus an `.html` extension. For example
/// `2025-01-15-hello-world.html` has the slug `hello-world`.
pub fn post_slug(filename: &str) -> Option<String> {
    let date = extract_leading_date(filename)?;
    let rest = filename[date.len()..].strip_prefix('-')?;
    let stem = match rest.len().checked_sub(HTML_EXTENSION.len()) {
        Some(i) if rest.is_char_boundary(i) && rest[i..].eq_ignore_ascii_case(HTML_EXTENSION) => {
            &rest[..i]
        }
        _ => rest,
    };
    match stem.is_empty() {
        true => None,
        false => Some(stem.to_owned()),
    }
}

const HTML_EXTENSION: &str = ".html";

/// Splits a keywords string into tags. Commas, Japanese commas (`、`) and
/// fullwidth commas (`，`) all delimit; pieces are trimmed, blanks dropped and
/// repeats removed keeping the first occurrence.
pub fn split_tags(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(|c: char| matches!(c, ',' | '、' | '，'))
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(*tag))
        .map(str::to_owned)
        .collect()
}
