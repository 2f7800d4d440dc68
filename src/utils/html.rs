// src/utils/html.rs

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::Builder;
use regex::{Captures, Regex};

use crate::utils::style_stripper::strip_styles;

/// Tags that survive sanitization. Everything else is unwrapped, keeping its text.
pub const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "b", "blockquote", "code", "em", "i", "li", "ol", "strong", "ul",
    "p", "h1", "h2", "h3", "h4", "h5",
];

/// Attributes kept per tag. Tags missing here keep no attributes at all.
pub const ALLOWED_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "title", "name"]),
    ("abbr", &["title"]),
    ("acronym", &["title"]),
];

/// Schemes accepted in `href`. Relative URLs pass through untouched.
pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

static CLEANER: LazyLock<Builder<'static>> = LazyLock::new(allow_list_builder);

static HEADING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)h([0-9])>").expect("heading pattern is valid"));

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

fn allow_list_builder() -> Builder<'static> {
    let tags: HashSet<&'static str> = ALLOWED_TAGS.iter().copied().collect();
    let tag_attributes: HashMap<&'static str, HashSet<&'static str>> = ALLOWED_ATTRIBUTES
        .iter()
        .map(|(tag, attrs)| (*tag, attrs.iter().copied().collect()))
        .collect();

    let mut builder = Builder::empty();
    builder
        .tags(tags)
        .tag_attributes(tag_attributes)
        .url_schemes(ALLOWED_URL_SCHEMES.iter().copied().collect())
        // Disallowed tags are unwrapped, never emptied: `<script>x</script>` keeps `x`.
        .clean_content_tags(HashSet::new())
        .link_rel(None)
        .strip_comments(true);
    builder
}

/// Clean rich text pasted from word processors.
///
/// Two passes:
/// 1. `<style>` blocks are removed together with their contents.
/// 2. The remainder is parsed, filtered against [`ALLOWED_TAGS`] and
///    [`ALLOWED_ATTRIBUTES`], and serialized back to well-formed HTML.
///
/// Never fails. If serialization breaks midway the partial output is returned.
/// Leading and trailing whitespace is trimmed, so `sanitize` is idempotent.
pub fn sanitize(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let unstyled = strip_styles(html);
    let document = CLEANER.clean(&unstyled);

    let mut buf = Vec::with_capacity(unstyled.len());
    let rendered = match document.write_to(&mut buf) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "sanitizer produced invalid UTF-8; replacing bad bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }),
        Err(e) => {
            tracing::warn!(error = %e, written = buf.len(), "serializer failed; keeping partial output");
            String::from_utf8_lossy(&buf).into_owned()
        }
    };

    tracing::debug!(input_len = html.len(), output_len = rendered.len(), "sanitized rich text");

    rendered.trim().to_string()
}

/// Removes anything that looks like a tag, leaving entities alone.
pub fn strip_tags(html: &str) -> String {
    ANY_TAG.replace_all(html, "").into_owned()
}

/// Keeps the first `max_words` whitespace-separated words, appending `...`
/// when something was cut.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return words.join(" ");
    }

    let mut kept = words[..max_words].to_vec();
    if !kept.last().is_some_and(|w| w.ends_with("...")) {
        kept.push("...");
    }
    kept.join(" ")
}

/// Pushes every heading down one level (`<h1>` becomes `<h2>`), so article
/// bodies nest under the page's own heading.
pub fn demote_headings(html: &str) -> String {
    HEADING_TAG
        .replace_all(html, |caps: &Captures| match caps[2].parse::<u32>() {
            Ok(level) => format!("<{}h{}>", &caps[1], level + 1),
            Err(_) => caps[0].to_string(),
        })
        .into_owned()
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
