//! Plain-text helpers over rendered markup.

use regex::Regex;
use std::sync::LazyLock;

/// Meta-description length used when no explicit limit is given.
pub const DEFAULT_EXCERPT_LENGTH: usize = 155;

/// Fraction of the limit a sentence or word cut must keep to be accepted.
const MIN_KEEP_RATIO: f64 = 0.7;

const ELLIPSIS: &str = "...";

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex"));

const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#039;", "'"),
];

/// Removes tags and decodes the handful of entities the CMS emits in
/// titles and excerpts. Not an HTML parser.
pub fn strip_html(html: &str) -> String {
    let mut text = TAG.replace_all(html, "").into_owned();
    for (entity, replacement) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }
    text.trim().to_string()
}

/// Shortens `text` to about `max_len` characters.
///
/// Prefers ending on a full stop, then on a word boundary, and only then
/// cuts mid-word. Boundary cuts are only taken when they keep more than 70%
/// of `max_len`. Anything not ending on a full stop gets `...` appended.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_len {
        return text.to_string();
    }

    let threshold = max_len as f64 * MIN_KEEP_RATIO;
    // positions up to and including `max_len` are candidates
    let window = &chars[..=max_len];

    if let Some(period) = window.iter().rposition(|&c| c == '.') {
        if period as f64 > threshold {
            let cut: String = chars[..=period].iter().collect();
            return cut.trim().to_string();
        }
    }

    if let Some(space) = window.iter().rposition(|&c| c == ' ') {
        if space as f64 > threshold {
            let cut: String = chars[..space].iter().collect();
            return format!("{}{ELLIPSIS}", cut.trim());
        }
    }

    let cut: String = chars[..max_len].iter().collect();
    format!("{}{ELLIPSIS}", cut.trim())
}

/// Display excerpt: the rendered excerpt, or the content when the excerpt is
/// blank, stripped of markup and truncated to `max_len`.
pub fn excerpt(rendered_excerpt: &str, rendered_content: &str, max_len: usize) -> String {
    let source = if rendered_excerpt.trim().is_empty() {
        rendered_content
    } else {
        rendered_excerpt
    };
    truncate_text(&strip_html(source), max_len)
}
