//! Inline-markup removal for completion answers.
//!
//! Models regularly emit HTML tags and markdown emphasis despite the prompt's
//! instructions.  [`sanitize`] strips both while keeping the wrapped text, so
//! the layout engine only ever sees the constrained line-level markup subset
//! (`# `, `## `, `- `/`• ` prefixes and plain text).

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<b>(.*?)</b>").expect("valid regex"));
static ITALIC_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<i>(.*?)</i>").expect("valid regex"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static BOLD_MARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static ITALIC_MARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));

/// Strips inline emphasis markup while preserving the wrapped text.
///
/// Removes `<b>`/`<i>` tag pairs keeping their content, drops any remaining
/// HTML-style tags entirely, then removes paired `**bold**` and `*italic*`
/// markers keeping their content.  Unpaired markers pass through unchanged,
/// which makes the pass idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(raw: &str) -> String {
    let text = BOLD_TAG.replace_all(raw, "$1");
    let text = ITALIC_TAG.replace_all(&text, "$1");
    let text = ANY_TAG.replace_all(&text, "");
    let text = BOLD_MARK.replace_all(&text, "$1");
    let text = ITALIC_MARK.replace_all(&text, "$1");
    text.into_owned()
}
