//! Fenced code extraction.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::html::HtmlWriter;
use crate::shield::{FragmentKind, FragmentStore};

/// Delimiter of a fenced code block.
pub(crate) const FENCE_MARKER: &str = "```";

/// Shortest run between two fence markers, across lines.
static FENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());

/// Replace every fenced block with a shielded `<pre><code>` block.
///
/// Everything between the markers, including an info word and newlines, is
/// kept verbatim apart from angle-bracket escaping. An unmatched marker is
/// left as literal text.
pub(super) fn apply(text: &str, store: &mut FragmentStore, html: HtmlWriter<'_>) -> String {
    let replaced = FENCE_PATTERN.replace_all(text, |caps: &Captures<'_>| {
        store.shield(FragmentKind::Block, html.code_block(&caps[1]))
    });
    if replaced.contains(FENCE_MARKER) {
        tracing::debug!("unclosed code fence left as literal text");
    }
    replaced.into_owned()
}
