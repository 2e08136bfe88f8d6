//! Inline span substitutions: links, bold, italic and inline code.
//!
//! Tags are shielded individually while the enclosed text stays visible, so
//! a later inline stage may still decorate text inside an earlier span. Code
//! spans are the exception: their content is shielded whole.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::html::{EM_CLOSE, EM_OPEN, HtmlWriter, LINK_CLOSE, STRONG_CLOSE, STRONG_OPEN};
use crate::shield::{FragmentKind, FragmentStore};

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static BOLD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*|__(.*?)__").unwrap());

// Unlike bold, the content must be non-empty so that a leftover `**` from an
// unclosed bold span stays literal.
static ITALIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*|_(.+?)_").unwrap());

static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// `[label](url)` to an anchor; the label stays visible to later stages.
pub(super) fn links(text: &str, store: &mut FragmentStore, html: HtmlWriter<'_>) -> String {
    LINK_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            let open = store.shield(FragmentKind::Inline, html.link_open(&caps[2]));
            let close = store.shield(FragmentKind::Inline, LINK_CLOSE);
            format!("{open}{}{close}", &caps[1])
        })
        .into_owned()
}

pub(super) fn bold(text: &str, store: &mut FragmentStore) -> String {
    wrap_matches(&BOLD_PATTERN, text, store, STRONG_OPEN, STRONG_CLOSE)
}

pub(super) fn italic(text: &str, store: &mut FragmentStore) -> String {
    wrap_matches(&ITALIC_PATTERN, text, store, EM_OPEN, EM_CLOSE)
}

/// `` `code` `` to a fully shielded `<code>` span.
pub(super) fn code(text: &str, store: &mut FragmentStore, html: HtmlWriter<'_>) -> String {
    CODE_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            store.shield(FragmentKind::Inline, html.inline_code(&caps[1]))
        })
        .into_owned()
}

/// Wrap the content of whichever alternative matched in `open`/`close` tags.
fn wrap_matches(
    pattern: &Regex,
    text: &str,
    store: &mut FragmentStore,
    open: &str,
    close: &str,
) -> String {
    pattern
        .replace_all(text, |caps: &Captures<'_>| {
            let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            let open = store.shield(FragmentKind::Inline, open);
            let close = store.shield(FragmentKind::Inline, close);
            format!("{open}{inner}{close}")
        })
        .into_owned()
}
