//! List item recognition and grouping.

use std::sync::LazyLock;

use regex::Regex;

use crate::html::{HtmlWriter, ITEM_CLOSE, ITEM_OPEN};
use crate::shield::{FragmentKind, FragmentStore};

static ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*([*-]|[0-9]+\.)[ \t]+(.*)$").unwrap());

/// A line recognized as a list item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ListItem<'a> {
    /// Marker was `digits.` rather than `-` or `*`.
    pub(crate) ordered: bool,
    /// Text after the marker and its whitespace.
    pub(crate) content: &'a str,
}

/// Parse a single line as a list item.
pub(crate) fn parse_item(line: &str) -> Option<ListItem<'_>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let caps = ITEM_PATTERN.captures(line)?;
    let marker = caps.get(1)?.as_str();
    let content = caps.get(2).map_or("", |m| m.as_str());
    Some(ListItem {
        ordered: marker.ends_with('.'),
        content,
    })
}

/// Replace runs of item lines with shielded list containers.
///
/// A run is a maximal sequence of item lines; whitespace-only lines between
/// two items do not end it. The container is `<ol>` when the first item of
/// the run used an ordinal marker.
pub(super) fn apply(text: &str, store: &mut FragmentStore, html: HtmlWriter<'_>) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < lines.len() {
        if i > 0 {
            out.push('\n');
        }
        let Some(first) = parse_item(lines[i]) else {
            out.push_str(lines[i]);
            i += 1;
            continue;
        };

        let mut items = vec![first.content];
        let mut last = i;
        for (j, line) in lines.iter().enumerate().skip(i + 1) {
            if let Some(item) = parse_item(line) {
                items.push(item.content);
                last = j;
            } else if !line.trim().is_empty() {
                break;
            }
        }

        out.push_str(&store.shield(FragmentKind::BlockStart, html.list_open(first.ordered)));
        for content in &items {
            out.push_str(&store.shield(FragmentKind::ItemStart, ITEM_OPEN));
            out.push_str(content);
            out.push_str(&store.shield(FragmentKind::Inline, ITEM_CLOSE));
        }
        out.push_str(&store.shield(
            FragmentKind::BlockEnd,
            HtmlWriter::list_close(first.ordered),
        ));
        tracing::trace!(items = items.len(), ordered = first.ordered, "grouped list");

        // Lines i..=last collapse into the single line just written.
        i = last + 1;
    }
    out
}
