//! Inline tokenizer.
//!
//! Text is refined pass by pass, one span type per pass in the configured
//! order. A pass only splits the plain-text nodes left by earlier passes, so a
//! span can never contain another span.

use crate::options::InlineOrder;
use crate::stages::Stage;

use super::ast::Inline;

/// Tokenize inline content.
pub fn parse_inlines(text: &str, order: InlineOrder) -> Vec<Inline> {
    let mut nodes = Vec::new();
    if !text.is_empty() {
        nodes.push(Inline::Text(text.to_owned()));
    }
    for stage in Stage::inline_sequence(order) {
        nodes = nodes
            .into_iter()
            .flat_map(|node| match node {
                Inline::Text(text) => split_text(&text, stage),
                other => vec![other],
            })
            .collect();
    }
    nodes
}

/// Split a text node on every span recognized by `stage`.
fn split_text(text: &str, stage: Stage) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        if let Some((consumed, node)) = match_span(rest, stage) {
            if plain_start < pos {
                nodes.push(Inline::Text(text[plain_start..pos].to_owned()));
            }
            nodes.push(node);
            pos += consumed;
            plain_start = pos;
        } else {
            pos += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    if plain_start < text.len() {
        nodes.push(Inline::Text(text[plain_start..].to_owned()));
    }
    nodes
}

/// Match a span of the given kind at the start of `s`.
///
/// Returns the number of bytes consumed and the node.
fn match_span(s: &str, stage: Stage) -> Option<(usize, Inline)> {
    match stage {
        Stage::Link => match_link(s),
        Stage::Bold => ["**", "__"]
            .into_iter()
            .find(|delim| s.starts_with(delim))
            .and_then(|delim| match_delimited(s, delim, false))
            .map(|(consumed, content)| (consumed, Inline::Bold(content.to_owned()))),
        Stage::Italic => ["*", "_"]
            .into_iter()
            .find(|delim| s.starts_with(delim))
            .and_then(|delim| match_delimited(s, delim, true))
            .map(|(consumed, content)| (consumed, Inline::Italic(content.to_owned()))),
        Stage::InlineCode => match_code(s),
        _ => None,
    }
}

/// `[label](url)`: label up to the first `]`, url up to the first `)`.
fn match_link(s: &str) -> Option<(usize, Inline)> {
    let rest = s.strip_prefix('[')?;
    let label_end = rest.find(']')?;
    let after_label = rest[label_end + 1..].strip_prefix('(')?;
    let url_end = after_label.find(')')?;
    if label_end == 0 || url_end == 0 {
        return None;
    }
    let consumed = label_end + url_end + 4;
    Some((
        consumed,
        Inline::Link {
            label: rest[..label_end].to_owned(),
            url: after_label[..url_end].to_owned(),
        },
    ))
}

/// Shortest `delim ... delim` run on a single line.
fn match_delimited<'a>(s: &'a str, delim: &str, non_empty: bool) -> Option<(usize, &'a str)> {
    let rest = s.strip_prefix(delim)?;
    let line = &rest[..rest.find('\n').unwrap_or(rest.len())];
    let from = if non_empty {
        line.chars().next()?.len_utf8()
    } else {
        0
    };
    let close = line[from..].find(delim)? + from;
    Some((close + 2 * delim.len(), &line[..close]))
}

/// `` `code` `` with non-empty content; may span lines.
fn match_code(s: &str) -> Option<(usize, Inline)> {
    let rest = s.strip_prefix('`')?;
    let close = rest.find('`')?;
    if close == 0 {
        return None;
    }
    Some((close + 2, Inline::Code(rest[..close].to_owned())))
}
