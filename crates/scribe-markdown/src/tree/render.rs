//! Tree to shielded working text.
//!
//! Output uses the same fragment kinds as the staged pipeline, so the shared
//! line-break normalization treats both engines alike.

use crate::html::{
    EM_CLOSE, EM_OPEN, HtmlWriter, ITEM_CLOSE, ITEM_OPEN, LINK_CLOSE, STRONG_CLOSE, STRONG_OPEN,
};
use crate::shield::{FragmentKind, FragmentStore};

use super::ast::{Block, Inline, List, Table};

/// Render blocks, leaving newlines of paragraph text in place.
pub(crate) fn render_blocks(
    blocks: &[Block],
    store: &mut FragmentStore,
    html: HtmlWriter<'_>,
) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::CodeBlock(body) => {
                out.push_str(&store.shield(FragmentKind::Block, html.code_block(body)));
            }
            Block::Table(table) => render_table(table, store, html, &mut out),
            Block::List(list) => render_list(list, store, html, &mut out),
            Block::Paragraph(inlines) => render_inlines(inlines, store, html, &mut out),
        }
    }
    out
}

fn render_table(table: &Table, store: &mut FragmentStore, html: HtmlWriter<'_>, out: &mut String) {
    let mut cell = |inlines: &Vec<Inline>| {
        let mut text = String::new();
        render_inlines(inlines, store, html, &mut text);
        text
    };
    let header: Vec<String> = table.header.iter().map(&mut cell).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(&mut cell).collect())
        .collect();
    out.push_str(&store.shield(FragmentKind::Block, html.table(&header, &rows)));
}

fn render_list(list: &List, store: &mut FragmentStore, html: HtmlWriter<'_>, out: &mut String) {
    out.push_str(&store.shield(FragmentKind::BlockStart, html.list_open(list.ordered)));
    for item in &list.items {
        out.push_str(&store.shield(FragmentKind::ItemStart, ITEM_OPEN));
        render_inlines(item, store, html, out);
        out.push_str(&store.shield(FragmentKind::Inline, ITEM_CLOSE));
    }
    out.push_str(&store.shield(
        FragmentKind::BlockEnd,
        HtmlWriter::list_close(list.ordered),
    ));
}

fn render_inlines(
    inlines: &[Inline],
    store: &mut FragmentStore,
    html: HtmlWriter<'_>,
    out: &mut String,
) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Bold(text) => wrap(text, STRONG_OPEN, STRONG_CLOSE, store, out),
            Inline::Italic(text) => wrap(text, EM_OPEN, EM_CLOSE, store, out),
            Inline::Code(code) => {
                out.push_str(&store.shield(FragmentKind::Inline, html.inline_code(code)));
            }
            Inline::Link { label, url } => {
                wrap(label, &html.link_open(url), LINK_CLOSE, store, out);
            }
        }
    }
}

fn wrap(text: &str, open: &str, close: &str, store: &mut FragmentStore, out: &mut String) {
    out.push_str(&store.shield(FragmentKind::Inline, open));
    out.push_str(text);
    out.push_str(&store.shield(FragmentKind::Inline, close));
}
