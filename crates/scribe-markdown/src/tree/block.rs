//! Block tokenizer.
//!
//! Fenced code is split off first. The text between fences is then scanned
//! line by line for tables and list runs; everything else accumulates into
//! paragraphs whose newlines are kept for line-break normalization.

use std::mem;

use crate::options::InlineOrder;
use crate::stages::{FENCE_MARKER, match_table, parse_item, split_cells};

use super::ast::{Block, Inline, List, Table};
use super::inline::parse_inlines;

/// Tokenize `text` into blocks.
pub fn parse_blocks(text: &str, order: InlineOrder) -> Vec<Block> {
    let mut parser = BlockParser::new(order);
    let mut rest = text;
    let mut at_line_start = true;

    while let Some((before, body, after)) = find_fence(rest) {
        parser.scan(before, at_line_start, true);
        parser.flush();
        parser.blocks.push(Block::CodeBlock(body.to_owned()));
        at_line_start = false;
        rest = after;
    }
    if rest.contains(FENCE_MARKER) {
        tracing::debug!("unclosed code fence left as literal text");
    }
    parser.scan(rest, at_line_start, false);
    parser.flush();
    parser.blocks
}

/// Split at the first pair of fence markers: text before, body, text after.
fn find_fence(text: &str) -> Option<(&str, &str, &str)> {
    let open = text.find(FENCE_MARKER)?;
    let body_start = open + FENCE_MARKER.len();
    let close = body_start + text[body_start..].find(FENCE_MARKER)?;
    Some((
        &text[..open],
        &text[body_start..close],
        &text[close + FENCE_MARKER.len()..],
    ))
}

struct BlockParser {
    order: InlineOrder,
    blocks: Vec<Block>,
    paragraph: String,
}

impl BlockParser {
    fn new(order: InlineOrder) -> Self {
        Self {
            order,
            blocks: Vec::new(),
            paragraph: String::new(),
        }
    }

    /// Scan a fence-free segment.
    ///
    /// The first line is only a whole line when the segment starts at a line
    /// start, and the last one only when no fence follows it. Partial lines
    /// never start a table or a list.
    fn scan(&mut self, segment: &str, at_line_start: bool, fence_follows: bool) {
        let lines: Vec<&str> = segment.split('\n').collect();
        let first = usize::from(!at_line_start);
        let complete = &lines[..lines.len() - usize::from(fence_follows)];

        let mut i = 0;

        while i < lines.len() {
            if i > 0 {
                self.paragraph.push('\n');
            }
            let whole_line = i >= first && i < complete.len();

            if whole_line && let Some(table) = match_table(complete, i) {
                let table_block = Table {
                    header: self.cells(lines[table.start]),
                    rows: lines[table.body()]
                        .iter()
                        .map(|row| self.cells(row))
                        .collect(),
                };
                self.flush();
                self.blocks.push(Block::Table(table_block));
                i = table.end;
                continue;
            }

            if whole_line && let Some(first_item) = parse_item(lines[i]) {
                let mut items = vec![parse_inlines(first_item.content, self.order)];
                let mut last = i;
                for (j, line) in complete.iter().enumerate().skip(i + 1) {
                    if let Some(item) = parse_item(line) {
                        items.push(parse_inlines(item.content, self.order));
                        last = j;
                    } else if !line.trim().is_empty() {
                        break;
                    }
                }
                self.flush();
                self.blocks.push(Block::List(List {
                    ordered: first_item.ordered,
                    items,
                }));
                i = last + 1;
                continue;
            }

            self.paragraph.push_str(lines[i]);
            i += 1;
        }
    }

    fn cells(&self, row: &str) -> Vec<Vec<Inline>> {
        split_cells(row)
            .into_iter()
            .map(|cell| parse_inlines(cell, self.order))
            .collect()
    }

    /// Close the pending paragraph, if any.
    fn flush(&mut self) {
        if !self.paragraph.is_empty() {
            let text = mem::take(&mut self.paragraph);
            let inlines = parse_inlines(&text, self.order);
            self.blocks.push(Block::Paragraph(inlines));
        }
    }
}
