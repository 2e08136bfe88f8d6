//! Tokenizer engine.
//!
//! [`parse`] turns text into a flat list of [`Block`]s whose inline content is
//! a sequence of non-nesting [`Inline`] spans. Rendering reuses the staged
//! engine's markup writer and line-break normalization.

mod ast;
mod block;
mod inline;
mod render;

pub use ast::{Block, Inline, List, Table};
pub use block::parse_blocks;
pub use inline::parse_inlines;

pub(crate) use render::render_blocks;

use crate::options::InlineOrder;

/// Tokenize `text` with the given inline order.
///
/// # Examples
///
/// ```
/// use scribe_markdown::InlineOrder;
/// use scribe_markdown::tree::{self, Block, Inline};
///
/// let blocks = tree::parse("**hi**", InlineOrder::Legacy);
/// assert_eq!(blocks, vec![Block::Paragraph(vec![Inline::Bold("hi".to_owned())])]);
/// ```
pub fn parse(text: &str, order: InlineOrder) -> Vec<Block> {
    parse_blocks(text, order)
}
