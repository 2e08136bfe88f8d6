//! Staged-substitution pipeline.
//!
//! The staged engine applies an ordered list of [`Stage`]s to a working text.
//! Each stage replaces the constructs it recognizes with shielded markup
//! tokens (see [`crate::shield`]), so later stages only ever see plain text
//! and opaque tokens. The order is load-bearing: fenced code is extracted
//! before anything else, tables before inline spans, list items after inline
//! spans, and line breaks last.

mod breaks;
mod fence;
mod inline;
mod list;
mod table;

use std::fmt;

use crate::html::HtmlWriter;
use crate::options::{Engine, InlineOrder};
use crate::shield::FragmentStore;

pub(crate) use breaks::normalize_breaks;
pub(crate) use fence::FENCE_MARKER;
pub(crate) use list::parse_item;
pub(crate) use table::{match_table, split_cells};

/// One transformation step of the rendering pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Fenced code blocks become `<pre><code>`.
    FencedCode,
    /// Pipe tables become `<table>`.
    Table,
    /// `[label](url)` becomes an anchor.
    Link,
    /// `**text**` and `__text__` become `<strong>`.
    Bold,
    /// `*text*` and `_text_` become `<em>`.
    Italic,
    /// `` `code` `` becomes `<code>`.
    InlineCode,
    /// Bullet and ordinal lines become grouped `<li>` elements.
    ListItems,
    /// Remaining newlines become `<br />`.
    LineBreaks,
}

impl Stage {
    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::FencedCode => "fenced-code",
            Self::Table => "table",
            Self::Link => "link",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::InlineCode => "inline-code",
            Self::ListItems => "list-items",
            Self::LineBreaks => "line-breaks",
        }
    }

    /// Inline stages in recognition order.
    pub(crate) fn inline_sequence(order: InlineOrder) -> [Self; 4] {
        match order {
            InlineOrder::Legacy => [Self::Link, Self::Bold, Self::Italic, Self::InlineCode],
            InlineOrder::CodeFirst => [Self::InlineCode, Self::Link, Self::Bold, Self::Italic],
        }
    }

    /// Full stage order executed by an engine.
    ///
    /// The tree engine tokenizes all block structure before it looks at
    /// inline spans, so list items move ahead of the inline stages there.
    pub(crate) fn sequence(engine: Engine, order: InlineOrder) -> Vec<Self> {
        let inline = Self::inline_sequence(order);
        let mut stages = vec![Self::FencedCode, Self::Table];
        match engine {
            Engine::Staged => {
                stages.extend(inline);
                stages.push(Self::ListItems);
            }
            Engine::Tree => {
                stages.push(Self::ListItems);
                stages.extend(inline);
            }
        }
        stages.push(Self::LineBreaks);
        stages
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered stage runner for the staged engine.
pub(crate) struct Pipeline<'a> {
    stages: Vec<Stage>,
    inline: [Stage; 4],
    html: HtmlWriter<'a>,
}

impl<'a> Pipeline<'a> {
    pub(crate) fn new(order: InlineOrder, html: HtmlWriter<'a>) -> Self {
        Self {
            stages: Stage::sequence(Engine::Staged, order),
            inline: Stage::inline_sequence(order),
            html,
        }
    }

    /// Run every stage over `text`, returning the shielded result.
    pub(crate) fn run(&self, text: &str, store: &mut FragmentStore) -> String {
        let mut current = text.to_owned();
        for &stage in &self.stages {
            current = self.apply(stage, &current, store);
            tracing::trace!(stage = stage.name(), len = current.len(), "applied stage");
        }
        current
    }

    /// Run only the inline stages, in order, over a standalone text.
    fn run_inline(&self, text: &str, store: &mut FragmentStore) -> String {
        let mut current = text.to_owned();
        for &stage in &self.inline {
            current = self.apply(stage, &current, store);
        }
        current
    }

    fn apply(&self, stage: Stage, text: &str, store: &mut FragmentStore) -> String {
        match stage {
            Stage::FencedCode => fence::apply(text, store, self.html),
            Stage::Table => table::apply(text, store, self.html, &|cell, store| {
                self.run_inline(cell, store)
            }),
            Stage::Link => inline::links(text, store, self.html),
            Stage::Bold => inline::bold(text, store),
            Stage::Italic => inline::italic(text, store),
            Stage::InlineCode => inline::code(text, store, self.html),
            Stage::ListItems => list::apply(text, store, self.html),
            Stage::LineBreaks => normalize_breaks(text),
        }
    }
}
