//! Rendering options: engine selection, inline order and element classes.

use std::collections::BTreeMap;

/// How the block and inline transformations are executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "kebab-case")
)]
pub enum Engine {
    /// Ordered substitution passes over a shielded working text.
    #[default]
    Staged,
    /// Block and inline tokenizer producing a small tree before rendering.
    Tree,
}

/// Order in which inline spans are recognized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "kebab-case")
)]
pub enum InlineOrder {
    /// Links, bold, italic, then inline code.
    ///
    /// Emphasis markers between backticks are consumed before the code span
    /// is recognized.
    #[default]
    Legacy,
    /// Inline code, links, bold, then italic.
    CodeFirst,
}

/// Generated element that can carry a `class` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "kebab-case")
)]
pub enum ElementKind {
    /// `<pre>` of a fenced code block.
    CodeBlock,
    /// `<code>` of an inline code span.
    InlineCode,
    /// `<div>` wrapping a table.
    TableWrapper,
    /// `<table>`.
    Table,
    /// `<tr>` inside `<thead>`.
    HeaderRow,
    /// `<tr>` inside `<tbody>`.
    BodyRow,
    /// `<th>`.
    HeaderCell,
    /// `<td>`.
    BodyCell,
    /// `<a>`.
    Link,
    /// `<ul>` or `<ol>`.
    List,
}

impl ElementKind {
    /// Every element kind, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::CodeBlock,
        Self::InlineCode,
        Self::TableWrapper,
        Self::Table,
        Self::HeaderRow,
        Self::BodyRow,
        Self::HeaderCell,
        Self::BodyCell,
        Self::Link,
        Self::List,
    ];

    /// Kebab-case name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::CodeBlock => "code-block",
            Self::InlineCode => "inline-code",
            Self::TableWrapper => "table-wrapper",
            Self::Table => "table",
            Self::HeaderRow => "header-row",
            Self::BodyRow => "body-row",
            Self::HeaderCell => "header-cell",
            Self::BodyCell => "body-cell",
            Self::Link => "link",
            Self::List => "list",
        }
    }
}

/// Named class presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "kebab-case")
)]
pub enum Theme {
    /// No `class` attributes.
    #[default]
    Plain,
    /// Tailwind utility classes used by the chat and document views.
    Tailwind,
}

impl Theme {
    /// Build the class map for this preset.
    pub fn classes(self) -> ClassMap {
        match self {
            Self::Plain => ClassMap::plain(),
            Self::Tailwind => ClassMap::tailwind(),
        }
    }
}

/// Optional `class` attribute value per generated element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassMap {
    classes: BTreeMap<ElementKind, String>,
}

impl ClassMap {
    /// Class map that emits no `class` attributes.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Tailwind utility classes for light and dark views.
    #[must_use]
    pub fn tailwind() -> Self {
        Self::plain()
            .with(
                ElementKind::CodeBlock,
                "bg-gray-100 dark:bg-gray-900 p-3 rounded-md my-2 text-sm overflow-x-auto",
            )
            .with(
                ElementKind::InlineCode,
                "bg-gray-200 dark:bg-gray-700 px-1 py-0.5 rounded text-sm",
            )
            .with(
                ElementKind::TableWrapper,
                "overflow-x-auto my-4 rounded-lg border dark:border-gray-700",
            )
            .with(ElementKind::Table, "w-full text-sm")
            .with(ElementKind::HeaderRow, "border-b dark:border-gray-600")
            .with(
                ElementKind::BodyRow,
                "border-b dark:border-gray-700 last:border-b-0 hover:bg-gray-50 dark:hover:bg-gray-700/50",
            )
            .with(ElementKind::HeaderCell, "p-3 text-left font-semibold")
            .with(ElementKind::BodyCell, "p-3 align-top")
            .with(ElementKind::Link, "text-indigo-400 hover:underline")
            .with(ElementKind::List, "list-disc list-inside pl-4 my-2")
    }

    /// Set the class for an element, returning the updated map.
    #[must_use]
    pub fn with(mut self, kind: ElementKind, class: impl Into<String>) -> Self {
        self.set(kind, class);
        self
    }

    /// Set the class for an element.
    pub fn set(&mut self, kind: ElementKind, class: impl Into<String>) {
        self.classes.insert(kind, class.into());
    }

    /// Remove the class for an element.
    pub fn remove(&mut self, kind: ElementKind) -> Option<String> {
        self.classes.remove(&kind)
    }

    /// Class configured for an element, if any.
    pub fn get(&self, kind: ElementKind) -> Option<&str> {
        self.classes.get(&kind).map(String::as_str)
    }

    /// Whether no element carries a class.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Options controlling a [`MarkdownRenderer`](crate::MarkdownRenderer).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Execution engine.
    pub engine: Engine,
    /// Inline span recognition order.
    pub inline_order: InlineOrder,
    /// Classes attached to generated elements.
    pub classes: ClassMap,
}
