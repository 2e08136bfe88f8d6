//! Block and inline node types.

/// Structural unit of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Body of a fenced code block, verbatim.
    CodeBlock(String),
    /// Pipe table.
    Table(Table),
    /// Flat list.
    List(List),
    /// Run of inline content between structural blocks.
    ///
    /// Newlines of the source are kept inside the text nodes.
    Paragraph(Vec<Inline>),
}

/// Table cells, header first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    /// Header cells; their count is the column count.
    pub header: Vec<Vec<Inline>>,
    /// Body rows; a row may have more or fewer cells than the header.
    pub rows: Vec<Vec<Vec<Inline>>>,
}

/// Flat list of items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct List {
    /// The first item used an ordinal marker.
    pub ordered: bool,
    /// Item contents, in source order.
    pub items: Vec<Vec<Inline>>,
}

/// Inline span. Spans never nest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { label: String, url: String },
}
