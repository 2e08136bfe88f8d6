//! HTML output for rendered elements.
//!
//! Both engines build markup exclusively through [`HtmlWriter`], so tag
//! shapes and `class` attributes stay identical between them.

use crate::escape::{escape_attr, escape_code};
use crate::options::{ClassMap, ElementKind};

pub(crate) const STRONG_OPEN: &str = "<strong>";
pub(crate) const STRONG_CLOSE: &str = "</strong>";
pub(crate) const EM_OPEN: &str = "<em>";
pub(crate) const EM_CLOSE: &str = "</em>";
pub(crate) const LINK_CLOSE: &str = "</a>";
pub(crate) const ITEM_OPEN: &str = "<li>";
pub(crate) const ITEM_CLOSE: &str = "</li>";
pub(crate) const LINE_BREAK: &str = "<br />";
const CELL_BREAK: &str = "<br/>";

/// Markup builder parameterized by element classes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HtmlWriter<'a> {
    classes: &'a ClassMap,
}

impl<'a> HtmlWriter<'a> {
    pub(crate) fn new(classes: &'a ClassMap) -> Self {
        Self { classes }
    }

    /// Write `<tag>` or `<tag class="...">`.
    fn open_tag(self, tag: &str, kind: ElementKind, out: &mut String) {
        out.push('<');
        out.push_str(tag);
        if let Some(class) = self.classes.get(kind) {
            out.push_str(r#" class=""#);
            out.push_str(&escape_attr(class));
            out.push('"');
        }
        out.push('>');
    }

    /// `<pre><code>` block with angle brackets escaped.
    pub(crate) fn code_block(self, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + 32);
        self.open_tag("pre", ElementKind::CodeBlock, &mut out);
        out.push_str("<code>");
        out.push_str(&escape_code(body));
        out.push_str("</code></pre>");
        out
    }

    /// Inline `<code>` span with angle brackets escaped.
    pub(crate) fn inline_code(self, code: &str) -> String {
        let mut out = String::with_capacity(code.len() + 16);
        self.open_tag("code", ElementKind::InlineCode, &mut out);
        out.push_str(&escape_code(code));
        out.push_str("</code>");
        out
    }

    /// Opening anchor tag for a link that opens in a new browsing context.
    ///
    /// The URL is written verbatim.
    pub(crate) fn link_open(self, href: &str) -> String {
        let mut out = String::with_capacity(href.len() + 64);
        out.push_str(r#"<a href=""#);
        out.push_str(href);
        out.push_str(r#"" target="_blank" rel="noopener noreferrer""#);
        if let Some(class) = self.classes.get(ElementKind::Link) {
            out.push_str(r#" class=""#);
            out.push_str(&escape_attr(class));
            out.push('"');
        }
        out.push('>');
        out
    }

    /// Opening list container tag.
    pub(crate) fn list_open(self, ordered: bool) -> String {
        let mut out = String::new();
        self.open_tag(if ordered { "ol" } else { "ul" }, ElementKind::List, &mut out);
        out
    }

    /// Closing list container tag.
    pub(crate) fn list_close(ordered: bool) -> &'static str {
        if ordered { "</ol>" } else { "</ul>" }
    }

    /// Complete table wrapped in a `<div>`.
    ///
    /// Cell contents are written as given, except that literal newlines turn
    /// into line breaks. Rows may have differing cell counts.
    pub(crate) fn table(self, header: &[String], rows: &[Vec<String>]) -> String {
        let mut out = String::with_capacity(256);
        self.open_tag("div", ElementKind::TableWrapper, &mut out);
        self.open_tag("table", ElementKind::Table, &mut out);

        out.push_str("<thead>");
        self.open_tag("tr", ElementKind::HeaderRow, &mut out);
        for cell in header {
            self.open_tag("th", ElementKind::HeaderCell, &mut out);
            push_cell(cell, &mut out);
            out.push_str("</th>");
        }
        out.push_str("</tr></thead>");

        out.push_str("<tbody>");
        for row in rows {
            self.open_tag("tr", ElementKind::BodyRow, &mut out);
            for cell in row {
                self.open_tag("td", ElementKind::BodyCell, &mut out);
                push_cell(cell, &mut out);
                out.push_str("</td>");
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table></div>");
        out
    }
}

fn push_cell(cell: &str, out: &mut String) {
    if cell.contains('\n') {
        out.push_str(&cell.replace('\n', CELL_BREAK));
    } else {
        out.push_str(cell);
    }
}
