//! Pipe table recognition.
//!
//! A table is a header row, a separator row and one or more body rows, each
//! on its own line and each starting and ending with `|`:
//!
//! ```text
//! | A | B |
//! |---|:-:|
//! | 1 | 2 |
//! ```

use crate::html::HtmlWriter;
use crate::shield::{FragmentKind, FragmentStore};

/// Line range covered by a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TableLines {
    /// Index of the header line.
    pub(crate) start: usize,
    /// One past the index of the last body row.
    pub(crate) end: usize,
}

impl TableLines {
    /// Indices of the body rows.
    pub(crate) fn body(self) -> std::ops::Range<usize> {
        self.start + 2..self.end
    }
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// `|` + at least one character + `|`.
fn is_row(line: &str) -> bool {
    let line = strip_cr(line);
    line.len() >= 3 && line.starts_with('|') && line.ends_with('|')
}

/// A row made only of dashes, colons, pipes and spaces.
fn is_separator(line: &str) -> bool {
    is_row(line)
        && strip_cr(line)
            .chars()
            .all(|c| matches!(c, '-' | '|' | ':' | ' '))
}

/// Match a table whose header is the line at `start`.
pub(crate) fn match_table(lines: &[&str], start: usize) -> Option<TableLines> {
    let header = lines.get(start)?;
    let separator = lines.get(start + 1)?;
    if !is_row(header) || !is_separator(separator) {
        return None;
    }
    let end = start
        + 2
        + lines[start + 2..]
            .iter()
            .take_while(|line| is_row(line))
            .count();
    (end > start + 2).then_some(TableLines { start, end })
}

/// Split a row into trimmed cells, dropping the text outside the outer pipes.
pub(crate) fn split_cells(line: &str) -> Vec<&str> {
    let parts: Vec<&str> = strip_cr(line).split('|').collect();
    if parts.len() < 2 {
        return Vec::new();
    }
    parts[1..parts.len() - 1].iter().map(|cell| cell.trim()).collect()
}

/// Replace every table with a shielded `<table>` block.
///
/// Each cell is passed through `inline` on its own, so inline spans never
/// cross a cell boundary. The line break ending the last row is kept, so the
/// next line still starts a line; break normalization drops it after the
/// block.
pub(super) fn apply(
    text: &str,
    store: &mut FragmentStore,
    html: HtmlWriter<'_>,
    inline: &dyn Fn(&str, &mut FragmentStore) -> String,
) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < lines.len() {
        if i > 0 {
            out.push('\n');
        }
        if let Some(table) = match_table(&lines, i) {
            let header: Vec<String> = split_cells(lines[table.start])
                .into_iter()
                .map(|cell| inline(cell, store))
                .collect();
            let rows: Vec<Vec<String>> = lines[table.body()]
                .iter()
                .map(|row| {
                    split_cells(row)
                        .into_iter()
                        .map(|cell| inline(cell, store))
                        .collect()
                })
                .collect();
            tracing::trace!(
                columns = header.len(),
                rows = rows.len(),
                "recognized table"
            );
            out.push_str(&store.shield(FragmentKind::Block, html.table(&header, &rows)));
            i = table.end;
        } else {
            out.push_str(lines[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ClassMap;
    use pretty_assertions::assert_eq;

    fn run(text: &str) -> String {
        let classes = ClassMap::plain();
        let mut store = FragmentStore::new();
        let shielded = apply(text, &mut store, HtmlWriter::new(&classes), &|cell, _| {
            cell.to_owned()
        });
        store.expand(&shielded)
    }

    #[test]
    fn test_two_by_two_table() {
        assert_eq!(
            run("| A | B |\n|---|---|\n| 1 | 2 |"),
            "<div><table><thead><tr><th>A</th><th>B</th></tr></thead>\
             <tbody><tr><td>1</td><td>2</td></tr></tbody></table></div>"
        );
    }

    #[test]
    fn test_following_line_keeps_its_line_break() {
        let html = run("| A |\n|---|\n| 1 |\nafter");
        assert!(html.ends_with("</table></div>\nafter"), "{html}");
    }

    #[test]
    fn test_text_before_table_kept() {
        let html = run("intro\n| A |\n|:-:|\n| 1 |");
        assert!(html.starts_with("intro\n<div><table>"), "{html}");
    }

    #[test]
    fn test_ragged_rows() {
        let html = run("| A | B |\n|---|---|\n| 1 |\n| 2 | 3 | 4 |");
        assert!(html.contains("<tr><td>1</td></tr>"));
        assert!(html.contains("<tr><td>2</td><td>3</td><td>4</td></tr>"));
    }

    #[test]
    fn test_crlf_rows() {
        let html = run("| A |\r\n|---|\r\n| 1 |\r\n");
        assert!(html.contains("<th>A</th>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_header_without_body_is_not_a_table() {
        let text = "| A | B |\n|---|---|";
        assert_eq!(run(text), text);
    }

    #[test]
    fn test_bad_separator_is_not_a_table() {
        let text = "| A |\n| x |\n| 1 |";
        assert_eq!(run(text), text);
    }

    #[test]
    fn test_indented_header_is_not_a_table() {
        let text = " | A |\n|---|\n| 1 |";
        assert_eq!(run(text), text);
    }

    #[test]
    fn test_cells_rendered_through_inline_callback() {
        let classes = ClassMap::plain();
        let mut store = FragmentStore::new();
        let shielded = apply(
            "| a |\n|---|\n| b |",
            &mut store,
            HtmlWriter::new(&classes),
            &|cell, _| cell.to_uppercase(),
        );
        let html = store.expand(&shielded);
        assert!(html.contains("<th>A</th>"));
        assert!(html.contains("<td>B</td>"));
    }

    #[test]
    fn test_split_cells() {
        assert_eq!(split_cells("| a | b |c|"), vec!["a", "b", "c"]);
        assert_eq!(split_cells("|  |"), vec![""]);
        assert!(split_cells("plain").is_empty());
    }

    #[test]
    fn test_match_table_range() {
        let lines = ["x", "| A |", "|---|", "| 1 |", "| 2 |", "y"];
        assert_eq!(
            match_table(&lines, 1),
            Some(TableLines { start: 1, end: 5 })
        );
        assert_eq!(match_table(&lines, 0), None);
    }
}
