//! Line-break normalization.

use crate::html::LINE_BREAK;
use crate::shield::{leading_kind, trailing_kind};

/// Turn the remaining newlines into `<br />`.
///
/// A break is dropped, together with the whitespace around it, when the next
/// line starts with a block or block-container opening, or when the previous
/// line ends with a block, a block-container closing or an `<li>` opening.
/// At most one break is dropped per side, so blank lines next to a block still
/// show as a single break.
pub(crate) fn normalize_breaks(text: &str) -> String {
    let mut lines = text.split('\n');
    let Some(first) = lines.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(first);
    let mut previous = first;

    for line in lines {
        let previous_closes = trailing_kind(previous).is_some_and(|kind| kind.drops_break_after());
        let next_opens = leading_kind(line).is_some_and(|kind| kind.drops_break_before());

        if previous_closes || next_opens {
            let kept = out.trim_end_matches([' ', '\t', '\r']).len();
            out.truncate(kept);
            out.push_str(line.trim_start_matches([' ', '\t']));
        } else {
            // A carriage return belongs to the break it precedes.
            if out.ends_with('\r') {
                out.pop();
            }
            out.push_str(LINE_BREAK);
            out.push_str(line);
        }
        previous = line;
    }
    out
}
