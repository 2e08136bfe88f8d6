//! Placeholder shielding for generated markup.
//!
//! Every stage that emits markup stores it in a [`FragmentStore`] and leaves
//! an opaque token in the working text. Later stages see only the token, so
//! they cannot match inside a generated tag or inside a code body. Tokens are
//! expanded back into markup once, after the last stage.
//!
//! A token is `U+FDD0`, a one-letter kind code, the fragment index in decimal,
//! then `U+FDD1`. Both sentinels are Unicode noncharacters; occurrences in the
//! input are replaced with U+FFFD by [`sanitize`].

use std::borrow::Cow;

const OPEN: char = '\u{FDD0}';
const CLOSE: char = '\u{FDD1}';

/// Role of a shielded fragment in line-break normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FragmentKind {
    /// Markup inside a line (emphasis tags, links, code spans).
    Inline,
    /// Self-contained block (code block, table).
    Block,
    /// Opening tag of a block container (`<ul>`, `<ol>`).
    BlockStart,
    /// Closing tag of a block container.
    BlockEnd,
    /// Opening `<li>` tag.
    ItemStart,
}

impl FragmentKind {
    fn code(self) -> char {
        match self {
            Self::Inline => 'i',
            Self::Block => 'b',
            Self::BlockStart => 's',
            Self::BlockEnd => 'e',
            Self::ItemStart => 'l',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        match code {
            'i' => Some(Self::Inline),
            'b' => Some(Self::Block),
            's' => Some(Self::BlockStart),
            'e' => Some(Self::BlockEnd),
            'l' => Some(Self::ItemStart),
            _ => None,
        }
    }

    /// Whether a line break directly before this fragment is dropped.
    pub(crate) fn drops_break_before(self) -> bool {
        matches!(self, Self::Block | Self::BlockStart)
    }

    /// Whether a line break directly after this fragment is dropped.
    pub(crate) fn drops_break_after(self) -> bool {
        matches!(self, Self::Block | Self::BlockEnd | Self::ItemStart)
    }
}

/// Replace sentinel characters so input text can never forge a token.
pub(crate) fn sanitize(input: &str) -> Cow<'_, str> {
    if input.contains([OPEN, CLOSE]) {
        Cow::Owned(input.replace([OPEN, CLOSE], "\u{FFFD}"))
    } else {
        Cow::Borrowed(input)
    }
}

/// Storage for shielded markup fragments.
#[derive(Debug, Default)]
pub(crate) struct FragmentStore {
    fragments: Vec<String>,
}

impl FragmentStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store `html` and return the token that stands in for it.
    pub(crate) fn shield(&mut self, kind: FragmentKind, html: impl Into<String>) -> String {
        let index = self.fragments.len();
        self.fragments.push(html.into());
        let mut token = String::with_capacity(8);
        token.push(OPEN);
        token.push(kind.code());
        token.push_str(&index.to_string());
        token.push(CLOSE);
        token
    }

    /// Number of stored fragments.
    pub(crate) fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Replace every token in `text` with its markup, recursively.
    pub(crate) fn expand(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 2);
        self.expand_into(text, self.fragments.len(), &mut out);
        out
    }

    /// Expand tokens whose index is below `limit`.
    ///
    /// A fragment only ever embeds tokens created before it, so recursing with
    /// the fragment's own index as the limit always terminates.
    fn expand_into(&self, text: &str, limit: usize, out: &mut String) {
        let mut rest = text;
        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len_utf8()..];
            match parse_token(after) {
                Some((_, index, consumed)) if index < limit => {
                    self.expand_into(&self.fragments[index], index, out);
                    rest = &after[consumed..];
                }
                _ => {
                    out.push(OPEN);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
    }
}

/// Parse a token body (everything after the opening sentinel).
///
/// Returns the kind, the fragment index and the number of bytes consumed,
/// including the closing sentinel.
fn parse_token(body: &str) -> Option<(FragmentKind, usize, usize)> {
    let kind = FragmentKind::from_code(body.chars().next()?)?;
    let close = body.find(CLOSE)?;
    let digits = body.get(1..close)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = digits.parse().ok()?;
    Some((kind, index, close + CLOSE.len_utf8()))
}

/// Kind of the token a line starts with, ignoring leading whitespace.
pub(crate) fn leading_kind(line: &str) -> Option<FragmentKind> {
    let body = line.trim_start().strip_prefix(OPEN)?;
    parse_token(body).map(|(kind, _, _)| kind)
}

/// Kind of the token a line ends with, ignoring trailing whitespace.
pub(crate) fn trailing_kind(line: &str) -> Option<FragmentKind> {
    let trimmed = line.trim_end();
    if !trimmed.ends_with(CLOSE) {
        return None;
    }
    let open = trimmed.rfind(OPEN)?;
    let (kind, _, consumed) = parse_token(&trimmed[open + OPEN.len_utf8()..])?;
    (open + OPEN.len_utf8() + consumed == trimmed.len()).then_some(kind)
}
