//! Markdown to HTML entry point.

use crate::html::HtmlWriter;
use crate::options::{ClassMap, Engine, InlineOrder, RenderOptions};
use crate::shield::{FragmentStore, sanitize};
use crate::stages::{Pipeline, Stage, normalize_breaks};
use crate::tree;

/// Constrained markdown renderer.
///
/// Supports fenced code, pipe tables, links, bold, italic, inline code and
/// flat lists. Anything else passes through as text, and newlines outside
/// block elements become `<br />`.
///
/// Rendering is total: every input produces an HTML fragment. It is not
/// idempotent, since rendered markup may itself contain markdown delimiters.
///
/// A renderer holds only its options, so one instance can be shared across
/// threads.
#[derive(Clone, Debug, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given options.
    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Select the execution engine.
    #[must_use]
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.options.engine = engine;
        self
    }

    /// Select the inline span recognition order.
    #[must_use]
    pub fn with_inline_order(mut self, order: InlineOrder) -> Self {
        self.options.inline_order = order;
        self
    }

    /// Set the classes attached to generated elements.
    #[must_use]
    pub fn with_classes(mut self, classes: ClassMap) -> Self {
        self.options.classes = classes;
        self
    }

    /// Current options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Ordered transformation stages for the current options.
    pub fn stages(&self) -> Vec<Stage> {
        Stage::sequence(self.options.engine, self.options.inline_order)
    }

    /// Render `text` to an HTML fragment.
    ///
    /// Absent or empty input yields an empty string.
    pub fn render(&self, text: Option<&str>) -> String {
        let Some(text) = text.filter(|text| !text.is_empty()) else {
            return String::new();
        };

        let input = sanitize(text);
        let html = HtmlWriter::new(&self.options.classes);
        let order = self.options.inline_order;
        let mut store = FragmentStore::new();

        let shielded = match self.options.engine {
            Engine::Staged => Pipeline::new(order, html).run(&input, &mut store),
            Engine::Tree => {
                let blocks = tree::parse_blocks(&input, order);
                tracing::trace!(blocks = blocks.len(), "tokenized blocks");
                normalize_breaks(&tree::render_blocks(&blocks, &mut store, html))
            }
        };
        let output = store.expand(&shielded);

        tracing::debug!(
            engine = ?self.options.engine,
            input_len = text.len(),
            output_len = output.len(),
            fragments = store.len(),
            "rendered markdown"
        );
        output
    }
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::MarkdownRenderer: Send, Sync);

    use super::*;
    use crate::options::ElementKind;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const ENGINES: [Engine; 2] = [Engine::Staged, Engine::Tree];

    fn render_with(engine: Engine, text: &str) -> String {
        MarkdownRenderer::new().with_engine(engine).render(Some(text))
    }

    /// Render with both engines, asserting they agree.
    fn render_both(text: &str) -> String {
        let staged = render_with(Engine::Staged, text);
        let tree = render_with(Engine::Tree, text);
        assert_eq!(staged, tree, "engines disagree on {text:?}");
        staged
    }

    #[test]
    fn test_absent_and_empty_input() {
        for engine in ENGINES {
            let renderer = MarkdownRenderer::new().with_engine(engine);
            assert_eq!(renderer.render(None), "");
            assert_eq!(renderer.render(Some("")), "");
        }
    }

    #[test]
    fn test_fenced_code_escaped_and_verbatim() {
        assert_eq!(
            render_both("```\nlet v: Vec<u8> = **x**;\n```"),
            "<pre><code>\nlet v: Vec&lt;u8&gt; = **x**;\n</code></pre>"
        );
    }

    #[test]
    fn test_unclosed_fence_stays_literal() {
        assert_eq!(render_both("```\nopen"), "```<br />open");
    }

    #[test]
    fn test_inline_spans() {
        assert_eq!(
            render_both("**bold** *italic* `code`"),
            "<strong>bold</strong> <em>italic</em> <code>code</code>"
        );
        assert_eq!(
            render_both("__bold__ _italic_"),
            "<strong>bold</strong> <em>italic</em>"
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render_both("[title](http://x)"),
            r#"<a href="http://x" target="_blank" rel="noopener noreferrer">title</a>"#
        );
    }

    #[test]
    fn test_link_url_not_decorated() {
        let html = render_both("[a](http://x/_y_/z)");
        assert!(html.contains(r#"href="http://x/_y_/z""#), "{html}");
        assert!(!html.contains("<em>"), "{html}");
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            render_both("- a\n- b\n- c"),
            "<ul><li>a</li><li>b</li><li>c</li></ul>"
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(render_both("1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
    }

    #[test]
    fn test_list_item_spans() {
        assert_eq!(
            render_both("- **a**\n- `b`"),
            "<ul><li><strong>a</strong></li><li><code>b</code></li></ul>"
        );
    }

    #[test]
    fn test_table() {
        assert_eq!(
            render_both("| A | B |\n|---|---|\n|  1 | 2  |"),
            "<div><table><thead><tr><th>A</th><th>B</th></tr></thead>\
             <tbody><tr><td>1</td><td>2</td></tr></tbody></table></div>"
        );
    }

    #[test]
    fn test_table_cells_rendered_in_isolation() {
        let html = render_both("| *a | b* |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<th>*a</th><th>b*</th>"), "{html}");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(render_both("Hello\nWorld"), "Hello<br />World");
        assert_eq!(render_both("a\r\nb"), "a<br />b");
    }

    #[test]
    fn test_no_break_artifacts_around_blocks() {
        assert_eq!(
            render_both("Intro\n- a\n- b\nOutro"),
            "Intro<ul><li>a</li><li>b</li></ul>Outro"
        );
        assert_eq!(
            render_both("Intro\n| A |\n|---|\n| 1 |\nOutro"),
            "Intro<div><table><thead><tr><th>A</th></tr></thead>\
             <tbody><tr><td>1</td></tr></tbody></table></div>Outro"
        );
        assert_eq!(
            render_both("Intro\n```\nx\n```\nOutro"),
            "Intro<pre><code>\nx\n</code></pre>Outro"
        );
    }

    #[test]
    fn test_list_right_after_table() {
        assert_eq!(
            render_both("| A |\n|---|\n| 1 |\n- a\n- b"),
            "<div><table><thead><tr><th>A</th></tr></thead>\
             <tbody><tr><td>1</td></tr></tbody></table></div>\
             <ul><li>a</li><li>b</li></ul>"
        );
    }

    #[test]
    fn test_mixed_document() {
        let text = "Intro **bold** and *it*\n\n\
                    | A | B |\n|---|---|\n| `x` | [l](http://y) |\n\n\
                    - one\n- two\n\n\
                    ```\ncode <b>\n```\nEnd";
        assert_eq!(
            render_both(text),
            "Intro <strong>bold</strong> and <em>it</em><br />\
             <div><table><thead><tr><th>A</th><th>B</th></tr></thead><tbody><tr>\
             <td><code>x</code></td>\
             <td><a href=\"http://y\" target=\"_blank\" rel=\"noopener noreferrer\">l</a></td>\
             </tr></tbody></table></div>\
             <ul><li>one</li><li>two</li></ul>\
             <pre><code>\ncode &lt;b&gt;\n</code></pre>End"
        );
    }

    #[test]
    fn test_sentinels_in_input_replaced() {
        let html = render_both("a\u{FDD0}i0\u{FDD1}b");
        assert_eq!(html, "a\u{FFFD}i0\u{FFFD}b");
    }

    #[test]
    fn test_render_is_not_idempotent() {
        let renderer = MarkdownRenderer::new();
        let once = renderer.render(Some("```**x**```"));
        let twice = renderer.render(Some(&once));
        assert_eq!(once, "<pre><code>**x**</code></pre>");
        assert_ne!(once, twice);
    }

    #[test]
    fn test_legacy_order_decorates_inside_backticks() {
        assert_eq!(
            render_with(Engine::Staged, "`a *b* c`"),
            "<code>a <em>b</em> c</code>"
        );
    }

    #[test]
    fn test_code_first_keeps_backtick_content() {
        for engine in ENGINES {
            let renderer = MarkdownRenderer::new()
                .with_engine(engine)
                .with_inline_order(InlineOrder::CodeFirst);
            assert_eq!(
                renderer.render(Some("`a *b* c` and *d*")),
                "<code>a *b* c</code> and <em>d</em>",
                "{engine:?}"
            );
        }
    }

    #[test]
    fn test_engines_differ_on_crossing_spans() {
        let text = "**a [l](u) b**";
        let link = r#"<a href="u" target="_blank" rel="noopener noreferrer">l</a>"#;
        assert_eq!(
            render_with(Engine::Staged, text),
            format!("<strong>a {link} b</strong>")
        );
        assert_eq!(render_with(Engine::Tree, text), format!("**a {link} b**"));
    }

    #[test]
    fn test_engines_differ_on_star_bullet_with_emphasis() {
        let text = "* item *emph*\n* two";
        assert_eq!(
            render_with(Engine::Staged, text),
            "<em> item </em>emph*<ul><li>two</li></ul>"
        );
        assert_eq!(
            render_with(Engine::Tree, text),
            "<ul><li>item <em>emph</em></li><li>two</li></ul>"
        );
    }

    #[test]
    fn test_tailwind_classes() {
        let renderer = MarkdownRenderer::new().with_classes(ClassMap::tailwind());
        let html = renderer.render(Some("[t](u)"));
        assert!(
            html.contains(r#"class="text-indigo-400 hover:underline""#),
            "{html}"
        );
    }

    #[test]
    fn test_class_override() {
        let classes = ClassMap::plain().with(ElementKind::List, "items");
        for engine in ENGINES {
            let renderer = MarkdownRenderer::new()
                .with_engine(engine)
                .with_classes(classes.clone());
            assert_eq!(
                renderer.render(Some("- a")),
                r#"<ul class="items"><li>a</li></ul>"#
            );
        }
    }

    #[test]
    fn test_stages_follow_options() {
        let names: Vec<&str> = MarkdownRenderer::new()
            .stages()
            .into_iter()
            .map(Stage::name)
            .collect();
        assert_eq!(
            names,
            vec![
                "fenced-code",
                "table",
                "link",
                "bold",
                "italic",
                "inline-code",
                "list-items",
                "line-breaks",
            ]
        );

        let code_first = MarkdownRenderer::new().with_inline_order(InlineOrder::CodeFirst);
        assert_eq!(code_first.stages()[2], Stage::InlineCode);
    }

    #[test]
    fn test_with_options() {
        let options = RenderOptions {
            engine: Engine::Tree,
            ..RenderOptions::default()
        };
        let renderer = MarkdownRenderer::with_options(options.clone());
        assert_eq!(renderer.options(), &options);
    }

    fn markdown_soup() -> impl Strategy<Value = String> {
        let alphabet = vec![
            '*', '_', '`', '[', ']', '(', ')', '|', '-', ':', '1', '.', ' ', '\n', '\r', '<',
            '>', 'a', 'é', '\u{FDD0}', '\u{FDD1}',
        ];
        proptest::collection::vec(proptest::sample::select(alphabet), 0..200)
            .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn test_any_input_renders_without_placeholders(text in markdown_soup()) {
            for engine in ENGINES {
                for order in [InlineOrder::Legacy, InlineOrder::CodeFirst] {
                    let html = MarkdownRenderer::new()
                        .with_engine(engine)
                        .with_inline_order(order)
                        .render(Some(&text));
                    prop_assert!(
                        !html.contains(['\u{FDD0}', '\u{FDD1}']),
                        "{engine:?}/{order:?} leaked a placeholder for {text:?}: {html:?}"
                    );
                }
            }
        }
    }
}
