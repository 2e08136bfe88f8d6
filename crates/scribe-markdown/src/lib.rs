//! Constrained markdown-to-HTML renderer for chat and document views.
//!
//! Supported syntax is deliberately small: fenced code blocks, pipe tables,
//! links, bold, italic, inline code and flat lists. Everything else is kept
//! as text, with newlines turned into `<br />`.
//!
//! # Architecture
//!
//! Two engines produce the same markup for ordinary input:
//! - [`Engine::Staged`]: ordered substitution [`Stage`]s over a working text
//!   in which all generated markup is replaced by opaque placeholders
//! - [`Engine::Tree`]: a block and inline tokenizer (see [`tree`]) followed by
//!   a renderer
//!
//! Both share the markup writer, the line-break normalization and the final
//! placeholder expansion.
//!
//! # Example
//!
//! ```
//! use scribe_markdown::{ClassMap, MarkdownRenderer};
//!
//! let html = scribe_markdown::render(Some("**Bold** and `code`"));
//! assert_eq!(html, "<strong>Bold</strong> and <code>code</code>");
//!
//! let renderer = MarkdownRenderer::new().with_classes(ClassMap::tailwind());
//! let html = renderer.render(Some("- item"));
//! assert!(html.starts_with("<ul class="));
//! ```

mod escape;
mod html;
mod options;
mod renderer;
mod shield;
mod stages;
pub mod tree;

pub use escape::escape_code;
pub use options::{ClassMap, ElementKind, Engine, InlineOrder, RenderOptions, Theme};
pub use renderer::MarkdownRenderer;
pub use stages::Stage;

/// Render `text` with default options.
///
/// Absent or empty input yields an empty string.
pub fn render(text: Option<&str>) -> String {
    MarkdownRenderer::new().render(text)
}
