//! Markdown rendering

use pulldown_cmark::{html, Options, Parser};
use std::fmt;

use super::Markup;
use crate::helpers::html_escape;

/// Markdown renderer with GitHub-flavoured extensions.
///
/// Raw HTML embedded in the source is passed through untouched: bodies come
/// from the site's own content source, never from visitors.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_FOOTNOTES,
        }
    }

    /// Render markdown to HTML.
    ///
    /// Never fails: if the HTML writer errors, the source is shown as
    /// escaped preformatted text instead.
    pub fn render(&self, markdown: &str) -> Markup {
        if markdown.trim().is_empty() {
            return Markup::default();
        }

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        match self.render_into(&mut html_output, markdown) {
            Ok(()) => Markup::new(html_output),
            Err(e) => {
                tracing::warn!("Markdown rendering failed ({}), emitting raw source", e);
                fallback_markup(markdown)
            }
        }
    }

    /// Stream rendered HTML into any writer
    pub fn render_into<W: fmt::Write>(&self, writer: W, markdown: &str) -> fmt::Result {
        let parser = Parser::new_ext(markdown, self.options);
        html::write_html_fmt(writer, parser)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Escaped, preformatted copy of a body that could not be rendered
pub fn fallback_markup(source: &str) -> Markup {
    Markup::new(format!(
        "<pre class=\"raw-body\">{}</pre>\n",
        html_escape(source)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenWriter;

    impl fmt::Write for BrokenWriter {
        fn write_str(&mut self, _s: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.as_str().contains("<h1>Hello World</h1>"));
        assert!(html.as_str().contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Hello <b>bold</b> and <span>name</span>");
        assert!(html.as_str().contains("<b>bold</b>"));
        assert!(html.as_str().contains("<span>name</span>"));
    }

    #[test]
    fn test_raw_html_block_passes_through() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("<details>\n  <summary><b>Self-Interview</b></summary>\n</details>\n");
        assert!(html.as_str().contains("<summary><b>Self-Interview</b></summary>"));
    }

    #[test]
    fn test_tables_and_task_lists() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n- [ ] todo\n");
        assert!(html.as_str().contains("<table>"));
        assert!(html.as_str().contains("<td>1</td>"));
        assert!(html.as_str().contains(r#"type="checkbox""#));
        assert!(html.as_str().contains("checked"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::new();
        let source = "## Skills\n\n> **React** hooks\n\n~~old~~ new";
        assert_eq!(renderer.render(source), renderer.render(source));
    }

    #[test]
    fn test_empty_source_renders_nothing() {
        let renderer = MarkdownRenderer::new();
        assert!(renderer.render("").is_empty());
        assert!(renderer.render(" \n\n ").as_str().is_empty());
    }

    #[test]
    fn test_writer_failure_surfaces() {
        let renderer = MarkdownRenderer::new();
        assert!(renderer.render_into(BrokenWriter, "# Title").is_err());
    }

    #[test]
    fn test_fallback_escapes_source() {
        let html = fallback_markup("<b>x</b> & y");
        assert_eq!(
            html.as_str(),
            "<pre class=\"raw-body\">&lt;b&gt;x&lt;/b&gt; &amp; y</pre>\n"
        );
    }
}
