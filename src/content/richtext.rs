//! Structured rich text as delivered by the content source
//!
//! A rich-text field is an ordered list of [`Block`]s. Each block holds
//! inline content made of [`TextRun`]s and links. The set of node kinds is
//! closed, so rendering is a plain `match` over every case.
//!
//! All text is escaped on output: rich text never carries raw markup.

use serde::{Deserialize, Serialize};

use super::Markup;
use crate::helpers::{html_escape, image_tag};

/// A run of text with optional inline styling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    fn render(&self, out: &mut String) {
        let mut html = html_escape(&self.text).replace('\n', "<br />");
        if self.italic {
            html = format!("<em>{}</em>", html);
        }
        if self.bold {
            html = format!("<strong>{}</strong>", html);
        }
        out.push_str(&html);
    }
}

/// Inline node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Inline {
    Text(TextRun),
    Link {
        url: String,
        #[serde(default)]
        content: Vec<TextRun>,
    },
}

impl Inline {
    fn plain_text(&self) -> String {
        match self {
            Inline::Text(run) => run.text.clone(),
            Inline::Link { content, .. } => content.iter().map(|r| r.text.as_str()).collect(),
        }
    }

    fn render(&self, out: &mut String) {
        match self {
            Inline::Text(run) => run.render(out),
            Inline::Link { url, content } => {
                let safe = is_safe_url(url);
                if safe {
                    out.push_str(&format!(r#"<a href="{}">"#, html_escape(url)));
                } else {
                    tracing::warn!("Dropping link with unsafe url: {}", url);
                }
                for run in content {
                    run.render(out);
                }
                if safe {
                    out.push_str("</a>");
                }
            }
        }
    }
}

/// Inline content of a block; a bare string is read as one unstyled run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "InlinesRepr")]
pub struct Inlines(pub Vec<Inline>);

#[derive(Deserialize)]
#[serde(untagged)]
enum InlinesRepr {
    Plain(Scalar),
    Nodes(Vec<Inline>),
}

impl From<InlinesRepr> for Inlines {
    fn from(repr: InlinesRepr) -> Self {
        match repr {
            InlinesRepr::Plain(scalar) => Inlines::from(scalar.into_text().as_str()),
            InlinesRepr::Nodes(nodes) => Inlines(nodes),
        }
    }
}

impl From<&str> for Inlines {
    fn from(text: &str) -> Self {
        Inlines(vec![Inline::Text(TextRun::plain(text))])
    }
}

impl Inlines {
    pub fn plain_text(&self) -> String {
        self.0.iter().map(Inline::plain_text).collect()
    }

    fn render(&self, out: &mut String) {
        for inline in &self.0 {
            inline.render(out);
        }
    }
}

/// Block-level node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph {
        #[serde(default)]
        content: Inlines,
    },
    Heading {
        level: u8,
        #[serde(default)]
        content: Inlines,
    },
    List {
        #[serde(default)]
        ordered: bool,
        #[serde(default)]
        items: Vec<Inlines>,
    },
    Blockquote {
        #[serde(default)]
        content: Inlines,
    },
    Preformatted {
        #[serde(default)]
        text: String,
    },
    Image {
        url: String,
        #[serde(default)]
        alt: Option<String>,
    },
}

impl Block {
    pub fn paragraph(text: &str) -> Self {
        Block::Paragraph {
            content: Inlines::from(text),
        }
    }

    /// Text of the block with all structure removed
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph { content }
            | Block::Heading { content, .. }
            | Block::Blockquote { content } => content.plain_text(),
            Block::List { items, .. } => items
                .iter()
                .map(Inlines::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Preformatted { text } => text.clone(),
            Block::Image { .. } => String::new(),
        }
    }

    fn render(&self, out: &mut String) {
        match self {
            Block::Paragraph { content } => {
                out.push_str("<p>");
                content.render(out);
                out.push_str("</p>");
            }
            Block::Heading { level, content } => {
                let level = (*level).clamp(1, 6);
                out.push_str(&format!("<h{}>", level));
                content.render(out);
                out.push_str(&format!("</h{}>", level));
            }
            Block::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                out.push_str(&format!("<{}>", tag));
                for item in items {
                    out.push_str("<li>");
                    item.render(out);
                    out.push_str("</li>");
                }
                out.push_str(&format!("</{}>", tag));
            }
            Block::Blockquote { content } => {
                out.push_str("<blockquote>");
                content.render(out);
                out.push_str("</blockquote>");
            }
            Block::Preformatted { text } => {
                out.push_str("<pre>");
                out.push_str(&html_escape(text));
                out.push_str("</pre>");
            }
            Block::Image { url, alt } => {
                if is_safe_url(url) {
                    out.push_str(r#"<p class="block-img">"#);
                    out.push_str(&image_tag(url, alt.as_deref()));
                    out.push_str("</p>");
                } else {
                    tracing::warn!("Dropping image with unsafe url: {}", url);
                }
            }
        }
    }
}

/// A rich-text field; a bare string is read as a single paragraph
///
/// Null reads as empty; numbers and booleans read as their text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<RichTextRepr>")]
pub struct RichText(pub Vec<Block>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RichTextRepr {
    Plain(Scalar),
    Blocks(Vec<Block>),
}

impl From<Option<RichTextRepr>> for RichText {
    fn from(repr: Option<RichTextRepr>) -> Self {
        match repr {
            None => RichText::default(),
            Some(RichTextRepr::Plain(scalar)) => RichText::from(scalar.into_text().as_str()),
            Some(RichTextRepr::Blocks(blocks)) => RichText(blocks),
        }
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        if text.trim().is_empty() {
            RichText::default()
        } else {
            RichText(vec![Block::paragraph(text)])
        }
    }
}

/// A YAML scalar standing where text is expected
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl Scalar {
    pub(crate) fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(x) => x.to_string(),
        }
    }
}

/// `deserialize_with` helper for plain text fields: null is empty, other
/// scalars are stringified
pub(crate) fn text_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let scalar: Option<Scalar> = Deserialize::deserialize(deserializer)?;
    Ok(scalar.map(Scalar::into_text).unwrap_or_default())
}

impl RichText {
    /// True when no block carries any text or image
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|block| match block {
            Block::Image { .. } => false,
            other => other.plain_text().trim().is_empty(),
        })
    }

    /// Text of the first block, used where a single line is needed (titles)
    pub fn first_text(&self) -> Option<String> {
        self.0
            .first()
            .map(Block::plain_text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Flatten to plain text, one line per block
    pub fn as_text(&self) -> String {
        self.0
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render to HTML, preserving block order
    pub fn render(&self) -> Markup {
        let mut out = String::new();
        for (i, block) in self.0.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            block.render(&mut out);
        }
        Markup::new(out)
    }
}

/// Reject URL schemes that would execute code when followed.
///
/// Browsers drop tabs, newlines and other control characters from URLs,
/// so they are removed before the scheme is read.
fn is_safe_url(url: &str) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_ascii_control())
        .collect::<String>()
        .trim_start()
        .to_ascii_lowercase();
    match normalized.split_once(':') {
        Some((scheme, _)) => !matches!(scheme, "javascript" | "vbscript" | "data"),
        None => true,
    }
}
