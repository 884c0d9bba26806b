//! Content module - content items, rich text and markdown rendering

mod item;
mod markdown;
mod markup;
mod richtext;
pub mod source;

pub use item::{BodyField, ContentItem, ContentKind, HeroImage};
pub use markdown::{fallback_markup, MarkdownRenderer};
pub use markup::Markup;
pub use richtext::{Block, Inline, Inlines, RichText, TextRun};
pub use source::{ContentSource, FsContentSource};
