//! List site content

use anyhow::Result;
use std::fmt::Write as _;

use crate::content::{ContentItem, ContentKind, ContentSource};
use crate::Folio;

/// Print the items of one kind
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let kind: ContentKind = content_type.parse()?;
    let items = folio.content_source().all(kind)?;
    print!("{}", format_listing(folio, kind, &items));
    Ok(())
}

/// One line per item: date, title, URL path and source file
pub fn format_listing(folio: &Folio, kind: ContentKind, items: &[ContentItem]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}s ({}):", capitalize(&kind.to_string()), items.len());
    for item in items {
        let date = item
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let _ = writeln!(
            out,
            "  {} - {} {} [{}]",
            date,
            item.title_text().unwrap_or_else(|| "(untitled)".to_string()),
            folio.config.item_path(kind, &item.uid),
            item.source
        );
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
