//! Content rendering pipeline
//!
//! Turns one [`ContentItem`] plus the site metadata into a
//! [`RenderedDocument`]: validate, pick the body source, render it, compose
//! head tags and body regions. Every step is a pure function of its inputs,
//! so items can be rendered independently and in any order.

mod body;
mod document;
mod head;

pub use body::{derive_body, render_body, BodyOverrides, BodySource};
pub use document::{compose_document, Region, RenderedDocument};
pub use head::{HeadTag, HeadTags, MetaAttr};

use thiserror::Error;

use crate::config::SiteMetadata;
use crate::content::{ContentItem, ContentKind, MarkdownRenderer};

/// Errors that stop a single item from rendering
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{kind} `{uid}` is missing required field `{field}`")]
    MissingRequiredField {
        kind: ContentKind,
        uid: String,
        field: &'static str,
    },

    #[error("no {kind} with uid `{uid}`")]
    NotFound { kind: ContentKind, uid: String },

    #[error("body override for `{key}` is unavailable: {message}")]
    Override { key: String, message: String },
}

/// Check the fields a document cannot be built without
pub fn validate(item: &ContentItem) -> Result<(), PipelineError> {
    if item.uid.trim().is_empty() {
        return Err(PipelineError::MissingRequiredField {
            kind: item.kind,
            uid: item.source.clone(),
            field: "uid",
        });
    }
    if item.title_text().is_none() {
        return Err(PipelineError::MissingRequiredField {
            kind: item.kind,
            uid: item.uid.clone(),
            field: "title",
        });
    }
    Ok(())
}

/// Take the first item a query returned
pub fn first_match(
    items: Vec<ContentItem>,
    kind: ContentKind,
    uid: &str,
) -> Result<ContentItem, PipelineError> {
    items
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::NotFound {
            kind,
            uid: uid.to_string(),
        })
}

/// Run the whole pipeline for one item
pub fn render_item(
    item: &ContentItem,
    meta: &SiteMetadata,
    overrides: &BodyOverrides,
    renderer: &MarkdownRenderer,
) -> Result<RenderedDocument, PipelineError> {
    validate(item)?;
    let source = derive_body(item, overrides)?;
    let body = render_body(&source, renderer);
    tracing::debug!(
        "Rendered {} `{}` ({} bytes of body)",
        item.kind,
        item.uid,
        body.as_str().len()
    );
    Ok(compose_document(item, meta, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BodyField, RichText};

    fn meta() -> SiteMetadata {
        SiteMetadata {
            title: "Folio".to_string(),
            description: "Portfolio".to_string(),
            author: "Dana".to_string(),
            owner: "Dana".to_string(),
            work_path: "/work/".to_string(),
        }
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let item = ContentItem::new(ContentKind::Post, "resume", RichText::default());
        let err = render_item(
            &item,
            &meta(),
            &BodyOverrides::default(),
            &MarkdownRenderer::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingRequiredField { field: "title", .. }
        ));
        assert_eq!(
            err.to_string(),
            "post `resume` is missing required field `title`"
        );
    }

    #[test]
    fn test_missing_uid_is_rejected() {
        let item = ContentItem::new(ContentKind::Project, " ", RichText::from("Title"));
        assert!(matches!(
            validate(&item),
            Err(PipelineError::MissingRequiredField { field: "uid", .. })
        ));
    }

    #[test]
    fn test_first_match() {
        let a = ContentItem::new(ContentKind::Post, "a", RichText::from("A"));
        let b = ContentItem::new(ContentKind::Post, "a", RichText::from("B"));
        let found = first_match(vec![a, b], ContentKind::Post, "a").unwrap();
        assert_eq!(found.title_text().as_deref(), Some("A"));

        let err = first_match(Vec::new(), ContentKind::Project, "9").unwrap_err();
        assert_eq!(err.to_string(), "no project with uid `9`");
    }

    #[test]
    fn test_render_item_keeps_raw_html() {
        let mut item = ContentItem::new(ContentKind::Post, "resume", RichText::from("Resume"));
        item.body = BodyField::Markdown("저는 <span>임대호</span>입니다. <b>bold</b>".to_string());
        let doc = render_item(
            &item,
            &meta(),
            &BodyOverrides::default(),
            &MarkdownRenderer::new(),
        )
        .unwrap();
        let body = doc
            .regions
            .iter()
            .find_map(|r| match r {
                Region::Body { html } => Some(html.as_str().to_string()),
                _ => None,
            })
            .unwrap();
        assert!(body.contains("<span>임대호</span>"));
        assert!(body.contains("<b>bold</b>"));
    }
}
