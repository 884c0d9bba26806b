//! Document head tags (title, description, social previews)

use serde::Serialize;

use crate::config::SiteMetadata;
use crate::helpers::{html_escape, meta_tag};

/// Which attribute a meta tag is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaAttr {
    Name,
    Property,
}

impl MetaAttr {
    fn as_str(self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }

    /// Open Graph keys use `property`, everything else `name`
    fn for_key(key: &str) -> Self {
        if key.starts_with("og:") {
            MetaAttr::Property
        } else {
            MetaAttr::Name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadTag {
    pub attr: MetaAttr,
    pub key: String,
    pub content: String,
}

/// The `<title>` plus an ordered, key-unique set of meta tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadTags {
    pub title: String,
    pub tags: Vec<HeadTag>,
}

impl HeadTags {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: Vec::new(),
        }
    }

    /// The standard set for a page: `"{title} | {owner}"`, description,
    /// Open Graph and Twitter card tags
    pub fn for_page(title: &str, description: &str, creator: &str, meta: &SiteMetadata) -> Self {
        let page_title = format!("{} | {}", title, meta.owner);
        let mut head = Self::new(page_title.clone());
        head.set("description", description);
        head.set("og:title", page_title);
        head.set("og:description", description);
        head.set("og:type", "website");
        head.set("twitter:card", "summary");
        head.set("twitter:creator", creator);
        head.set("twitter:title", meta.title.as_str());
        head.set("twitter:description", description);
        head
    }

    /// Set a meta tag, replacing any earlier value for the same key
    pub fn set(&mut self, key: &str, content: impl Into<String>) {
        let content = content.into();
        match self.tags.iter_mut().find(|t| t.key == key) {
            Some(tag) => tag.content = content,
            None => self.tags.push(HeadTag {
                attr: MetaAttr::for_key(key),
                key: key.to_string(),
                content,
            }),
        }
    }

    /// Look up a value; `title` resolves to the document title
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == "title" {
            return Some(&self.title);
        }
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.content.as_str())
    }

    /// Flat key/value view, title first
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        std::iter::once(("title", self.title.as_str()))
            .chain(self.tags.iter().map(|t| (t.key.as_str(), t.content.as_str())))
            .collect()
    }

    /// Emit the tags as HTML for the document head
    pub fn to_html(&self) -> String {
        let mut lines = vec![format!("<title>{}</title>", html_escape(&self.title))];
        lines.extend(
            self.tags
                .iter()
                .map(|t| meta_tag(t.attr.as_str(), &t.key, &t.content)),
        );
        lines.join("\n")
    }
}
