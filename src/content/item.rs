//! Content item model

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::richtext::Scalar;
use super::RichText;

/// The content-type collections a site is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Project,
}

impl ContentKind {
    pub const ALL: [ContentKind; 2] = [ContentKind::Post, ContentKind::Project];

    /// Directory under the content source holding this collection
    pub fn source_dir(self) -> &'static str {
        match self {
            ContentKind::Post => "posts",
            ContentKind::Project => "projects",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Post => f.write_str("post"),
            ContentKind::Project => f.write_str("project"),
        }
    }
}

impl FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" | "posts" => Ok(ContentKind::Post),
            "project" | "projects" | "work" => Ok(ContentKind::Project),
            _ => anyhow::bail!("Unknown type: {}. Available: post, project", s),
        }
    }
}

/// Lead image of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// The body of an item as stored: markdown text or a rich-text field
///
/// Null reads as an empty markdown body; numbers and booleans as their text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "Option<BodyRepr>")]
pub enum BodyField {
    Markdown(String),
    RichText(RichText),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BodyRepr {
    Markdown(Scalar),
    RichText(RichText),
}

impl From<Option<BodyRepr>> for BodyField {
    fn from(repr: Option<BodyRepr>) -> Self {
        match repr {
            None => BodyField::default(),
            Some(BodyRepr::Markdown(scalar)) => BodyField::Markdown(scalar.into_text()),
            Some(BodyRepr::RichText(rich)) => BodyField::RichText(rich),
        }
    }
}

impl Default for BodyField {
    fn default() -> Self {
        BodyField::Markdown(String::new())
    }
}

/// One addressable unit of content (a post or a project)
#[derive(Debug, Clone, Serialize)]
pub struct ContentItem {
    pub kind: ContentKind,
    /// Unique within its kind
    pub uid: String,
    pub title: RichText,
    pub category: RichText,
    pub author: String,
    pub date: Option<DateTime<FixedOffset>>,
    pub hero_image: Option<HeroImage>,
    pub hero_annotation: RichText,
    pub body: BodyField,
    pub preview_description: String,
    pub preview_thumbnail: Option<HeroImage>,
    /// Path the item was loaded from, relative to the content source
    pub source: String,
}

impl ContentItem {
    /// Create an item with only the required fields set
    pub fn new(kind: ContentKind, uid: &str, title: RichText) -> Self {
        Self {
            kind,
            uid: uid.to_string(),
            title,
            category: RichText::default(),
            author: String::new(),
            date: None,
            hero_image: None,
            hero_annotation: RichText::default(),
            body: BodyField::default(),
            preview_description: String::new(),
            preview_thumbnail: None,
            source: String::new(),
        }
    }

    /// Plain-text title (first block of the title field)
    pub fn title_text(&self) -> Option<String> {
        self.title.first_text()
    }
}
