//! Document composition

use serde::Serialize;

use super::HeadTags;
use crate::config::SiteMetadata;
use crate::content::{ContentItem, ContentKind, Markup};
use crate::helpers::display_date;

/// One section of a rendered page body, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "region", rename_all = "snake_case")]
pub enum Region {
    Category {
        html: Markup,
    },
    Title {
        html: Markup,
    },
    Metas {
        author: String,
        date: Option<String>,
        datetime: Option<String>,
    },
    Hero {
        src: String,
        alt: String,
        caption: Option<Markup>,
    },
    Body {
        html: Markup,
    },
    WorkLink {
        href: String,
        label: String,
    },
}

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Region::Category { .. } => "category",
            Region::Title { .. } => "title",
            Region::Metas { .. } => "metas",
            Region::Hero { .. } => "hero",
            Region::Body { .. } => "body",
            Region::WorkLink { .. } => "work_link",
        }
    }
}

/// Head tags plus ordered body regions for a single item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub kind: ContentKind,
    pub uid: String,
    pub head: HeadTags,
    pub regions: Vec<Region>,
}

impl RenderedDocument {
    pub fn has_hero(&self) -> bool {
        self.regions.iter().any(|r| matches!(r, Region::Hero { .. }))
    }

    pub fn region_names(&self) -> Vec<&'static str> {
        self.regions.iter().map(Region::name).collect()
    }
}

/// Assemble head tags and body regions.
///
/// The caller guarantees the item has a non-empty title.
pub fn compose_document(
    item: &ContentItem,
    meta: &SiteMetadata,
    body: Markup,
) -> RenderedDocument {
    let title_text = item.title_text().unwrap_or_default();

    let description = if item.preview_description.trim().is_empty() {
        meta.description.as_str()
    } else {
        item.preview_description.trim()
    };
    let creator = if item.author.trim().is_empty() {
        meta.author.as_str()
    } else {
        item.author.trim()
    };

    let mut head = HeadTags::for_page(&title_text, description, creator, meta);
    if let Some(hero) = &item.hero_image {
        head.set("og:image", hero.url.as_str());
    }

    let mut regions = Vec::new();

    if !item.category.is_empty() {
        regions.push(Region::Category {
            html: item.category.render(),
        });
    }

    regions.push(Region::Title {
        html: item.title.render(),
    });

    if !item.author.trim().is_empty() || item.date.is_some() {
        regions.push(Region::Metas {
            author: item.author.trim().to_string(),
            date: item.date.as_ref().map(display_date),
            datetime: item.date.as_ref().map(|d| d.to_rfc3339()),
        });
    }

    if let Some(hero) = &item.hero_image {
        let caption = Some(item.hero_annotation.render()).filter(|c| !c.is_empty());
        regions.push(Region::Hero {
            src: hero.url.clone(),
            alt: hero.alt.clone().unwrap_or_else(|| title_text.clone()),
            caption,
        });
    }

    regions.push(Region::Body { html: body });

    if item.kind == ContentKind::Project {
        regions.push(Region::WorkLink {
            href: meta.work_path.clone(),
            label: "See other work".to_string(),
        });
    }

    RenderedDocument {
        kind: item.kind,
        uid: item.uid.clone(),
        head,
        regions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{HeroImage, RichText};
    use crate::helpers::parse_date_string;

    const REQUIRED_KEYS: [&str; 9] = [
        "title",
        "description",
        "og:title",
        "og:description",
        "og:type",
        "twitter:card",
        "twitter:creator",
        "twitter:title",
        "twitter:description",
    ];

    fn meta() -> SiteMetadata {
        SiteMetadata {
            title: "Daeho's Resume".to_string(),
            description: "Front-end developer".to_string(),
            author: "site-author".to_string(),
            owner: "임대호".to_string(),
            work_path: "/work/".to_string(),
        }
    }

    fn post() -> ContentItem {
        let mut item = ContentItem::new(ContentKind::Post, "resume", RichText::from("Resume"));
        item.author = "Dana".to_string();
        item
    }

    #[test]
    fn test_head_tags_complete() {
        let doc = compose_document(&post(), &meta(), Markup::default());
        for key in REQUIRED_KEYS {
            let value = doc.head.get(key);
            assert!(
                value.map(|v| !v.is_empty()).unwrap_or(false),
                "missing {}",
                key
            );
        }
        assert_eq!(doc.head.get("title"), Some("Resume | 임대호"));
        assert_eq!(doc.head.get("og:title"), Some("Resume | 임대호"));
        assert_eq!(doc.head.get("twitter:creator"), Some("Dana"));
        assert_eq!(doc.head.get("twitter:title"), Some("Daeho's Resume"));
        assert_eq!(doc.head.get("description"), Some("Front-end developer"));
        assert_eq!(doc.head.get("og:image"), None);
    }

    #[test]
    fn test_creator_and_description_fallbacks() {
        let mut item = post();
        item.author = String::new();
        item.preview_description = "A TypeScript refactor".to_string();
        let doc = compose_document(&item, &meta(), Markup::default());
        assert_eq!(doc.head.get("twitter:creator"), Some("site-author"));
        assert_eq!(doc.head.get("og:description"), Some("A TypeScript refactor"));
        assert_eq!(doc.head.get("twitter:description"), Some("A TypeScript refactor"));
    }

    #[test]
    fn test_region_order_with_hero() {
        let mut item = post();
        item.category = RichText::from("Resume");
        item.date = parse_date_string("2021-03-05");
        item.hero_image = Some(HeroImage {
            url: "https://images.example.com/hero.png".to_string(),
            alt: None,
        });
        item.hero_annotation = RichText::from("Photo by me");

        let doc = compose_document(&item, &meta(), Markup::new("<p>body</p>"));
        assert_eq!(
            doc.region_names(),
            ["category", "title", "metas", "hero", "body"]
        );
        assert_eq!(
            doc.head.get("og:image"),
            Some("https://images.example.com/hero.png")
        );
        match &doc.regions[2] {
            Region::Metas { author, date, .. } => {
                assert_eq!(author, "Dana");
                assert_eq!(date.as_deref(), Some("March 5, 2021"));
            }
            other => panic!("expected metas, got {:?}", other),
        }
        match &doc.regions[3] {
            Region::Hero { alt, caption, .. } => {
                assert_eq!(alt, "Resume");
                assert_eq!(caption.as_ref().map(Markup::as_str), Some("<p>Photo by me</p>"));
            }
            other => panic!("expected hero, got {:?}", other),
        }
    }

    #[test]
    fn test_hero_only_when_image_present() {
        let mut item = post();
        item.hero_annotation = RichText::from("orphan caption");
        let doc = compose_document(&item, &meta(), Markup::default());
        assert!(!doc.has_hero());
        assert_eq!(doc.region_names(), ["title", "metas", "body"]);

        item.hero_image = Some(HeroImage {
            url: "/hero.png".to_string(),
            alt: Some("bees".to_string()),
        });
        item.hero_annotation = RichText::default();
        let doc = compose_document(&item, &meta(), Markup::default());
        assert!(doc.has_hero());
        assert!(matches!(
            &doc.regions[2],
            Region::Hero { caption: None, alt, .. } if alt == "bees"
        ));
    }

    #[test]
    fn test_project_ends_with_work_link() {
        let item = ContentItem::new(ContentKind::Project, "4", RichText::from("DM Friends TS.ver"));
        let doc = compose_document(&item, &meta(), Markup::new("<p>x</p>"));
        assert_eq!(doc.region_names(), ["title", "body", "work_link"]);
        assert_eq!(
            doc.regions.last(),
            Some(&Region::WorkLink {
                href: "/work/".to_string(),
                label: "See other work".to_string(),
            })
        );
    }

    #[test]
    fn test_metas_need_author_or_date() {
        let mut item = post();
        item.author = "  ".to_string();
        let doc = compose_document(&item, &meta(), Markup::default());
        assert_eq!(doc.region_names(), ["title", "body"]);

        item.date = parse_date_string("2021-03-05");
        let doc = compose_document(&item, &meta(), Markup::default());
        assert_eq!(doc.region_names(), ["title", "metas", "body"]);
        assert!(matches!(
            &doc.regions[1],
            Region::Metas { author, date: Some(date), .. } if author.is_empty() && date == "March 5, 2021"
        ));
    }
}
