//! Content source - supplies content items by kind and uid

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::richtext::{text_or_null, Scalar};
use super::{BodyField, ContentItem, ContentKind, HeroImage, RichText};
use crate::helpers::parse_date_string;

/// Where content items come from
pub trait ContentSource {
    /// Every item of a kind, newest first
    fn all(&self, kind: ContentKind) -> Result<Vec<ContentItem>>;

    /// Items of a kind with the given uid (zero or more)
    fn query(&self, kind: ContentKind, uid: &str) -> Result<Vec<ContentItem>> {
        Ok(self
            .all(kind)?
            .into_iter()
            .filter(|item| item.uid == uid)
            .collect())
    }
}

/// On-disk layout of a single item document
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ItemDocument {
    #[serde(deserialize_with = "optional_text")]
    uid: Option<String>,
    title: RichText,
    category: RichText,
    #[serde(deserialize_with = "text_or_null")]
    author: String,
    #[serde(deserialize_with = "optional_text")]
    date: Option<String>,
    hero_image: Option<HeroImage>,
    hero_annotation: RichText,
    body: BodyField,
    #[serde(deserialize_with = "text_or_null")]
    preview_description: String,
    preview_thumbnail: Option<HeroImage>,
}

/// Numeric uids (`uid: 4`) are common for projects
fn optional_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let scalar: Option<Scalar> = Deserialize::deserialize(deserializer)?;
    Ok(scalar.map(Scalar::into_text))
}

/// Reads items from YAML documents under `<root>/posts` and `<root>/projects`
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Load a single item from a file
    fn load_item(&self, kind: ContentKind, path: &Path) -> Result<ContentItem> {
        let content = fs::read_to_string(path)?;
        let doc: ItemDocument = serde_yaml::from_str(&content)?;

        // uid defaults to the file name, like a permalink slug
        let uid = doc.uid.filter(|u| !u.trim().is_empty()).unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string()
        });

        let date = match doc.date {
            Some(raw) => Some(
                parse_date_string(&raw).ok_or_else(|| anyhow!("invalid date `{}`", raw))?,
            ),
            None => None,
        };

        let source = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let mut item = ContentItem::new(kind, &uid, doc.title);
        item.category = doc.category;
        item.author = doc.author;
        item.date = date;
        item.hero_image = doc.hero_image.filter(|h| !h.url.trim().is_empty());
        item.hero_annotation = doc.hero_annotation;
        item.body = doc.body;
        item.preview_description = doc.preview_description;
        item.preview_thumbnail = doc.preview_thumbnail;
        item.source = source;

        Ok(item)
    }
}

impl ContentSource for FsContentSource {
    fn all(&self, kind: ContentKind) -> Result<Vec<ContentItem>> {
        let dir = self.root.join(kind.source_dir());
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();

        for entry in WalkDir::new(&dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_yaml_file(path) {
                match self
                    .load_item(kind, path)
                    .with_context(|| format!("loading {}", path.display()))
                {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        tracing::warn!("Failed to load {} {:?}: {:#}", kind, path, e);
                    }
                }
            }
        }

        // Newest first, undated last, uid breaks ties
        items.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.uid.cmp(&b.uid)));

        tracing::debug!("Loaded {} {} item(s) from {:?}", items.len(), kind, dir);
        Ok(items)
    }
}

/// Check if a file is a YAML document
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "yml" || e == "yaml")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_items_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "projects/dm-friends.yml",
            "title: DM Friends\ndate: 2021-01-10\nbody: \"# Hi\"\n",
        );
        write(
            dir.path(),
            "projects/tangway.yaml",
            "title: TangWay'Air\ndate: 2021-02-01\n",
        );
        write(dir.path(), "projects/notes.txt", "ignored");

        let source = FsContentSource::new(dir.path());
        let items = source.all(ContentKind::Project).unwrap();
        let uids: Vec<_> = items.iter().map(|i| i.uid.as_str()).collect();
        assert_eq!(uids, ["tangway", "dm-friends"]);
        assert_eq!(items[1].body, BodyField::Markdown("# Hi".to_string()));
        assert_eq!(items[1].source, "projects/dm-friends.yml");
        assert!(source.all(ContentKind::Post).unwrap().is_empty());
    }

    #[test]
    fn test_query_by_uid() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "posts/a.yml",
            "uid: resume\ntitle: Resume\nauthor: Dana\nhero_image:\n  url: https://img.example.com/h.png\n",
        );
        write(dir.path(), "posts/b.yml", "title: Other\n");

        let source = FsContentSource::new(dir.path());
        let found = source.query(ContentKind::Post, "resume").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].author, "Dana");
        assert_eq!(
            found[0].hero_image.as_ref().map(|h| h.url.as_str()),
            Some("https://img.example.com/h.png")
        );
        assert!(source.query(ContentKind::Post, "missing").unwrap().is_empty());
    }

    #[test]
    fn test_broken_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "posts/good.yml", "title: Good\n");
        write(dir.path(), "posts/bad-date.yml", "title: Bad\ndate: someday\n");
        write(dir.path(), "posts/bad-yaml.yml", "title: [unclosed\n");

        let source = FsContentSource::new(dir.path());
        let items = source.all(ContentKind::Post).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].uid, "good");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "posts/resume.yml",
            "title: Resume\ncategory:\nhero_annotation: ~\nauthor:\nbody: null\n",
        );

        let source = FsContentSource::new(dir.path());
        let items = source.all(ContentKind::Post).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].category.is_empty());
        assert!(items[0].hero_annotation.is_empty());
        assert_eq!(items[0].author, "");
        assert_eq!(items[0].body, BodyField::Markdown(String::new()));
    }

    #[test]
    fn test_scalar_fields_read_as_text() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "projects/game.yml",
            "uid: 4\ntitle: 2048\nbody: A puzzle game\npreview_description: 3.5\n",
        );
        write(
            dir.path(),
            "projects/flag.yml",
            "title:\n  - type: paragraph\n    content: true\nbody: 42\n",
        );

        let source = FsContentSource::new(dir.path());
        let game = &source.query(ContentKind::Project, "4").unwrap()[0];
        assert_eq!(game.title_text().as_deref(), Some("2048"));
        assert_eq!(game.body, BodyField::Markdown("A puzzle game".to_string()));
        assert_eq!(game.preview_description, "3.5");

        let flag = &source.query(ContentKind::Project, "flag").unwrap()[0];
        assert_eq!(flag.title_text().as_deref(), Some("true"));
        assert_eq!(flag.body, BodyField::Markdown("42".to_string()));
    }

    #[test]
    fn test_rich_text_body() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "posts/rt.yml",
            r###"
title:
  - type: heading
    level: 1
    content: Resume
body:
  - type: paragraph
    content: "## Skills"
  - type: paragraph
    content: "- Rust"
"###,
        );

        let source = FsContentSource::new(dir.path());
        let item = &source.all(ContentKind::Post).unwrap()[0];
        assert_eq!(item.title_text().as_deref(), Some("Resume"));
        match &item.body {
            BodyField::RichText(rt) => assert_eq!(rt.as_text(), "## Skills\n- Rust"),
            other => panic!("expected rich text body, got {:?}", other),
        }
    }
}
