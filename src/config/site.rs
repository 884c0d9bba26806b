//! Site configuration (_config.yml)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::ContentKind;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    /// Name appended to every page title; falls back to `author`
    pub owner: Option<String>,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub post_dir: String,
    pub project_dir: String,

    // Body sources
    /// `<kind>/<uid>` -> markdown file replacing that item's live body
    #[serde(default)]
    pub body_overrides: BTreeMap<String, PathBuf>,

    // Presentation
    #[serde(default)]
    pub menu: Vec<MenuItem>,
    /// Design-token overrides merged onto the built-in palette
    #[serde(default)]
    pub palette: BTreeMap<String, String>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: "Résumé and portfolio".to_string(),
            author: "John Doe".to_string(),
            owner: None,
            language: "en".to_string(),

            url: "http://localhost:8000".to_string(),
            root: "/".to_string(),

            source_dir: "content".to_string(),
            public_dir: "public".to_string(),
            post_dir: "blog".to_string(),
            project_dir: "work".to_string(),

            body_overrides: BTreeMap::new(),

            menu: vec![
                MenuItem::new("Work", "/work/"),
                MenuItem::new("Resume", "/blog/resume/"),
            ],
            palette: BTreeMap::new(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded site config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Reject configurations that would produce blank head tags
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("author", &self.author),
        ] {
            if value.trim().is_empty() {
                bail!("_config.yml: `{}` must not be empty", key);
            }
        }
        Ok(())
    }

    /// Name shown after the page title
    pub fn owner_name(&self) -> &str {
        self.owner
            .as_deref()
            .filter(|o| !o.trim().is_empty())
            .unwrap_or(&self.author)
    }

    /// The immutable metadata record handed to the rendering pipeline
    pub fn metadata(&self) -> SiteMetadata {
        SiteMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            author: self.author.clone(),
            owner: self.owner_name().to_string(),
            work_path: self.index_path(ContentKind::Project),
        }
    }

    /// URL prefix directory for a kind
    pub fn kind_dir(&self, kind: ContentKind) -> &str {
        match kind {
            ContentKind::Post => &self.post_dir,
            ContentKind::Project => &self.project_dir,
        }
    }

    /// URL path of a kind's index page, e.g. `/work/`
    pub fn index_path(&self, kind: ContentKind) -> String {
        format!(
            "{}/{}/",
            self.root.trim_end_matches('/'),
            self.kind_dir(kind).trim_matches('/')
        )
    }

    /// URL path of one item, e.g. `/blog/resume/`
    pub fn item_path(&self, kind: ContentKind, uid: &str) -> String {
        format!("{}{}/", self.index_path(kind), uid)
    }
}

/// Site-wide strings used for head tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    pub author: String,
    pub owner: String,
    /// URL path of the project index
    pub work_path: String,
}

/// Navigation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
}

impl MenuItem {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}
