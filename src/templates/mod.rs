//! Built-in page shell and stylesheet using the Tera template engine
//!
//! Templates are embedded in the binary. The shell wraps a
//! [`RenderedDocument`] in navigation and footer chrome; it never looks
//! inside the body markup it is given.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{MenuItem, SiteConfig};
use crate::content::HeroImage;
use crate::helpers::{html_escape, meta_generator};
use crate::pipeline::{HeadTags, RenderedDocument};
use crate::theme::Palette;

/// Template renderer with the embedded folio shell
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Region markup is already HTML; text fields are escaped explicitly
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("folio/layout.html")),
            ("document.html", include_str!("folio/document.html")),
            ("work.html", include_str!("folio/work.html")),
            ("style.css", include_str!("folio/style.css")),
        ])?;

        tera.register_filter("esc", esc_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render one item's page
    pub fn render_document(&self, doc: &RenderedDocument, site: &ShellData) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("head_html", &doc.head.to_html());
        context.insert("kind", &doc.kind);
        context.insert("uid", &doc.uid);
        context.insert("regions", &doc.regions);
        self.render("document.html", &context)
    }

    /// Render the project index
    pub fn render_work_index(
        &self,
        head: &HeadTags,
        projects: &[ProjectCard],
        site: &ShellData,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("head_html", &head.to_html());
        context.insert("projects", projects);
        self.render("work.html", &context)
    }

    /// Render the stylesheet from design tokens
    pub fn render_stylesheet(&self, palette: &Palette) -> Result<String> {
        let mut context = Context::new();
        context.insert("palette", palette);
        self.render("style.css", &context)
    }
}

/// Tera filter: escape text for HTML content or attribute values
fn esc_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("esc", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Site-wide values the shell needs on every page
#[derive(Debug, Clone, Serialize)]
pub struct ShellData {
    pub language: String,
    pub owner: String,
    pub root: String,
    pub stylesheet: String,
    pub generator: String,
    pub menu: Vec<MenuItem>,
}

impl ShellData {
    pub fn from_config(config: &SiteConfig) -> Self {
        let root = if config.root.ends_with('/') {
            config.root.clone()
        } else {
            format!("{}/", config.root)
        };
        Self {
            language: config.language.clone(),
            owner: config.owner_name().to_string(),
            stylesheet: format!("{}css/style.css", root),
            root,
            generator: meta_generator(),
            menu: config.menu.clone(),
        }
    }
}

/// One entry of the project index
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub title: String,
    pub path: String,
    pub category: String,
    pub description: String,
    pub date: Option<String>,
    pub thumbnail: Option<HeroImage>,
}
