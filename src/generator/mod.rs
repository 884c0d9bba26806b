//! Generator module - writes the static site using the built-in Tera shell

use anyhow::{Context as _, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteMetadata;
use crate::content::{ContentItem, ContentKind, ContentSource, MarkdownRenderer};
use crate::helpers::display_date;
use crate::pipeline::{self, BodyOverrides, HeadTags, RenderedDocument};
use crate::templates::{ProjectCard, ShellData, TemplateRenderer};
use crate::theme::{copy_static, Palette};
use crate::Folio;

/// Outcome of a full generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Item pages written
    pub rendered: usize,
    /// Items that could not be rendered
    pub failed: usize,
    /// Static files copied
    pub assets: usize,
}

impl GenerateReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Static site generator
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    overrides: BodyOverrides,
    meta: SiteMetadata,
    shell: ShellData,
}

impl Generator {
    /// Create a new generator; body override files are read here, once
    pub fn new(folio: &Folio) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let overrides = BodyOverrides::load(&folio.base_dir, &folio.config.body_overrides);

        Ok(Self {
            folio: folio.clone(),
            renderer,
            markdown: MarkdownRenderer::new(),
            overrides,
            meta: folio.config.metadata(),
            shell: ShellData::from_config(&folio.config),
        })
    }

    /// Replace the configured body overrides
    pub fn with_overrides(mut self, overrides: BodyOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Generate the entire site from `source`.
    ///
    /// An item that fails to render is logged and counted; the rest of the
    /// site is still written.
    pub fn generate(&self, source: &dyn ContentSource) -> Result<GenerateReport> {
        let public_dir = &self.folio.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create dir {:?}", public_dir))?;

        let mut report = GenerateReport {
            assets: copy_static(&self.folio.static_dir, public_dir)?,
            ..Default::default()
        };

        self.generate_stylesheet()?;

        for kind in ContentKind::ALL {
            let items = source.all(kind)?;
            let mut seen = HashSet::new();
            let mut written = Vec::new();

            for item in &items {
                if !seen.insert(item.uid.clone()) {
                    tracing::warn!(
                        "Duplicate {} uid `{}` in {}, keeping the first",
                        kind,
                        item.uid,
                        item.source
                    );
                    continue;
                }

                match self.generate_item(item) {
                    Ok(path) => {
                        tracing::debug!("Generated {}: {:?}", kind, path);
                        report.rendered += 1;
                        written.push(item);
                    }
                    Err(e) => {
                        tracing::error!("Failed to render {} `{}`: {:#}", kind, item.uid, e);
                        report.failed += 1;
                    }
                }
            }

            if kind == ContentKind::Project {
                self.generate_work_index(&written)?;
            }
        }

        Ok(report)
    }

    /// Render one item through the pipeline and the page shell
    pub fn render_page(&self, item: &ContentItem) -> Result<String> {
        let doc = self.render_document(item)?;
        self.renderer.render_document(&doc, &self.shell)
    }

    /// Run the content pipeline for one item
    pub fn render_document(
        &self,
        item: &ContentItem,
    ) -> Result<RenderedDocument, pipeline::PipelineError> {
        pipeline::render_item(item, &self.meta, &self.overrides, &self.markdown)
    }

    fn generate_item(&self, item: &ContentItem) -> Result<PathBuf> {
        let html = self.render_page(item)?;
        let url_path = self.folio.config.item_path(item.kind, &item.uid);
        let output_path = self.output_path(&url_path);
        write_page(&output_path, &html)?;
        Ok(output_path)
    }

    /// Generate the project index page
    fn generate_work_index(&self, projects: &[&ContentItem]) -> Result<()> {
        let cards: Vec<ProjectCard> = projects.iter().map(|p| self.project_card(p)).collect();

        let head = HeadTags::for_page(
            "Work",
            &self.meta.description,
            &self.meta.author,
            &self.meta,
        );
        let html = self.renderer.render_work_index(&head, &cards, &self.shell)?;

        let output_path = self.output_path(&self.folio.config.index_path(ContentKind::Project));
        write_page(&output_path, &html)?;
        tracing::debug!("Generated work index with {} project(s)", cards.len());
        Ok(())
    }

    fn project_card(&self, item: &ContentItem) -> ProjectCard {
        ProjectCard {
            title: item.title_text().unwrap_or_default(),
            path: self.folio.config.item_path(item.kind, &item.uid),
            category: item.category.first_text().unwrap_or_default(),
            description: item.preview_description.trim().to_string(),
            date: item.date.as_ref().map(display_date),
            thumbnail: item
                .preview_thumbnail
                .clone()
                .or_else(|| item.hero_image.clone()),
        }
    }

    /// Write `css/style.css` from the configured palette
    fn generate_stylesheet(&self) -> Result<()> {
        let palette = Palette::with_overrides(&self.folio.config.palette);
        let css = self.renderer.render_stylesheet(&palette)?;
        write_page(&self.folio.public_dir.join("css").join("style.css"), &css)
    }

    /// Map a URL path like `/work/4/` to `<public>/work/4/index.html`
    fn output_path(&self, url_path: &str) -> PathBuf {
        let root = self.folio.config.root.trim_end_matches('/');
        let relative = url_path
            .strip_prefix(root)
            .unwrap_or(url_path)
            .trim_matches('/');
        self.folio.public_dir.join(relative).join("index.html")
    }
}

fn write_page(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}
