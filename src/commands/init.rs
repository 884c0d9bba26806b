//! Initialize a new folio site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

const CONFIG: &str = r##"# Site
title: My Portfolio
description: Résumé and selected work
author: John Doe
# Name appended to page titles; defaults to author
owner: John Doe
language: en

# URL
url: http://localhost:4000
root: /

# Directory
source_dir: content
public_dir: public
post_dir: blog
project_dir: work

# Replace the body of an item with a local markdown file
# body_overrides:
#   post/resume: notes/resume.md

menu:
  - name: Work
    path: /work/
  - name: Resume
    path: /blog/resume/

# Design-token overrides
# palette:
#   blue700: "#1976d2"
"##;

const SAMPLE_POST: &str = r#"uid: resume
title: Resume
category: About
author: John Doe
date: 2021-03-05
preview_description: Experience, skills and education
body: |
  ## Experience

  - **Front-end developer** at Example Co.

  ## Skills

  TypeScript, React, Rust
"#;

const SAMPLE_PROJECT: &str = r#"uid: sample-project
title: Sample Project
category: Side project
author: John Doe
date: 2021-02-01
hero_image:
  url: /img/sample-project.png
  alt: Screenshot of the sample project
hero_annotation: The landing page
preview_description: A short description shown on the work index
body:
  - type: paragraph
    content: Bodies can also be written as rich-text blocks.
  - type: heading
    level: 2
    content: What I did
  - type: list
    ordered: false
    items:
      - Designed the data model
      - Built the UI
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        bail!("{:?} already exists, refusing to overwrite", config_path);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("content/projects"))?;
    fs::create_dir_all(target_dir.join("static/img"))?;

    fs::write(&config_path, CONFIG)?;
    fs::write(target_dir.join("content/posts/resume.yml"), SAMPLE_POST)?;
    fs::write(
        target_dir.join("content/projects/sample-project.yml"),
        SAMPLE_PROJECT,
    )?;

    tracing::debug!("Scaffolded site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BodyField, ContentKind, ContentSource};
    use crate::Folio;
    use tempfile::TempDir;

    #[test]
    fn test_init_scaffolds_a_loadable_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "My Portfolio");
        assert_eq!(folio.config.menu.len(), 2);

        let source = folio.content_source();
        let posts = source.all(ContentKind::Post).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].uid, "resume");

        let projects = source.all(ContentKind::Project).unwrap();
        assert_eq!(projects.len(), 1);
        assert!(projects[0].hero_image.is_some());
        assert!(matches!(projects[0].body, BodyField::RichText(_)));

        let report = folio.generate().unwrap();
        assert_eq!(report.rendered, 2);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
