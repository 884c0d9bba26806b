//! Render a single item to stdout

use anyhow::Result;

use crate::content::{ContentKind, ContentSource};
use crate::generator::Generator;
use crate::pipeline::first_match;
use crate::Folio;

/// Render the page for `<kind> <uid>` and print it; with `json`, print the
/// composed document instead of the page
pub fn run(folio: &Folio, content_type: &str, uid: &str, json: bool) -> Result<()> {
    let kind: ContentKind = content_type.parse()?;
    if json {
        println!("{}", render_to_json(folio, kind, uid)?);
    } else {
        print!("{}", render_to_string(folio, kind, uid)?);
    }
    Ok(())
}

/// Query the content source for one item and render its full page
pub fn render_to_string(folio: &Folio, kind: ContentKind, uid: &str) -> Result<String> {
    let items = folio.content_source().query(kind, uid)?;
    let item = first_match(items, kind, uid)?;
    Generator::new(folio)?.render_page(&item)
}

/// Head tags and body regions of one item as pretty-printed JSON
pub fn render_to_json(folio: &Folio, kind: ContentKind, uid: &str) -> Result<String> {
    let items = folio.content_source().query(kind, uid)?;
    let item = first_match(items, kind, uid)?;
    let doc = Generator::new(folio)?.render_document(&item)?;
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_to_string() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("content/posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("resume.yml"),
            "title: Resume\nauthor: Dana\nbody: \"Hello <b>bold</b>\"\n",
        )
        .unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let html = render_to_string(&folio, ContentKind::Post, "resume").unwrap();
        assert!(html.contains("<p>Hello <b>bold</b></p>"));
        assert!(!dir.path().join("public").exists());
    }

    #[test]
    fn test_render_to_json() {
        let dir = TempDir::new().unwrap();
        let projects = dir.path().join("content/projects");
        fs::create_dir_all(&projects).unwrap();
        fs::write(projects.join("4.yml"), "title: DM Friends
body: hi
").unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let json = render_to_json(&folio, ContentKind::Project, "4").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "project");
        assert_eq!(value["head"]["title"], "DM Friends | John Doe");
        let regions = value["regions"].as_array().unwrap();
        assert_eq!(regions[0]["region"], "title");
        assert_eq!(regions.last().unwrap()["region"], "work_link");
    }

    #[test]
    fn test_unknown_uid_is_not_found() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let err = render_to_string(&folio, ContentKind::Post, "nope").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::NotFound { .. })
        ));
    }
}
