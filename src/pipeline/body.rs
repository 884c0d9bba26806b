//! Body source selection and rendering

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::PipelineError;
use crate::content::{BodyField, ContentItem, ContentKind, Markup, MarkdownRenderer};

/// Where a document's body text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    /// The item's own body field
    Live(BodyField),
    /// A literal configured to replace the live field
    Override(String),
}

impl BodySource {
    /// Markdown text of the body; rich text is flattened one line per block
    pub fn markdown(&self) -> Cow<'_, str> {
        match self {
            BodySource::Live(BodyField::Markdown(text)) => Cow::Borrowed(text),
            BodySource::Live(BodyField::RichText(rich)) => Cow::Owned(rich.as_text()),
            BodySource::Override(text) => Cow::Borrowed(text),
        }
    }
}

/// Body literals that replace the live field of specific items.
///
/// Keys are `<kind>/<uid>`. Files are read once up front; a file that
/// cannot be read fails only the item it belongs to.
#[derive(Debug, Clone, Default)]
pub struct BodyOverrides {
    entries: BTreeMap<String, Result<String, String>>,
}

impl BodyOverrides {
    /// Read every configured override file, relative to `base_dir`.
    ///
    /// Keys that are not `post/<uid>` or `project/<uid>` are skipped.
    pub fn load(base_dir: &Path, paths: &BTreeMap<String, PathBuf>) -> Self {
        let mut entries = BTreeMap::new();
        for (key, rel) in paths {
            let Some((kind, uid)) = parse_override_key(key) else {
                tracing::warn!(
                    "Ignoring body override `{}`: expected `post/<uid>` or `project/<uid>`",
                    key
                );
                continue;
            };
            let key = override_key(kind, uid);
            let path = base_dir.join(rel);
            let entry = fs::read_to_string(&path).map_err(|e| {
                tracing::warn!("Cannot read body override {:?} for {}: {}", path, key, e);
                format!("{}: {}", path.display(), e)
            });
            if entry.is_ok() {
                tracing::debug!("Body of {} overridden by {:?}", key, path);
            }
            entries.insert(key, entry);
        }
        Self { entries }
    }

    /// Register a literal override
    pub fn insert(&mut self, kind: ContentKind, uid: &str, literal: impl Into<String>) {
        self.entries
            .insert(override_key(kind, uid), Ok(literal.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, kind: ContentKind, uid: &str) -> Option<&Result<String, String>> {
        self.entries.get(&override_key(kind, uid))
    }
}

fn override_key(kind: ContentKind, uid: &str) -> String {
    format!("{}/{}", kind, uid)
}

/// Split a configured key into its kind and uid
fn parse_override_key(key: &str) -> Option<(ContentKind, &str)> {
    let (kind, uid) = key.trim().split_once('/')?;
    let uid = uid.trim();
    if uid.is_empty() || uid.contains('/') {
        return None;
    }
    Some((kind.trim().parse().ok()?, uid))
}

/// Pick the body source for an item: its override if one is configured,
/// otherwise the live field
pub fn derive_body(
    item: &ContentItem,
    overrides: &BodyOverrides,
) -> Result<BodySource, PipelineError> {
    match overrides.lookup(item.kind, &item.uid) {
        Some(Ok(literal)) => Ok(BodySource::Override(literal.clone())),
        Some(Err(message)) => Err(PipelineError::Override {
            key: override_key(item.kind, &item.uid),
            message: message.clone(),
        }),
        None => Ok(BodySource::Live(item.body.clone())),
    }
}

/// Render a body source to HTML
pub fn render_body(source: &BodySource, renderer: &MarkdownRenderer) -> Markup {
    renderer.render(&source.markdown())
}
