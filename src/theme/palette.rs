//! Design tokens

use serde::Serialize;
use std::collections::BTreeMap;

/// Built-in tokens; names are what the stylesheet refers to
const DEFAULT_TOKENS: &[(&str, &str)] = &[
    ("grey100", "#f5f5f5"),
    ("grey200", "#eeeeee"),
    ("grey600", "#757575"),
    ("grey700", "#616161"),
    ("grey900", "#212121"),
    ("blue100", "#e3f2fd"),
    ("blue400", "#42a5f5"),
    ("blue500", "#2196f3"),
    ("blue600", "#1e88e5"),
    ("blue700", "#1976d2"),
    ("green600", "#43a047"),
    ("text", "#333333"),
    ("background", "#ffffff"),
];

/// Mapping of semantic token name to CSS value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette(BTreeMap<String, String>);

impl Default for Palette {
    fn default() -> Self {
        Self(
            DEFAULT_TOKENS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl Palette {
    /// Built-in tokens with `overrides` applied on top
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut palette = Self::default();
        for (name, value) in overrides {
            if !palette.0.contains_key(name) {
                tracing::debug!("Palette token `{}` added by config", name);
            }
            palette.0.insert(name.clone(), value.trim().to_string());
        }
        palette
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
