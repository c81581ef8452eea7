//! Content record model

use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

/// One parsed proposal file
#[derive(Debug, Clone, Serialize)]
pub struct ContentRecord {
    /// Path segments, derived from the file's relative path without extension
    pub slug: Vec<String>,

    /// Front-matter title, or the filename without extension
    pub title: String,

    pub description: Option<String>,

    /// Raw markdown after the front-matter
    pub body: String,

    /// The full front-matter, `title` and `description` included
    pub metadata: IndexMap<String, serde_yaml::Value>,

    /// File the record was read from
    #[serde(skip)]
    pub source: PathBuf,
}

impl ContentRecord {
    /// Slug joined back into a URL path ("a/b")
    pub fn path(&self) -> String {
        self.slug.join("/")
    }

    /// A front-matter value rendered as text
    pub fn meta_str(&self, key: &str) -> Option<String> {
        self.metadata
            .get(key)
            .and_then(super::frontmatter::value_to_string)
            .filter(|s| !s.is_empty())
    }
}
