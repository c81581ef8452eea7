//! Index document model (`lp-index.json`)

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of the precomputed index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexEntry {
    pub number: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub lp_type: Option<String>,
    pub category: Option<String>,
    pub created: Option<String>,
    pub requires: Option<String>,
    pub replaces: Option<String>,

    /// Path of the source file, relative to the repository root
    pub file: String,
    pub github_view: String,
    pub github_edit: String,
    pub discussions_to: Option<String>,
}

impl IndexEntry {
    /// Discussion URL, treating an empty string as absent
    pub fn discussion_url(&self) -> Option<&str> {
        self.discussions_to.as_deref().filter(|s| !s.is_empty())
    }
}

/// The whole index document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LpIndex {
    #[serde(default)]
    pub lp_count: usize,
    pub lps: Vec<IndexEntry>,
}

impl LpIndex {
    pub fn new(lps: Vec<IndexEntry>) -> Self {
        Self {
            lp_count: lps.len(),
            lps,
        }
    }

    /// Distinct non-empty values of a field, for filter dropdowns
    pub fn distinct<F>(&self, field: F) -> BTreeSet<String>
    where
        F: Fn(&IndexEntry) -> Option<&str>,
    {
        self.lps
            .iter()
            .filter_map(|e| field(e))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_document() {
        let json = r#"{
  "lp_count": 2,
  "lps": [
    {"number": 5, "title": "Foo", "status": "Final", "type": "Meta",
     "file": "LPs/lp-5.md", "github_view": "v", "github_edit": "e",
     "discussions_to": ""},
    {"number": 1, "title": "Bar", "status": "Draft"}
  ]
}"#;
        let index: LpIndex = serde_json::from_str(json).unwrap();
        assert_eq!(index.lp_count, 2);
        assert_eq!(index.lps[0].lp_type.as_deref(), Some("Meta"));
        assert_eq!(index.lps[0].discussion_url(), None);
        assert_eq!(index.lps[1].number, 1);
        assert_eq!(index.lps[1].author, None);
    }

    #[test]
    fn test_lp_count_is_optional() {
        let index: LpIndex = serde_json::from_str(r#"{"lps": []}"#).unwrap();
        assert_eq!(index.lp_count, 0);
    }

    #[test]
    fn test_distinct() {
        let index = LpIndex::new(vec![
            IndexEntry {
                status: Some("Final".into()),
                ..Default::default()
            },
            IndexEntry {
                status: Some("Draft".into()),
                ..Default::default()
            },
            IndexEntry {
                status: Some("Final".into()),
                ..Default::default()
            },
            IndexEntry::default(),
        ]);
        let statuses: Vec<_> = index.distinct(|e| e.status.as_deref()).into_iter().collect();
        assert_eq!(statuses, vec!["Draft", "Final"]);
        assert_eq!(index.lp_count, 4);
    }
}
