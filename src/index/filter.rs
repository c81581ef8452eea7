//! Filtering and sorting of index entries
//!
//! Every call recomputes the view from the full index; nothing is retained
//! between calls and the index itself is never modified.

use deunicode::deunicode;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::IndexEntry;
use crate::error::UnknownSortKey;

/// Field the filtered view is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortKey {
    #[default]
    Number,
    Title,
    Author,
    Description,
    Status,
    Type,
    Category,
    Created,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::Number,
        SortKey::Title,
        SortKey::Author,
        SortKey::Description,
        SortKey::Status,
        SortKey::Type,
        SortKey::Category,
        SortKey::Created,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Number => "number",
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Description => "description",
            SortKey::Status => "status",
            SortKey::Type => "type",
            SortKey::Category => "category",
            SortKey::Created => "created",
        }
    }

    /// Text value of the key's field; missing fields compare as ""
    fn text<'a>(&self, entry: &'a IndexEntry) -> &'a str {
        let field = match self {
            SortKey::Number => None,
            SortKey::Title => entry.title.as_deref(),
            SortKey::Author => entry.author.as_deref(),
            SortKey::Description => entry.description.as_deref(),
            SortKey::Status => entry.status.as_deref(),
            SortKey::Type => entry.lp_type.as_deref(),
            SortKey::Category => entry.category.as_deref(),
            SortKey::Created => entry.created.as_deref(),
        };
        field.unwrap_or("")
    }

    fn compare(&self, a: &IndexEntry, b: &IndexEntry) -> Ordering {
        match self {
            SortKey::Number => a.number.cmp(&b.number),
            _ => compare_text(self.text(a), self.text(b)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(SortKey::default());
        }
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

impl TryFrom<String> for SortKey {
    type Error = UnknownSortKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

/// The five list controls. Empty values disable their filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// Free-text query
    pub q: String,
    #[serde(rename = "type")]
    pub type_filter: String,
    pub category: String,
    pub status: String,
    /// Unknown keys fall back to the default order
    #[serde(rename = "sort", deserialize_with = "sort_key_or_default")]
    pub sort_by: SortKey,
}

fn sort_key_or_default<'de, D>(deserializer: D) -> Result<SortKey, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or_else(|e: UnknownSortKey| {
        tracing::debug!("{}, sorting by {}", e, SortKey::default());
        SortKey::default()
    }))
}

impl Controls {
    fn matches(&self, entry: &IndexEntry, query: &str) -> bool {
        let match_q = query.is_empty() || haystack(entry).contains(query);
        let match_t = exact(&self.type_filter, entry.lp_type.as_deref());
        let match_c = exact(&self.category, entry.category.as_deref());
        let match_s = exact(&self.status, entry.status.as_deref());
        match_q && match_t && match_c && match_s
    }
}

/// Entries passing every active control, ordered by the sort key.
pub fn apply_filters<'a>(entries: &'a [IndexEntry], controls: &Controls) -> Vec<&'a IndexEntry> {
    let query = controls.q.to_lowercase();

    let mut list: Vec<&IndexEntry> = entries
        .iter()
        .filter(|e| controls.matches(e, &query))
        .collect();

    list.sort_by(|a, b| controls.sort_by.compare(a, b));
    list
}

/// Lowercased "title author description number"
fn haystack(entry: &IndexEntry) -> String {
    format!(
        "{} {} {} {}",
        entry.title.as_deref().unwrap_or(""),
        entry.author.as_deref().unwrap_or(""),
        entry.description.as_deref().unwrap_or(""),
        entry.number
    )
    .to_lowercase()
}

fn exact(control: &str, value: Option<&str>) -> bool {
    control.is_empty() || value == Some(control)
}

/// Collation-like ordering: base letters first (accents and case folded
/// away), then accents, then the original text.
fn compare_text(a: &str, b: &str) -> Ordering {
    deunicode(a)
        .to_lowercase()
        .cmp(&deunicode(b).to_lowercase())
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(number: u32, title: &str, status: &str) -> IndexEntry {
        IndexEntry {
            number,
            title: Some(title.to_string()),
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<IndexEntry> {
        vec![
            IndexEntry {
                author: Some("Alice Example".into()),
                lp_type: Some("Standards Track".into()),
                category: Some("Core".into()),
                ..entry(20, "Token Standard", "Final")
            },
            IndexEntry {
                description: Some("Proposed by ALICE's team".into()),
                lp_type: Some("Meta".into()),
                ..entry(3, "process", "Draft")
            },
            IndexEntry {
                author: Some("Bob".into()),
                lp_type: Some("Standards Track".into()),
                category: Some("Networking".into()),
                ..entry(11, "Gossip", "Draft")
            },
            IndexEntry {
                lp_type: Some("Standards Track".into()),
                category: Some("Core".into()),
                ..entry(7, "Consensus", "Draft")
            },
        ]
    }

    fn numbers(list: &[&IndexEntry]) -> Vec<u32> {
        list.iter().map(|e| e.number).collect()
    }

    #[test]
    fn test_defaults_return_everything_by_number() {
        let index = sample();
        let list = apply_filters(&index, &Controls::default());
        assert_eq!(numbers(&list), vec![3, 7, 11, 20]);
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let index = sample();
        let controls = Controls {
            q: "alice".into(),
            ..Default::default()
        };
        // Author of 20, description of 3
        assert_eq!(numbers(&apply_filters(&index, &controls)), vec![3, 20]);
    }

    #[test]
    fn test_query_matches_number() {
        let index = sample();
        let controls = Controls {
            q: "11".into(),
            ..Default::default()
        };
        assert_eq!(numbers(&apply_filters(&index, &controls)), vec![11]);
    }

    #[test]
    fn test_filters_are_intersection() {
        let index = sample();
        let controls = Controls {
            type_filter: "Standards Track".into(),
            status: "Draft".into(),
            ..Default::default()
        };
        assert_eq!(numbers(&apply_filters(&index, &controls)), vec![7, 11]);

        let controls = Controls {
            category: "Core".into(),
            ..controls
        };
        assert_eq!(numbers(&apply_filters(&index, &controls)), vec![7]);
    }

    #[test]
    fn test_categorical_filter_is_exact() {
        let index = sample();
        let controls = Controls {
            status: "draft".into(),
            ..Default::default()
        };
        assert!(apply_filters(&index, &controls).is_empty());
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let index = sample();
        let controls = Controls {
            sort_by: SortKey::Title,
            ..Default::default()
        };
        let titles: Vec<_> = apply_filters(&index, &controls)
            .iter()
            .map(|e| e.title.clone().unwrap())
            .collect();
        assert_eq!(titles, vec!["Consensus", "Gossip", "process", "Token Standard"]);
    }

    #[test]
    fn test_sort_by_author_folds_accents() {
        let index: Vec<_> = ["Zed", "Émile", "Eve", "emile"]
            .iter()
            .enumerate()
            .map(|(i, author)| IndexEntry {
                author: Some(author.to_string()),
                ..entry(i as u32, "T", "Draft")
            })
            .collect();
        let controls = Controls {
            sort_by: SortKey::Author,
            ..Default::default()
        };
        let authors: Vec<_> = apply_filters(&index, &controls)
            .iter()
            .map(|e| e.author.clone().unwrap())
            .collect();
        assert_eq!(authors, vec!["emile", "Émile", "Eve", "Zed"]);
    }

    #[test]
    fn test_sort_by_missing_field_sorts_first() {
        let index = sample();
        let controls = Controls {
            sort_by: SortKey::Category,
            ..Default::default()
        };
        assert_eq!(numbers(&apply_filters(&index, &controls))[0], 3);
    }

    #[test]
    fn test_number_sort_ignores_other_fields() {
        let index = vec![
            entry(100, "A", "Final"),
            entry(2, "Z", "Draft"),
            entry(30, "M", "Review"),
        ];
        let list = apply_filters(&index, &Controls::default());
        assert_eq!(numbers(&list), vec![2, 30, 100]);
    }

    #[test]
    fn test_index_is_not_mutated() {
        let index = sample();
        let before = index.clone();
        let _ = apply_filters(
            &index,
            &Controls {
                sort_by: SortKey::Title,
                ..Default::default()
            },
        );
        assert_eq!(index, before);
    }

    #[test]
    fn test_end_to_end_examples() {
        let index: super::super::LpIndex = serde_json::from_str(
            r#"{"lps":[{"number":5,"title":"Foo","status":"Final"},{"number":1,"title":"Bar","status":"Draft"}]}"#,
        )
        .unwrap();

        let controls = Controls {
            status: "Final".into(),
            sort_by: SortKey::Number,
            ..Default::default()
        };
        assert_eq!(numbers(&apply_filters(&index.lps, &controls)), vec![5]);

        let controls = Controls {
            q: "bar".into(),
            ..Default::default()
        };
        assert_eq!(numbers(&apply_filters(&index.lps, &controls)), vec![1]);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("number".parse::<SortKey>().unwrap(), SortKey::Number);
        assert_eq!("Type".parse::<SortKey>().unwrap(), SortKey::Type);
        assert_eq!("".parse::<SortKey>().unwrap(), SortKey::Number);
        assert!("size".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_controls_from_json() {
        let controls: Controls =
            serde_json::from_str(r#"{"q":"x","type":"Meta","sort":"title"}"#).unwrap();
        assert_eq!(controls.type_filter, "Meta");
        assert_eq!(controls.sort_by, SortKey::Title);
        assert_eq!(controls.status, "");
    }

    #[test]
    fn test_unknown_sort_falls_back_to_number() {
        let controls: Controls =
            serde_json::from_str(r#"{"status":"Final","sort":"bogus"}"#).unwrap();
        assert_eq!(controls.sort_by, SortKey::Number);
        assert_eq!(controls.status, "Final");
    }
}
