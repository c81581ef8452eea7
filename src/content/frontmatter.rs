//! Front-matter parsing

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::error::FrontMatterError;

/// Front-matter of a proposal file.
///
/// The header is an open key/value bag. Known proposal fields get typed
/// accessors; everything else passes through untouched in [`FrontMatter::fields`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        // The header must open on the very first line
        let Some(rest) = content.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        if !(rest.starts_with('\n') || rest.starts_with("\r\n")) {
            return Ok((FrontMatter::default(), content));
        }
        let rest = rest.trim_start_matches(['\n', '\r']);

        // An empty header closes immediately
        let (yaml_content, after) = if let Some(after) = rest.strip_prefix("---") {
            ("", after)
        } else if let Some(end_pos) = rest.find("\n---") {
            (&rest[..end_pos], &rest[end_pos + 4..])
        } else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        // Drop the remainder of the closing line
        let remaining = match after.find('\n') {
            Some(pos) => &after[pos + 1..],
            None => "",
        };

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A leading thematic break followed by prose is not a header
        if !has_yaml_structure(yaml_content) {
            return Ok((FrontMatter::default(), content));
        }

        let fields = match serde_yaml::from_str::<Value>(yaml_content)? {
            Value::Null => IndexMap::new(),
            Value::Mapping(mapping) => mapping
                .into_iter()
                .map(|(k, v)| (key_to_string(&k), v))
                .collect(),
            _ => return Err(FrontMatterError::NotAMapping),
        };

        Ok((Self { fields }, remaining))
    }

    /// Loose `key: value` reading of the header, for files whose header is
    /// not valid YAML (e.g. an unquoted title containing a colon).
    ///
    /// Each line is split on its first colon and surrounding quotes are
    /// stripped. Lines without a colon are ignored.
    pub fn parse_lines(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let Some(rest) = content.strip_prefix("---") else {
            return FrontMatter::default();
        };
        let Some(end) = rest.find("\n---") else {
            return FrontMatter::default();
        };

        let fields = rest[..end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| {
                let value = value.trim().trim_matches('"').trim_matches('\'');
                (key.trim().to_string(), Value::String(value.to_string()))
            })
            .collect();

        Self { fields }
    }

    /// Every key of the header, in file order
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> IndexMap<String, Value> {
        self.fields
    }

    /// A field rendered as text. Sequences are joined with ", ".
    /// Empty values count as absent.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .and_then(value_to_string)
            .filter(|s| !s.is_empty())
    }

    pub fn title(&self) -> Option<String> {
        self.get_str("title")
    }

    pub fn description(&self) -> Option<String> {
        self.get_str("description")
    }

    pub fn status(&self) -> Option<String> {
        self.get_str("status")
    }

    pub fn lp_type(&self) -> Option<String> {
        self.get_str("type")
    }

    pub fn category(&self) -> Option<String> {
        self.get_str("category")
    }

    pub fn author(&self) -> Option<String> {
        self.get_str("author")
    }

    pub fn created(&self) -> Option<String> {
        self.get_str("created")
    }

    pub fn discussions_to(&self) -> Option<String> {
        self.get_str("discussions-to")
    }

    pub fn requires(&self) -> Option<String> {
        self.get_str("requires")
    }

    pub fn replaces(&self) -> Option<String> {
        self.get_str("replaces")
    }
}

/// Render a scalar or a sequence of scalars as text
pub(crate) fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(seq) => Some(
            seq.iter()
                .filter_map(value_to_string)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Mapping(_) => None,
        Value::Tagged(tagged) => value_to_string(&tagged.value),
    }
}

fn key_to_string(key: &Value) -> String {
    value_to_string(key).unwrap_or_default()
}

/// At least one line must look like `key: value`.
fn has_yaml_structure(yaml: &str) -> bool {
    yaml.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        if !is_valid_key {
            return false;
        }
        let after_colon = &trimmed[colon_pos + 1..];
        after_colon.is_empty() || after_colon.starts_with(' ')
    })
}
