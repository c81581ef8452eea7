//! Built-in page templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping stays on for every
//! `.html` template; rendered markdown is the only value marked `safe`.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::ContentRecord;
use crate::helpers::{doc_url, url_for};
use crate::index::{Controls, IndexEntry, LpIndex, SortKey};

/// Placeholder for missing badge values
const DASH: &str = "—";

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("lp/layout.html")),
            ("home.html", include_str!("lp/home.html")),
            ("doc.html", include_str!("lp/doc.html")),
            ("lps.html", include_str!("lp/lps.html")),
            ("404.html", include_str!("lp/404.html")),
        ])?;

        tera.register_filter("or_dash", or_dash_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    pub fn render_home(&self, config: &SiteConfig, docs: &[DocLink]) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(config));
        context.insert("docs", docs);
        self.render("home.html", &context)
    }

    /// Render a document page around already-rendered markdown
    pub fn render_doc(
        &self,
        config: &SiteConfig,
        record: &ContentRecord,
        content_html: &str,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(config));
        context.insert("doc", &DocData::new(record, content_html));
        self.render("doc.html", &context)
    }

    pub fn render_not_found(&self, config: &SiteConfig, message: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(config));
        context.insert("message", message);
        self.render("404.html", &context)
    }

    /// Render the list view for an already filtered and sorted sequence
    pub fn render_list(
        &self,
        config: &SiteConfig,
        index: &LpIndex,
        list: &[&IndexEntry],
        controls: &Controls,
    ) -> Result<String> {
        let rows: Vec<RowData> = list.iter().map(|e| RowData::from_entry(e)).collect();

        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(config));
        context.insert("summary", &format!("{} result(s)", rows.len()));
        context.insert("rows", &rows);
        context.insert("controls", &ControlsData::from(controls));
        context.insert("options", &OptionsData::from_index(index));
        self.render("lps.html", &context)
    }
}

/// Tera filter: replace a missing or empty value with a dash
fn or_dash_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = match value {
        tera::Value::Null => String::new(),
        tera::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if s.is_empty() {
        Ok(tera::Value::String(DASH.to_string()))
    } else {
        Ok(tera::Value::String(s))
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub home_url: String,
    pub docs_url: String,
    pub lps_url: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            home_url: url_for(config, ""),
            docs_url: url_for(config, "docs/"),
            lps_url: url_for(config, "lps/"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocLink {
    pub title: String,
    pub url: String,
}

impl DocLink {
    pub fn new(config: &SiteConfig, record: &ContentRecord) -> Self {
        Self {
            title: record.title.clone(),
            url: doc_url(config, &record.slug),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetaField {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocData {
    pub title: String,
    pub description: Option<String>,
    pub path: String,
    pub content: String,
    /// Front-matter other than title and description
    pub metadata: Vec<MetaField>,
}

impl DocData {
    pub fn new(record: &ContentRecord, content_html: &str) -> Self {
        let metadata = record
            .metadata
            .keys()
            .filter(|k| k.as_str() != "title" && k.as_str() != "description")
            .filter_map(|k| {
                record.meta_str(k).map(|value| MetaField {
                    key: k.clone(),
                    value,
                })
            })
            .collect();

        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            path: record.path(),
            content: content_html.to_string(),
            metadata,
        }
    }
}

/// One row of the list view
#[derive(Debug, Clone, Serialize)]
pub struct RowData {
    pub num: String,
    pub status: String,
    pub type_name: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub view: String,
    pub edit: String,
    pub file: String,
    pub discussion: Option<String>,
}

impl RowData {
    pub fn from_entry(entry: &IndexEntry) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            num: format!("LP-{}", entry.number),
            status: text(&entry.status),
            type_name: text(&entry.lp_type),
            category: text(&entry.category),
            title: entry
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
            description: text(&entry.description),
            view: entry.github_view.clone(),
            edit: entry.github_edit.clone(),
            file: format!("../{}", entry.file),
            discussion: entry.discussion_url().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlsData {
    pub q: String,
    pub type_filter: String,
    pub category: String,
    pub status: String,
    pub sort: String,
}

impl From<&Controls> for ControlsData {
    fn from(controls: &Controls) -> Self {
        Self {
            q: controls.q.clone(),
            type_filter: controls.type_filter.clone(),
            category: controls.category.clone(),
            status: controls.status.clone(),
            sort: controls.sort_by.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionsData {
    pub types: Vec<String>,
    pub categories: Vec<String>,
    pub statuses: Vec<String>,
    pub sort_keys: Vec<&'static str>,
}

impl OptionsData {
    pub fn from_index(index: &LpIndex) -> Self {
        Self {
            types: index.distinct(|e| e.lp_type.as_deref()).into_iter().collect(),
            categories: index.distinct(|e| e.category.as_deref()).into_iter().collect(),
            statuses: index.distinct(|e| e.status.as_deref()).into_iter().collect(),
            sort_keys: SortKey::ALL.iter().map(|k| k.as_str()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn record() -> ContentRecord {
        let mut metadata = IndexMap::new();
        metadata.insert("title".to_string(), serde_yaml::Value::from("Overview"));
        metadata.insert("status".to_string(), serde_yaml::Value::from("Final"));
        ContentRecord {
            slug: vec!["lp-1".to_string()],
            title: "Overview".to_string(),
            description: Some("What & why".to_string()),
            body: String::new(),
            metadata,
            source: Default::default(),
        }
    }

    #[test]
    fn test_render_doc() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_doc(&SiteConfig::default(), &record(), "<p>Body</p>")
            .unwrap();
        assert!(html.contains("<h1>Overview</h1>"));
        // Text is escaped, markdown output is not
        assert!(html.contains("What &amp; why"));
        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains("<td>status</td><td>Final</td>"));
        assert!(!html.contains("<td>title</td>"));
    }

    #[test]
    fn test_render_not_found() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_not_found(&SiteConfig::default(), "No proposal lp-404")
            .unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("No proposal lp-404"));
    }

    #[test]
    fn test_row_defaults() {
        let row = RowData::from_entry(&IndexEntry {
            number: 4,
            file: "LPs/lp-4.md".to_string(),
            discussions_to: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(row.num, "LP-4");
        assert_eq!(row.title, "Untitled");
        assert_eq!(row.file, "../LPs/lp-4.md");
        assert_eq!(row.discussion, None);
    }

    #[test]
    fn test_render_list() {
        let index = LpIndex::new(vec![
            IndexEntry {
                number: 5,
                title: Some("Foo".into()),
                status: Some("Final".into()),
                discussions_to: Some("https://forum.example/5".into()),
                ..Default::default()
            },
            IndexEntry {
                number: 1,
                title: Some("Bar <b>".into()),
                ..Default::default()
            },
        ]);
        let list: Vec<&IndexEntry> = index.lps.iter().rev().collect();
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_list(&SiteConfig::default(), &index, &list, &Controls::default())
            .unwrap();

        assert!(html.contains("2 result(s)"));
        assert!(html.contains("LP-5"));
        assert!(html.contains("Bar &lt;b&gt;"));
        // Missing status renders as a dash
        assert!(html.contains(r#"<span class="status">—</span>"#));
        // Only the entry with a discussion URL gets the link
        assert_eq!(html.matches(r#"class="discussion""#).count(), 1);
        assert!(html.contains(r#"<option value="Final">Final</option>"#));
    }
}
