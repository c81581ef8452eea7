//! Generator module - renders pages and writes the static site

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{ContentRecord, ContentSource, MarkdownRenderer};
use crate::index::{self, Controls, LpIndex};
use crate::templates::{DocLink, TemplateRenderer};
use crate::LpDocs;

/// What a generation run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateStats {
    pub docs: usize,
    pub skipped: usize,
    pub list_view: bool,
}

/// Page renderer and static site writer
pub struct Generator {
    app: LpDocs,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &LpDocs) -> Result<Self> {
        Ok(Self {
            app: app.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_options(&app.config.highlight),
        })
    }

    /// Full HTML page for a record
    pub fn render_doc(&self, record: &ContentRecord) -> Result<String> {
        let content = self.markdown.render(&record.body)?;
        self.renderer.render_doc(&self.app.config, record, &content)
    }

    pub fn render_home(&self, records: &[ContentRecord]) -> Result<String> {
        let docs: Vec<DocLink> = records
            .iter()
            .map(|r| DocLink::new(&self.app.config, r))
            .collect();
        self.renderer.render_home(&self.app.config, &docs)
    }

    pub fn render_not_found(&self, message: &str) -> Result<String> {
        self.renderer.render_not_found(&self.app.config, message)
    }

    /// List view for one set of controls
    pub fn render_list(&self, index: &LpIndex, controls: &Controls) -> Result<String> {
        index::render_view(&self.renderer, &self.app.config, index, controls)
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<GenerateStats> {
        let public_dir = &self.app.public_dir;
        fs::create_dir_all(public_dir)?;

        let mut stats = GenerateStats::default();
        let source = ContentSource::from_app(&self.app);
        let docs_dir = public_dir.join("docs");

        // Every enumerated slug, resolved fresh
        let mut records = Vec::new();
        for slug in source.enumerate() {
            match source.resolve(&slug) {
                Ok(record) => {
                    write_page(&slug_dir(&docs_dir, &slug), &self.render_doc(&record)?)?;
                    records.push(record);
                    stats.docs += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", slug.join("/"), e);
                    stats.skipped += 1;
                }
            }
        }

        // Bare /docs/ shows the default slug
        if let Some(record) = source.get::<&str>(&[]) {
            write_page(&docs_dir, &self.render_doc(&record)?)?;
        }

        write_page(public_dir, &self.render_home(&records)?)?;
        fs::write(
            public_dir.join("404.html"),
            self.render_not_found("This proposal does not exist.")?,
        )?;

        match index::loader::load_for_site(&self.app) {
            Ok(lp_index) => {
                write_page(
                    &public_dir.join("lps"),
                    &self.render_list(&lp_index, &Controls::default())?,
                )?;
                fs::write(
                    public_dir.join("lp-index.json"),
                    serde_json::to_string_pretty(&lp_index)?,
                )?;
                stats.list_view = true;
            }
            Err(e) => {
                tracing::warn!("No proposal index, skipping list view: {}", e);
            }
        }

        tracing::info!(
            "Generated {} pages ({} skipped) into {:?}",
            stats.docs,
            stats.skipped,
            public_dir
        );
        Ok(stats)
    }
}

/// Output directory of a slug: `<docs>/<seg>/<seg>/`
fn slug_dir(docs_dir: &Path, slug: &[String]) -> PathBuf {
    slug.iter().fold(docs_dir.to_path_buf(), |dir, seg| dir.join(seg))
}

/// Write `index.html` inside `dir`
fn write_page(dir: &Path, html: &str) -> Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join("index.html"), html)?;
    Ok(())
}
