//! Builds `lp-index.json` from the proposal files

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use super::{IndexEntry, LpIndex};
use crate::config::IndexConfig;
use crate::content::FrontMatter;
use crate::LpDocs;

lazy_static! {
    static ref LP_FILE: Regex = Regex::new(r"^lp-(\d+)\.md$").unwrap();
}

/// Collects index entries from `lp-<n>.md` files
pub struct IndexBuilder<'a> {
    content_dir: PathBuf,
    config: &'a IndexConfig,
}

impl<'a> IndexBuilder<'a> {
    pub fn new<P: AsRef<Path>>(content_dir: P, config: &'a IndexConfig) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            config,
        }
    }

    pub fn for_site(app: &'a LpDocs) -> Self {
        Self::new(&app.content_dir, &app.config.index)
    }

    /// Scan the content directory. A missing directory gives an empty index.
    pub fn build(&self) -> Result<LpIndex> {
        if !self.content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", self.content_dir);
            return Ok(LpIndex::default());
        }

        let mut lps = Vec::new();
        for entry in fs::read_dir(&self.content_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            let Some(number) = LP_FILE
                .captures(&name)
                .and_then(|c| c[1].parse::<u32>().ok())
            else {
                continue;
            };
            match self.entry_for(&entry.path(), &name, number) {
                Ok(lp) => lps.push(lp),
                Err(e) => tracing::warn!("Skipping {:?}: {}", entry.path(), e),
            }
        }

        lps.sort_by_key(|lp| lp.number);
        tracing::debug!("Indexed {} proposals", lps.len());
        Ok(LpIndex::new(lps))
    }

    fn entry_for(&self, path: &Path, name: &str, number: u32) -> Result<IndexEntry> {
        let content = fs::read_to_string(path)?;
        let fm = match FrontMatter::parse(&content) {
            Ok((fm, _)) => fm,
            Err(e) => {
                tracing::warn!("Bad front-matter in {:?}, reading it line by line: {}", path, e);
                FrontMatter::parse_lines(&content)
            }
        };

        let rel = format!("{}/{}", self.dir_name(), name);
        let text = |v: Option<String>| Some(v.unwrap_or_default());

        Ok(IndexEntry {
            number,
            title: Some(fm.title().unwrap_or_else(|| "Untitled".to_string())),
            author: text(fm.author()),
            description: text(fm.description()),
            status: text(fm.status()),
            lp_type: text(fm.lp_type()),
            category: text(fm.category()),
            created: text(fm.created()),
            requires: text(fm.requires()),
            replaces: text(fm.replaces()),
            github_view: format!("{}/blob/{}/{}", self.repo_url(), self.config.branch, rel),
            github_edit: format!("{}/edit/{}/{}", self.repo_url(), self.config.branch, rel),
            file: rel,
            discussions_to: text(fm.discussions_to()),
        })
    }

    /// Last component of the content directory, as it appears in the repository
    fn dir_name(&self) -> String {
        self.content_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "LPs".to_string())
    }

    fn repo_url(&self) -> &str {
        self.config.repo_url.trim_end_matches('/')
    }
}

/// Write the index as pretty JSON to every path, creating parent directories
pub fn write_index(index: &LpIndex, outputs: &[PathBuf]) -> Result<()> {
    let json = serde_json::to_string_pretty(index)?;
    for out in outputs {
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(out, &json)?;
        tracing::debug!("Wrote {:?}", out);
    }
    Ok(())
}
