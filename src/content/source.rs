//! Content source - resolves slugs to proposal files in the content directory
//!
//! Every call reads from disk. There is no cache, so a resolution always
//! reflects the current state of the content directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{ContentRecord, FrontMatter};
use crate::error::ResolveError;
use crate::LpDocs;

/// Extensions tried in order when resolving a slug
const EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Resolves slugs against a flat directory of `.md`/`.mdx` files
#[derive(Debug, Clone)]
pub struct ContentSource {
    content_dir: PathBuf,
    default_slug: String,
}

impl ContentSource {
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            default_slug: "index".to_string(),
        }
    }

    /// Source configured from the site
    pub fn from_app(app: &LpDocs) -> Self {
        Self::new(&app.content_dir).with_default_slug(&app.config.default_slug)
    }

    /// Slug used when a request carries no segments
    pub fn with_default_slug(mut self, slug: &str) -> Self {
        self.default_slug = slug.to_string();
        self
    }

    /// Resolve a slug to a record.
    ///
    /// An empty slug means the default slug. `<slug>.md` is tried first,
    /// then `<slug>.mdx`; the first file that reads and parses wins.
    pub fn resolve<S: AsRef<str>>(&self, slug: &[S]) -> Result<ContentRecord, ResolveError> {
        let segments: Vec<String> = if slug.is_empty() {
            vec![self.default_slug.clone()]
        } else {
            slug.iter().map(|s| s.as_ref().to_string()).collect()
        };

        if let Some(bad) = segments.iter().find(|s| !is_valid_segment(s)) {
            return Err(ResolveError::InvalidSlug(bad.clone()));
        }

        let joined = segments.join("/");
        let mut last_error = None;

        for ext in EXTENSIONS {
            let path = self.content_dir.join(format!("{}.{}", joined, ext));
            match read_record(&path, &segments, &joined) {
                Ok(record) => return Ok(record),
                Err(ResolveError::Read { source, .. })
                    if source.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::debug!("Skipping {:?}: {}", path, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ResolveError::NotFound(joined)))
    }

    /// Resolve a slug, logging and swallowing every failure
    pub fn get<S: AsRef<str>>(&self, slug: &[S]) -> Option<ContentRecord> {
        match self.resolve(slug) {
            Ok(record) => Some(record),
            Err(e @ (ResolveError::NotFound(_) | ResolveError::InvalidSlug(_))) => {
                tracing::debug!("{}", e);
                None
            }
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }

    /// Every slug backed by a `.md` or `.mdx` file, sorted and without duplicates.
    ///
    /// The scan is not recursive. An unreadable directory yields no slugs.
    pub fn enumerate(&self) -> Vec<Vec<String>> {
        let entries = match fs::read_dir(&self.content_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Error reading content directory {:?}: {}",
                    self.content_dir,
                    e
                );
                return Vec::new();
            }
        };

        let mut slugs: Vec<Vec<String>> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter_map(|e| {
                let name = e.file_name().to_str()?.to_string();
                let stem = strip_markdown_ext(&name)?;
                Some(stem.split('/').map(String::from).collect())
            })
            .collect();

        slugs.sort();
        slugs.dedup();
        slugs
    }

    /// Resolve every enumerated slug; files that fail to resolve are omitted
    pub fn list_all(&self) -> Vec<ContentRecord> {
        self.enumerate()
            .iter()
            .filter_map(|slug| self.resolve(slug).ok())
            .collect()
    }
}

fn read_record(path: &Path, slug: &[String], joined: &str) -> Result<ContentRecord, ResolveError> {
    let content = fs::read_to_string(path).map_err(|source| ResolveError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (fm, body) = FrontMatter::parse(&content).map_err(|source| ResolveError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;

    let title = fm.title().unwrap_or_else(|| joined.to_string());
    let description = fm.description();

    Ok(ContentRecord {
        slug: slug.to_vec(),
        title,
        description,
        body: body.to_string(),
        metadata: fm.into_fields(),
        source: path.to_path_buf(),
    })
}

/// Filename without its `.md`/`.mdx` extension
fn strip_markdown_ext(name: &str) -> Option<&str> {
    EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(*ext)?.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
}

/// Reject anything that could escape the content directory
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '\0'])
}
