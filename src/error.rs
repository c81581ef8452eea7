//! Error types for content resolution and index loading

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a slug into a [`crate::content::ContentRecord`].
///
/// Every variant is a "not found" from the caller's point of view; the
/// distinction only matters for logging.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no .md or .mdx file for slug {0:?}")]
    NotFound(String),

    #[error("invalid slug segment {0:?}")]
    InvalidSlug(String),

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

/// Malformed YAML header.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front-matter is not a mapping")]
    NotAMapping,

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure to load the precomputed JSON index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read index {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse index {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Unrecognized sort key name.
#[derive(Debug, Error)]
#[error("unknown sort key: {0}. Available: number, title, author, description, status, type, category, created")]
pub struct UnknownSortKey(pub String);
