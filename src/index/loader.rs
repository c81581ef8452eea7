//! Loading the precomputed index from disk

use std::fs;
use std::path::Path;

use super::LpIndex;
use crate::error::IndexError;
use crate::LpDocs;

/// Read and parse a single index file
pub fn read_index(path: &Path) -> Result<LpIndex, IndexError> {
    let content = fs::read_to_string(path).map_err(|source| IndexError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| IndexError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the index from `primary`, trying `fallback` once if that fails.
///
/// A failure of the fallback is returned to the caller.
pub fn load_index(primary: &Path, fallback: &Path) -> Result<LpIndex, IndexError> {
    match read_index(primary) {
        Ok(index) => {
            tracing::debug!("Loaded {} entries from {:?}", index.lps.len(), primary);
            Ok(index)
        }
        Err(e) => {
            tracing::warn!("{}; trying {:?}", e, fallback);
            let index = read_index(fallback)?;
            tracing::debug!("Loaded {} entries from {:?}", index.lps.len(), fallback);
            Ok(index)
        }
    }
}

/// Load the index from the site's configured locations
pub fn load_for_site(app: &LpDocs) -> Result<LpIndex, IndexError> {
    load_index(
        &app.base_dir.join(&app.config.index.primary),
        &app.base_dir.join(&app.config.index.fallback),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: &str = r#"{"lp_count":1,"lps":[{"number":9,"title":"Nine"}]}"#;

    #[test]
    fn test_primary_wins() {
        let dir = TempDir::new().unwrap();
        let primary = dir.path().join("a.json");
        let fallback = dir.path().join("b.json");
        fs::write(&primary, DOC).unwrap();
        fs::write(&fallback, r#"{"lps":[]}"#).unwrap();

        let index = load_index(&primary, &fallback).unwrap();
        assert_eq!(index.lps[0].number, 9);
    }

    #[test]
    fn test_missing_primary_uses_fallback() {
        let dir = TempDir::new().unwrap();
        let fallback = dir.path().join("b.json");
        fs::write(&fallback, DOC).unwrap();

        let index = load_index(&dir.path().join("missing.json"), &fallback).unwrap();
        assert_eq!(index.lps.len(), 1);
    }

    #[test]
    fn test_malformed_primary_uses_fallback() {
        let dir = TempDir::new().unwrap();
        let primary = dir.path().join("a.json");
        let fallback = dir.path().join("b.json");
        fs::write(&primary, "{ not json").unwrap();
        fs::write(&fallback, DOC).unwrap();

        assert!(load_index(&primary, &fallback).is_ok());
    }

    #[test]
    fn test_fallback_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let err = load_index(&dir.path().join("a.json"), &dir.path().join("b.json")).unwrap_err();
        match err {
            IndexError::Read { path, .. } => assert!(path.ends_with("b.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
