//! Build the proposal index

use anyhow::Result;
use std::path::PathBuf;

use crate::index::{write_index, IndexBuilder};
use crate::LpDocs;

/// Scan the content directory and write the index to every configured output
pub fn run(app: &LpDocs) -> Result<()> {
    let index = IndexBuilder::for_site(app).build()?;

    let outputs: Vec<PathBuf> = app
        .config
        .index
        .outputs
        .iter()
        .map(|p| app.base_dir.join(p))
        .collect();
    if outputs.is_empty() {
        anyhow::bail!("No index outputs configured (index.outputs in _config.yml)");
    }

    write_index(&index, &outputs)?;

    let shown: Vec<_> = outputs.iter().map(|p| p.display().to_string()).collect();
    println!("Wrote {} LPs to {}", index.lps.len(), shown.join(" and "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::index::load_index;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_index_then_load() {
        let dir = TempDir::new().unwrap();
        let app = LpDocs::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(&app.content_dir).unwrap();
        fs::write(
            app.content_dir.join("lp-7.md"),
            "---\ntitle: Seven\nstatus: Review\n---\n",
        )
        .unwrap();

        run(&app).unwrap();

        let index = load_index(
            &dir.path().join(&app.config.index.primary),
            &dir.path().join(&app.config.index.fallback),
        )
        .unwrap();
        assert_eq!(index.lp_count, 1);
        assert_eq!(index.lps[0].title.as_deref(), Some("Seven"));
    }

    #[test]
    fn test_no_outputs_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.index.outputs.clear();
        let app = LpDocs::with_config(dir.path(), config);
        assert!(run(&app).is_err());
    }
}
