//! List site content

use anyhow::Result;

use crate::index::{self, apply_filters, Controls, IndexEntry};
use crate::LpDocs;

/// List site content by type
pub fn run(app: &LpDocs, content_type: &str, controls: &Controls) -> Result<()> {
    match content_type {
        "page" | "pages" => {
            let records = app.source().list_all();
            println!("Pages ({}):", records.len());
            for record in records {
                println!("  {} [{}]", record.title, record.path());
            }
        }
        "lp" | "lps" => {
            let lp_index = index::loader::load_for_site(app)?;
            let list = apply_filters(&lp_index.lps, controls);
            println!("LPs ({} of {}):", list.len(), lp_index.lps.len());
            for line in format_rows(&list) {
                println!("  {}", line);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: page, lp", content_type);
        }
    }

    Ok(())
}

/// One line per entry: number, status, type, category and title
fn format_rows(list: &[&IndexEntry]) -> Vec<String> {
    let or_dash = |v: &Option<String>| {
        v.as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("—")
            .to_string()
    };

    list.iter()
        .map(|e| {
            format!(
                "LP-{:<5} {:<10} {:<16} {:<12} {}",
                e.number,
                or_dash(&e.status),
                or_dash(&e.lp_type),
                or_dash(&e.category),
                e.title.as_deref().unwrap_or("Untitled")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_format_rows() {
        let entry = IndexEntry {
            number: 12,
            title: Some("Bridge".into()),
            status: Some("Draft".into()),
            category: Some(String::new()),
            ..Default::default()
        };
        let rows = format_rows(&[&entry]);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("LP-12"));
        assert!(rows[0].contains("Draft"));
        assert!(rows[0].contains('—'));
        assert!(rows[0].ends_with("Bridge"));
    }

    #[test]
    fn test_unknown_type() {
        let dir = TempDir::new().unwrap();
        let app = LpDocs::with_config(dir.path(), SiteConfig::default());
        assert!(run(&app, "tags", &Controls::default()).is_err());
    }

    #[test]
    fn test_list_lps_without_index_fails() {
        let dir = TempDir::new().unwrap();
        let app = LpDocs::with_config(dir.path(), SiteConfig::default());
        assert!(run(&app, "lps", &Controls::default()).is_err());
        // Pages never fail, even without a content directory
        assert!(run(&app, "pages", &Controls::default()).is_ok());
    }
}
