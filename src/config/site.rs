//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,

    // URL
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    /// Slug resolved when a docs route carries no path
    pub default_slug: String,

    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Lux Proposals (LPs)".to_string(),
            description: "Standards and improvement proposals for the Lux Network".to_string(),

            root: "/".to_string(),

            content_dir: "LPs".to_string(),
            public_dir: "public".to_string(),

            default_slug: "index".to_string(),

            index: IndexConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Where the JSON index is read from and written to, and how its links are built
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Tried first when loading
    pub primary: String,
    /// Tried once if the primary path fails
    pub fallback: String,
    /// Every path the `index` command writes
    pub outputs: Vec<String>,
    pub repo_url: String,
    pub branch: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            primary: "docs/site/lp-index.json".to_string(),
            fallback: "docs/lp-index.json".to_string(),
            outputs: vec![
                "docs/lp-index.json".to_string(),
                "docs/site/lp-index.json".to_string(),
            ],
            repo_url: "https://github.com/luxfi/LPs".to_string(),
            branch: "main".to_string(),
        }
    }
}

/// Code block highlighting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
    /// Language assumed for fences without one
    pub default_lang: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
            default_lang: "solidity".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "LPs");
        assert_eq!(config.default_slug, "index");
        assert_eq!(config.index.fallback, "docs/lp-index.json");
        assert_eq!(config.highlight.default_lang, "solidity");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Proposals
content_dir: ../LPs
index:
  primary: site/index.json
  branch: develop
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Proposals");
        assert_eq!(config.content_dir, "../LPs");
        assert_eq!(config.index.primary, "site/index.json");
        assert_eq!(config.index.branch, "develop");
        // Untouched fields keep their defaults
        assert_eq!(config.index.fallback, "docs/lp-index.json");
        assert_eq!(config.public_dir, "public");
    }
}
