//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::Kind;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub timezone: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Writing
    pub date_format: String,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub external_link: ExternalLinkConfig,

    // Home page
    #[serde(default)]
    pub home: HomeConfig,

    // Sitemap
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Coding and Life".to_string(),
            description: String::new(),
            author: String::new(),
            timezone: String::new(),

            url: "http://example.com".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            date_format: "YYYY-MM-DD".to_string(),
            highlight: HighlightConfig::default(),
            external_link: ExternalLinkConfig::default(),

            home: HomeConfig::default(),
            sitemap: SitemapConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Base URL without trailing slashes
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Highlight configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// External link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalLinkConfig {
    pub enable: bool,
    /// Hosts never treated as external
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ExternalLinkConfig {
    fn default() -> Self {
        Self {
            enable: true,
            exclude: Vec::new(),
        }
    }
}

/// Home page teaser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// Number of documents shown per kind
    pub limits: HashMap<Kind, usize>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            limits: HashMap::from([(Kind::Blog, 6), (Kind::Note, 3), (Kind::Learning, 3)]),
        }
    }
}

impl HomeConfig {
    /// Teaser size for a kind; kinds left out of the map are not truncated
    pub fn limit(&self, kind: Kind) -> Option<usize> {
        self.limits.get(&kind).copied()
    }
}

/// Sitemap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub enable: bool,
    /// Output path relative to the public directory
    pub path: String,
    /// Kinds whose documents are listed
    pub kinds: Vec<Kind>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".to_string(),
            kinds: vec![Kind::Blog, Kind::Note],
        }
    }
}
