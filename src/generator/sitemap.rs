//! Sitemap generation.
//!
//! Merges collections into one list of URLs, newest document first, behind
//! an entry for the site root.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com</loc>
//!     <lastmod>2025-01-01T08:00:00+08:00</lastmod>
//!   </url>
//! </urlset>
//! ```
//!
//! Every `lastmod` is the generation time, not the document's own date.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::content::{Collection, Document};
use crate::helpers::{date_xml, encode_url, full_url};

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Single URL entry in the sitemap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapEntry {
    /// Full URL location
    pub url: String,
    /// Time the sitemap was generated
    pub last_modified: DateTime<FixedOffset>,
}

/// Build the ordered sitemap entries for `collections`
pub fn build_sitemap<'a>(
    base_url: &str,
    collections: impl IntoIterator<Item = &'a Collection>,
    generated_at: DateTime<FixedOffset>,
) -> Vec<SitemapEntry> {
    let base_url = base_url.trim_end_matches('/');

    let mut documents: Vec<&Document> = collections.into_iter().flat_map(|c| c.iter()).collect();
    documents.sort_by(|a, b| a.cmp_recency(b));

    std::iter::once(base_url.to_string())
        .chain(documents.into_iter().map(|doc| full_url(base_url, &doc.url)))
        .map(|url| SitemapEntry {
            url,
            last_modified: generated_at,
        })
        .collect()
}

/// Generate sitemap XML string.
pub fn to_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 96);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{}">"#, SITEMAP_NS));
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&encode_url(&entry.url))
        ));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            date_xml(&entry.last_modified)
        ));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
