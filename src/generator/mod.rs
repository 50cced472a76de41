//! Generator module - writes the data the page layer renders from
//!
//! Output layout under the public directory:
//!
//! - `sitemap.xml`
//! - `routes.json` - every static route
//! - `data/home.json` - teaser lists per kind
//! - `data/{kind}.json` - full ordered listing
//! - `data/{kind}/{slug}.json` - one document with its compiled body

pub mod sitemap;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::content::{Document, Kind, Library, ListOptions, Neighbors};
use crate::routes::{static_routes, Route};
use crate::Site;

pub use sitemap::{build_sitemap, SitemapEntry};

/// Directory under the public directory holding JSON data
pub const DATA_DIR: &str = "data";

/// Writes build output for a loaded library
pub struct Generator<'a> {
    site: &'a Site,
}

fn no_tags(tags: &&[String]) -> bool {
    tags.is_empty()
}

/// Summary of a document for listings
#[derive(Debug, Serialize)]
pub struct ListItem<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "no_tags")]
    pub tags: &'a [String],
    pub slug: &'a str,
    pub url: &'a str,
}

impl<'a> From<&'a Document> for ListItem<'a> {
    fn from(doc: &'a Document) -> Self {
        Self {
            title: &doc.title,
            date: &doc.date_raw,
            description: &doc.description,
            tags: &doc.tags,
            slug: &doc.slug,
            url: &doc.url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListingData<'a> {
    pub kind: Kind,
    pub title: &'static str,
    pub url: String,
    pub documents: Vec<ListItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct HomeSection<'a> {
    pub title: &'static str,
    pub url: String,
    pub documents: Vec<ListItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct HomeData<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub sections: IndexMap<Kind, HomeSection<'a>>,
}

#[derive(Debug, Serialize)]
pub struct NavLink<'a> {
    pub title: &'a str,
    pub url: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DetailData<'a> {
    pub kind: Kind,
    pub title: &'a str,
    pub page_title: String,
    pub date: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "no_tags")]
    pub tags: &'a [String],
    pub url: &'a str,
    pub html: &'a str,
    pub prev: Option<NavLink<'a>>,
    pub next: Option<NavLink<'a>>,
}

impl<'a> DetailData<'a> {
    fn new(doc: &'a Document, neighbors: Neighbors<'a>) -> Self {
        let link = |d: &'a Document| NavLink {
            title: &d.title,
            url: &d.url,
        };
        Self {
            kind: doc.kind,
            title: &doc.title,
            page_title: doc.page_title(),
            date: &doc.date_raw,
            description: &doc.description,
            tags: &doc.tags,
            url: &doc.url,
            html: &doc.body.html,
            prev: neighbors.prev.map(link),
            next: neighbors.next.map(link),
        }
    }
}

#[derive(Debug, Serialize)]
struct RouteManifest {
    generated_at: DateTime<FixedOffset>,
    routes: Vec<String>,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Write every output file
    pub fn generate(&self, library: &Library, generated_at: DateTime<FixedOffset>) -> Result<()> {
        let public_dir = &self.site.public_dir;
        let data_dir = public_dir.join(DATA_DIR);

        // Slugs may have disappeared since the last build
        if data_dir.exists() {
            fs::remove_dir_all(&data_dir)
                .with_context(|| format!("Failed to clear {}", data_dir.display()))?;
        }
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;

        self.generate_home(library, &data_dir)?;

        for collection in library.collections() {
            let kind = collection.kind();
            let ordered = collection.list(ListOptions::default());

            let listing = ListingData {
                kind,
                title: kind.spec().listing_title,
                url: kind.spec().listing_url(),
                documents: ordered.iter().map(|d| ListItem::from(*d)).collect(),
            };
            write_json(&data_dir.join(format!("{}.json", kind)), &listing)?;

            let kind_dir = data_dir.join(kind.path());
            fs::create_dir_all(&kind_dir)
                .with_context(|| format!("Failed to create {}", kind_dir.display()))?;

            for (i, doc) in ordered.iter().copied().enumerate() {
                let neighbors = Neighbors {
                    prev: i.checked_sub(1).map(|p| ordered[p]),
                    next: ordered.get(i + 1).copied(),
                };
                let detail = DetailData::new(doc, neighbors);
                write_json(&kind_dir.join(format!("{}.json", doc.slug)), &detail)?;
            }

            tracing::debug!("Generated {} {} page(s)", ordered.len(), kind);
        }

        self.generate_routes(library, generated_at)?;

        if self.site.config.sitemap.enable {
            self.generate_sitemap(library, generated_at)?;
        }

        Ok(())
    }

    fn generate_home(&self, library: &Library, data_dir: &Path) -> Result<()> {
        let sections = library
            .home(&self.site.config.home)
            .into_iter()
            .map(|(kind, docs)| {
                let section = HomeSection {
                    title: kind.spec().listing_title,
                    url: kind.spec().listing_url(),
                    documents: docs.into_iter().map(ListItem::from).collect(),
                };
                (kind, section)
            })
            .collect();

        let home = HomeData {
            title: &self.site.config.title,
            description: &self.site.config.description,
            sections,
        };
        write_json(&data_dir.join("home.json"), &home)
    }

    fn generate_routes(&self, library: &Library, generated_at: DateTime<FixedOffset>) -> Result<()> {
        let mut routes: Vec<String> = static_routes(library, None)
            .iter()
            .map(Route::path)
            .collect();
        if self.site.config.sitemap.enable {
            routes.push(Route::Sitemap.path());
        }

        let manifest = RouteManifest {
            generated_at,
            routes,
        };
        write_json(&self.site.public_dir.join("routes.json"), &manifest)?;
        tracing::info!("Generated routes.json ({} routes)", manifest.routes.len());
        Ok(())
    }

    /// Entries for the configured kinds
    pub fn sitemap_entries(
        &self,
        library: &Library,
        generated_at: DateTime<FixedOffset>,
    ) -> Vec<SitemapEntry> {
        let kinds = &self.site.config.sitemap.kinds;
        let collections = Kind::ALL
            .into_iter()
            .filter(|k| kinds.contains(k))
            .map(|k| library.collection(k));
        build_sitemap(&self.site.config.url, collections, generated_at)
    }

    fn generate_sitemap(&self, library: &Library, generated_at: DateTime<FixedOffset>) -> Result<()> {
        let entries = self.sitemap_entries(library, generated_at);
        let xml = sitemap::to_xml(&entries);

        let sitemap_path = self.site.public_dir.join(&self.site.config.sitemap.path);
        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&sitemap_path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        tracing::info!("Generated {} ({} urls)", self.site.config.sitemap.path, entries.len());
        Ok(())
    }
}

/// Write pretty JSON to `path`
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
