//! Site routes: static route enumeration and path resolution

use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use std::fmt;

use crate::config::SiteConfig;
use crate::content::{Document, Kind, Library, ListOptions, Neighbors};
use crate::error::NotFound;
use crate::helpers::encode_path;

/// Sitemap resource path
pub const SITEMAP_PATH: &str = "/sitemap.xml";

/// A page of the generated site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Route {
    Home,
    Listing { kind: Kind },
    Detail { kind: Kind, slug: String },
    Sitemap,
}

impl Route {
    /// Classify a request path. `None` if no route has this shape.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = path.trim_matches('/');

        if path.is_empty() {
            return Some(Route::Home);
        }
        if path == SITEMAP_PATH.trim_start_matches('/') {
            return Some(Route::Sitemap);
        }

        let mut segments = path.split('/');
        let kind_segment = segments.next()?;
        let kind = Kind::ALL.into_iter().find(|k| k.path() == kind_segment)?;

        match (segments.next(), segments.next()) {
            (None, _) => Some(Route::Listing { kind }),
            (Some(slug), None) if !slug.is_empty() => {
                let slug = percent_decode_str(slug).decode_utf8().ok()?.into_owned();
                Some(Route::Detail { kind, slug })
            }
            _ => None,
        }
    }

    /// Site path of this route
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Listing { kind } => kind.spec().listing_url(),
            Route::Detail { kind, slug } => kind.spec().url(slug),
            Route::Sitemap => SITEMAP_PATH.to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Every page to pre-render: home, then per kind its listing and details
///
/// With `only` set, just that kind's listing and details.
pub fn static_routes(library: &Library, only: Option<Kind>) -> Vec<Route> {
    let mut routes = Vec::new();
    if only.is_none() {
        routes.push(Route::Home);
    }

    for kind in Kind::ALL.into_iter().filter(|k| only.map_or(true, |o| o == *k)) {
        routes.push(Route::Listing { kind });
        routes.extend(
            library
                .collection(kind)
                .slugs()
                .into_iter()
                .map(|slug| Route::Detail { kind, slug }),
        );
    }

    routes
}

/// What a route renders to
#[derive(Debug)]
pub enum Page<'a> {
    Home(IndexMap<Kind, Vec<&'a Document>>),
    Listing {
        kind: Kind,
        documents: Vec<&'a Document>,
    },
    Detail {
        document: &'a Document,
        neighbors: Neighbors<'a>,
    },
    Sitemap,
    NotFound {
        path: String,
    },
}

impl<'a> Page<'a> {
    /// Resolve a request path against the loaded library
    pub fn for_path(library: &'a Library, config: &SiteConfig, path: &str) -> Page<'a> {
        match Route::parse(path) {
            Some(route) => Page::resolve(library, config, &route),
            None => Page::NotFound {
                path: path.to_string(),
            },
        }
    }

    /// Resolve a route against the loaded library
    pub fn resolve(library: &'a Library, config: &SiteConfig, route: &Route) -> Page<'a> {
        match route {
            Route::Home => Page::Home(library.home(&config.home)),
            Route::Listing { kind } => Page::Listing {
                kind: *kind,
                documents: library.collection(*kind).list(ListOptions::default()),
            },
            Route::Detail { kind, slug } => match Self::detail(library, *kind, slug) {
                Ok(page) => page,
                Err(e) => {
                    tracing::debug!("{}", e);
                    Page::NotFound {
                        path: encode_path(&route.path()),
                    }
                }
            },
            Route::Sitemap if config.sitemap.enable => Page::Sitemap,
            Route::Sitemap => Page::NotFound {
                path: route.path(),
            },
        }
    }

    fn detail(library: &'a Library, kind: Kind, slug: &str) -> Result<Page<'a>, NotFound> {
        let collection = library.collection(kind);
        let document = collection.resolve(slug)?;
        let neighbors = collection.neighbors(slug)?;
        Ok(Page::Detail {
            document,
            neighbors,
        })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Page::NotFound { .. })
    }
}
