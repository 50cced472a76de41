//! All loaded collections of one build

use indexmap::IndexMap;

use super::{Collection, Document, Kind, ListOptions};
use crate::config::HomeConfig;
use crate::error::NotFound;

/// The read-only content of a build, one collection per kind
///
/// Constructing a `Library` completes the load phase; every query runs
/// against a fully loaded snapshot.
#[derive(Debug, Clone)]
pub struct Library {
    blog: Collection,
    notes: Collection,
    learning: Collection,
}

impl Library {
    pub fn new(blog: Collection, notes: Collection, learning: Collection) -> Self {
        debug_assert_eq!(blog.kind(), Kind::Blog);
        debug_assert_eq!(notes.kind(), Kind::Note);
        debug_assert_eq!(learning.kind(), Kind::Learning);
        Self {
            blog,
            notes,
            learning,
        }
    }

    /// Build from collections in any order; missing kinds are empty
    pub fn from_collections(collections: impl IntoIterator<Item = Collection>) -> Self {
        let mut library = Self::new(
            Collection::empty(Kind::Blog),
            Collection::empty(Kind::Note),
            Collection::empty(Kind::Learning),
        );
        for collection in collections {
            match collection.kind() {
                Kind::Blog => library.blog = collection,
                Kind::Note => library.notes = collection,
                Kind::Learning => library.learning = collection,
            }
        }
        library
    }

    pub fn collection(&self, kind: Kind) -> &Collection {
        match kind {
            Kind::Blog => &self.blog,
            Kind::Note => &self.notes,
            Kind::Learning => &self.learning,
        }
    }

    /// Collections in [`Kind::ALL`] order
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        Kind::ALL.into_iter().map(move |kind| self.collection(kind))
    }

    /// Total number of documents
    pub fn len(&self) -> usize {
        self.collections().map(Collection::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn resolve(&self, kind: Kind, slug: &str) -> Result<&Document, NotFound> {
        self.collection(kind).resolve(slug)
    }

    /// Teaser lists for the home page, in home page order
    pub fn home(&self, config: &HomeConfig) -> IndexMap<Kind, Vec<&Document>> {
        Kind::ALL
            .into_iter()
            .map(|kind| {
                let options = ListOptions {
                    limit: config.limit(kind),
                };
                (kind, self.collection(kind).list(options))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::fixtures::doc;
    use std::collections::HashMap;

    fn library() -> Library {
        let blog = (1..=8)
            .map(|i| doc(Kind::Blog, &format!("post-{}", i), &format!("2024-01-{:02}", i)))
            .collect();
        let notes = vec![
            doc(Kind::Note, "n1", "2023-01-01"),
            doc(Kind::Note, "n2", "2023-02-01"),
        ];
        Library::from_collections([
            Collection::new(Kind::Note, notes),
            Collection::new(Kind::Blog, blog),
        ])
    }

    #[test]
    fn test_from_collections_fills_missing_kinds() {
        let lib = library();
        assert_eq!(lib.collection(Kind::Blog).len(), 8);
        assert_eq!(lib.collection(Kind::Note).len(), 2);
        assert!(lib.collection(Kind::Learning).is_empty());
        assert_eq!(lib.len(), 10);
    }

    #[test]
    fn test_home_teasers() {
        let lib = library();
        let home = lib.home(&HomeConfig::default());

        let kinds: Vec<_> = home.keys().copied().collect();
        assert_eq!(kinds, Kind::ALL.to_vec());
        assert_eq!(home[&Kind::Blog].len(), 6);
        assert_eq!(home[&Kind::Blog][0].slug, "post-8");
        assert_eq!(home[&Kind::Note].len(), 2);
        assert_eq!(home[&Kind::Note][0].slug, "n2");
        assert!(home[&Kind::Learning].is_empty());
    }

    #[test]
    fn test_home_without_limit_lists_all() {
        let lib = library();
        let config = HomeConfig {
            limits: HashMap::new(),
        };
        assert_eq!(lib.home(&config)[&Kind::Blog].len(), 8);
    }

    #[test]
    fn test_resolve_by_kind() {
        let lib = library();
        assert!(lib.resolve(Kind::Note, "n1").is_ok());
        assert!(lib.resolve(Kind::Blog, "n1").is_err());
    }
}
