//! Immutable per-kind collections: listing and detail lookup

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::{Document, Kind};
use crate::error::NotFound;

/// Options for [`Collection::list`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Keep only the first `limit` documents
    pub limit: Option<usize>,
}

impl ListOptions {
    pub fn limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

/// Every loaded document of one kind
///
/// Cloning is cheap and shares the documents.
#[derive(Debug, Clone)]
pub struct Collection {
    kind: Kind,
    documents: Arc<[Document]>,
    by_slug: Arc<HashMap<String, usize>>,
}

/// A document's neighbours in listing order
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbors<'a> {
    /// The next newer document
    pub prev: Option<&'a Document>,
    /// The next older document
    pub next: Option<&'a Document>,
}

impl Collection {
    /// Build a collection. Slugs must already be unique.
    pub fn new(kind: Kind, documents: Vec<Document>) -> Self {
        debug_assert!(documents.iter().all(|d| d.kind == kind));
        let by_slug = documents
            .iter()
            .enumerate()
            .map(|(i, d)| (d.slug.clone(), i))
            .collect::<HashMap<_, _>>();
        debug_assert_eq!(by_slug.len(), documents.len(), "duplicate slug");

        Self {
            kind,
            documents: documents.into(),
            by_slug: Arc::new(by_slug),
        }
    }

    /// An empty collection
    pub fn empty(kind: Kind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in load order
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// Documents newest first, optionally truncated
    pub fn list(&self, options: ListOptions) -> Vec<&Document> {
        let mut ordered: Vec<&Document> = self.documents.iter().collect();
        ordered.sort_by(|a, b| a.cmp_recency(b));
        if let Some(limit) = options.limit {
            ordered.truncate(limit);
        }
        ordered
    }

    /// The document with exactly this slug
    pub fn resolve(&self, slug: &str) -> Result<&Document, NotFound> {
        self.by_slug
            .get(slug)
            .map(|&i| &self.documents[i])
            .ok_or_else(|| NotFound {
                kind: self.kind,
                slug: slug.to_string(),
            })
    }

    /// Every valid slug, for static route enumeration
    pub fn slugs(&self) -> BTreeSet<String> {
        self.documents.iter().map(|d| d.slug.clone()).collect()
    }

    /// Previous and next documents around `slug` in listing order
    pub fn neighbors(&self, slug: &str) -> Result<Neighbors<'_>, NotFound> {
        let target = self.resolve(slug)?;
        let ordered = self.list(ListOptions::default());
        let Some(pos) = ordered.iter().position(|d| std::ptr::eq(*d, target)) else {
            return Ok(Neighbors::default());
        };
        Ok(Neighbors {
            prev: pos.checked_sub(1).map(|i| ordered[i]),
            next: ordered.get(pos + 1).copied(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::fixtures::doc;

    fn scenario() -> Collection {
        Collection::new(
            Kind::Blog,
            vec![
                doc(Kind::Blog, "a", "2024-01-01"),
                doc(Kind::Blog, "b", "2024-03-01"),
                doc(Kind::Blog, "c", "2024-01-01"),
            ],
        )
    }

    fn slugs(docs: &[&Document]) -> Vec<String> {
        docs.iter().map(|d| d.slug.clone()).collect()
    }

    #[test]
    fn test_list_orders_by_date_then_slug() {
        let c = scenario();
        assert_eq!(slugs(&c.list(ListOptions::default())), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_list_keeps_everything_without_limit() {
        let c = scenario();
        assert_eq!(c.list(ListOptions::default()).len(), c.len());
    }

    #[test]
    fn test_list_limit() {
        let c = scenario();
        for n in 0..6 {
            assert_eq!(c.list(ListOptions::limit(n)).len(), n.min(c.len()));
        }
        assert_eq!(slugs(&c.list(ListOptions::limit(2))), vec!["b", "a"]);
    }

    #[test]
    fn test_list_is_sorted_and_deterministic() {
        let c = Collection::new(
            Kind::Note,
            vec![
                doc(Kind::Note, "m", "2022-06-01"),
                doc(Kind::Note, "x", "2024-02-02"),
                doc(Kind::Note, "d", "2024-02-02"),
                doc(Kind::Note, "q", "2021-12-31"),
                doc(Kind::Note, "b", "2024-02-02 09:00:00"),
            ],
        );
        let first = c.list(ListOptions::default());
        for pair in first.windows(2) {
            assert!(pair[0].date >= pair[1].date);
            if pair[0].date == pair[1].date {
                assert!(pair[0].slug <= pair[1].slug);
            }
        }
        assert_eq!(slugs(&first), slugs(&c.list(ListOptions::default())));
        assert_eq!(slugs(&first), vec!["b", "d", "x", "m", "q"]);
    }

    #[test]
    fn test_list_does_not_reorder_collection() {
        let c = scenario();
        let _ = c.list(ListOptions::default());
        let load_order: Vec<_> = c.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(load_order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_collection() {
        let c = Collection::empty(Kind::Learning);
        assert!(c.is_empty());
        assert!(c.list(ListOptions::default()).is_empty());
        assert!(c.list(ListOptions::limit(3)).is_empty());
        assert!(c.slugs().is_empty());
    }

    #[test]
    fn test_resolve_every_slug() {
        let c = scenario();
        for d in c.iter() {
            let found = c.resolve(&d.slug).unwrap();
            assert_eq!(found.url, d.url);
        }
    }

    #[test]
    fn test_resolve_miss_is_not_found() {
        let c = scenario();
        let err = c.resolve("nonexistent-slug").unwrap_err();
        assert_eq!(
            err,
            NotFound {
                kind: Kind::Blog,
                slug: "nonexistent-slug".to_string()
            }
        );
        // exact match only
        assert!(c.resolve("A").is_err());
    }

    #[test]
    fn test_slugs() {
        let c = scenario();
        let all: Vec<_> = c.slugs().into_iter().collect();
        assert_eq!(all, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_neighbors() {
        let c = scenario();
        let n = c.neighbors("a").unwrap();
        assert_eq!(n.prev.map(|d| d.slug.as_str()), Some("b"));
        assert_eq!(n.next.map(|d| d.slug.as_str()), Some("c"));

        let first = c.neighbors("b").unwrap();
        assert!(first.prev.is_none());
        let last = c.neighbors("c").unwrap();
        assert!(last.next.is_none());

        assert!(c.neighbors("zzz").is_err());
    }
}
