//! Show a single document

use anyhow::Result;
use std::fmt::Write;

use crate::content::{Kind, Library};
use crate::error::NotFound;
use crate::Site;

/// Print one document; a missing slug is an error
pub fn run(site: &Site, kind: Kind, slug: &str) -> Result<()> {
    let library = site.load()?;
    print!("{}", render(&library, kind, slug)?);
    Ok(())
}

pub fn render(library: &Library, kind: Kind, slug: &str) -> Result<String, NotFound> {
    let collection = library.collection(kind);
    let doc = collection.resolve(slug)?;
    let neighbors = collection.neighbors(slug)?;

    let mut out = String::new();
    let _ = writeln!(out, "{}", doc.page_title());
    let _ = writeln!(out, "  date:        {}", doc.date_raw);
    let _ = writeln!(out, "  url:         {}", doc.url);
    let _ = writeln!(out, "  source:      {}", doc.source);
    let _ = writeln!(out, "  description: {}", doc.description);
    if !doc.tags.is_empty() {
        let _ = writeln!(out, "  tags:        {}", doc.tags.join(", "));
    }
    if let Some(prev) = neighbors.prev {
        let _ = writeln!(out, "  newer:       {}", prev.url);
    }
    if let Some(next) = neighbors.next {
        let _ = writeln!(out, "  older:       {}", next.url);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::fixtures::doc;
    use crate::content::Collection;

    fn library() -> Library {
        Library::from_collections([Collection::new(
            Kind::Learning,
            vec![
                doc(Kind::Learning, "first", "2023-01-01"),
                doc(Kind::Learning, "second", "2024-01-01"),
            ],
        )])
    }

    #[test]
    fn test_render_document() {
        let out = render(&library(), Kind::Learning, "first").unwrap();
        assert!(out.starts_with("Title first - books for learning\n"));
        assert!(out.contains("  url:         /learning/first\n"));
        assert!(out.contains("  newer:       /learning/second\n"));
        assert!(!out.contains("older:"));
    }

    #[test]
    fn test_render_missing() {
        let err = render(&library(), Kind::Learning, "third").unwrap_err();
        assert_eq!(err.slug, "third");
        assert!(render(&library(), Kind::Blog, "first").is_err());
    }
}
