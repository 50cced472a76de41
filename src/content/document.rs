//! Document model

use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Ordering;

use super::Kind;

/// One content entry of a given kind
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Content kind
    pub kind: Kind,

    /// Document title, never empty
    pub title: String,

    /// Parsed date, used for ordering
    pub date: NaiveDateTime,

    /// Date exactly as written in the front-matter
    pub date_raw: String,

    /// Short summary shown in listings
    pub description: String,

    /// Tags (blog only)
    pub tags: Vec<String>,

    /// Source file base name without extension
    pub slug: String,

    /// Site path, `/{kind}/{slug}`
    pub url: String,

    /// Source file path relative to the content directory
    pub source: String,

    /// Compiled body
    pub body: Body,
}

/// Markdown body and its compiled HTML
#[derive(Debug, Clone, Default, Serialize)]
pub struct Body {
    pub raw: String,
    pub html: String,
}

impl Document {
    /// Newest first; equal dates fall back to slug, then url
    pub fn cmp_recency(&self, other: &Document) -> Ordering {
        other
            .date
            .cmp(&self.date)
            .then_with(|| self.slug.cmp(&other.slug))
            .then_with(|| self.url.cmp(&other.url))
    }

    /// Title used for the detail page
    pub fn page_title(&self) -> String {
        format!("{}{}", self.title, self.kind.spec().detail_title_suffix)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::helpers::date::parse_date_string;

    /// Build a document with derived fields filled in
    pub fn doc(kind: Kind, slug: &str, date: &str) -> Document {
        let spec = kind.spec();
        Document {
            kind,
            title: format!("Title {}", slug),
            date: parse_date_string(date).expect("fixture date"),
            date_raw: date.to_string(),
            description: format!("About {}", slug),
            tags: Vec::new(),
            slug: slug.to_string(),
            url: spec.url(slug),
            source: format!("{}/{}.md", spec.dir, slug),
            body: Body::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::doc;
    use super::*;

    #[test]
    fn test_cmp_recency_newest_first() {
        let old = doc(Kind::Blog, "old", "2023-05-01");
        let new = doc(Kind::Blog, "new", "2024-05-01");
        assert_eq!(new.cmp_recency(&old), Ordering::Less);
        assert_eq!(old.cmp_recency(&new), Ordering::Greater);
    }

    #[test]
    fn test_cmp_recency_tie_breaks() {
        let a = doc(Kind::Blog, "a", "2024-01-01");
        let c = doc(Kind::Blog, "c", "2024-01-01");
        assert_eq!(a.cmp_recency(&c), Ordering::Less);

        let blog = doc(Kind::Blog, "same", "2024-01-01");
        let note = doc(Kind::Note, "same", "2024-01-01");
        assert_eq!(blog.cmp_recency(&note), Ordering::Less);
        assert_eq!(blog.cmp_recency(&blog.clone()), Ordering::Equal);
    }

    #[test]
    fn test_time_of_day_orders_same_day() {
        let morning = doc(Kind::Note, "z-morning", "2024-01-01 08:00:00");
        let evening = doc(Kind::Note, "a-evening", "2024-01-01 20:00:00");
        assert_eq!(evening.cmp_recency(&morning), Ordering::Less);
    }

    #[test]
    fn test_page_title() {
        let note = doc(Kind::Note, "walk", "2024-01-01");
        assert_eq!(note.page_title(), "Title walk - notes for life");
    }
}
