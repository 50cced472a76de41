//! Content kinds and their schemas

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Source file extension for every kind
pub const MARKDOWN_EXT: &str = "md";

/// A content category. Determines the schema and the URL prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Blog,
    #[serde(rename = "notes", alias = "note")]
    Note,
    Learning,
}

impl Kind {
    /// Every kind, in home page order
    pub const ALL: [Kind; 3] = [Kind::Blog, Kind::Note, Kind::Learning];

    /// The schema for this kind
    pub fn spec(self) -> &'static KindSpec {
        match self {
            Kind::Blog => &BLOG,
            Kind::Note => &NOTE,
            Kind::Learning => &LEARNING,
        }
    }

    /// Path segment used both as content subdirectory and URL prefix
    pub fn path(self) -> &'static str {
        self.spec().dir
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Kind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('/') {
            "blog" | "blogs" => Ok(Kind::Blog),
            "notes" | "note" => Ok(Kind::Note),
            "learning" | "learnings" => Ok(Kind::Learning),
            other => anyhow::bail!("Unknown kind: {}. Available: blog, notes, learning", other),
        }
    }
}

/// Schema and derived-field rules for one kind
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    pub kind: Kind,
    /// Subdirectory of the content directory, also the URL prefix
    pub dir: &'static str,
    /// Glob matched against paths relative to the content directory
    pub pattern: &'static str,
    /// Front-matter fields that must be present
    pub required: &'static [Field],
    /// Whether `tags` is part of the schema
    pub has_tags: bool,
    /// Heading of the listing page
    pub listing_title: &'static str,
    /// Appended to a document title for its detail page
    pub detail_title_suffix: &'static str,
}

/// A front-matter field a kind can require
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Must also be non-blank
    Title,
    Date,
    /// May be empty
    Description,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Date => "date",
            Field::Description => "description",
        }
    }
}

const REQUIRED_FIELDS: &[Field] = &[Field::Title, Field::Date, Field::Description];

static BLOG: KindSpec = KindSpec {
    kind: Kind::Blog,
    dir: "blog",
    pattern: "blog/**/*.md",
    required: REQUIRED_FIELDS,
    has_tags: true,
    listing_title: "Blog",
    detail_title_suffix: " - blog",
};

static NOTE: KindSpec = KindSpec {
    kind: Kind::Note,
    dir: "notes",
    pattern: "notes/**/*.md",
    required: REQUIRED_FIELDS,
    has_tags: false,
    listing_title: "Life",
    detail_title_suffix: " - notes for life",
};

static LEARNING: KindSpec = KindSpec {
    kind: Kind::Learning,
    dir: "learning",
    pattern: "learning/**/*.md",
    required: REQUIRED_FIELDS,
    has_tags: false,
    listing_title: "Learning",
    detail_title_suffix: " - books for learning",
};

impl KindSpec {
    /// Slug from the source file name: the base name with `.md` stripped
    pub fn slug(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        let slug = name
            .strip_suffix(&format!(".{}", MARKDOWN_EXT))
            .unwrap_or(name);
        if slug.is_empty() {
            None
        } else {
            Some(slug.to_string())
        }
    }

    /// Canonical site path of a document
    pub fn url(&self, slug: &str) -> String {
        format!("/{}/{}", self.dir, slug)
    }

    /// Listing page path
    pub fn listing_url(&self) -> String {
        format!("/{}", self.dir)
    }

    /// Whether a path relative to the content directory belongs to this kind
    pub fn matches(&self, relative: &Path) -> bool {
        let options = glob::MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        glob::Pattern::new(self.pattern)
            .map(|p| p.matches_path_with(relative, options))
            .unwrap_or(false)
    }
}
