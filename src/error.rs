//! Error types for content loading and lookup

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::content::Kind;

/// A single source file that could not become a document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("{}: failed to read file: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: invalid front-matter: {message}", .path.display())]
    FrontMatter { path: PathBuf, message: String },

    #[error("{}: missing required field `{field}`", .path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{}: file name does not yield a slug", .path.display())]
    InvalidSlug { path: PathBuf },

    #[error("{}: unparseable date `{value}`", .path.display())]
    InvalidDate { path: PathBuf, value: String },

    #[error("{}: duplicate slug `{slug}` (already used by {})", .path.display(), .first.display())]
    DuplicateSlug {
        path: PathBuf,
        slug: String,
        first: PathBuf,
    },

    #[error("{}: failed to compile body: {message}", .path.display())]
    Body { path: PathBuf, message: String },
}

impl DocumentError {
    /// Path of the offending source file
    pub fn path(&self) -> &PathBuf {
        match self {
            DocumentError::Io { path, .. }
            | DocumentError::FrontMatter { path, .. }
            | DocumentError::MissingField { path, .. }
            | DocumentError::InvalidSlug { path }
            | DocumentError::InvalidDate { path, .. }
            | DocumentError::DuplicateSlug { path, .. }
            | DocumentError::Body { path, .. } => path,
        }
    }
}

/// Load failure carrying every document that failed validation
#[derive(Debug)]
pub struct LoadError {
    pub failures: Vec<DocumentError>,
}

impl LoadError {
    pub fn new(failures: Vec<DocumentError>) -> Self {
        Self { failures }
    }

    /// Fold several load results into one report
    pub fn merge(errors: impl IntoIterator<Item = LoadError>) -> Option<LoadError> {
        let failures: Vec<_> = errors.into_iter().flat_map(|e| e.failures).collect();
        if failures.is_empty() {
            None
        } else {
            Some(LoadError { failures })
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} document(s) failed to load", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {}

/// No document of `kind` has `slug`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no {kind} document with slug `{slug}`")]
pub struct NotFound {
    pub kind: Kind,
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_lists_every_failure() {
        let err = LoadError::new(vec![
            DocumentError::MissingField {
                path: PathBuf::from("blog/a.md"),
                field: "title",
            },
            DocumentError::InvalidDate {
                path: PathBuf::from("blog/b.md"),
                value: "yesterday".to_string(),
            },
        ]);

        let message = err.to_string();
        assert!(message.starts_with("2 document(s) failed to load"));
        assert!(message.contains("blog/a.md: missing required field `title`"));
        assert!(message.contains("blog/b.md: unparseable date `yesterday`"));
    }

    #[test]
    fn test_merge_skips_empty() {
        assert!(LoadError::merge(Vec::new()).is_none());

        let merged = LoadError::merge(vec![
            LoadError::new(vec![DocumentError::MissingField {
                path: PathBuf::from("notes/x.md"),
                field: "date",
            }]),
            LoadError::new(Vec::new()),
        ])
        .unwrap();
        assert_eq!(merged.failures.len(), 1);
        assert_eq!(merged.failures[0].path(), &PathBuf::from("notes/x.md"));
    }

    #[test]
    fn test_not_found_message() {
        let err = NotFound {
            kind: Kind::Note,
            slug: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "no notes document with slug `missing`");
    }
}
