//! Content module - kinds, documents, loading and querying collections

mod collection;
pub(crate) mod document;
mod frontmatter;
mod kind;
mod library;
pub mod loader;
mod markdown;

pub use collection::{Collection, ListOptions, Neighbors};
pub use document::{Body, Document};
pub use frontmatter::FrontMatter;
pub use kind::{Field, Kind, KindSpec};
pub use library::Library;
pub use markdown::MarkdownRenderer;
