//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::content::{Kind, Library, ListOptions};
use crate::helpers::format_date;
use crate::Site;

/// List documents of one kind, or of every kind, newest first
pub fn run(site: &Site, kind: Option<Kind>, limit: Option<usize>) -> Result<()> {
    let library = site.load()?;
    print!("{}", render(site, &library, kind, limit));
    Ok(())
}

/// Text listing, one block per kind
pub fn render(site: &Site, library: &Library, kind: Option<Kind>, limit: Option<usize>) -> String {
    let kinds: Vec<Kind> = match kind {
        Some(kind) => vec![kind],
        None => Kind::ALL.to_vec(),
    };

    let mut out = String::new();
    for kind in kinds {
        let collection = library.collection(kind);
        let documents = collection.list(ListOptions { limit });

        let _ = writeln!(
            out,
            "{} ({}/{}):",
            kind.spec().listing_title,
            documents.len(),
            collection.len()
        );
        for doc in documents {
            let _ = write!(
                out,
                "  {} - {} [{}]",
                format_date(&doc.date, &site.config.date_format),
                doc.title,
                doc.source
            );
            if !doc.tags.is_empty() {
                let _ = write!(out, " #{}", doc.tags.join(" #"));
            }
            out.push('\n');
        }
    }
    out
}
